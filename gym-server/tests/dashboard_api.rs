mod common;

use chrono::{Duration, Local};
use common::{TestApp, member_json, png_data_url};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn dashboard_counts_members() {
    let app = TestApp::unlocked().await;
    let today = Local::now().date_naive();

    for (name, days) in [("Ten", 10), ("Three", 3), ("Gone", -1)] {
        let mut payload = member_json(name, &today.to_string());
        payload["end_date"] = json!((today + Duration::days(days)).to_string());
        app.send("POST", "/api/members", Some(payload)).await;
    }
    app.send("POST", "/api/members/1/attendance", None).await;

    let (status, body) = app.get("/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);

    let stats = &body["stats"];
    // wider than `active`: the expiring-soon member is included
    assert_eq!(stats["total_active"], 2);
    assert_eq!(stats["active"], 1);
    assert_eq!(stats["expiring_soon"], 1);
    assert_eq!(stats["present"], 1);

    let hourly = body["hourly_visits"].as_array().unwrap();
    assert_eq!(hourly.len(), 24);
    let visits: u64 = hourly.iter().map(|b| b["count"].as_u64().unwrap()).sum();
    assert_eq!(visits, 1);

    let daily = body["daily_joins"].as_array().unwrap();
    assert_eq!(daily.len(), 7);
    assert_eq!(daily[6]["count"], 3);

    let countdown = &body["time_until_close"];
    assert_eq!(countdown["hours"].as_str().unwrap().len(), 2);
    assert_eq!(countdown["display"].as_str().unwrap().len(), 8);
    assert_eq!(body["closing_time"], "23:00");
}

#[tokio::test]
async fn crop_endpoint_returns_jpeg() {
    let app = TestApp::unlocked().await;

    let (status, body) = app
        .send(
            "POST",
            "/api/images/crop",
            Some(json!({
                "image": png_data_url(80, 40),
                "crop": { "x": 10.0, "y": 0.0, "width": 20.0, "height": 20.0 },
                "displayed_width": 40.0,
                "displayed_height": 20.0,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["image"].as_str().unwrap().starts_with("data:image/jpeg;base64,"));
    assert_eq!(body["width"], 20);
    assert_eq!(body["height"], 20);
    assert_eq!(body["circular"], true);
}

#[tokio::test]
async fn crop_failure_is_reported() {
    let app = TestApp::unlocked().await;

    let (status, body) = app
        .send(
            "POST",
            "/api/images/crop",
            Some(json!({
                "image": png_data_url(8, 8),
                "crop": { "x": 0.0, "y": 0.0, "width": 0.0, "height": 0.0 },
                "displayed_width": 8.0,
                "displayed_height": 8.0,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4003);
}
