mod common;

use axum::body::Body;
use common::TestApp;
use http::{Request, StatusCode};
use tower::ServiceExt;

#[tokio::test]
async fn event_stream_requires_unlock() {
    let app = TestApp::new();
    let (status, _) = app.get("/api/events").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn event_stream_subscribes_to_bus() {
    let app = TestApp::unlocked().await;

    let request = Request::builder()
        .uri("/api/events")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[http::header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));
    assert_eq!(app.state.message_bus.subscriber_count(), 1);
}
