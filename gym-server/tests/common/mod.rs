#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use gym_server::core::StoreBackend;
use gym_server::{Config, ServerState, services::build_app};

pub struct TestApp {
    pub state: ServerState,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let state = ServerState::in_memory(Config::default()).unwrap();
        let router = build_app(state.clone());
        Self { state, router }
    }

    /// SQLite + redb stores under `work_dir`
    pub async fn on_disk(work_dir: &std::path::Path) -> Self {
        let mut config = Config::with_overrides(work_dir.to_string_lossy(), 0);
        config.store_backend = StoreBackend::Sqlite;
        let state = ServerState::initialize(&config).await.unwrap();
        let router = build_app(state.clone());
        Self { state, router }
    }

    /// App with the gate already open
    pub async fn unlocked() -> Self {
        let app = Self::new();
        let (status, _) = app
            .send("POST", "/api/lock/unlock", Some(serde_json::json!({ "password": "1234" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        app
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }
}

/// Tiny PNG as a data URL
pub fn png_data_url(width: u32, height: u32) -> String {
    use base64::Engine;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    let img = RgbImage::from_pixel(width, height, Rgb([10, 120, 200]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&bytes)
    )
}

pub fn member_json(name: &str, join_date: &str) -> Value {
    serde_json::json!({
        "name": name,
        "phone": "0550000000",
        "membership_type": "gold",
        "join_date": join_date,
        "image": "data:image/jpeg;base64,AAAA",
    })
}
