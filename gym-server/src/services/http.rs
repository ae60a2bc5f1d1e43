use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

use crate::core::ServerState;
use crate::gate::require_unlocked;

/// 请求体上限 (内嵌图片的 base64 编码约为原图 4/3)
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// 全部 API 路由 (未绑定状态)
pub fn build_routes() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::lock::router())
        .merge(crate::api::members::router())
        .merge(crate::api::settings::router())
        .merge(crate::api::dashboard::router())
        .merge(crate::api::images::router())
        .merge(crate::api::events::router())
}

/// 组装完整应用
///
/// 锁屏中间件在 Router 级别应用，`require_unlocked` 内部跳过公共路由。
/// 请求超时由 `REQUEST_TIMEOUT_MS` 控制，超时返回 408。
pub fn build_app(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    build_routes()
        .layer(middleware::from_fn_with_state(state.clone(), require_unlocked))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(
            http::StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(middleware::from_fn(log_request))
}
