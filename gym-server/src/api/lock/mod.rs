//! Lock API 模块
//!
//! `/api/lock/*` 不经过锁屏中间件，改密码在处理器内单独要求已解锁。

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/lock", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::state))
        .route("/unlock", post(handler::unlock))
        .route("/lock", post(handler::lock))
        .route("/password", put(handler::change_password))
        .route("/route", get(handler::route))
}
