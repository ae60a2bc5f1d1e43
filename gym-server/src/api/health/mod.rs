//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /health | GET | 存活 + 锁屏状态 + 资源版本 | 无 |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::gate::GateState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthReport {
    status: &'static str,
    version: &'static str,
    gate: GateState,
    /// SSE 订阅者数量
    subscribers: usize,
    members_version: u64,
    settings_version: u64,
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthReport> {
    let versions = &state.resource_versions;
    Json(HealthReport {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        gate: state.gate.state(),
        subscribers: state.message_bus.subscriber_count(),
        members_version: versions.get("members"),
        settings_version: versions.get("settings"),
    })
}
