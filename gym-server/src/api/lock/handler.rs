//! Lock API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::gate::{GateState, LockGate, RouteDecision};
use crate::{AppError, AppResult, security_log};

#[derive(Serialize)]
pub struct LockStatus {
    pub state: GateState,
}

#[derive(Deserialize)]
pub struct UnlockRequest {
    pub password: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Deserialize)]
pub struct RouteQuery {
    #[serde(default)]
    pub path: String,
}

/// redb 写事务会阻塞，放到 blocking 线程池执行
async fn with_gate<T, F>(state: &ServerState, op: F) -> AppResult<T>
where
    F: FnOnce(&LockGate) -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    let gate = state.gate.clone();
    tokio::task::spawn_blocking(move || op(&gate))
        .await
        .map_err(|e| AppError::internal(format!("Gate task failed: {}", e)))?
}

/// GET /api/lock - 当前锁屏状态
pub async fn state(State(state): State<ServerState>) -> Json<LockStatus> {
    Json(LockStatus {
        state: state.gate.state(),
    })
}

/// POST /api/lock/unlock - 密码解锁
pub async fn unlock(
    State(state): State<ServerState>,
    Json(payload): Json<UnlockRequest>,
) -> AppResult<Json<LockStatus>> {
    let gate_state = with_gate(&state, move |gate| gate.unlock(&payload.password)).await?;
    state.notify("lock", "unlocked");
    Ok(Json(LockStatus { state: gate_state }))
}

/// POST /api/lock/lock - 退出 (重新锁定)
pub async fn lock(State(state): State<ServerState>) -> AppResult<Json<LockStatus>> {
    let gate_state = with_gate(&state, |gate| gate.lock()).await?;
    state.notify("lock", "locked");
    Ok(Json(LockStatus { state: gate_state }))
}

/// PUT /api/lock/password - 修改密码 (需已解锁)
pub async fn change_password(
    State(state): State<ServerState>,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<LockStatus>> {
    if !state.gate.is_unlocked() {
        security_log!("WARN", "password_change_while_locked");
        return Err(AppError::unauthorized());
    }
    with_gate(&state, move |gate| {
        gate.change_password(&payload.current_password, &payload.new_password)
    })
    .await?;
    Ok(Json(LockStatus {
        state: state.gate.state(),
    }))
}

/// GET /api/lock/route?path=/members - 视图路由守卫
pub async fn route(
    State(state): State<ServerState>,
    Query(query): Query<RouteQuery>,
) -> Json<RouteDecision> {
    Json(state.gate.route(&query.path))
}
