//! 锁屏中间件
//!
//! 锁定状态下拒绝所有业务 API。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::AppError;
use crate::core::ServerState;
use crate::security_log;

/// 锁定时仍可访问的请求
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (`/health` 等)
/// - `/api/lock` 及其子路径
fn bypasses_gate(method: &Method, path: &str) -> bool {
    *method == Method::OPTIONS
        || !path.starts_with("/api/")
        || path == "/api/lock"
        || path.starts_with("/api/lock/")
}

/// 要求面板已解锁，否则 401 (code 1001)
pub async fn require_unlocked(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if bypasses_gate(req.method(), req.uri().path()) || state.gate.is_unlocked() {
        return Ok(next.run(req).await);
    }

    security_log!("WARN", "locked_access", path = req.uri().path().to_string());
    Err(AppError::unauthorized())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_routes_and_preflight_pass_through() {
        assert!(bypasses_gate(&Method::OPTIONS, "/api/members"));
        assert!(bypasses_gate(&Method::GET, "/health"));
        assert!(bypasses_gate(&Method::POST, "/api/lock/unlock"));
        assert!(bypasses_gate(&Method::GET, "/api/lock"));
    }

    #[test]
    fn business_routes_are_gated() {
        assert!(!bypasses_gate(&Method::GET, "/api/members"));
        assert!(!bypasses_gate(&Method::PUT, "/api/settings"));
        assert!(!bypasses_gate(&Method::GET, "/api/lockers"));
    }
}
