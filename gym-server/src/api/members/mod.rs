//! Member API 模块
//!
//! 所有变更接口都返回完整的会员列表 (按 id 升序)。

mod handler;

pub use handler::MemberView;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/members", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/present", get(handler::present))
        .route("/check-in", post(handler::check_in))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/attendance", post(handler::toggle_attendance))
}
