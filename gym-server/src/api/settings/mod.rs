//! Settings API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/settings | GET | 读取设置 (不存在时写入默认值) |
//! | /api/settings | PUT | 部分更新，成功后广播 `settings` 同步事件 |

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use shared::models::{Background, GymSettings, GymSettingsUpdate};

use crate::AppResult;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/settings", get(get_settings).put(update_settings))
}

/// Settings plus the resolved background
#[derive(Serialize)]
pub struct SettingsView<'a> {
    #[serde(flatten)]
    pub settings: &'a GymSettings,
    pub background: Background<'a>,
}

impl<'a> SettingsView<'a> {
    pub fn new(settings: &'a GymSettings) -> Self {
        Self {
            settings,
            background: settings.background(),
        }
    }
}

fn render(settings: &GymSettings) -> Response {
    Json(SettingsView::new(settings)).into_response()
}

/// GET /api/settings
pub async fn get_settings(State(state): State<ServerState>) -> Response {
    let settings = state.settings.get().await;
    render(&settings)
}

/// PUT /api/settings
pub async fn update_settings(
    State(state): State<ServerState>,
    Json(payload): Json<GymSettingsUpdate>,
) -> AppResult<Response> {
    let settings = state.settings.update(payload).await?;
    Ok(render(&settings))
}
