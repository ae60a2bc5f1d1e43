//! 图片裁剪路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/images/crop | POST | 裁剪并重编码为 JPEG data URL |
//!
//! 裁剪结果只返回给调用方，由调用方写入会员或设置；失败时原图保持不变。

use axum::{Json, Router, routing::post};

use crate::core::ServerState;
use crate::imaging::{CropRequest, CroppedImage, crop_image};
use crate::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/images/crop", post(crop))
}

/// POST /api/images/crop
pub async fn crop(Json(payload): Json<CropRequest>) -> AppResult<Json<CroppedImage>> {
    let result = tokio::task::spawn_blocking(move || crop_image(&payload))
        .await
        .map_err(|e| AppError::internal(format!("Crop task failed: {}", e)))?;

    match result {
        Ok(cropped) => {
            tracing::info!(
                width = cropped.width,
                height = cropped.height,
                "Image cropped"
            );
            Ok(Json(cropped))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Image crop failed");
            Err(e.into())
        }
    }
}
