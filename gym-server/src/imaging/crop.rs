//! Image crop
//!
//! The crop rectangle arrives in the coordinate space of the on-screen
//! preview. It is clipped to the preview, mapped to natural pixels, extracted,
//! resized to the clipped preview size and re-encoded as JPEG. The circular flag only affects display;
//! stored bytes are always a rectangular image.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use shared::ErrorCode;
use thiserror::Error;

use crate::AppError;

/// Maximum decoded payload size (5MB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// JPEG quality for cropped output
pub const JPEG_QUALITY: u8 = 92;

/// Longest output side; larger crops are scaled down keeping their ratio
pub const MAX_OUTPUT_SIDE: u32 = 2048;

const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image payload too large: {size} bytes")]
    TooLarge { size: usize },

    #[error("Invalid image payload: {0}")]
    InvalidPayload(#[from] base64::DecodeError),

    #[error("Invalid image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Displayed size must be positive, got {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("Crop region is empty")]
    EmptyRegion,

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Encoder produced no output")]
    EmptyOutput,
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        let code = match &err {
            ImageError::TooLarge { .. } | ImageError::InvalidPayload(_) | ImageError::Decode(_) => {
                ErrorCode::InvalidImageFile
            }
            ImageError::InvalidViewport { .. } => ErrorCode::InvalidRequest,
            ImageError::EmptyRegion => ErrorCode::EmptyCropRegion,
            ImageError::Encode(_) | ImageError::EmptyOutput => ErrorCode::ImageProcessingFailed,
        };
        AppError::with_message(code, err.to_string())
    }
}

/// Rectangle in preview coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

fn default_aspect() -> f64 {
    1.0
}

fn default_circular() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct CropRequest {
    /// Data URL or bare base64
    pub image: String,
    /// Omitted: largest centered rectangle of `aspect`
    #[serde(default)]
    pub crop: Option<CropRect>,
    pub displayed_width: f64,
    pub displayed_height: f64,
    #[serde(default = "default_aspect")]
    pub aspect: f64,
    #[serde(default = "default_circular")]
    pub circular: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CroppedImage {
    /// `data:image/jpeg;base64,...`
    pub image: String,
    pub width: u32,
    pub height: u32,
    pub circular: bool,
}

/// Largest rectangle of the given aspect ratio centered in the preview
pub fn default_crop(displayed_width: f64, displayed_height: f64, aspect: f64) -> CropRect {
    let aspect = if aspect > 0.0 { aspect } else { 1.0 };
    let (width, height) = if displayed_width / displayed_height > aspect {
        (displayed_height * aspect, displayed_height)
    } else {
        (displayed_width, displayed_width / aspect)
    };
    CropRect {
        x: (displayed_width - width) / 2.0,
        y: (displayed_height - height) / 2.0,
        width,
        height,
    }
}

/// Strip an optional `data:<mime>;base64,` prefix and decode
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, ImageError> {
    let encoded = match payload.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => payload,
    };
    let bytes = STANDARD.decode(encoded.trim())?;
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge { size: bytes.len() });
    }
    Ok(bytes)
}

/// JPEG bytes as an embeddable data URL
pub fn encode_data_url(jpeg: &[u8]) -> String {
    format!("{}{}", JPEG_DATA_URL_PREFIX, STANDARD.encode(jpeg))
}

/// Intersect the crop with `[0, width] x [0, height]`
///
/// Area outside the preview has no source pixels, so it is dropped rather
/// than stretched. `None` when nothing is left.
fn clip_to_preview(rect: CropRect, width: f64, height: f64) -> Option<CropRect> {
    let x0 = rect.x.max(0.0);
    let y0 = rect.y.max(0.0);
    let x1 = (rect.x + rect.width).min(width);
    let y1 = (rect.y + rect.height).min(height);
    (x1 > x0 && y1 > y0).then(|| CropRect {
        x: x0,
        y: y0,
        width: x1 - x0,
        height: y1 - y0,
    })
}

/// Output size for a clipped crop, bounded by `MAX_OUTPUT_SIDE`
fn output_size(rect: &CropRect) -> (u32, u32) {
    let longest = rect.width.max(rect.height);
    let factor = if longest > MAX_OUTPUT_SIDE as f64 {
        MAX_OUTPUT_SIDE as f64 / longest
    } else {
        1.0
    };
    (
        (rect.width * factor).round() as u32,
        (rect.height * factor).round() as u32,
    )
}

/// Map a preview-space span onto `[0, natural)` in natural pixels
fn scale_span(offset: f64, length: f64, scale: f64, natural: u32) -> (u32, u32) {
    let start = (offset * scale).round().clamp(0.0, natural as f64) as u32;
    let end = ((offset + length) * scale).round().clamp(0.0, natural as f64) as u32;
    (start, end.saturating_sub(start))
}

pub fn crop_image(req: &CropRequest) -> Result<CroppedImage, ImageError> {
    let viewport_ok = req.displayed_width.is_finite()
        && req.displayed_height.is_finite()
        && req.displayed_width > 0.0
        && req.displayed_height > 0.0;
    if !viewport_ok {
        return Err(ImageError::InvalidViewport {
            width: req.displayed_width,
            height: req.displayed_height,
        });
    }

    let requested = req
        .crop
        .unwrap_or_else(|| default_crop(req.displayed_width, req.displayed_height, req.aspect));
    let rect = clip_to_preview(requested, req.displayed_width, req.displayed_height)
        .ok_or(ImageError::EmptyRegion)?;

    let (out_width, out_height) = output_size(&rect);
    if out_width == 0 || out_height == 0 {
        return Err(ImageError::EmptyRegion);
    }

    let bytes = decode_payload(&req.image)?;
    let source = image::load_from_memory(&bytes).map_err(ImageError::Decode)?;

    let scale_x = source.width() as f64 / req.displayed_width;
    let scale_y = source.height() as f64 / req.displayed_height;
    let (sx, sw) = scale_span(rect.x, rect.width, scale_x, source.width());
    let (sy, sh) = scale_span(rect.y, rect.height, scale_y, source.height());
    if sw == 0 || sh == 0 {
        return Err(ImageError::EmptyRegion);
    }

    let output = source
        .crop_imm(sx, sy, sw, sh)
        .resize_exact(out_width, out_height, FilterType::Triangle);

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        output
            .to_rgb8()
            .write_with_encoder(encoder)
            .map_err(ImageError::Encode)?;
    }
    if buffer.is_empty() {
        return Err(ImageError::EmptyOutput);
    }

    Ok(CroppedImage {
        image: encode_data_url(&buffer),
        width: out_width,
        height: out_height,
        circular: req.circular,
    })
}
