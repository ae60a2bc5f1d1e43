//! 图片处理
//!
//! 头像、Logo 与背景图统一走裁剪 + JPEG 重编码，结果以 data URL 形式内嵌存储。

pub mod crop;

pub use crop::{
    CropRect, CropRequest, CroppedImage, ImageError, crop_image, decode_payload, default_crop,
    encode_data_url,
};
