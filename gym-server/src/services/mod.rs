//! 服务层 - HTTP 应用组装

pub mod http;

pub use self::http::{build_app, build_routes};
