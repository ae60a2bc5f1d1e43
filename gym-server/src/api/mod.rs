//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`lock`] - 锁屏 (解锁/锁定/改密码/路由守卫)
//! - [`members`] - 会员目录与签到
//! - [`settings`] - 健身房设置
//! - [`dashboard`] - 仪表盘统计
//! - [`images`] - 图片裁剪
//! - [`events`] - 服务端事件推送 (SSE)

pub mod dashboard;
pub mod events;
pub mod health;
pub mod images;
pub mod lock;
pub mod members;
pub mod settings;

pub use crate::{AppError, AppResult};
