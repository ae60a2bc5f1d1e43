//! 工具模块 - 日志与时间工具

pub mod logger;
pub mod time;
