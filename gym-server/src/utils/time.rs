//! 时间工具函数
//!
//! 所有"当前时间"统一取服务器本地墙钟时间 (与前台显示一致)，
//! 业务函数只接收显式的 `NaiveDateTime`，便于测试。

use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};

use crate::AppError;
use crate::AppResult;

/// 当前本地时间
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// 当前小时 (0-23)，用于签到时段统计
pub fn current_hour() -> u8 {
    now_local().hour() as u8
}

/// 严格解析 HH:MM
pub fn parse_hhmm(value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        AppError::new(shared::ErrorCode::InvalidTimeFormat).with_detail("value", value)
    })
}

/// 解析 HH:MM，失败返回 fallback
pub fn parse_hhmm_or(value: &str, fallback: NaiveTime) -> NaiveTime {
    NaiveTime::parse_from_str(value, "%H:%M").unwrap_or_else(|e| {
        tracing::warn!(
            "Failed to parse time '{}': {}, falling back to {}",
            value,
            e,
            fallback.format("%H:%M")
        );
        fallback
    })
}
