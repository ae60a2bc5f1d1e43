//! 仪表盘路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/dashboard | GET | 统计、闭馆倒计时、活动曲线 |
//!
//! 倒计时每次请求按服务器当前时间重新计算，不保存任何计时状态。

use axum::{Json, Router, extract::State, routing::get};
use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;
use shared::models::DEFAULT_CLOSING_TIME;

use crate::core::ServerState;
use crate::lifecycle::{
    Countdown, DashboardStats, DayBucket, HourBucket, daily_joins, dashboard_stats, hourly_visits,
    monthly_joins, time_until_close,
};
use crate::utils::time::{now_local, parse_hhmm_or};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/dashboard", get(dashboard))
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub now: NaiveDateTime,
    pub stats: DashboardStats,
    pub opening_time: String,
    pub closing_time: String,
    pub time_until_close: Countdown,
    pub hourly_visits: Vec<HourBucket>,
    pub daily_joins: Vec<DayBucket>,
    pub monthly_joins: Vec<DayBucket>,
}

/// GET /api/dashboard
pub async fn dashboard(State(state): State<ServerState>) -> Json<DashboardResponse> {
    let members = state.members.list().await;
    let settings = state.settings.get().await;
    let now = now_local();

    let fallback = NaiveTime::parse_from_str(DEFAULT_CLOSING_TIME, "%H:%M").unwrap_or(NaiveTime::MIN);
    let closing = parse_hhmm_or(&settings.closing_time, fallback);

    Json(DashboardResponse {
        now,
        stats: dashboard_stats(&members, now),
        time_until_close: time_until_close(now, closing),
        hourly_visits: hourly_visits(&members),
        daily_joins: daily_joins(&members, now.date()),
        monthly_joins: monthly_joins(&members, now.date()),
        opening_time: settings.opening_time,
        closing_time: settings.closing_time,
    })
}
