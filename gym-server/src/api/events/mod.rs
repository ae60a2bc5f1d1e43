//! 服务端事件推送 (SSE)
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/events | GET | 订阅消息总线 (设置变更、会员变更) |
//!
//! 事件名为 [`EventType`](shared::message::EventType)，数据为 JSON 编码的
//! [`BusMessage`]。落后太多的订阅者会跳过丢失的消息继续接收。

use std::convert::Infallible;

use axum::{
    Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures::Stream;
use shared::message::BusMessage;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/events", get(events))
}

fn to_event(msg: &BusMessage) -> Option<Event> {
    match Event::default()
        .event(msg.event_type.to_string())
        .json_data(msg)
    {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode bus message for SSE");
            None
        }
    }
}

fn event_stream(rx: broadcast::Receiver<BusMessage>) -> impl Stream<Item = Result<Event, Infallible>> {
    futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(msg) => {
                    if let Some(event) = to_event(&msg) {
                        return Some((Ok(event), rx));
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "SSE subscriber lagged, skipping messages");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}

/// GET /api/events
pub async fn events(
    State(state): State<ServerState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::debug!("SSE subscriber connected");
    Sse::new(event_stream(state.message_bus.subscribe())).keep_alive(KeepAlive::default())
}
