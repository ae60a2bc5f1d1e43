//! 消息总线
//!
//! 设置变更、会员变更等通知通过 [`MessageBus`] 广播给所有打开的页面。

pub mod bus;

pub use bus::MessageBus;
pub use shared::message::{BusMessage, EventType, NotificationPayload, SyncPayload};
