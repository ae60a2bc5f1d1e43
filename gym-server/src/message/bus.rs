//! 消息总线核心实现
//!
//! # 消息流
//!
//! ```text
//! SettingsService / handlers ──▶ publish() ──▶ tx ──┬──▶ SSE 订阅者 (/api/events)
//!                                                   └──▶ 进程内订阅者 (subscribe)
//! ```

use shared::message::BusMessage;
use tokio::sync::broadcast;

/// 默认广播通道容量
pub const DEFAULT_CAPACITY: usize = 256;

/// 消息总线 - 进程内发布/订阅
///
/// 慢订阅者会收到 `RecvError::Lagged`，由订阅方自行决定是否跳过。
#[derive(Debug, Clone)]
pub struct MessageBus {
    tx: broadcast::Sender<BusMessage>,
}

impl MessageBus {
    /// 创建默认容量的消息总线
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// 创建指定容量的消息总线
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// 发布消息 (服务器 -> 所有订阅者)
    ///
    /// 返回收到消息的订阅者数量；没有订阅者不算错误。
    pub fn publish(&self, msg: BusMessage) -> usize {
        match self.tx.send(msg) {
            Ok(receivers) => receivers,
            Err(_) => {
                tracing::debug!("Bus message dropped: no subscribers");
                0
            }
        }
    }

    /// 订阅所有后续消息
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.tx.subscribe()
    }

    /// 当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}
