//! 锁屏模块
//!
//! - [`store`]: 本地 KV 存储 (redb / 内存)
//! - [`secret`]: 密码存储接口 (明文实现)
//! - [`lock`]: 锁屏状态机与路由守卫
//! - [`middleware`]: HTTP 中间件

pub mod lock;
pub mod middleware;
pub mod secret;
pub mod store;

pub use lock::{GateState, LockGate, RouteDecision};
pub use middleware::require_unlocked;
pub use secret::{PlaintextSecretStore, SecretStore};
pub use store::{KeyValueStore, LocalStore, LocalStoreError, MemoryStore};
