//! Gym Server - 健身房管理面板服务端
//!
//! # 架构概述
//!
//! - **会员** (`members`): 会员目录与签到 (attendance toggle)
//! - **生命周期** (`lifecycle`): 订阅状态、剩余天数、仪表盘统计 (纯函数)
//! - **设置** (`settings`): 单例设置 + 变更广播
//! - **锁屏** (`gate`): 共享密码锁
//! - **图片** (`imaging`): 头像/Logo 裁剪
//! - **HTTP API** (`api`): JSON 接口
//!
//! # 模块结构
//!
//! ```text
//! gym-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # SQLite 存储层
//! ├── gate/          # 锁屏 + 本地 KV 存储 (redb)
//! ├── imaging/       # 图片裁剪
//! ├── lifecycle/     # 订阅生命周期计算
//! ├── members/       # 会员目录、签到
//! ├── message/       # 消息总线
//! ├── services/      # HTTP 应用组装
//! ├── settings/      # 设置服务
//! └── utils/         # 日志、时间工具
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod gate;
pub mod imaging;
pub mod lifecycle;
pub mod members;
pub mod message;
pub mod services;
pub mod settings;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use message::MessageBus;
pub use shared::error::{AppError, AppResult, ErrorBody, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr) => {
        tracing::info!(target: "security", level = $level, event = $event);
    };
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境
///
/// 1. 加载 `.env`
/// 2. 初始化日志 (LOG_LEVEL / LOG_DIR / LOG_JSON)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    let json = std::env::var("LOG_JSON").ok().and_then(|v| v.parse().ok());

    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }

    init_logger_with_file(level.as_deref(), json, log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ______
  / ____/_  ______ ___
 / / __/ / / / __ `__ \
/ /_/ / /_/ / / / / / /
\____/\__, /_/ /_/ /_/
     /____/
    "#
    );
}
