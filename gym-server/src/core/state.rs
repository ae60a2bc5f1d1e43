use std::sync::Arc;

use dashmap::DashMap;
use shared::message::{BusMessage, NotificationPayload, SyncPayload};

use crate::AppError;
use crate::core::{Config, Result};
use crate::core::config::StoreBackend;
use crate::db::DbService;
use crate::db::repository::{
    MemberStore, MemoryMemberStore, MemorySettingsStore, SettingsStore, SqliteMemberStore,
    SqliteSettingsStore,
};
use crate::gate::{KeyValueStore, LocalStore, LockGate, MemoryStore, PlaintextSecretStore};
use crate::members::MemberDirectory;
use crate::message::MessageBus;
use crate::settings::SettingsService;

/// 资源版本管理器
///
/// 每个资源一个单调递增版本号，随同步事件下发，前端据此丢弃过期事件。
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// 递增并返回新版本号 (首次返回 1)
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 当前版本号，不存在时为 0
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// 服务器状态 - 持有所有服务的共享引用
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置 (不可变) |
/// | members | 会员目录 |
/// | settings | 设置服务 (缓存 + 广播) |
/// | gate | 锁屏 |
/// | message_bus | 进程内消息总线 |
/// | resource_versions | 资源版本 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub members: Arc<MemberDirectory>,
    pub settings: Arc<SettingsService>,
    pub gate: Arc<LockGate>,
    pub message_bus: MessageBus,
    pub resource_versions: Arc<ResourceVersions>,
}

impl ServerState {
    /// 按配置初始化全部服务
    ///
    /// 1. 创建工作目录
    /// 2. 打开存储 (SQLite 或内存)
    /// 3. 打开锁屏本地存储 (redb)
    /// 4. 首次运行写入默认密码
    pub async fn initialize(config: &Config) -> Result<Self> {
        if config.store_backend == StoreBackend::Memory {
            tracing::warn!("STORE_BACKEND=memory: data will not survive a restart");
            return Self::in_memory(config.clone());
        }

        config.ensure_work_dir_structure()?;

        let db_path = config.database_path();
        let db = DbService::new(&db_path.to_string_lossy()).await?;
        let member_store: Arc<dyn MemberStore> = Arc::new(SqliteMemberStore::new(db.pool.clone()));
        let settings_store: Arc<dyn SettingsStore> = Arc::new(SqliteSettingsStore::new(db.pool));

        let local_path = config.local_store_path();
        let local: Arc<dyn KeyValueStore> =
            Arc::new(LocalStore::open(&local_path).map_err(AppError::from)?);
        tracing::info!(path = %local_path.display(), "Local store opened");

        Self::assemble(config.clone(), member_store, settings_store, local)
    }

    /// 全内存状态 (测试 / STORE_BACKEND=memory)
    pub fn in_memory(config: Config) -> Result<Self> {
        Self::assemble(
            config,
            Arc::new(MemoryMemberStore::new()),
            Arc::new(MemorySettingsStore::new()),
            Arc::new(MemoryStore::new()),
        )
    }

    /// 用给定存储组装状态
    pub fn assemble(
        config: Config,
        member_store: Arc<dyn MemberStore>,
        settings_store: Arc<dyn SettingsStore>,
        local: Arc<dyn KeyValueStore>,
    ) -> Result<Self> {
        let message_bus = MessageBus::with_capacity(config.event_channel_capacity);
        let resource_versions = Arc::new(ResourceVersions::new());

        if config.is_production() && config.default_password == "1234" {
            tracing::warn!("DEFAULT_PASSWORD is the factory default in production");
        }

        let secrets = Arc::new(PlaintextSecretStore::new(local.clone()));
        let gate = LockGate::new(secrets, local, config.default_password.clone());
        gate.ensure_default_password()?;

        Ok(Self {
            members: Arc::new(MemberDirectory::new(member_store)),
            settings: Arc::new(SettingsService::new(
                settings_store,
                message_bus.clone(),
                resource_versions.clone(),
            )),
            gate: Arc::new(gate),
            message_bus,
            resource_versions,
            config,
        })
    }

    /// 广播资源变更
    pub fn broadcast_sync<T: serde::Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) {
        let version = self.resource_versions.increment(resource);
        let payload = SyncPayload {
            resource: resource.to_string(),
            version,
            action: action.to_string(),
            id: id.to_string(),
            data: data.and_then(|d| serde_json::to_value(d).ok()),
        };
        match BusMessage::sync(&payload) {
            Ok(msg) => {
                self.message_bus.publish(msg);
            }
            Err(e) => tracing::error!(resource, error = %e, "Failed to encode sync payload"),
        }
    }
}

impl ServerState {
    /// 广播通知 (锁屏状态变化等)
    pub fn notify(&self, title: &str, message: &str) {
        let payload = NotificationPayload {
            title: title.to_string(),
            message: message.to_string(),
        };
        match BusMessage::notification(&payload) {
            Ok(msg) => {
                self.message_bus.publish(msg);
            }
            Err(e) => tracing::error!(error = %e, "Failed to encode notification"),
        }
    }
}
