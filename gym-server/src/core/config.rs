use std::path::PathBuf;

/// 存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// SQLite (默认)
    Sqlite,
    /// 进程内存 (测试/演示)
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "memory" => Self::Memory,
            _ => Self::Sqlite,
        }
    }
}

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | {WORK_DIR}/database/gym.db | SQLite 数据库 |
/// | LOCAL_STORE_PATH | {WORK_DIR}/local/session.redb | 锁屏本地存储 |
/// | DEFAULT_PASSWORD | 1234 | 首次运行时的锁屏密码 |
/// | STORE_BACKEND | sqlite | sqlite / memory |
/// | ENVIRONMENT | development | 运行环境 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | EVENT_CHANNEL_CAPACITY | 256 | 消息总线容量 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/gym HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、本地状态等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 数据库路径 (None = 工作目录默认位置)
    pub database_path: Option<String>,
    /// 锁屏状态 redb 文件路径 (None = 工作目录默认位置)
    pub local_store_path: Option<String>,
    /// 默认锁屏密码
    pub default_password: String,
    /// 存储后端
    pub store_backend: StoreBackend,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 消息总线广播通道容量
    pub event_channel_capacity: usize,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").ok(),
            local_store_path: std::env::var("LOCAL_STORE_PATH").ok(),
            default_password: std::env::var("DEFAULT_PASSWORD").unwrap_or_else(|_| "1234".into()),
            store_backend: std::env::var("STORE_BACKEND")
                .map(|v| StoreBackend::parse(&v))
                .unwrap_or(StoreBackend::Sqlite),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            event_channel_capacity: std::env::var("EVENT_CHANNEL_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(256),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.database_path = None;
        config.local_store_path = None;
        config
    }

    /// SQLite 数据库文件路径
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&self.work_dir).join("database").join("gym.db"))
    }

    /// 锁屏本地存储 (redb) 文件路径
    pub fn local_store_path(&self) -> PathBuf {
        self.local_store_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                PathBuf::from(&self.work_dir)
                    .join("local")
                    .join("session.redb")
            })
    }

    /// 确保数据文件所在目录存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        for path in [self.database_path(), self.local_store_path()] {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parse() {
        assert_eq!(StoreBackend::parse("memory"), StoreBackend::Memory);
        assert_eq!(StoreBackend::parse("MEMORY"), StoreBackend::Memory);
        assert_eq!(StoreBackend::parse("sqlite"), StoreBackend::Sqlite);
        assert_eq!(StoreBackend::parse("anything"), StoreBackend::Sqlite);
    }

    #[test]
    fn test_default_paths_under_work_dir() {
        let config = Config::with_overrides("/tmp/gym-test", 3000);
        assert_eq!(
            config.database_path(),
            PathBuf::from("/tmp/gym-test/database/gym.db")
        );
        assert_eq!(
            config.local_store_path(),
            PathBuf::from("/tmp/gym-test/local/session.redb")
        );
    }

    #[test]
    fn test_ensure_work_dir_structure() {
        let dir = tempfile::tempdir().unwrap();
        let work = dir.path().join("work");
        let config = Config::with_overrides(work.to_string_lossy(), 0);
        config.ensure_work_dir_structure().unwrap();
        assert!(work.join("database").is_dir());
        assert!(work.join("local").is_dir());
    }
}
