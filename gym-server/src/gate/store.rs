//! 本地持久 KV 存储 (redb)
//!
//! 锁屏状态只保存在本机，不进入业务数据库。
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `local_state` | `&str` | `&str` |

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use redb::{Database, ReadableDatabase, TableDefinition};
use thiserror::Error;

use crate::AppError;

const LOCAL_STATE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("local_state");

#[derive(Debug, Error)]
pub enum LocalStoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),
}

impl From<LocalStoreError> for AppError {
    fn from(err: LocalStoreError) -> Self {
        AppError::local_storage(err.to_string())
    }
}

pub type LocalStoreResult<T> = Result<T, LocalStoreError>;

/// 字符串键值存储
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> LocalStoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> LocalStoreResult<()>;
    fn remove(&self, key: &str) -> LocalStoreResult<()>;
}

/// redb 实现
#[derive(Clone)]
pub struct LocalStore {
    db: Arc<Database>,
}

impl LocalStore {
    /// 打开或创建数据库文件
    pub fn open(path: impl AsRef<Path>) -> LocalStoreResult<Self> {
        Self::init(Database::create(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> LocalStoreResult<Self> {
        Self::init(Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?)
    }

    fn init(db: Database) -> LocalStoreResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(LOCAL_STATE_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> LocalStoreResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LOCAL_STATE_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    fn set(&self, key: &str, value: &str) -> LocalStoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(LOCAL_STATE_TABLE)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> LocalStoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(LOCAL_STATE_TABLE)?;
            table.remove(key)?;
        }
        txn.commit()?;
        Ok(())
    }
}

/// 内存实现 (STORE_BACKEND=memory / 测试)
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> LocalStoreResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> LocalStoreResult<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> LocalStoreResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_store_set_get_remove() {
        let store = LocalStore::open_in_memory().unwrap();
        assert_eq!(store.get("isAuthenticated").unwrap(), None);

        store.set("isAuthenticated", "true").unwrap();
        assert_eq!(store.get("isAuthenticated").unwrap().as_deref(), Some("true"));

        store.remove("isAuthenticated").unwrap();
        assert_eq!(store.get("isAuthenticated").unwrap(), None);
        // removing an absent key is fine
        store.remove("isAuthenticated").unwrap();
    }

    #[test]
    fn test_local_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.redb");
        {
            let store = LocalStore::open(&path).unwrap();
            store.set("gymPassword", "4321").unwrap();
        }
        let store = LocalStore::open(&path).unwrap();
        assert_eq!(store.get("gymPassword").unwrap().as_deref(), Some("4321"));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }
}
