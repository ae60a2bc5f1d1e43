//! Shared-password storage
//!
//! The password is kept and compared in plaintext in the local store. This is
//! a known weakness; a hashed backend only has to implement [`SecretStore`].

use std::sync::Arc;

use super::store::{KeyValueStore, LocalStoreResult};

pub const PASSWORD_KEY: &str = "gymPassword";

pub trait SecretStore: Send + Sync {
    fn get(&self) -> LocalStoreResult<Option<String>>;
    fn set(&self, secret: &str) -> LocalStoreResult<()>;
    fn clear(&self) -> LocalStoreResult<()>;
}

pub struct PlaintextSecretStore {
    store: Arc<dyn KeyValueStore>,
}

impl PlaintextSecretStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl SecretStore for PlaintextSecretStore {
    fn get(&self) -> LocalStoreResult<Option<String>> {
        self.store.get(PASSWORD_KEY)
    }

    fn set(&self, secret: &str) -> LocalStoreResult<()> {
        self.store.set(PASSWORD_KEY, secret)
    }

    fn clear(&self) -> LocalStoreResult<()> {
        self.store.remove(PASSWORD_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::store::MemoryStore;

    #[test]
    fn test_plaintext_secret_uses_password_key() {
        let kv = Arc::new(MemoryStore::new());
        let secrets = PlaintextSecretStore::new(kv.clone());

        secrets.set("1234").unwrap();
        assert_eq!(kv.get(PASSWORD_KEY).unwrap().as_deref(), Some("1234"));
        assert_eq!(secrets.get().unwrap().as_deref(), Some("1234"));

        secrets.clear().unwrap();
        assert!(secrets.get().unwrap().is_none());
    }
}
