//! Settings service
//!
//! Owns the settings singleton: a cached copy of the last good row, lazy
//! default seeding on first read, and a `settings` sync event on the message
//! bus after every update so every open view re-reads immediately.

use std::sync::Arc;

use parking_lot::RwLock;
use shared::message::{BusMessage, SyncPayload};
use shared::models::{GymSettings, GymSettingsUpdate};
use tokio::sync::broadcast;

use crate::core::ResourceVersions;
use crate::db::repository::{SETTINGS_ID, SettingsStore};
use crate::message::MessageBus;
use crate::utils::time::parse_hhmm;
use crate::AppResult;

const RESOURCE: &str = "settings";

pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
    cache: RwLock<GymSettings>,
    bus: MessageBus,
    versions: Arc<ResourceVersions>,
}

impl SettingsService {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        bus: MessageBus,
        versions: Arc<ResourceVersions>,
    ) -> Self {
        Self {
            store,
            cache: RwLock::new(GymSettings::default()),
            bus,
            versions,
        }
    }

    /// Read the settings row, seeding the defaults when it does not exist
    ///
    /// A failing store is logged and answered from the cache; no insert is
    /// attempted in that case.
    pub async fn get(&self) -> GymSettings {
        match self.store.get().await {
            Ok(Some(settings)) => {
                *self.cache.write() = settings.clone();
                settings
            }
            Ok(None) => {
                let defaults = GymSettings::default();
                match self.store.insert_default(&defaults).await {
                    Ok(()) => tracing::info!("Seeded default gym settings"),
                    Err(e) => tracing::error!(error = %e, "Failed to seed default gym settings"),
                }
                *self.cache.write() = defaults.clone();
                defaults
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch gym settings, serving cached copy");
                self.current()
            }
        }
    }

    /// Cached settings without touching the store
    pub fn current(&self) -> GymSettings {
        self.cache.read().clone()
    }

    /// Merge a partial update into the current settings and persist it
    ///
    /// Opening and closing times are normalized to `HH:MM` and must parse,
    /// otherwise nothing is written.
    pub async fn update(&self, update: GymSettingsUpdate) -> AppResult<GymSettings> {
        let mut next = self.get().await;
        next.apply(update);
        parse_hhmm(&next.opening_time)?;
        parse_hhmm(&next.closing_time)?;

        match self.store.update(&next).await {
            Ok(()) => {
                tracing::info!(name = %next.name, "Gym settings updated");
                *self.cache.write() = next.clone();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to update gym settings");
                return Ok(self.current());
            }
        }

        self.notify(&next);
        Ok(next)
    }

    /// Subscribe to bus traffic, settings changes included
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.bus.subscribe()
    }

    fn notify(&self, settings: &GymSettings) {
        let payload = SyncPayload {
            resource: RESOURCE.to_string(),
            version: self.versions.increment(RESOURCE),
            action: "updated".to_string(),
            id: SETTINGS_ID.to_string(),
            data: serde_json::to_value(settings).ok(),
        };
        match BusMessage::sync(&payload) {
            Ok(msg) => {
                self.bus.publish(msg);
            }
            Err(e) => tracing::error!(error = %e, "Failed to encode settings change"),
        }
    }
}
