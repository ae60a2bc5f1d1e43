//! Message bus types
//!
//! Carried in-process by the server's broadcast bus and streamed to open
//! dashboard views as server-sent events.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use uuid::Uuid;

/// Bus event type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Human-facing notification
    Notification,
    /// A resource changed; views should re-read it
    Sync,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Notification => write!(f, "notification"),
            EventType::Sync => write!(f, "sync"),
        }
    }
}

/// Sync signal payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    /// Resource type ("member", "settings")
    pub resource: String,
    /// Per-resource version, bumped on every change
    pub version: u64,
    /// Change type ("created", "updated", "deleted")
    pub action: String,
    /// Resource id
    pub id: String,
    /// Resource data (None on delete)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Notification payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub message: String,
}

/// Message bus envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusMessage {
    pub request_id: Uuid,
    pub event_type: EventType,
    pub payload: serde_json::Value,
}

impl BusMessage {
    pub fn new(event_type: EventType, payload: serde_json::Value) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            event_type,
            payload,
        }
    }

    /// Build a sync signal
    pub fn sync(payload: &SyncPayload) -> Result<Self, serde_json::Error> {
        Ok(Self::new(EventType::Sync, serde_json::to_value(payload)?))
    }

    /// Build a notification
    pub fn notification(payload: &NotificationPayload) -> Result<Self, serde_json::Error> {
        Ok(Self::new(
            EventType::Notification,
            serde_json::to_value(payload)?,
        ))
    }

    /// Parse the payload into a concrete type
    pub fn parse_payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}
