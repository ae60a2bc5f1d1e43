//! Shared types for the gym dashboard
//!
//! Domain models, the unified error type and message bus payloads used by
//! `gym-server` and by any client consuming its API.

pub mod error;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorBody, ErrorCode};
pub use message::{BusMessage, EventType};
