//! Data models
//!
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Member ids are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod gym_settings;
pub mod member;

// Re-exports
pub use gym_settings::*;
pub use member::*;
