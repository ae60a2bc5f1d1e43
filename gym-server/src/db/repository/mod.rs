//! Repository Module
//!
//! Store interfaces for members and settings, with SQLite and in-memory
//! implementations behind the same traits.

pub mod member;
pub mod memory;
pub mod settings;

pub use member::SqliteMemberStore;
pub use memory::{MemoryMemberStore, MemorySettingsStore};
pub use settings::SqliteSettingsStore;

use async_trait::async_trait;
use shared::models::{GymSettings, Member, MemberCreate, MemberUpdate};
use thiserror::Error;

use crate::AppError;

/// Fixed primary key of the settings row
pub const SETTINGS_ID: i64 = 1;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Member row access
///
/// `insert` assigns the id and creation timestamp and forces the attendance
/// defaults (`is_present = false`, `attendance_count = 0`, `visit_hours = []`).
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// All members ordered by id ascending
    async fn find_all(&self) -> RepoResult<Vec<Member>>;
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Member>>;
    async fn insert(&self, data: MemberCreate) -> RepoResult<Member>;
    /// Partial update; `None` fields are left untouched
    async fn update(&self, id: i64, data: MemberUpdate) -> RepoResult<Member>;
    /// Hard delete; `false` when no row matched
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

/// Settings singleton row access
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self) -> RepoResult<Option<GymSettings>>;
    /// Insert the row only if it does not exist yet
    async fn insert_default(&self, defaults: &GymSettings) -> RepoResult<()>;
    async fn update(&self, settings: &GymSettings) -> RepoResult<()>;
}
