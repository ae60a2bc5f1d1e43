//! Settings Repository (SQLite, singleton row `id = 1`)

use async_trait::async_trait;
use shared::models::GymSettings;
use sqlx::SqlitePool;

use super::{RepoResult, SETTINGS_ID, SettingsStore};

#[derive(Clone)]
pub struct SqliteSettingsStore {
    pool: SqlitePool,
}

impl SqliteSettingsStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn get(&self) -> RepoResult<Option<GymSettings>> {
        let row = sqlx::query_as::<_, GymSettings>(
            "SELECT name, logo, opening_time, closing_time, gradient_from, gradient_to, background_image FROM settings WHERE id = ?",
        )
        .bind(SETTINGS_ID)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_default(&self, defaults: &GymSettings) -> RepoResult<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO settings (id, name, logo, opening_time, closing_time, gradient_from, gradient_to, background_image) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(SETTINGS_ID)
        .bind(&defaults.name)
        .bind(&defaults.logo)
        .bind(&defaults.opening_time)
        .bind(&defaults.closing_time)
        .bind(&defaults.gradient_from)
        .bind(&defaults.gradient_to)
        .bind(&defaults.background_image)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, settings: &GymSettings) -> RepoResult<()> {
        sqlx::query(
            "UPDATE settings SET name = ?1, logo = ?2, opening_time = ?3, closing_time = ?4, gradient_from = ?5, gradient_to = ?6, background_image = ?7 WHERE id = ?8",
        )
        .bind(&settings.name)
        .bind(&settings.logo)
        .bind(&settings.opening_time)
        .bind(&settings.closing_time)
        .bind(&settings.gradient_from)
        .bind(&settings.gradient_to)
        .bind(&settings.background_image)
        .bind(SETTINGS_ID)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
