//! Repository for the `site_configs` key-value table.

use sqlx::PgPool;

use crate::models::site_config::SiteConfig;

const COLUMNS: &str = "key, value, updated_at";

/// Provides read/upsert access to site configuration values.
pub struct SiteConfigRepo;

impl SiteConfigRepo {
    /// Fetch a config value by key.
    pub async fn get(pool: &PgPool, key: &str) -> Result<Option<SiteConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_configs WHERE key = $1");
        sqlx::query_as::<_, SiteConfig>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace a config value.
    pub async fn upsert(pool: &PgPool, key: &str, value: &str) -> Result<SiteConfig, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_configs (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteConfig>(&query)
            .bind(key)
            .bind(value)
            .fetch_one(pool)
            .await
    }
}
