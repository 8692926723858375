//! Site configuration entity model.

use retrade_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `site_configs` key-value table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteConfig {
    pub key: String,
    pub value: String,
    pub updated_at: Timestamp,
}
