//! Review entity model and DTOs.

use retrade_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub author_name: String,
    pub rating: i32,
    pub body: String,
    pub status: String,
    pub created_at: Timestamp,
}

/// DTO for a public review submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReview {
    pub author_name: String,
    pub rating: i32,
    pub body: String,
}

/// Query parameters for review listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
