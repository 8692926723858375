//! Listing entity model and DTOs.

use retrade_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `listings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Listing {
    pub id: DbId,
    pub title: String,
    pub game_title: Option<String>,
    pub description: String,
    pub price: i64,
    pub status: String,
    pub like_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateListing {
    pub title: String,
    pub game_title: Option<String>,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    pub status: Option<String>,
}

/// DTO for updating a listing. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateListing {
    pub title: Option<String>,
    pub game_title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub status: Option<String>,
}

/// Query parameters for listing search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingListParams {
    /// Substring match over title and game title.
    pub q: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Result of a like toggle.
#[derive(Debug, Clone, Serialize)]
pub struct LikeToggle {
    /// Whether the guest likes the listing after the toggle.
    pub liked: bool,
    pub like_count: i64,
}
