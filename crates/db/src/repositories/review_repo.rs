//! Repository for the `reviews` table.

use retrade_core::catalog::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use retrade_core::moderation::{REVIEW_APPROVED, REVIEW_PENDING};
use retrade_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{Review, SubmitReview};

const COLUMNS: &str = "id, author_name, rating, body, status, created_at";

/// Provides CRUD and moderation operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new submission in the pending state.
    pub async fn create(pool: &PgPool, input: &SubmitReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (author_name, rating, body, status) \
             VALUES ($1, $2, $3, '{REVIEW_PENDING}') \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(&input.author_name)
            .bind(input.rating)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// List reviews by status, newest first, with pagination.
    pub async fn list_by_status(
        pool: &PgPool,
        status: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(offset);

        let query = format!(
            "SELECT {COLUMNS} FROM reviews WHERE status = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark a review approved. Returns the updated row, or `None` if not found.
    pub async fn approve(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET status = '{REVIEW_APPROVED}' WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a review. Returns `true` if a row was deleted. Rejection has
    /// no separate state; moderators delete what they do not approve.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
