//! Repository for the `listings` and `listing_likes` tables.

use retrade_core::catalog::{
    clamp_limit, clamp_offset, ilike_pattern, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, STATUS_HIDDEN,
};
use retrade_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::listing::{CreateListing, LikeToggle, Listing, ListingListParams, UpdateListing};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, game_title, description, price, status, like_count, \
    created_at, updated_at";

/// Provides CRUD and like-toggle operations for listings.
pub struct ListingRepo;

impl ListingRepo {
    /// List listings, newest first, with optional substring search and
    /// status filter. Hidden listings only appear when `include_hidden`.
    pub async fn list(
        pool: &PgPool,
        params: &ListingListParams,
        include_hidden: bool,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(params.offset);
        let pattern = params.q.as_deref().map(ilike_pattern);

        let query = format!(
            "SELECT {COLUMNS} FROM listings \
             WHERE ($1::text IS NULL OR title ILIKE $1 OR game_title ILIKE $1) \
               AND ($2::text IS NULL OR status = $2) \
               AND ($3 OR status <> '{STATUS_HIDDEN}') \
             ORDER BY created_at DESC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(pattern)
            .bind(&params.status)
            .bind(include_hidden)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find a listing by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new listing.
    pub async fn create(pool: &PgPool, input: &CreateListing) -> Result<Listing, sqlx::Error> {
        let query = format!(
            "INSERT INTO listings (title, game_title, description, price, status) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 'active')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(&input.title)
            .bind(&input.game_title)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Update a listing. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateListing,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET \
                title       = COALESCE($2, title), \
                game_title  = COALESCE($3, game_title), \
                description = COALESCE($4, description), \
                price       = COALESCE($5, price), \
                status      = COALESCE($6, status), \
                updated_at  = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.game_title)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a listing (likes cascade). Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Toggle a guest's like on a listing, maintaining the denormalized
    /// count in the same transaction. Returns `None` when the listing does
    /// not exist.
    pub async fn toggle_like(
        pool: &PgPool,
        listing_id: DbId,
        guest_token: Uuid,
    ) -> Result<Option<LikeToggle>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Lock the listing row so concurrent toggles for the same guest
        // serialize instead of double-counting.
        let exists = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM listings WHERE id = $1 FOR UPDATE",
        )
        .bind(listing_id)
        .fetch_optional(&mut *tx)
        .await?;

        if exists.is_none() {
            return Ok(None);
        }

        let removed = sqlx::query(
            "DELETE FROM listing_likes WHERE listing_id = $1 AND guest_token = $2",
        )
        .bind(listing_id)
        .bind(guest_token)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        let liked = if removed {
            false
        } else {
            sqlx::query("INSERT INTO listing_likes (listing_id, guest_token) VALUES ($1, $2)")
                .bind(listing_id)
                .bind(guest_token)
                .execute(&mut *tx)
                .await?;
            true
        };

        let delta: i64 = if liked { 1 } else { -1 };
        let like_count = sqlx::query_scalar::<_, i64>(
            "UPDATE listings SET like_count = GREATEST(like_count + $2, 0) \
             WHERE id = $1 RETURNING like_count",
        )
        .bind(listing_id)
        .bind(delta)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(LikeToggle { liked, like_count }))
    }
}
