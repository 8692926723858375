//! Handlers for the listing catalog.
//!
//! The public surface is read-only plus an anonymous like toggle; all
//! catalog mutations live under `/admin/listings`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use retrade_core::catalog::{is_valid_listing_status, LISTING_STATUSES, STATUS_HIDDEN};
use retrade_core::error::CoreError;
use retrade_core::types::DbId;
use retrade_db::models::listing::{CreateListing, ListingListParams, UpdateListing};
use retrade_db::repositories::ListingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::guest::GuestToken;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/listings
///
/// Browse the catalog, newest first. Hidden listings never appear here,
/// even when explicitly requested by status filter.
pub async fn list_listings(
    State(state): State<AppState>,
    Query(params): Query<ListingListParams>,
) -> AppResult<impl IntoResponse> {
    validate_status_param(params.status.as_deref())?;

    let listings = ListingRepo::list(&state.pool, &params, false).await?;

    Ok(Json(DataResponse { data: listings }))
}

/// GET /api/v1/listings/{id}
///
/// A hidden listing is indistinguishable from a missing one.
pub async fn get_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let listing = ListingRepo::find_by_id(&state.pool, listing_id)
        .await?
        .filter(|l| l.status != STATUS_HIDDEN)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: listing_id,
        }))?;

    Ok(Json(DataResponse { data: listing }))
}

/// POST /api/v1/listings/{id}/like
///
/// Toggle the caller's like. Guests are identified by the client-minted
/// token in `X-Guest-Token`; no account is involved.
pub async fn toggle_like(
    GuestToken(guest_token): GuestToken,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let toggle = ListingRepo::toggle_like(&state.pool, listing_id, guest_token)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: listing_id,
        }))?;

    Ok(Json(DataResponse { data: toggle }))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/listings
///
/// Same search surface as the public list, but includes hidden listings.
pub async fn admin_list_listings(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListingListParams>,
) -> AppResult<impl IntoResponse> {
    validate_status_param(params.status.as_deref())?;

    let listings = ListingRepo::list(&state.pool, &params, true).await?;

    Ok(Json(DataResponse { data: listings }))
}

/// POST /api/v1/admin/listings
pub async fn create_listing(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateListing>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    if input.price < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "price must not be negative".into(),
        )));
    }
    validate_status_param(input.status.as_deref())?;

    let listing = ListingRepo::create(&state.pool, &input).await?;

    tracing::info!(listing_id = listing.id, user_id = admin.user_id, "Listing created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: listing })))
}

/// PUT /api/v1/admin/listings/{id}
pub async fn update_listing(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
    Json(input): Json<UpdateListing>,
) -> AppResult<impl IntoResponse> {
    if input.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    if input.price.is_some_and(|p| p < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "price must not be negative".into(),
        )));
    }
    validate_status_param(input.status.as_deref())?;

    let listing = ListingRepo::update(&state.pool, listing_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: listing_id,
        }))?;

    tracing::info!(listing_id, user_id = admin.user_id, "Listing updated");

    Ok(Json(DataResponse { data: listing }))
}

/// DELETE /api/v1/admin/listings/{id}
pub async fn delete_listing(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ListingRepo::delete(&state.pool, listing_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: listing_id,
        }));
    }

    tracing::info!(listing_id, user_id = admin.user_id, "Listing deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate an optional status value against the allowed set.
fn validate_status_param(status: Option<&str>) -> AppResult<()> {
    if let Some(status) = status {
        if !is_valid_listing_status(status) {
            return Err(AppError::BadRequest(format!(
                "Invalid status '{}'. Must be one of: {}",
                status,
                LISTING_STATUSES.join(", ")
            )));
        }
    }
    Ok(())
}
