//! Handlers for customer reviews.
//!
//! Anyone may submit; nothing becomes public until an admin approves it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use retrade_core::error::CoreError;
use retrade_core::moderation::{
    is_valid_review_status, validate_review, REVIEW_APPROVED, REVIEW_PENDING, REVIEW_STATUSES,
};
use retrade_core::types::DbId;
use retrade_db::models::review::{ReviewListParams, SubmitReview};
use retrade_db::repositories::ReviewRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/reviews
///
/// Approved reviews only, newest first. Any status filter in the query is
/// ignored on the public surface.
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(params): Query<ReviewListParams>,
) -> AppResult<impl IntoResponse> {
    let reviews =
        ReviewRepo::list_by_status(&state.pool, REVIEW_APPROVED, params.limit, params.offset)
            .await?;

    Ok(Json(DataResponse { data: reviews }))
}

/// POST /api/v1/reviews
///
/// Submit a review for moderation.
pub async fn submit_review(
    State(state): State<AppState>,
    Json(input): Json<SubmitReview>,
) -> AppResult<impl IntoResponse> {
    validate_review(&input.author_name, input.rating, &input.body)?;

    let review = ReviewRepo::create(&state.pool, &input).await?;

    tracing::info!(review_id = review.id, "Review submitted");

    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/reviews
///
/// Moderation queue. Defaults to pending submissions.
pub async fn admin_list_reviews(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ReviewListParams>,
) -> AppResult<impl IntoResponse> {
    let status = params.status.as_deref().unwrap_or(REVIEW_PENDING);
    if !is_valid_review_status(status) {
        return Err(AppError::BadRequest(format!(
            "Invalid status '{}'. Must be one of: {}",
            status,
            REVIEW_STATUSES.join(", ")
        )));
    }

    let reviews = ReviewRepo::list_by_status(&state.pool, status, params.limit, params.offset)
        .await?;

    Ok(Json(DataResponse { data: reviews }))
}

/// POST /api/v1/admin/reviews/{id}/approve
pub async fn approve_review(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(review_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let review = ReviewRepo::approve(&state.pool, review_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id: review_id,
        }))?;

    tracing::info!(review_id, user_id = admin.user_id, "Review approved");

    Ok(Json(DataResponse { data: review }))
}

/// DELETE /api/v1/admin/reviews/{id}
///
/// Rejection has no separate state; moderators delete what they do not
/// approve.
pub async fn delete_review(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(review_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ReviewRepo::delete(&state.pool, review_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id: review_id,
        }));
    }

    tracing::info!(review_id, user_id = admin.user_id, "Review deleted");

    Ok(StatusCode::NO_CONTENT)
}
