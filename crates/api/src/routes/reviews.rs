//! Route definitions for customer reviews.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Public routes mounted at `/reviews`.
///
/// ```text
/// GET  / -> list_reviews (approved only)
/// POST / -> submit_review
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", get(reviews::list_reviews).post(reviews::submit_review))
}

/// Admin routes mounted at `/admin/reviews`.
///
/// ```text
/// GET    /              -> admin_list_reviews (moderation queue)
/// DELETE /{id}          -> delete_review
/// POST   /{id}/approve  -> approve_review
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::admin_list_reviews))
        .route("/{id}", delete(reviews::delete_review))
        .route("/{id}/approve", post(reviews::approve_review))
}
