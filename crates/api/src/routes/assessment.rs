//! Route definitions for the buyback assessment engine.
//!
//! Two routers are provided:
//! - `public_router()` mounted at `/assessment` (anonymous reads + quote)
//! - `admin_router()` mounted at `/admin/assessment` (rule mutation)

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::assessment;
use crate::state::AppState;

/// Public routes mounted at `/assessment`.
///
/// ```text
/// GET  /rules  -> list_rules
/// POST /quote  -> quote
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/rules", get(assessment::list_rules))
        .route("/quote", post(assessment::quote))
}

/// Admin routes mounted at `/admin/assessment`.
///
/// ```text
/// POST   /rules                 -> save_rule (upsert)
/// DELETE /rules/{id}            -> delete_rule
/// PUT    /rules/category-order  -> reorder_categories
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/rules", post(assessment::save_rule))
        .route("/rules/{id}", delete(assessment::delete_rule))
        .route(
            "/rules/category-order",
            put(assessment::reorder_categories),
        )
}
