//! Route definitions for the listing catalog.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::listings;
use crate::state::AppState;

/// Public routes mounted at `/listings`.
///
/// ```text
/// GET  /            -> list_listings
/// GET  /{id}        -> get_listing
/// POST /{id}/like   -> toggle_like (guest token)
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listings::list_listings))
        .route("/{id}", get(listings::get_listing))
        .route("/{id}/like", post(listings::toggle_like))
}

/// Admin routes mounted at `/admin/listings`.
///
/// ```text
/// GET    /       -> admin_list_listings (includes hidden)
/// POST   /       -> create_listing
/// PUT    /{id}   -> update_listing
/// DELETE /{id}   -> delete_listing
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(listings::admin_list_listings).post(listings::create_listing),
        )
        .route(
            "/{id}",
            put(listings::update_listing).delete(listings::delete_listing),
        )
}
