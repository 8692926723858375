pub mod assessment;
pub mod auth;
pub mod campaign;
pub mod health;
pub mod listings;
pub mod reviews;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                               login (public)
/// /auth/me                                  caller identity (requires auth)
///
/// /assessment/rules                         rule snapshot + profiles (public)
/// /assessment/quote                         evaluate inputs (public, POST)
/// /admin/assessment/rules                   upsert rule (admin, POST)
/// /admin/assessment/rules/{id}              delete rule (admin)
/// /admin/assessment/rules/category-order    reorder categories (admin, PUT)
///
/// /campaign                                 campaign banner value (public)
/// /admin/campaign                           update banner value (admin, PUT)
///
/// /listings                                 browse catalog (public)
/// /listings/{id}                            listing detail (public)
/// /listings/{id}/like                       toggle like (guest token, POST)
/// /admin/listings                           list incl. hidden, create (admin)
/// /admin/listings/{id}                      update, delete (admin)
///
/// /reviews                                  approved reviews, submit (public)
/// /admin/reviews                            moderation queue (admin)
/// /admin/reviews/{id}                       delete (admin)
/// /admin/reviews/{id}/approve               approve (admin, POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/assessment", assessment::public_router())
        .nest("/admin/assessment", assessment::admin_router())
        .nest("/campaign", campaign::public_router())
        .nest("/admin/campaign", campaign::admin_router())
        .nest("/listings", listings::public_router())
        .nest("/admin/listings", listings::admin_router())
        .nest("/reviews", reviews::public_router())
        .nest("/admin/reviews", reviews::admin_router())
}
