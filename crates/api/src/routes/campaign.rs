//! Route definitions for the campaign banner configuration.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::campaign;
use crate::state::AppState;

/// Public route mounted at `/campaign`.
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", get(campaign::get_campaign))
}

/// Admin route mounted at `/admin/campaign`.
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/", put(campaign::update_campaign))
}
