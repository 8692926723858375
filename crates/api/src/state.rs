use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// The single pool here is the one privileged database handle in the
/// process; handlers receive it by injection instead of constructing
/// their own connections.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: retrade_db::DbPool,
    /// Server configuration (JWT secret, CORS, timeouts).
    pub config: Arc<ServerConfig>,
}
