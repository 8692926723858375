//! Guest identity extractor for the anonymous public surface.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the client-generated guest token.
pub const GUEST_TOKEN_HEADER: &str = "x-guest-token";

/// Anonymous guest identity extracted from the `X-Guest-Token` header.
///
/// The token is a UUID minted by the client on first visit and persisted
/// in a cookie or local storage; the server only ever treats it as an
/// opaque identity for like toggling. There is no registration step and
/// no way to enumerate tokens.
#[derive(Debug, Clone, Copy)]
pub struct GuestToken(pub Uuid);

impl FromRequestParts<AppState> for GuestToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(GUEST_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::BadRequest("Missing X-Guest-Token header".into()))?;

        let token = Uuid::parse_str(raw)
            .map_err(|_| AppError::BadRequest("X-Guest-Token must be a UUID".into()))?;

        Ok(GuestToken(token))
    }
}
