//! Handlers for the campaign banner configuration.
//!
//! A single free-text config value shared between the public page (read)
//! and the back office (write). It rides on the same admin-authority
//! contract as the rule editor but is otherwise unrelated to pricing.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use retrade_core::config_keys::{CAMPAIGN_REMAINING_WINNERS, MAX_CONFIG_VALUE_LEN};
use retrade_core::error::CoreError;
use retrade_db::repositories::SiteConfigRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for the public campaign read.
#[derive(Debug, Serialize)]
pub struct CampaignResponse {
    /// `None` when no value has ever been configured.
    pub remaining_winners: Option<String>,
}

/// Request body for the admin campaign update.
#[derive(Debug, Deserialize)]
pub struct UpdateCampaignRequest {
    pub remaining_winners: String,
}

/// GET /api/v1/campaign
pub async fn get_campaign(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let config = SiteConfigRepo::get(&state.pool, CAMPAIGN_REMAINING_WINNERS).await?;

    Ok(Json(DataResponse {
        data: CampaignResponse {
            remaining_winners: config.map(|c| c.value),
        },
    }))
}

/// PUT /api/v1/admin/campaign
pub async fn update_campaign(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpdateCampaignRequest>,
) -> AppResult<impl IntoResponse> {
    if input.remaining_winners.chars().count() > MAX_CONFIG_VALUE_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "remaining_winners must be at most {MAX_CONFIG_VALUE_LEN} characters"
        ))));
    }

    let config = SiteConfigRepo::upsert(
        &state.pool,
        CAMPAIGN_REMAINING_WINNERS,
        &input.remaining_winners,
    )
    .await?;

    tracing::info!(user_id = admin.user_id, "Campaign config updated");

    Ok(Json(DataResponse { data: config }))
}
