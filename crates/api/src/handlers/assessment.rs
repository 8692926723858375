//! Handlers for the buyback assessment engine.
//!
//! The public surface is anonymous: the form fetches one rule snapshot per
//! page load and asks for a quote on every input change; both operations
//! are cheap reads plus a pure evaluation. All mutation goes through the
//! admin endpoints, which validate in core before touching the store.
//! Customers holding an older snapshot keep quoting against it until they
//! reload; there is no invalidation channel.

use std::collections::{HashMap, HashSet};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use retrade_core::assessment::{
    self, AssessmentInput, CategoryProfile, PriceRule, Quote, RuleKind,
};
use retrade_core::error::CoreError;
use retrade_core::types::DbId;
use retrade_db::models::assessment_rule::{AssessmentRule, SaveAssessmentRule};
use retrade_db::repositories::AssessmentRuleRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Response body for the public rule snapshot.
#[derive(Debug, Serialize)]
pub struct RuleSnapshot {
    /// Category display order derived from the stored rule sequence.
    pub category_order: Vec<String>,
    /// Numeric-input metadata and tiers per range category.
    pub categories: Vec<CategoryProfile>,
    /// The raw rules, in canonical store order.
    pub rules: Vec<AssessmentRule>,
}

/// Request body for a quote. Numeric fields accept any JSON value and are
/// coerced -- a half-typed form must never produce an error.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub rank: serde_json::Value,
    #[serde(default)]
    pub luck_max: serde_json::Value,
    #[serde(default)]
    pub gacha_limit: serde_json::Value,
    /// Values for admin-defined categories, keyed by category name.
    #[serde(default)]
    pub dynamic_ranges: HashMap<String, serde_json::Value>,
    /// Ids of ticked boolean rules.
    #[serde(default)]
    pub selected_rule_ids: Vec<DbId>,
}

/// Request body for the category reorder operation.
#[derive(Debug, Deserialize)]
pub struct ReorderCategoriesRequest {
    /// Every category, in the desired display order.
    pub categories: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/assessment/rules
///
/// The full rule snapshot plus derived category profiles, as consumed by
/// both the public form and the admin editor.
pub async fn list_rules(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = AssessmentRuleRepo::list_all(&state.pool).await?;
    let rules = to_price_rules(&rows)?;

    let snapshot = RuleSnapshot {
        category_order: assessment::derive_category_order(&rules),
        categories: assessment::build_category_profiles(&rules),
        rules: rows,
    };

    Ok(Json(DataResponse { data: snapshot }))
}

/// POST /api/v1/assessment/quote
///
/// Evaluate the current rule snapshot against user input and return the
/// estimate with its per-rule breakdown. The total is not clamped here;
/// display clamping is the client's decision.
pub async fn quote(
    State(state): State<AppState>,
    Json(input): Json<QuoteRequest>,
) -> AppResult<Json<DataResponse<Quote>>> {
    let rows = AssessmentRuleRepo::list_all(&state.pool).await?;
    let rules = to_price_rules(&rows)?;

    let typed = AssessmentInput {
        rank: assessment::coerce_amount(&input.rank),
        luck_max: assessment::coerce_amount(&input.luck_max),
        gacha_limit: assessment::coerce_amount(&input.gacha_limit),
        dynamic_ranges: input
            .dynamic_ranges
            .iter()
            .map(|(category, value)| (category.clone(), assessment::coerce_amount(value)))
            .collect(),
        selected_rule_ids: input.selected_rule_ids.iter().copied().collect(),
    };

    let quote = assessment::evaluate(&rules, &typed);
    Ok(Json(DataResponse { data: quote }))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/assessment/rules
///
/// Upsert a rule: no `id` inserts, an `id` updates. The rule type is fixed
/// at creation; on update the stored type wins and the request's
/// `rule_type` field is ignored. Validation happens before any write.
pub async fn save_rule(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<SaveAssessmentRule>,
) -> AppResult<impl IntoResponse> {
    match input.id {
        Some(id) => {
            let existing = AssessmentRuleRepo::find_by_id(&state.pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "AssessmentRule",
                    id,
                }))?;
            let kind: RuleKind = existing.rule_type.parse()?;
            assessment::validate_rule(
                kind,
                &input.category,
                input.label.as_deref(),
                input.threshold,
            )?;

            let updated = AssessmentRuleRepo::update(&state.pool, id, &input)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "AssessmentRule",
                    id,
                }))?;

            tracing::info!(rule_id = updated.id, user_id = admin.user_id, "Assessment rule updated");

            Ok((StatusCode::OK, Json(DataResponse { data: updated })))
        }
        None => {
            let kind: RuleKind = input.rule_type.parse()?;
            assessment::validate_rule(
                kind,
                &input.category,
                input.label.as_deref(),
                input.threshold,
            )?;

            let created = AssessmentRuleRepo::create(&state.pool, &input).await?;

            tracing::info!(rule_id = created.id, user_id = admin.user_id, "Assessment rule created");

            Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
        }
    }
}

/// DELETE /api/v1/admin/assessment/rules/{id}
///
/// Hard delete; there is no soft-delete or undo. Deleting the last rule of
/// a category removes the category from every surface.
pub async fn delete_rule(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(rule_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = AssessmentRuleRepo::delete(&state.pool, rule_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "AssessmentRule",
            id: rule_id,
        }));
    }

    tracing::info!(rule_id, user_id = admin.user_id, "Assessment rule deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/assessment/rules/category-order
///
/// Reassign category sort keys from an explicit ordering. The batch is
/// atomic: it runs in one transaction and either every listed category
/// moves or none does. The response reports how many rules each category
/// update touched, so a stale admin view (a category that lost its last
/// rule) is visible to the caller instead of silently ignored.
pub async fn reorder_categories(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ReorderCategoriesRequest>,
) -> AppResult<impl IntoResponse> {
    if input.categories.is_empty() {
        return Err(AppError::BadRequest("categories must not be empty".into()));
    }
    if input.categories.iter().any(|c| c.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "category names must not be blank".into(),
        )));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = input.categories.iter().find(|c| !seen.insert(c.as_str())) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "duplicate category '{dup}' in reorder request"
        ))));
    }

    let results = AssessmentRuleRepo::reorder_categories(&state.pool, &input.categories).await?;

    tracing::info!(
        categories = results.len(),
        user_id = admin.user_id,
        "Assessment categories reordered",
    );

    Ok(Json(DataResponse { data: results }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map stored rows into evaluator rules, failing on a corrupt discriminator.
fn to_price_rules(rows: &[AssessmentRule]) -> Result<Vec<PriceRule>, AppError> {
    rows.iter()
        .map(|row| row.to_price_rule().map_err(AppError::Core))
        .collect()
}
