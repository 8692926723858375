//! Assessment rule entity model and DTOs.

use retrade_core::assessment::{PriceRule, RuleKind};
use retrade_core::error::CoreError;
use retrade_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `assessment_rules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssessmentRule {
    pub id: DbId,
    pub rule_type: String,
    pub category: String,
    pub label: Option<String>,
    pub threshold: Option<i64>,
    pub price_adjustment: i64,
    pub sort_order: i32,
    pub input_placeholder: Option<String>,
    pub input_unit: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AssessmentRule {
    /// Convert the stored row into the evaluator's rule type.
    ///
    /// The `rule_type` CHECK constraint makes an unknown discriminator
    /// unreachable through normal writes; one still surfaces as an error
    /// rather than a panic.
    pub fn to_price_rule(&self) -> Result<PriceRule, CoreError> {
        let kind: RuleKind = self.rule_type.parse()?;
        Ok(PriceRule {
            id: self.id,
            kind,
            category: self.category.clone(),
            label: self.label.clone(),
            threshold: self.threshold,
            price_adjustment: self.price_adjustment,
            sort_order: self.sort_order,
            input_placeholder: self.input_placeholder.clone(),
            input_unit: self.input_unit.clone(),
        })
    }
}

/// DTO for the admin save operation. Upsert-by-optional-id: no `id` inserts,
/// an `id` updates. `rule_type` is only honoured on insert; the type of an
/// existing rule is never changed by an update.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveAssessmentRule {
    pub id: Option<DbId>,
    pub rule_type: String,
    pub category: String,
    pub label: Option<String>,
    pub threshold: Option<i64>,
    pub price_adjustment: i64,
    pub input_placeholder: Option<String>,
    pub input_unit: Option<String>,
}

/// Per-category outcome of a reorder batch.
#[derive(Debug, Clone, Serialize)]
pub struct ReorderedCategory {
    pub category: String,
    /// Number of rules whose `sort_order` moved. Zero means the category
    /// no longer has any rules.
    pub rules_updated: u64,
}
