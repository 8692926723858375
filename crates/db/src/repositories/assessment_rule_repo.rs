//! Repository for the `assessment_rules` table.

use retrade_core::assessment;
use retrade_core::types::DbId;
use sqlx::PgPool;

use crate::models::assessment_rule::{AssessmentRule, ReorderedCategory, SaveAssessmentRule};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, rule_type, category, label, threshold, price_adjustment, \
    sort_order, input_placeholder, input_unit, created_at, updated_at";

/// Canonical ordering used by every read path. Category display order is
/// derived from this sequence, so both surfaces must read through it.
const ORDERING: &str = "sort_order ASC, category ASC, threshold ASC";

/// Provides CRUD and reorder operations for assessment rules.
pub struct AssessmentRuleRepo;

impl AssessmentRuleRepo {
    /// List all rules in canonical order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<AssessmentRule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assessment_rules ORDER BY {ORDERING}");
        sqlx::query_as::<_, AssessmentRule>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a rule by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AssessmentRule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assessment_rules WHERE id = $1");
        sqlx::query_as::<_, AssessmentRule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new rule. `sort_order` starts at 0, so a brand-new
    /// category sorts first until the next explicit reorder.
    pub async fn create(
        pool: &PgPool,
        input: &SaveAssessmentRule,
    ) -> Result<AssessmentRule, sqlx::Error> {
        let query = format!(
            "INSERT INTO assessment_rules \
                (rule_type, category, label, threshold, price_adjustment, \
                 input_placeholder, input_unit) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssessmentRule>(&query)
            .bind(&input.rule_type)
            .bind(&input.category)
            .bind(&input.label)
            .bind(input.threshold)
            .bind(input.price_adjustment)
            .bind(&input.input_placeholder)
            .bind(&input.input_unit)
            .fetch_one(pool)
            .await
    }

    /// Update an existing rule. `rule_type` and `sort_order` are left
    /// untouched: the type is immutable after creation, and individual
    /// saves never affect category ordering.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveAssessmentRule,
    ) -> Result<Option<AssessmentRule>, sqlx::Error> {
        let query = format!(
            "UPDATE assessment_rules SET \
                category          = $2, \
                label             = $3, \
                threshold         = $4, \
                price_adjustment  = $5, \
                input_placeholder = $6, \
                input_unit        = $7, \
                updated_at        = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssessmentRule>(&query)
            .bind(id)
            .bind(&input.category)
            .bind(&input.label)
            .bind(input.threshold)
            .bind(input.price_adjustment)
            .bind(&input.input_placeholder)
            .bind(&input.input_unit)
            .fetch_optional(pool)
            .await
    }

    /// Delete a rule. Returns `true` if a row was deleted. Deleting the
    /// last rule of a category removes that category from every surface.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assessment_rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reassign category sort keys from an explicit ordering.
    ///
    /// Every rule of the category at position `i` receives
    /// `sort_order = (i + 1) * 10`; the gaps allow future insert-between.
    /// The whole batch runs inside one transaction, so a failure leaves no
    /// category moved (an upgrade over the historical best-effort batch).
    /// Categories that no longer have rules update zero rows, which is
    /// reported, not an error.
    pub async fn reorder_categories(
        pool: &PgPool,
        categories: &[String],
    ) -> Result<Vec<ReorderedCategory>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut results = Vec::with_capacity(categories.len());

        for (position, category) in categories.iter().enumerate() {
            let sort_order = assessment::category_sort_order(position);
            let result = sqlx::query(
                "UPDATE assessment_rules SET sort_order = $1, updated_at = now() \
                 WHERE category = $2",
            )
            .bind(sort_order)
            .bind(category)
            .execute(&mut *tx)
            .await?;

            results.push(ReorderedCategory {
                category: category.clone(),
                rules_updated: result.rows_affected(),
            });
        }

        tx.commit().await?;

        tracing::debug!(categories = results.len(), "Reordered rule categories");
        Ok(results)
    }
}
