//! Buyback assessment engine: rule model, input coercion, and the pure
//! price evaluator.
//!
//! Pricing is driven entirely by admin-configured rules. A rule is either a
//! `range` tier (applies when the category's numeric input reaches its
//! threshold; within a category only the highest qualifying tier pays out)
//! or a `boolean` flag (pays out whenever selected; independent and
//! cumulative). The evaluator is total over its input domain: it never
//! fails, never performs I/O, and is cheap enough to run on every request
//! against a rule snapshot fetched by the caller.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Well-known categories
// ---------------------------------------------------------------------------

/// Account rank. Read from the dedicated `rank` input.
pub const CATEGORY_RANK: &str = "rank";
/// Maximum luck value. Read from the dedicated `luck_max` input.
pub const CATEGORY_LUCK_MAX: &str = "luck_max";
/// Owned gacha character count. Read from the dedicated `gacha_limit` input.
pub const CATEGORY_GACHA_CHARAS: &str = "gacha_charas";

// ---------------------------------------------------------------------------
// Category ordering
// ---------------------------------------------------------------------------

/// Spacing between consecutive category sort keys. The gaps allow a future
/// "insert between" operation without renumbering every rule.
pub const SORT_ORDER_STEP: i32 = 10;

/// Sort key assigned to every rule of the category at `position` in a
/// reordered category list (0-based). Position 0 maps to 10, 1 to 20, ...
pub fn category_sort_order(position: usize) -> i32 {
    (position as i32 + 1) * SORT_ORDER_STEP
}

// ---------------------------------------------------------------------------
// Rule model
// ---------------------------------------------------------------------------

/// Discriminator for the two pricing behaviours a rule can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Threshold tier over a per-category numeric input.
    Range,
    /// Independent checkbox flag.
    Boolean,
}

impl RuleKind {
    /// Storage representation, matching the `assessment_rules.rule_type`
    /// CHECK constraint.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::Boolean => "boolean",
        }
    }
}

impl std::str::FromStr for RuleKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "range" => Ok(Self::Range),
            "boolean" => Ok(Self::Boolean),
            other => Err(CoreError::Validation(format!(
                "Unknown rule type '{other}'. Must be 'range' or 'boolean'"
            ))),
        }
    }
}

/// A single pricing rule, as evaluated by the engine.
///
/// `category` is a free-text grouping key shared by rules that compare
/// against the same numeric input; it is not a foreign key and no category
/// entity exists apart from the rules that name it. `sort_order` orders
/// categories for display, never individual rules within one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRule {
    pub id: DbId,
    pub kind: RuleKind,
    pub category: String,
    /// Checkbox caption for boolean rules; optional flavour text for range rules.
    pub label: Option<String>,
    /// Minimum input value at which a range rule applies. Always set for
    /// range rules (enforced at the write boundary), always unset otherwise.
    pub threshold: Option<i64>,
    /// Signed amount added to the quote when the rule matches.
    pub price_adjustment: i64,
    pub sort_order: i32,
    /// Initial-value hint for the category's public input.
    pub input_placeholder: Option<String>,
    /// Unit suffix for the category's public input.
    pub input_unit: Option<String>,
}

/// Validate the field combination for a rule about to be written.
///
/// Rejected combinations never reach the database: a `range` rule without a
/// threshold or a `boolean` rule without a caption cannot be evaluated
/// meaningfully, and an empty category would be invisible on every surface.
pub fn validate_rule(
    kind: RuleKind,
    category: &str,
    label: Option<&str>,
    threshold: Option<i64>,
) -> Result<(), CoreError> {
    if category.trim().is_empty() {
        return Err(CoreError::Validation("category must not be empty".into()));
    }
    match kind {
        RuleKind::Range => {
            if threshold.is_none() {
                return Err(CoreError::Validation(
                    "range rules require a threshold".into(),
                ));
            }
        }
        RuleKind::Boolean => {
            if label.map_or(true, |l| l.trim().is_empty()) {
                return Err(CoreError::Validation(
                    "boolean rules require a label".into(),
                ));
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Evaluator input
// ---------------------------------------------------------------------------

/// Fully-typed evaluator input. All coercion from raw JSON happens before
/// this struct is constructed; see [`coerce_amount`].
#[derive(Debug, Clone, Default)]
pub struct AssessmentInput {
    pub rank: i64,
    pub luck_max: i64,
    pub gacha_limit: i64,
    /// Values for admin-defined categories beyond the three dedicated inputs,
    /// keyed by category name.
    pub dynamic_ranges: HashMap<String, i64>,
    /// Ids of the boolean rules the user ticked.
    pub selected_rule_ids: HashSet<DbId>,
}

/// Coerce an arbitrary JSON value to an integer amount.
///
/// Numbers truncate, numeric strings parse (decimal strings truncate),
/// booleans map to 0/1, and everything else -- null, arrays, objects,
/// garbage text -- coerces to 0. Malformed input must never surface as an
/// error to the customer filling in the form.
pub fn coerce_amount(value: &serde_json::Value) -> i64 {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(0)
        }
        serde_json::Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

/// Resolve the numeric input value for a category.
///
/// The three well-known categories read from their dedicated fields; any
/// other category reads from the dynamic map. Missing entries are 0.
pub fn input_value(input: &AssessmentInput, category: &str) -> i64 {
    match category {
        CATEGORY_RANK => input.rank,
        CATEGORY_LUCK_MAX => input.luck_max,
        CATEGORY_GACHA_CHARAS => input.gacha_limit,
        other => input.dynamic_ranges.get(other).copied().unwrap_or(0),
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// One rule's contribution to a quote, kept for display and auditing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleContribution {
    pub rule_id: DbId,
    pub category: String,
    pub label: Option<String>,
    pub amount: i64,
}

/// The computed buyback estimate.
///
/// The total is the plain sum of the breakdown amounts. It is deliberately
/// NOT clamped at zero: adjustments are signed, and a clamped engine would
/// make the breakdown impossible to audit. Presentation layers may clamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub total: i64,
    pub breakdown: Vec<RuleContribution>,
}

/// Evaluate a rule snapshot against user input.
///
/// Range rules are grouped by category; within each category the rules are
/// ordered by threshold descending and the first rule whose threshold is at
/// or below the input value wins -- tiers are not cumulative, and a
/// threshold-0 rule acts as an always-qualifying floor. Boolean rules whose
/// id appears in the selection set all contribute, independently of each
/// other and of any range result.
pub fn evaluate(rules: &[PriceRule], input: &AssessmentInput) -> Quote {
    let mut breakdown = Vec::new();

    // Group range rules by category, preserving first-seen category order so
    // the breakdown lines up with the display order of the snapshot.
    let mut category_order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&PriceRule>> = HashMap::new();
    for rule in rules.iter().filter(|r| r.kind == RuleKind::Range) {
        let entry = groups.entry(rule.category.as_str()).or_default();
        if entry.is_empty() {
            category_order.push(rule.category.as_str());
        }
        entry.push(rule);
    }

    for category in category_order {
        let value = input_value(input, category);
        let mut tiers = groups.remove(category).unwrap_or_default();
        // Highest threshold first; the stable sort keeps store order among
        // equal thresholds. A missing threshold cannot pass the write
        // boundary, so treat one as 0 rather than panicking.
        tiers.sort_by(|a, b| b.threshold.cmp(&a.threshold));
        if let Some(winner) = tiers
            .iter()
            .find(|rule| rule.threshold.unwrap_or(0) <= value)
        {
            breakdown.push(RuleContribution {
                rule_id: winner.id,
                category: winner.category.clone(),
                label: winner.label.clone(),
                amount: winner.price_adjustment,
            });
        }
    }

    for rule in rules.iter().filter(|r| r.kind == RuleKind::Boolean) {
        if input.selected_rule_ids.contains(&rule.id) {
            breakdown.push(RuleContribution {
                rule_id: rule.id,
                category: rule.category.clone(),
                label: rule.label.clone(),
                amount: rule.price_adjustment,
            });
        }
    }

    let total = breakdown.iter().map(|c| c.amount).sum();
    Quote { total, breakdown }
}

// ---------------------------------------------------------------------------
// Category derivation
// ---------------------------------------------------------------------------

/// Derive the current category display order from a rule snapshot.
///
/// The snapshot must already be in the store's canonical ordering
/// (`sort_order` asc, `category` asc, `threshold` asc); the category order
/// is then the de-duplicated first-seen sequence of rule categories. This
/// is the order the admin editor shows and the order a reorder request is
/// expressed against.
pub fn derive_category_order(rules: &[PriceRule]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut order = Vec::new();
    for rule in rules {
        if seen.insert(rule.category.as_str()) {
            order.push(rule.category.clone());
        }
    }
    order
}

/// One threshold level within a category, for the public form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeTier {
    pub rule_id: DbId,
    pub threshold: i64,
    pub price_adjustment: i64,
    pub label: Option<String>,
}

/// Per-category view assembled for the public assessment form: the numeric
/// input's display metadata plus the category's tiers, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryProfile {
    pub name: String,
    pub input_placeholder: Option<String>,
    pub input_unit: Option<String>,
    pub tiers: Vec<RangeTier>,
}

/// Build display profiles for every category that has at least one range
/// rule, in snapshot order.
///
/// Categories carry no metadata of their own, so the placeholder and unit
/// come from the first rule in store order that has each field set. A
/// category whose last rule is deleted simply stops appearing.
pub fn build_category_profiles(rules: &[PriceRule]) -> Vec<CategoryProfile> {
    let mut profiles: Vec<CategoryProfile> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for rule in rules.iter().filter(|r| r.kind == RuleKind::Range) {
        let position = match index.get(rule.category.as_str()) {
            Some(&i) => i,
            None => {
                profiles.push(CategoryProfile {
                    name: rule.category.clone(),
                    input_placeholder: None,
                    input_unit: None,
                    tiers: Vec::new(),
                });
                let i = profiles.len() - 1;
                index.insert(rule.category.as_str(), i);
                i
            }
        };

        let profile = &mut profiles[position];
        if profile.input_placeholder.is_none() {
            profile.input_placeholder = rule.input_placeholder.clone();
        }
        if profile.input_unit.is_none() {
            profile.input_unit = rule.input_unit.clone();
        }
        profile.tiers.push(RangeTier {
            rule_id: rule.id,
            threshold: rule.threshold.unwrap_or(0),
            price_adjustment: rule.price_adjustment,
            label: rule.label.clone(),
        });
    }

    for profile in &mut profiles {
        profile.tiers.sort_by_key(|t| t.threshold);
    }
    profiles
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn range_rule(id: DbId, category: &str, threshold: i64, adjustment: i64) -> PriceRule {
        PriceRule {
            id,
            kind: RuleKind::Range,
            category: category.to_string(),
            label: None,
            threshold: Some(threshold),
            price_adjustment: adjustment,
            sort_order: 10,
            input_placeholder: None,
            input_unit: None,
        }
    }

    fn boolean_rule(id: DbId, category: &str, label: &str, adjustment: i64) -> PriceRule {
        PriceRule {
            id,
            kind: RuleKind::Boolean,
            category: category.to_string(),
            label: Some(label.to_string()),
            threshold: None,
            price_adjustment: adjustment,
            sort_order: 10,
            input_placeholder: None,
            input_unit: None,
        }
    }

    fn input_with_rank(rank: i64) -> AssessmentInput {
        AssessmentInput {
            rank,
            ..Default::default()
        }
    }

    // -- highest tier wins --

    #[test]
    fn highest_qualifying_tier_wins_not_cumulative() {
        let rules = vec![
            range_rule(1, CATEGORY_RANK, 0, 100),
            range_rule(2, CATEGORY_RANK, 500, 1000),
            range_rule(3, CATEGORY_RANK, 1000, 5000),
        ];
        let quote = evaluate(&rules, &input_with_rank(750));

        assert_eq!(quote.total, 1000);
        assert_eq!(quote.breakdown.len(), 1);
        assert_eq!(quote.breakdown[0].rule_id, 2);
    }

    #[test]
    fn zero_threshold_rule_is_a_floor() {
        let rules = vec![
            range_rule(1, CATEGORY_RANK, 0, 100),
            range_rule(2, CATEGORY_RANK, 500, 1000),
        ];
        let quote = evaluate(&rules, &input_with_rank(0));

        assert_eq!(quote.total, 100);
    }

    #[test]
    fn no_qualifying_tier_contributes_nothing() {
        let rules = vec![range_rule(1, CATEGORY_RANK, 100, 777)];
        let quote = evaluate(&rules, &input_with_rank(50));

        assert_eq!(quote.total, 0);
        assert!(quote.breakdown.is_empty());
    }

    #[test]
    fn exact_threshold_qualifies() {
        let rules = vec![range_rule(1, CATEGORY_RANK, 500, 1000)];
        let quote = evaluate(&rules, &input_with_rank(500));

        assert_eq!(quote.total, 1000);
    }

    // -- boolean rules --

    #[test]
    fn boolean_rules_are_cumulative_and_independent() {
        let rules = vec![
            boolean_rule(10, "character", "Lucifer", 2000),
            boolean_rule(11, "character", "Bahamut", 3000),
        ];
        let mut input = AssessmentInput::default();
        input.selected_rule_ids.insert(10);
        input.selected_rule_ids.insert(11);

        let quote = evaluate(&rules, &input);
        assert_eq!(quote.total, 5000);
        assert_eq!(quote.breakdown.len(), 2);
    }

    #[test]
    fn unselected_boolean_rules_contribute_nothing() {
        let rules = vec![boolean_rule(10, "character", "Lucifer", 2000)];
        let quote = evaluate(&rules, &AssessmentInput::default());

        assert_eq!(quote.total, 0);
    }

    // -- mixed end-to-end scenarios --

    #[test]
    fn end_to_end_high_rank_with_character() {
        let rules = vec![
            range_rule(1, CATEGORY_RANK, 500, 1000),
            range_rule(2, CATEGORY_RANK, 1000, 5000),
            boolean_rule(3, "character", "Lucifer", 3000),
        ];
        let mut input = input_with_rank(1200);
        input.selected_rule_ids.insert(3);

        let quote = evaluate(&rules, &input);
        assert_eq!(quote.total, 8000);
    }

    #[test]
    fn end_to_end_mid_rank_without_character() {
        let rules = vec![
            range_rule(1, CATEGORY_RANK, 500, 1000),
            range_rule(2, CATEGORY_RANK, 1000, 5000),
            boolean_rule(3, "character", "Lucifer", 3000),
        ];
        let quote = evaluate(&rules, &input_with_rank(600));

        assert_eq!(quote.total, 1000);
    }

    #[test]
    fn categories_are_evaluated_independently() {
        let mut input = input_with_rank(1000);
        input.luck_max = 90;
        input.dynamic_ranges.insert("treasure".to_string(), 40);

        let rules = vec![
            range_rule(1, CATEGORY_RANK, 500, 1000),
            range_rule(2, CATEGORY_LUCK_MAX, 80, 700),
            range_rule(3, "treasure", 50, 300),
        ];
        let quote = evaluate(&rules, &input);

        // rank and luck_max qualify, treasure (40 < 50) does not.
        assert_eq!(quote.total, 1700);
    }

    #[test]
    fn negative_adjustments_are_not_clamped() {
        let rules = vec![boolean_rule(1, "penalty", "Banned once", -4000)];
        let mut input = AssessmentInput::default();
        input.selected_rule_ids.insert(1);

        let quote = evaluate(&rules, &input);
        assert_eq!(quote.total, -4000);
    }

    #[test]
    fn empty_snapshot_quotes_zero() {
        let quote = evaluate(&[], &input_with_rank(9999));
        assert_eq!(quote.total, 0);
        assert!(quote.breakdown.is_empty());
    }

    // -- input coercion --

    #[test]
    fn coerce_numbers_and_numeric_strings() {
        assert_eq!(coerce_amount(&serde_json::json!(42)), 42);
        assert_eq!(coerce_amount(&serde_json::json!(" 42 ")), 42);
        assert_eq!(coerce_amount(&serde_json::json!("42")), 42);
        assert_eq!(coerce_amount(&serde_json::json!(12.9)), 12);
        assert_eq!(coerce_amount(&serde_json::json!("12.9")), 12);
        assert_eq!(coerce_amount(&serde_json::json!(-7)), -7);
    }

    #[test]
    fn coerce_malformed_input_to_zero() {
        assert_eq!(coerce_amount(&serde_json::json!("")), 0);
        assert_eq!(coerce_amount(&serde_json::json!("abc")), 0);
        assert_eq!(coerce_amount(&serde_json::Value::Null), 0);
        assert_eq!(coerce_amount(&serde_json::json!([1, 2])), 0);
        assert_eq!(coerce_amount(&serde_json::json!({"n": 1})), 0);
    }

    #[test]
    fn coerce_booleans() {
        assert_eq!(coerce_amount(&serde_json::json!(true)), 1);
        assert_eq!(coerce_amount(&serde_json::json!(false)), 0);
    }

    // -- input resolution --

    #[test]
    fn well_known_categories_read_dedicated_fields() {
        let mut input = AssessmentInput {
            rank: 1,
            luck_max: 2,
            gacha_limit: 3,
            ..Default::default()
        };
        input.dynamic_ranges.insert("other".to_string(), 4);

        assert_eq!(input_value(&input, CATEGORY_RANK), 1);
        assert_eq!(input_value(&input, CATEGORY_LUCK_MAX), 2);
        assert_eq!(input_value(&input, CATEGORY_GACHA_CHARAS), 3);
        assert_eq!(input_value(&input, "other"), 4);
        assert_eq!(input_value(&input, "missing"), 0);
    }

    // -- rule validation --

    #[test]
    fn validate_rejects_empty_category() {
        assert!(validate_rule(RuleKind::Range, "  ", None, Some(0)).is_err());
    }

    #[test]
    fn validate_requires_threshold_for_range() {
        assert!(validate_rule(RuleKind::Range, "rank", None, None).is_err());
        assert!(validate_rule(RuleKind::Range, "rank", None, Some(100)).is_ok());
    }

    #[test]
    fn validate_requires_label_for_boolean() {
        assert!(validate_rule(RuleKind::Boolean, "character", None, None).is_err());
        assert!(validate_rule(RuleKind::Boolean, "character", Some("  "), None).is_err());
        assert!(validate_rule(RuleKind::Boolean, "character", Some("Lucifer"), None).is_ok());
    }

    // -- category order derivation --

    #[test]
    fn derive_category_order_deduplicates_first_seen() {
        let rules = vec![
            range_rule(1, "rank", 0, 100),
            range_rule(2, "rank", 500, 1000),
            boolean_rule(3, "character", "Lucifer", 3000),
            range_rule(4, "luck_max", 50, 200),
            boolean_rule(5, "character", "Bahamut", 2000),
        ];
        assert_eq!(
            derive_category_order(&rules),
            vec!["rank", "character", "luck_max"]
        );
    }

    #[test]
    fn category_sort_order_leaves_gaps_of_ten() {
        assert_eq!(category_sort_order(0), 10);
        assert_eq!(category_sort_order(1), 20);
        assert_eq!(category_sort_order(4), 50);
    }

    #[test]
    fn reorder_then_rederive_roundtrip() {
        // Simulate the reorder write: every rule of a category gets the
        // category's new spaced sort key, then the store re-sorts.
        let mut rules = vec![
            range_rule(1, "a", 0, 1),
            range_rule(2, "b", 0, 2),
            range_rule(3, "c", 0, 3),
        ];
        let new_order = ["c", "a", "b"];
        for rule in &mut rules {
            let position = new_order
                .iter()
                .position(|c| *c == rule.category)
                .expect("category present");
            rule.sort_order = category_sort_order(position);
        }
        rules.sort_by(|x, y| {
            x.sort_order
                .cmp(&y.sort_order)
                .then_with(|| x.category.cmp(&y.category))
                .then_with(|| x.threshold.cmp(&y.threshold))
        });

        assert_eq!(derive_category_order(&rules), vec!["c", "a", "b"]);
    }

    // -- category profiles --

    #[test]
    fn profiles_include_only_range_categories() {
        let rules = vec![
            range_rule(1, "rank", 500, 1000),
            boolean_rule(2, "character", "Lucifer", 3000),
        ];
        let profiles = build_category_profiles(&rules);

        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "rank");
    }

    #[test]
    fn profile_metadata_comes_from_first_rule_carrying_it() {
        let mut first = range_rule(1, "rank", 500, 1000);
        first.input_unit = Some("lv".to_string());
        let mut second = range_rule(2, "rank", 1000, 5000);
        second.input_placeholder = Some("150".to_string());
        second.input_unit = Some("ignored".to_string());

        let profiles = build_category_profiles(&[first, second]);
        assert_eq!(profiles[0].input_unit.as_deref(), Some("lv"));
        assert_eq!(profiles[0].input_placeholder.as_deref(), Some("150"));
    }

    #[test]
    fn profile_tiers_are_ascending() {
        let rules = vec![
            range_rule(1, "rank", 1000, 5000),
            range_rule(2, "rank", 0, 100),
            range_rule(3, "rank", 500, 1000),
        ];
        let profiles = build_category_profiles(&rules);
        let thresholds: Vec<i64> = profiles[0].tiers.iter().map(|t| t.threshold).collect();

        assert_eq!(thresholds, vec![0, 500, 1000]);
    }

    // -- rule kind parsing --

    #[test]
    fn rule_kind_round_trips_through_storage_form() {
        assert_eq!("range".parse::<RuleKind>().unwrap(), RuleKind::Range);
        assert_eq!("boolean".parse::<RuleKind>().unwrap(), RuleKind::Boolean);
        assert_eq!(RuleKind::Range.as_str(), "range");
        assert_eq!(RuleKind::Boolean.as_str(), "boolean");
        assert!("checkbox".parse::<RuleKind>().is_err());
    }
}
