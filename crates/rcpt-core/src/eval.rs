//! Consistency checks over an extracted receipt.
//!
//! The evaluator is a pure function of its input: it runs a fixed sequence
//! of named rule checks over a record and derives a PASS/FAIL verdict from
//! how many of them held. It never errors for well-formed input; an absent
//! record short-circuits to [`Report::Unevaluated`] without running any
//! checks.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::receipt::{Receipt, UNKNOWN};
use crate::money::group_thousands;

/// Allowed relative gap between the items sum and the grand total (15%).
/// Receipts often carry taxes and fees that never appear as line items.
const MATH_TOLERANCE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Minimum number of passing checks for an overall PASS verdict.
const PASS_THRESHOLD: usize = 2;

/// Rule names as they appear in reports.
pub const RULE_MERCHANT: &str = "Has Merchant Name";
pub const RULE_TOTAL: &str = "Has Positive Total";
pub const RULE_MATH: &str = "Math Consistency (Items Sum ≈ Total)";
pub const RULE_ITEMS: &str = "Items Detected";

/// Outcome of a single named rule check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleCheck {
    /// Rule name as shown in reports.
    pub rule: String,

    /// Whether the rule held for this record.
    pub passed: bool,

    /// Optional diagnostic detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl RuleCheck {
    fn new(rule: &str, passed: bool) -> Self {
        Self { rule: rule.to_string(), passed, info: None }
    }

    fn with_info(mut self, info: String) -> Self {
        self.info = Some(info);
        self
    }
}

/// Aggregate PASS/FAIL verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Fail => write!(f, "FAIL"),
        }
    }
}

/// Result of validating one record.
///
/// `Unevaluated` is the no-input short circuit. It is not an empty check
/// list; it serializes to a bare `{"error": ...}` object with no `checks`
/// key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Unevaluated {
        error: String,
    },
    Evaluated {
        checks: Vec<RuleCheck>,
        status: Verdict,
    },
}

impl Report {
    /// Whether the overall verdict is a pass.
    pub fn passed(&self) -> bool {
        matches!(self, Report::Evaluated { status: Verdict::Pass, .. })
    }

    /// The individual checks; empty when the record was never evaluated.
    pub fn checks(&self) -> &[RuleCheck] {
        match self {
            Report::Evaluated { checks, .. } => checks,
            Report::Unevaluated { .. } => &[],
        }
    }
}

/// Validate an extracted record, or the absence of one.
///
/// Checks run in a fixed order: merchant name, positive total, then math
/// consistency when items exist (an always-failing "Items Detected" entry
/// otherwise). The verdict passes when at least two checks hold, so one
/// failed rule is tolerated when all three run.
pub fn validate(record: Option<&Receipt>) -> (bool, Report) {
    let Some(data) = record else {
        return (
            false,
            Report::Unevaluated { error: "No data input".to_string() },
        );
    };

    let mut checks = Vec::with_capacity(3);

    let has_merchant = !data.merchant_name.is_empty() && data.merchant_name != UNKNOWN;
    checks.push(RuleCheck::new(RULE_MERCHANT, has_merchant));

    let has_total = data.total_amount > Decimal::ZERO;
    checks.push(RuleCheck::new(RULE_TOTAL, has_total));

    if !data.items.is_empty() {
        let items_sum = data.items_sum();
        // Tolerance is meaningless against a non-positive total.
        let consistent = has_total
            && (items_sum - data.total_amount).abs() <= data.total_amount * MATH_TOLERANCE;
        checks.push(RuleCheck::new(RULE_MATH, consistent).with_info(format!(
            "Items Sum: {} | Total: {}",
            group_thousands(items_sum),
            group_thousands(data.total_amount),
        )));
    } else {
        checks.push(RuleCheck::new(RULE_ITEMS, false));
    }

    let passed_count = checks.iter().filter(|c| c.passed).count();
    let passed = passed_count >= PASS_THRESHOLD;
    let status = if passed { Verdict::Pass } else { Verdict::Fail };

    (passed, Report::Evaluated { checks, status })
}
