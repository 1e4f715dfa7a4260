//! Policy validation with structured errors and warnings.
//!
//! Errors block the load: identity problems only (empty or duplicate rule
//! ids, empty descriptions). Warnings are advisory and mirror the runtime
//! skip conditions, so an operator can see at load time which rules cannot
//! fire. Validation never rejects a shape the classifier accepts.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::kind::{classify, RuleKind};
use crate::schema::{PolicyDef, RuleDef, ThresholdOperator};

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A blocking validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// JSON-path-like location, e.g. `"rules[2].rule_id"`.
    pub path: String,
    pub message: String,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationResult {
    fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate a parsed [`PolicyDef`].
pub fn validate_policy(policy: &PolicyDef) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen_ids = HashSet::new();

    for (i, rule) in policy.rules.iter().enumerate() {
        if rule.rule_id.trim().is_empty() {
            result.error(format!("rules[{i}].rule_id"), "rule_id must not be empty");
        } else if !seen_ids.insert(rule.rule_id.as_str()) {
            result.error(
                format!("rules[{i}].rule_id"),
                format!("duplicate rule_id '{}'", rule.rule_id),
            );
        }

        if rule.description.trim().is_empty() {
            result.error(
                format!("rules[{i}].description"),
                "description must not be empty",
            );
        }

        check_rule(rule, i, &mut result);
    }

    result
}

/// Per-kind advisory checks mirroring the evaluators' skip conditions.
fn check_rule(rule: &RuleDef, i: usize, result: &mut ValidationResult) {
    let at = |field: &str| format!("rules[{i}].{field}");

    match classify(rule) {
        RuleKind::Threshold => {
            if rule.field.is_none() {
                result.warn(at("field"), "threshold rule has no field; it will be skipped");
            }
            match rule.operator.as_deref() {
                None => result.warn(
                    at("operator"),
                    "threshold rule has no operator; it will be skipped",
                ),
                Some(op) => {
                    if op.parse::<ThresholdOperator>().is_err() {
                        result.warn(
                            at("operator"),
                            format!(
                                "operator '{}' is not supported (expected one of {}); the rule will be skipped",
                                op,
                                ThresholdOperator::SYMBOLS.join(", ")
                            ),
                        );
                    }
                }
            }
            if rule.threshold.is_none() {
                result.warn(
                    at("threshold"),
                    "threshold rule has no threshold; it will be skipped",
                );
            }
            if rule.sender_bank_field.is_some() || rule.receiver_bank_field.is_some() {
                result.warn(
                    at("sender_bank_field"),
                    "cross-bank fields are reserved; no evaluator exists yet",
                );
            }
        }
        RuleKind::Frequency => {
            if rule.time_window_minutes.is_some_and(|w| w <= 0) {
                result.warn(
                    at("time_window_minutes"),
                    "window must be positive; the rule will be skipped",
                );
            }
            if rule.transaction_count_threshold.is_none() {
                result.warn(
                    at("transaction_count_threshold"),
                    "frequency rule has no count threshold; it will be skipped",
                );
            }
        }
        RuleKind::PaymentMethod | RuleKind::CrossBank => {}
    }
}
