//! Wire schema for policy documents: plain serde data, no interpretation.
//!
//! A [`RuleDef`] carries every kind-specific field as an Option; which fields
//! are populated decides the rule kind (see [`crate::kind::classify`]).
//! The schema never rejects a rule for having the "wrong" combination of
//! fields; that contract belongs to the classifier and the evaluators.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Rule definition ─────────────────────────────────────────────────

/// One declarative rule as written in a policy JSON file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RuleDef {
    /// Unique identifier within the policy.
    pub rule_id: String,
    pub description: String,
    /// Logical field a threshold rule compares, resolved through the field map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Comparison operator symbol, one of `>`, `>=`, `<`, `<=`, `==`, `!=`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// Trailing window in minutes. Presence alone makes this a frequency rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_count_threshold: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_methods: Option<Vec<String>>,
    /// Reserved for cross-bank rules; no evaluator exists yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_bank_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_bank_field: Option<String>,
}

/// A policy document: a name plus its ordered rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PolicyDef {
    #[serde(default = "default_policy_name")]
    pub policy_name: String,
    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

fn default_policy_name() -> String {
    "Policy".to_string()
}

impl Default for PolicyDef {
    fn default() -> Self {
        Self {
            policy_name: default_policy_name(),
            rules: Vec::new(),
        }
    }
}

// ── Threshold operators ─────────────────────────────────────────────

/// Comparison operators accepted by threshold rules, in wire (symbol) form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdOperator {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
    Neq,
}

impl ThresholdOperator {
    /// Every accepted operator symbol.
    pub const SYMBOLS: [&'static str; 6] = [">", ">=", "<", "<=", "==", "!="];

    /// Apply the comparison. Equality comparisons use an epsilon tolerance.
    pub fn apply(self, value: f64, threshold: f64) -> bool {
        match self {
            ThresholdOperator::Gt => value > threshold,
            ThresholdOperator::Gte => value >= threshold,
            ThresholdOperator::Lt => value < threshold,
            ThresholdOperator::Lte => value <= threshold,
            ThresholdOperator::Eq => (value - threshold).abs() < f64::EPSILON,
            ThresholdOperator::Neq => (value - threshold).abs() >= f64::EPSILON,
        }
    }
}

impl fmt::Display for ThresholdOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            ThresholdOperator::Gt => ">",
            ThresholdOperator::Gte => ">=",
            ThresholdOperator::Lt => "<",
            ThresholdOperator::Lte => "<=",
            ThresholdOperator::Eq => "==",
            ThresholdOperator::Neq => "!=",
        };
        write!(f, "{}", symbol)
    }
}

impl FromStr for ThresholdOperator {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            ">" => Ok(ThresholdOperator::Gt),
            ">=" => Ok(ThresholdOperator::Gte),
            "<" => Ok(ThresholdOperator::Lt),
            "<=" => Ok(ThresholdOperator::Lte),
            "==" => Ok(ThresholdOperator::Eq),
            "!=" => Ok(ThresholdOperator::Neq),
            other => Err(format!("unsupported operator: '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD_RULE_JSON: &str = r#"{
        "rule_id": "R1",
        "description": "Flag any transaction above 9000",
        "field": "amount",
        "operator": ">",
        "threshold": 9000
    }"#;

    const FREQUENCY_RULE_JSON: &str = r#"{
        "rule_id": "R2",
        "description": "More than 3 transfers within an hour",
        "time_window_minutes": 60,
        "transaction_count_threshold": 3
    }"#;

    #[test]
    fn parse_threshold_rule() {
        let rule: RuleDef = serde_json::from_str(THRESHOLD_RULE_JSON).unwrap();
        assert_eq!(rule.rule_id, "R1");
        assert_eq!(rule.field.as_deref(), Some("amount"));
        assert_eq!(rule.operator.as_deref(), Some(">"));
        assert_eq!(rule.threshold, Some(9000.0));
        assert!(rule.time_window_minutes.is_none());
        assert!(rule.payment_methods.is_none());
    }

    #[test]
    fn parse_frequency_rule() {
        let rule: RuleDef = serde_json::from_str(FREQUENCY_RULE_JSON).unwrap();
        assert_eq!(rule.time_window_minutes, Some(60));
        assert_eq!(rule.transaction_count_threshold, Some(3));
        assert!(rule.field.is_none());
    }

    #[test]
    fn unknown_field_errors() {
        let json = r#"{
            "rule_id": "R1",
            "description": "typo in threshold",
            "field": "amount",
            "operator": ">",
            "treshold": 9000
        }"#;
        assert!(serde_json::from_str::<RuleDef>(json).is_err());
    }

    #[test]
    fn missing_rule_id_errors() {
        let json = r#"{"description": "no id"}"#;
        assert!(serde_json::from_str::<RuleDef>(json).is_err());
    }

    #[test]
    fn policy_name_defaults() {
        let policy: PolicyDef = serde_json::from_str(r#"{"rules": []}"#).unwrap();
        assert_eq!(policy.policy_name, "Policy");
        assert!(policy.rules.is_empty());
    }

    #[test]
    fn round_trip() {
        let rule: RuleDef = serde_json::from_str(THRESHOLD_RULE_JSON).unwrap();
        let json = serde_json::to_string(&rule).unwrap();
        let rule2: RuleDef = serde_json::from_str(&json).unwrap();
        assert_eq!(rule, rule2);
    }

    // ── ThresholdOperator tests ─────────────────────────────────────

    #[test]
    fn operator_from_symbol() {
        assert_eq!(">".parse::<ThresholdOperator>().unwrap(), ThresholdOperator::Gt);
        assert_eq!(">=".parse::<ThresholdOperator>().unwrap(), ThresholdOperator::Gte);
        assert_eq!("<".parse::<ThresholdOperator>().unwrap(), ThresholdOperator::Lt);
        assert_eq!("<=".parse::<ThresholdOperator>().unwrap(), ThresholdOperator::Lte);
        assert_eq!("==".parse::<ThresholdOperator>().unwrap(), ThresholdOperator::Eq);
        assert_eq!("!=".parse::<ThresholdOperator>().unwrap(), ThresholdOperator::Neq);
        assert!("=>".parse::<ThresholdOperator>().is_err());
        assert!("contains".parse::<ThresholdOperator>().is_err());
    }

    #[test]
    fn operator_display_round_trips() {
        for symbol in ThresholdOperator::SYMBOLS {
            let op: ThresholdOperator = symbol.parse().unwrap();
            assert_eq!(op.to_string(), symbol);
        }
    }

    #[test]
    fn operator_apply() {
        assert!(ThresholdOperator::Gt.apply(1500.0, 1000.0));
        assert!(!ThresholdOperator::Gt.apply(1000.0, 1000.0));
        assert!(ThresholdOperator::Gte.apply(1000.0, 1000.0));
        assert!(ThresholdOperator::Lt.apply(500.0, 1000.0));
        assert!(ThresholdOperator::Lte.apply(1000.0, 1000.0));
        assert!(ThresholdOperator::Eq.apply(0.1 + 0.2, 0.3));
        assert!(!ThresholdOperator::Neq.apply(0.1 + 0.2, 0.3));
        assert!(ThresholdOperator::Neq.apply(1.0, 2.0));
    }
}
