//! Rule kind classification from the shape of a definition.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::schema::RuleDef;

/// Supported rule kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Threshold,
    Frequency,
    PaymentMethod,
    /// Reserved: never produced by [`classify`], no evaluator exists.
    CrossBank,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Threshold => write!(f, "threshold"),
            RuleKind::Frequency => write!(f, "frequency"),
            RuleKind::PaymentMethod => write!(f, "payment_method"),
            RuleKind::CrossBank => write!(f, "cross_bank"),
        }
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "threshold" => Ok(RuleKind::Threshold),
            "frequency" => Ok(RuleKind::Frequency),
            "payment_method" => Ok(RuleKind::PaymentMethod),
            "cross_bank" => Ok(RuleKind::CrossBank),
            other => Err(format!("unknown rule kind: '{}'", other)),
        }
    }
}

/// Decide a rule's kind from which fields its definition populates.
///
/// Precedence, first match wins:
/// 1. `time_window_minutes` present → Frequency.
/// 2. `payment_methods` present and non-empty → PaymentMethod.
/// 3. Everything else → Threshold.
///
/// Never rejects: a definition with no discriminating fields at all is a
/// threshold rule that will fail its own field checks at evaluation time.
pub fn classify(def: &RuleDef) -> RuleKind {
    if def.time_window_minutes.is_some() {
        return RuleKind::Frequency;
    }
    if def.payment_methods.as_ref().is_some_and(|m| !m.is_empty()) {
        return RuleKind::PaymentMethod;
    }
    RuleKind::Threshold
}
