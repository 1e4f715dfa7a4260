//! Typed policy model built from wire definitions at load time.
//!
//! Classification happens exactly once, in [`Rule::from_def`]; evaluators
//! dispatch on the tagged [`RuleBody`] and never re-inspect raw options.

use serde::Serialize;

use crate::kind::{classify, RuleKind};
use crate::schema::{PolicyDef, RuleDef};

/// Parameters of a threshold rule. All optional: a missing one surfaces as a
/// runtime skip, never a load failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdRule {
    pub field: Option<String>,
    pub operator: Option<String>,
    pub threshold: Option<f64>,
}

/// Parameters of a frequency rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyRule {
    pub window_minutes: i64,
    pub count_threshold: Option<i64>,
}

/// Parameters of a payment-method rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentMethodRule {
    pub methods: Vec<String>,
    /// Minimum amount; 0 means any amount qualifies.
    pub threshold: f64,
}

/// Parameters of the reserved cross-bank kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossBankRule {
    pub sender_field: Option<String>,
    pub receiver_field: Option<String>,
}

/// Kind-specific rule parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RuleBody {
    Threshold(ThresholdRule),
    Frequency(FrequencyRule),
    PaymentMethod(PaymentMethodRule),
    CrossBank(CrossBankRule),
}

impl RuleBody {
    pub fn kind(&self) -> RuleKind {
        match self {
            RuleBody::Threshold(_) => RuleKind::Threshold,
            RuleBody::Frequency(_) => RuleKind::Frequency,
            RuleBody::PaymentMethod(_) => RuleKind::PaymentMethod,
            RuleBody::CrossBank(_) => RuleKind::CrossBank,
        }
    }
}

/// One executable rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub rule_id: String,
    pub description: String,
    pub body: RuleBody,
}

impl Rule {
    /// Build the tagged rule from its wire definition.
    pub fn from_def(def: &RuleDef) -> Self {
        let body = match classify(def) {
            RuleKind::Frequency => RuleBody::Frequency(FrequencyRule {
                // classify only returns Frequency when the window is present
                window_minutes: def.time_window_minutes.unwrap_or(0),
                count_threshold: def.transaction_count_threshold,
            }),
            RuleKind::PaymentMethod => RuleBody::PaymentMethod(PaymentMethodRule {
                methods: def.payment_methods.clone().unwrap_or_default(),
                threshold: def.threshold.unwrap_or(0.0),
            }),
            // cross-bank-shaped definitions classify as Threshold; the tag
            // stays reserved for a future evaluator
            RuleKind::Threshold | RuleKind::CrossBank => RuleBody::Threshold(ThresholdRule {
                field: def.field.clone(),
                operator: def.operator.clone(),
                threshold: def.threshold,
            }),
        };
        Self {
            rule_id: def.rule_id.clone(),
            description: def.description.clone(),
            body,
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.body.kind()
    }
}

/// A named, ordered collection of rules. Order decides only the order in
/// which violations are concatenated, never set membership.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Policy {
    pub name: String,
    pub rules: Vec<Rule>,
}

impl Policy {
    /// Build a typed policy from its wire definition.
    pub fn from_def(def: &PolicyDef) -> Self {
        Self {
            name: def.policy_name.clone(),
            rules: def.rules.iter().map(Rule::from_def).collect(),
        }
    }

    /// The empty policy: nothing to execute.
    pub fn empty() -> Self {
        Self::from_def(&PolicyDef::default())
    }
}
