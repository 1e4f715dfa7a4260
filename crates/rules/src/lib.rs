//! Policy documents for compliance rule execution.
//!
//! This crate owns everything between a policy JSON file and a typed,
//! executable [`Policy`]:
//! - serde wire schema with every kind-specific field optional
//! - shape-based rule kind classification with fixed precedence
//! - a tagged rule model built exactly once at load time
//! - filesystem loader and structural validation

pub mod error;
pub mod kind;
pub mod loader;
pub mod policy;
pub mod schema;
pub mod validation;

pub use error::{PolicyError, Result};
pub use kind::{classify, RuleKind};
pub use loader::{LoadedPolicy, PolicyLoader};
pub use policy::{
    CrossBankRule, FrequencyRule, PaymentMethodRule, Policy, Rule, RuleBody, ThresholdRule,
};
pub use schema::{PolicyDef, RuleDef, ThresholdOperator};
pub use validation::{validate_policy, ValidationResult, ValidationWarning};
