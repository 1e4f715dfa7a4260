//! Policy rule execution engine.
//!
//! Takes a typed [`Policy`](ledgersift_rules::Policy) and an immutable
//! [`Dataset`](ledgersift_core::Dataset) and produces a [`ViolationTable`]:
//! every (row, rule) pair where the rule flagged the row. Optionally compares
//! the flagged set against a ground-truth label column for precision/recall/F1.
//!
//! Execution is a pure function of its two inputs. Rule-local failures
//! (missing fields, bad operators, missing parameters) skip the rule with a
//! diagnostic and never abort the policy run; only the metrics precondition
//! (no label column) is allowed to fail a call.

pub mod audit;
pub mod evaluators;
pub mod executor;
pub mod fields;
pub mod metrics;
pub mod violations;

pub use audit::{Component, ExecutionEvent, ExecutionLog, RuleOutcome, SkipReason};
pub use executor::PolicyExecutor;
pub use fields::FieldMap;
pub use metrics::{compute_metrics, Metrics};
pub use violations::{Violation, ViolationTable};
