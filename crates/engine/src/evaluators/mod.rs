//! One evaluation algorithm per rule kind.
//!
//! Every evaluator shares the same contract: given a rule's kind-specific
//! parameters, the read-only dataset, and the field map, return the flagged
//! row identities in ascending [`RowId`](ledgersift_core::RowId) order, or a
//! [`SkipReason`](crate::audit::SkipReason) when the rule cannot run against
//! this dataset. Skips are outcomes, not errors; the executor records them
//! and moves on to the next rule.

pub mod frequency;
pub mod payment;
pub mod threshold;
