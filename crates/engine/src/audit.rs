//! In-memory structured log of per-rule evaluation outcomes.
//!
//! The executor records one event per rule: evaluated with a hit count, or
//! skipped with a reason. Entries are capped at a configurable maximum
//! (default 512) with FIFO eviction. Uses `std::sync::RwLock` so the log can
//! be shared across rayon worker threads; it never feeds back into
//! evaluation.

use std::collections::VecDeque;
use std::fmt;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Engine component that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Executor,
    ThresholdEvaluator,
    FrequencyEvaluator,
    PaymentMethodEvaluator,
}

/// Why a rule was skipped instead of evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A referenced field is unmapped, or its column is not in the dataset.
    MissingField,
    /// A column the payment-method evaluator requires is absent. The
    /// reference treated this as fatal; it is normalized to a skip, with a
    /// distinct reason so the normalization stays observable.
    MissingColumn,
    /// The operator symbol is not in the comparison table.
    UnsupportedOperator,
    /// A kind-specific parameter the evaluator needs is missing.
    MissingParameters,
    /// The frequency window is zero or negative.
    InvalidWindow,
    /// The rule kind is reserved and has no evaluator yet.
    NoEvaluator,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::MissingField => "missing field",
            SkipReason::MissingColumn => "missing required column",
            SkipReason::UnsupportedOperator => "unsupported operator",
            SkipReason::MissingParameters => "missing rule parameters",
            SkipReason::InvalidWindow => "non-positive time window",
            SkipReason::NoEvaluator => "no evaluator for this rule kind",
        };
        write!(f, "{}", text)
    }
}

/// Outcome of one rule's evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOutcome {
    Evaluated { violations: usize },
    Skipped { reason: SkipReason },
}

/// One recorded event.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionEvent {
    pub timestamp: DateTime<Utc>,
    pub component: Component,
    pub rule_id: String,
    pub outcome: RuleOutcome,
}

/// Append-only ring of [`ExecutionEvent`]s with FIFO eviction.
pub struct ExecutionLog {
    entries: RwLock<VecDeque<ExecutionEvent>>,
    capacity: usize,
}

impl ExecutionLog {
    pub const DEFAULT_CAPACITY: usize = 512;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Record one event, evicting the oldest entry when full.
    pub fn record(&self, component: Component, rule_id: &str, outcome: RuleOutcome) {
        let event = ExecutionEvent {
            timestamp: Utc::now(),
            component,
            rule_id: rule_id.to_string(),
            outcome,
        };
        let mut guard = self.entries.write().expect("execution log lock poisoned");
        guard.push_back(event);
        while guard.len() > self.capacity {
            guard.pop_front();
        }
    }

    /// All retained events, oldest first.
    pub fn events(&self) -> Vec<ExecutionEvent> {
        let guard = self.entries.read().expect("execution log lock poisoned");
        guard.iter().cloned().collect()
    }

    /// Retained events for one rule, oldest first.
    pub fn events_for(&self, rule_id: &str) -> Vec<ExecutionEvent> {
        let guard = self.entries.read().expect("execution log lock poisoned");
        guard
            .iter()
            .filter(|e| e.rule_id == rule_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .expect("execution log lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .expect("execution log lock poisoned")
            .clear();
    }
}

impl Default for ExecutionLog {
    fn default() -> Self {
        Self::new()
    }
}
