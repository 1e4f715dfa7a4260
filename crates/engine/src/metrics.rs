//! Classification quality of a violation table against ground-truth labels.

use ledgersift_core::{Dataset, SiftError};
use serde::Serialize;
use tracing::info;

use crate::violations::ViolationTable;

/// Precision, recall, and F1 of one policy execution, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

/// Compare a violation table against the dataset's ground-truth label column.
///
/// Predictions are built over the full dataset, one slot per row, so a row
/// flagged by several rules counts once. Missing label column is the one
/// caller-fatal precondition in the engine: callers must check
/// `dataset.has_column(label_column)` before asking for metrics. Every
/// zero-denominator case yields 0, never an error.
pub fn compute_metrics(
    dataset: &Dataset,
    violations: &ViolationTable,
    label_column: &str,
) -> Result<Metrics, SiftError> {
    if !dataset.has_column(label_column) {
        return Err(SiftError::MissingLabelColumn(label_column.to_string()));
    }

    let mut predicted = vec![false; dataset.len()];
    for violation in violations {
        if let Some(slot) = predicted.get_mut(violation.row.0) {
            *slot = true;
        }
    }

    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut fn_ = 0usize;
    for (id, value) in dataset.column_values(label_column) {
        match (predicted[id.0], value.is_truthy()) {
            (true, true) => tp += 1,
            (true, false) => fp += 1,
            (false, true) => fn_ += 1,
            (false, false) => {}
        }
    }

    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    let denominator = precision + recall;
    let f1_score = if denominator == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / denominator
    };

    info!(tp, fp, false_negatives = fn_, precision, recall, f1_score, "metrics computed");
    Ok(Metrics {
        precision,
        recall,
        f1_score,
    })
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
