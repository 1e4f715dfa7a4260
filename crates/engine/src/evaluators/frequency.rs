//! Frequency evaluator: per-account rolling count over a trailing
//! wall-clock window.
//!
//! For every transaction at time `t`, count the same account's transactions
//! whose timestamp falls in the half-open interval `(t - window, t]`. A row
//! is flagged when that count strictly exceeds the rule's threshold. This is
//! a time window, not a "last N rows" window.
//!
//! Row identity ([`RowId`]) is carried through the sort, the partitioning,
//! and the sweep, and flagged rows are re-selected by identity. Matching by
//! timestamp value instead would mis-select whenever two rows share an exact
//! timestamp, within one account or across accounts.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use ledgersift_core::{Dataset, RowId};
use ledgersift_rules::FrequencyRule;
use rayon::prelude::*;
use tracing::debug;

use crate::audit::SkipReason;
use crate::fields::{logical, FieldMap};

/// Select every row whose trailing-window transaction count exceeds the
/// rule's threshold, per account.
pub fn evaluate(
    rule_id: &str,
    rule: &FrequencyRule,
    dataset: &Dataset,
    fields: &FieldMap,
) -> Result<Vec<RowId>, SkipReason> {
    let Some(count_threshold) = rule.count_threshold else {
        return Err(SkipReason::MissingParameters);
    };
    if rule.window_minutes <= 0 {
        return Err(SkipReason::InvalidWindow);
    }
    // wire-valid windows can still exceed what a TimeDelta can hold
    let window = Duration::try_minutes(rule.window_minutes).ok_or(SkipReason::InvalidWindow)?;

    let account_col = fields
        .resolve_in(logical::ACCOUNT_ID, dataset)
        .ok_or(SkipReason::MissingField)?;
    let time_col = fields
        .resolve_in(logical::TRANSACTION_TIME, dataset)
        .ok_or(SkipReason::MissingField)?;
    // part of the rule's fixed field set: a dataset without an amount column
    // cannot run frequency rules, even though the count does not read it
    fields
        .resolve_in(logical::AMOUNT, dataset)
        .ok_or(SkipReason::MissingField)?;

    // Rows with unparseable timestamps are dropped for this rule only: they
    // can never trigger it, and they are excluded from the output rather
    // than treated as zero-risk.
    let mut timed: Vec<(RowId, DateTime<Utc>)> = Vec::with_capacity(dataset.len());
    for (id, value) in dataset.column_values(time_col) {
        match value.as_timestamp() {
            Some(ts) => timed.push((id, ts)),
            None => {
                debug!(
                    rule_id = %rule_id,
                    row = %id,
                    "dropping row with unparseable timestamp"
                );
            }
        }
    }

    // Stable: rows sharing a timestamp keep their input order.
    timed.sort_by_key(|(_, ts)| *ts);

    // Partition by account key; each partition inherits the sorted order.
    // Rows with no account key cannot belong to a burst and are dropped,
    // like rows with unparseable timestamps.
    let mut partitions: HashMap<String, Vec<(RowId, DateTime<Utc>)>> = HashMap::new();
    for (id, ts) in timed {
        let key = match dataset.value(id, account_col) {
            Some(value) if !value.is_null() => value.to_string(),
            _ => {
                debug!(
                    rule_id = %rule_id,
                    row = %id,
                    "dropping row with no account key"
                );
                continue;
            }
        };
        partitions.entry(key).or_default().push((id, ts));
    }

    // Partitions are independent; order is restored afterwards by RowId.
    let mut flagged: Vec<RowId> = partitions
        .into_par_iter()
        .flat_map_iter(|(_, rows)| sweep_partition(rows, window, count_threshold))
        .collect();
    flagged.sort_unstable();
    Ok(flagged)
}

/// Two-pointer sweep over one account's rows, sorted ascending by time.
///
/// `start` trails the first row still inside `(t - window, t]`; the rolling
/// count at position `i` is then `i - start + 1`.
fn sweep_partition(
    rows: Vec<(RowId, DateTime<Utc>)>,
    window: Duration,
    count_threshold: i64,
) -> Vec<RowId> {
    let mut flagged = Vec::new();
    let mut start = 0;
    for i in 0..rows.len() {
        let t = rows[i].1;
        // overflow-free form of `rows[start].1 <= t - window`
        while t.signed_duration_since(rows[start].1) >= window {
            start += 1;
        }
        let count = (i - start + 1) as i64;
        if count > count_threshold {
            flagged.push(rows[i].0);
        }
    }
    flagged
}
