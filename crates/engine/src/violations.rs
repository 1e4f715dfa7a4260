//! The violation table: (row, triggering rule) pairs in concatenation order.

use ledgersift_core::RowId;
use serde::Serialize;

/// One flagged transaction: a row of the original dataset plus the rule that
/// flagged it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub row: RowId,
    pub triggered_rule: String,
}

/// All violations of one policy execution, grouped by rule in declaration
/// order.
///
/// A row flagged by two rules appears twice, once per rule; nothing here
/// deduplicates. The total count is the number of (row, rule) pairs, not
/// unique rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViolationTable {
    entries: Vec<Violation>,
}

impl ViolationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one rule's flagged rows, preserving their order.
    pub fn extend(&mut self, rule_id: &str, rows: Vec<RowId>) {
        self.entries.extend(rows.into_iter().map(|row| Violation {
            row,
            triggered_rule: rule_id.to_string(),
        }));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.entries.iter()
    }

    /// The first `n` violations in concatenation order.
    pub fn sample(&self, n: usize) -> &[Violation] {
        &self.entries[..self.entries.len().min(n)]
    }

    /// Per-rule violation counts, in first-seen (declaration) order.
    pub fn rule_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for violation in &self.entries {
            match counts
                .iter_mut()
                .find(|(rule, _)| rule == &violation.triggered_rule)
            {
                Some((_, count)) => *count += 1,
                None => counts.push((violation.triggered_rule.clone(), 1)),
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a ViolationTable {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
