//! Translation from the logical field vocabulary rules use to the physical
//! column names of a dataset.

use std::collections::HashMap;

use ledgersift_core::{Dataset, EngineConfig};

/// Logical field names with a fixed meaning across all rule kinds.
pub mod logical {
    pub const AMOUNT: &str = "amount";
    pub const ACCOUNT_ID: &str = "account_id";
    pub const TRANSACTION_TIME: &str = "transaction_time";
    pub const PAYMENT_METHOD: &str = "payment_method";
    pub const SENDER_BANK: &str = "sender_bank_field";
    pub const RECEIVER_BANK: &str = "receiver_bank_field";
}

/// Static map from logical field names to dataset column names.
///
/// Three outcomes of a lookup:
/// - mapped to a column name: use that column
/// - mapped to an empty string: the field is deliberately absent
/// - not in the map at all: the name passes through unchanged, so rules can
///   reference ad-hoc columns the fixed vocabulary does not know about
#[derive(Debug, Clone)]
pub struct FieldMap {
    entries: HashMap<String, String>,
}

impl Default for FieldMap {
    /// The reference ledger schema (IBM-style transaction export).
    fn default() -> Self {
        let mut map = FieldMap {
            entries: HashMap::new(),
        };
        map.set(logical::TRANSACTION_TIME, "Timestamp");
        map.set(logical::AMOUNT, "Amount Paid");
        map.set(logical::SENDER_BANK, "From Bank");
        map.set(logical::RECEIVER_BANK, "To Bank");
        map.set(logical::ACCOUNT_ID, "From Account");
        map.set(logical::PAYMENT_METHOD, "Payment Format");
        // a threshold rule must name its own column; there is no default
        map.set("field", "");
        map
    }
}

impl FieldMap {
    /// Build the reference map with per-field overrides from config applied.
    /// An override with an empty column unmaps the field.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut map = FieldMap::default();
        for (field, column) in &config.field_overrides {
            map.set(field, column);
        }
        map
    }

    /// Map a logical field to a column, replacing any existing entry.
    pub fn set(&mut self, field: impl Into<String>, column: impl Into<String>) {
        self.entries.insert(field.into(), column.into());
    }

    /// Resolve a logical name to a physical column name.
    ///
    /// `None` means the field is absent: the name was empty, or its entry
    /// maps to the empty string. Unknown names pass through unchanged.
    pub fn resolve<'a>(&'a self, field: &'a str) -> Option<&'a str> {
        if field.is_empty() {
            return None;
        }
        match self.entries.get(field) {
            Some(column) if column.is_empty() => None,
            Some(column) => Some(column.as_str()),
            None => Some(field),
        }
    }

    /// Resolve a logical name and require the column to exist in `dataset`.
    ///
    /// Absent-by-map and absent-from-dataset are deliberately the same
    /// outcome: either way the rule cannot run against this dataset.
    pub fn resolve_in<'a>(&'a self, field: &'a str, dataset: &Dataset) -> Option<&'a str> {
        let column = self.resolve(field)?;
        dataset.has_column(column).then_some(column)
    }
}
