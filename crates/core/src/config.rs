use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_usize(key: &str, default: usize) -> usize {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("invalid {}={:?}, using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

/// Logical field names that accept a `LEDGERSIFT_FIELD_{NAME}` column override.
pub const LOGICAL_FIELDS: &[&str] = &[
    "amount",
    "account_id",
    "transaction_time",
    "payment_method",
    "sender_bank_field",
    "receiver_bank_field",
];

// ── Engine config ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub policy_path: PathBuf,
    pub data_path: PathBuf,
    /// Column holding ground-truth labels for metrics.
    pub label_column: String,
    /// How many flagged rows to print in the run summary.
    pub sample_size: usize,
    /// Ring-buffer size of the execution log.
    pub log_capacity: usize,
    /// `(logical_field, column)` pairs; an empty column unmaps the field.
    pub field_overrides: Vec<(String, String)>,
}

impl EngineConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            policy_path: PathBuf::from(env_or(
                "LEDGERSIFT_POLICY_PATH",
                "data/policies/aml_baseline.json",
            )),
            data_path: PathBuf::from(env_or(
                "LEDGERSIFT_DATA_PATH",
                "data/transactions/sample_small.csv",
            )),
            label_column: env_or("LEDGERSIFT_LABEL_COLUMN", "is_laundering"),
            sample_size: env_usize("LEDGERSIFT_SAMPLE_SIZE", 10),
            log_capacity: env_usize("LEDGERSIFT_LOG_CAPACITY", 512),
            field_overrides: field_overrides_from_env(),
        }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  policy:  {}", self.policy_path.display());
        tracing::info!("  data:    {}", self.data_path.display());
        tracing::info!("  labels:  column={}", self.label_column);
        tracing::info!(
            "  output:  sample_size={}, log_capacity={}",
            self.sample_size,
            self.log_capacity
        );
        for (field, column) in &self.field_overrides {
            if column.is_empty() {
                tracing::info!("  field:   {} unmapped", field);
            } else {
                tracing::info!("  field:   {} -> {}", field, column);
            }
        }
    }
}

/// Scan `LEDGERSIFT_FIELD_{NAME}` vars for per-field column overrides.
/// Reads the raw value: an empty string is a deliberate unmap, not an unset key.
fn field_overrides_from_env() -> Vec<(String, String)> {
    LOGICAL_FIELDS
        .iter()
        .filter_map(|field| {
            let key = format!("LEDGERSIFT_FIELD_{}", field.to_uppercase());
            env::var(&key).ok().map(|column| (field.to_string(), column))
        })
        .collect()
}
