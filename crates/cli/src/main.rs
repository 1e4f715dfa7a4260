//! ledgersift — run a compliance policy against a transaction ledger.
//!
//! Loads a policy JSON file and a transactions CSV, executes every rule,
//! prints the violation summary with a sample of flagged rows, and (when the
//! ground-truth label column exists) precision/recall/F1.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use ledgersift_core::{load_dotenv, Dataset, EngineConfig, RowId};
use ledgersift_engine::{compute_metrics, ExecutionLog, FieldMap, PolicyExecutor};
use ledgersift_ingest::CsvImporter;
use ledgersift_rules::PolicyLoader;

/// Compliance rule execution against a transaction ledger.
#[derive(Parser, Debug)]
#[command(name = "ledgersift", version, about)]
struct CliArgs {
    /// Path to the policy JSON file.
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Path to the transactions CSV file.
    #[arg(long)]
    data: Option<PathBuf>,

    /// How many flagged rows to print.
    #[arg(long)]
    sample: Option<usize>,

    /// Ground-truth label column used for metrics.
    #[arg(long)]
    label_column: Option<String>,

    /// Skip metrics even when the label column exists.
    #[arg(long)]
    no_metrics: bool,
}

fn main() -> Result<()> {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    let mut config = EngineConfig::from_env();
    if let Some(policy) = args.policy {
        config.policy_path = policy;
    }
    if let Some(data) = args.data {
        config.data_path = data;
    }
    if let Some(sample) = args.sample {
        config.sample_size = sample;
    }
    if let Some(label_column) = args.label_column {
        config.label_column = label_column;
    }
    config.log_summary();

    let loaded = PolicyLoader::load(&config.policy_path)
        .with_context(|| format!("failed to load policy {}", config.policy_path.display()))?;
    for warning in &loaded.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }

    let dataset = CsvImporter::import(&config.data_path)
        .with_context(|| format!("failed to import {}", config.data_path.display()))?;

    let fields = FieldMap::from_config(&config);
    let log = Arc::new(ExecutionLog::with_capacity(config.log_capacity));
    let executor = PolicyExecutor::with_log(fields.clone(), log);
    let table = executor.execute(&loaded.policy, &dataset);

    println!();
    println!(
        "Policy '{}': {} violations across {} rows",
        loaded.policy.name,
        table.len(),
        dataset.len()
    );
    for (rule_id, count) in table.rule_counts() {
        println!("  {:<24} {}", rule_id, count);
    }

    if !table.is_empty() {
        println!();
        println!("First {} violations:", config.sample_size.min(table.len()));
        for violation in table.sample(config.sample_size) {
            println!(
                "  row {:>5}  {:<36} rule {}",
                violation.row,
                describe_row(&dataset, &fields, violation.row),
                violation.triggered_rule
            );
        }
    }

    if args.no_metrics {
        info!("metrics disabled by --no-metrics");
    } else if dataset.has_column(&config.label_column) {
        let metrics = compute_metrics(&dataset, &table, &config.label_column)
            .context("failed to compute metrics")?;
        println!();
        println!("Metrics against '{}':", config.label_column);
        println!("  precision  {:.4}", metrics.precision);
        println!("  recall     {:.4}", metrics.recall);
        println!("  f1_score   {:.4}", metrics.f1_score);
    } else {
        println!();
        println!(
            "Metrics unavailable: no '{}' column in the dataset",
            config.label_column
        );
    }

    Ok(())
}

/// Short account/amount/time description of one flagged row.
fn describe_row(dataset: &Dataset, fields: &FieldMap, row: RowId) -> String {
    let cell = |logical: &str| {
        fields
            .resolve(logical)
            .and_then(|column| dataset.value(row, column))
            .map(|value| value.to_string())
            .unwrap_or_default()
    };
    format!(
        "{} {} at {}",
        cell("account_id"),
        cell("amount"),
        cell("transaction_time")
    )
}
