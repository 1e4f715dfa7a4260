//! Policy executor: dispatch every rule to its evaluator, collect results.

use std::sync::Arc;

use ledgersift_core::{Dataset, RowId};
use ledgersift_rules::{Policy, Rule, RuleBody};
use tracing::{info, warn};

use crate::audit::{Component, ExecutionLog, RuleOutcome, SkipReason};
use crate::evaluators::{frequency, payment, threshold};
use crate::fields::FieldMap;
use crate::violations::ViolationTable;

/// Executes policies against datasets.
///
/// Holds only configuration: the field map and the shared [`ExecutionLog`]
/// sink. Each [`execute`](Self::execute) call is a pure function of the
/// policy and the dataset; the log accumulates diagnostics but never feeds
/// back into evaluation.
pub struct PolicyExecutor {
    fields: FieldMap,
    log: Arc<ExecutionLog>,
}

impl PolicyExecutor {
    pub fn new(fields: FieldMap) -> Self {
        Self::with_log(fields, Arc::new(ExecutionLog::new()))
    }

    pub fn with_log(fields: FieldMap, log: Arc<ExecutionLog>) -> Self {
        Self { fields, log }
    }

    pub fn log(&self) -> &Arc<ExecutionLog> {
        &self.log
    }

    /// Evaluate every rule in declaration order and concatenate the results.
    ///
    /// The table keeps per-rule grouping: all of rule 1's rows precede rule
    /// 2's. Skipped rules contribute nothing and never abort the run; an
    /// empty table is a valid outcome.
    pub fn execute(&self, policy: &Policy, dataset: &Dataset) -> ViolationTable {
        info!(
            policy = %policy.name,
            rules = policy.rules.len(),
            rows = dataset.len(),
            "executing policy"
        );

        let mut table = ViolationTable::new();
        for rule in &policy.rules {
            let (component, result) = self.dispatch(rule, dataset);
            match result {
                Ok(rows) => {
                    info!(
                        rule_id = %rule.rule_id,
                        kind = %rule.kind(),
                        violations = rows.len(),
                        "rule evaluated"
                    );
                    self.log.record(
                        component,
                        &rule.rule_id,
                        RuleOutcome::Evaluated {
                            violations: rows.len(),
                        },
                    );
                    table.extend(&rule.rule_id, rows);
                }
                Err(reason) => {
                    warn!(
                        rule_id = %rule.rule_id,
                        kind = %rule.kind(),
                        reason = %reason,
                        "rule skipped"
                    );
                    self.log
                        .record(component, &rule.rule_id, RuleOutcome::Skipped { reason });
                }
            }
        }

        info!(
            policy = %policy.name,
            violations = table.len(),
            "policy executed"
        );
        table
    }

    fn dispatch(
        &self,
        rule: &Rule,
        dataset: &Dataset,
    ) -> (Component, Result<Vec<RowId>, SkipReason>) {
        match &rule.body {
            RuleBody::Threshold(body) => (
                Component::ThresholdEvaluator,
                threshold::evaluate(&rule.rule_id, body, dataset, &self.fields),
            ),
            RuleBody::Frequency(body) => (
                Component::FrequencyEvaluator,
                frequency::evaluate(&rule.rule_id, body, dataset, &self.fields),
            ),
            RuleBody::PaymentMethod(body) => (
                Component::PaymentMethodEvaluator,
                payment::evaluate(&rule.rule_id, body, dataset, &self.fields),
            ),
            // reserved tag: carried by the model, no evaluator yet
            RuleBody::CrossBank(_) => (Component::Executor, Err(SkipReason::NoEvaluator)),
        }
    }
}
