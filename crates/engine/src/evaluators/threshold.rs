//! Threshold evaluator: `column <op> threshold`, elementwise.

use ledgersift_core::{Dataset, RowId};
use ledgersift_rules::{ThresholdOperator, ThresholdRule};
use tracing::debug;

use crate::audit::SkipReason;
use crate::fields::FieldMap;

/// Select every row whose field value satisfies the rule's comparison.
pub fn evaluate(
    rule_id: &str,
    rule: &ThresholdRule,
    dataset: &Dataset,
    fields: &FieldMap,
) -> Result<Vec<RowId>, SkipReason> {
    let field = rule.field.as_deref().unwrap_or("");
    let column = fields
        .resolve_in(field, dataset)
        .ok_or(SkipReason::MissingField)?;

    let (Some(operator), Some(threshold)) = (rule.operator.as_deref(), rule.threshold) else {
        return Err(SkipReason::MissingParameters);
    };
    let operator: ThresholdOperator = operator
        .parse()
        .map_err(|_| SkipReason::UnsupportedOperator)?;

    let mut flagged = Vec::new();
    for (id, value) in dataset.column_values(column) {
        // non-numeric cells never satisfy a numeric predicate
        let Some(number) = value.as_f64() else {
            if !value.is_null() {
                debug!(
                    rule_id = %rule_id,
                    row = %id,
                    column = %column,
                    "non-numeric cell ignored by threshold rule"
                );
            }
            continue;
        };
        if operator.apply(number, threshold) {
            flagged.push(id);
        }
    }
    Ok(flagged)
}
