//! Payment-method evaluator: method-set membership plus a minimum amount.

use std::collections::HashSet;

use ledgersift_core::{Dataset, RowId};
use ledgersift_rules::PaymentMethodRule;

use crate::audit::SkipReason;
use crate::fields::{logical, FieldMap};

/// Select every row paid with one of the rule's methods for an amount
/// strictly above the rule's threshold (0 means any amount).
///
/// A missing payment-method or amount column skips the rule with a
/// `MissingColumn` reason. The reference aborted the rule with an error
/// here, unlike the other evaluators; that inconsistency is normalized to
/// the uniform skip policy, and the distinct reason keeps it observable.
pub fn evaluate(
    _rule_id: &str,
    rule: &PaymentMethodRule,
    dataset: &Dataset,
    fields: &FieldMap,
) -> Result<Vec<RowId>, SkipReason> {
    let method_col = fields
        .resolve_in(logical::PAYMENT_METHOD, dataset)
        .ok_or(SkipReason::MissingColumn)?;
    let amount_col = fields
        .resolve_in(logical::AMOUNT, dataset)
        .ok_or(SkipReason::MissingColumn)?;

    let methods: HashSet<&str> = rule.methods.iter().map(String::as_str).collect();

    let mut flagged = Vec::new();
    for (id, value) in dataset.column_values(method_col) {
        // method names are text; other cell types cannot name a method
        let Some(method) = value.as_str() else {
            continue;
        };
        if !methods.contains(method) {
            continue;
        }
        let amount = dataset
            .value(id, amount_col)
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        if amount > rule.threshold {
            flagged.push(id);
        }
    }
    Ok(flagged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(rows: &[(&str, f64)]) -> Dataset {
        let mut data = Dataset::new(["Payment Format", "Amount Paid"]).unwrap();
        for (method, amount) in rows {
            data.push_row(vec![(*method).into(), (*amount).into()])
                .unwrap();
        }
        data
    }

    fn rule(methods: &[&str], threshold: f64) -> PaymentMethodRule {
        PaymentMethodRule {
            methods: methods.iter().map(|m| m.to_string()).collect(),
            threshold,
        }
    }

    #[test]
    fn matches_method_and_amount_together() {
        let data = ledger(&[
            ("Cash", 1500.0),
            ("Wire", 1500.0),
            ("Cash", 800.0),
            ("Cheque", 2000.0),
        ]);
        let flagged = evaluate(
            "R",
            &rule(&["Cash", "Cheque"], 1000.0),
            &data,
            &FieldMap::default(),
        )
        .unwrap();
        assert_eq!(flagged, vec![RowId(0), RowId(3)]);
    }

    #[test]
    fn zero_threshold_means_any_amount() {
        let data = ledger(&[("Cash", 0.5), ("Cash", 0.0)]);
        let flagged = evaluate("R", &rule(&["Cash"], 0.0), &data, &FieldMap::default()).unwrap();
        // strictly above zero: a zero-amount row still does not match
        assert_eq!(flagged, vec![RowId(0)]);
    }

    #[test]
    fn missing_columns_skip_instead_of_failing() {
        let mut no_method = Dataset::new(["Amount Paid"]).unwrap();
        no_method.push_row(vec![1500.0.into()]).unwrap();
        assert_eq!(
            evaluate("R", &rule(&["Cash"], 0.0), &no_method, &FieldMap::default()),
            Err(SkipReason::MissingColumn)
        );

        let mut no_amount = Dataset::new(["Payment Format"]).unwrap();
        no_amount.push_row(vec!["Cash".into()]).unwrap();
        assert_eq!(
            evaluate("R", &rule(&["Cash"], 0.0), &no_amount, &FieldMap::default()),
            Err(SkipReason::MissingColumn)
        );
    }

    #[test]
    fn unknown_methods_never_match() {
        let data = ledger(&[("Bitcoin", 5000.0)]);
        let flagged = evaluate("R", &rule(&["Cash"], 0.0), &data, &FieldMap::default()).unwrap();
        assert!(flagged.is_empty());
    }
}
