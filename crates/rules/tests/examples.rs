//! Integration tests that verify every example policy JSON in
//! `data/policies/` loads correctly through the full loader path.

use std::path::PathBuf;

use ledgersift_rules::{LoadedPolicy, PolicyLoader, RuleBody, RuleKind};

/// Resolve the policies directory relative to the workspace root.
/// Integration tests run from the crate directory, so we go up two levels.
fn policies_dir() -> PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.join("../../data/policies")
}

fn load_policy(filename: &str) -> LoadedPolicy {
    let path = policies_dir().join(filename);
    PolicyLoader::load(&path)
        .unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

// ── aml_baseline.json ───────────────────────────────────────────────

#[test]
fn load_aml_baseline_example() {
    let loaded = load_policy("aml_baseline.json");
    let policy = &loaded.policy;

    assert_eq!(policy.name, "AML Baseline");
    assert_eq!(policy.rules.len(), 4);
    // every rule is fully specified, so no advisory warnings
    assert!(loaded.warnings.is_empty(), "warnings: {:?}", loaded.warnings);
}

#[test]
fn aml_baseline_rule_kinds_follow_declaration_order() {
    let loaded = load_policy("aml_baseline.json");
    let kinds: Vec<RuleKind> = loaded.policy.rules.iter().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            RuleKind::Threshold,
            RuleKind::Frequency,
            RuleKind::PaymentMethod,
            RuleKind::Threshold,
        ]
    );
}

#[test]
fn aml_baseline_bodies_carry_their_parameters() {
    let loaded = load_policy("aml_baseline.json");
    let rules = &loaded.policy.rules;

    assert_eq!(rules[0].rule_id, "high-value-transfer");
    match &rules[0].body {
        RuleBody::Threshold(t) => {
            assert_eq!(t.field.as_deref(), Some("amount"));
            assert_eq!(t.operator.as_deref(), Some(">"));
            assert_eq!(t.threshold, Some(9000.0));
        }
        other => panic!("expected threshold body, got {:?}", other),
    }

    assert_eq!(rules[1].rule_id, "rapid-movement");
    match &rules[1].body {
        RuleBody::Frequency(f) => {
            assert_eq!(f.window_minutes, 30);
            assert_eq!(f.count_threshold, Some(2));
        }
        other => panic!("expected frequency body, got {:?}", other),
    }

    assert_eq!(rules[2].rule_id, "cash-instruments");
    match &rules[2].body {
        RuleBody::PaymentMethod(p) => {
            assert_eq!(p.methods, vec!["Cash", "Cheque"]);
            assert_eq!(p.threshold, 1000.0);
        }
        other => panic!("expected payment-method body, got {:?}", other),
    }

    // references a column absent from the sample dataset; loads fine and
    // skips at runtime
    assert_eq!(rules[3].rule_id, "risk-score-check");
    assert_eq!(rules[3].kind(), RuleKind::Threshold);
}
