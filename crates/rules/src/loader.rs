//! Filesystem loader for policy JSON documents.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{PolicyError, Result};
use crate::policy::Policy;
use crate::schema::PolicyDef;
use crate::validation::{validate_policy, ValidationWarning};

/// A successfully loaded policy plus any advisory warnings for display.
#[derive(Debug, Clone)]
pub struct LoadedPolicy {
    pub policy: Policy,
    pub warnings: Vec<ValidationWarning>,
}

pub struct PolicyLoader;

impl PolicyLoader {
    /// Load and validate a policy JSON file.
    ///
    /// Validation errors fail the load; warnings are logged and carried in
    /// the result for display.
    pub fn load(path: &Path) -> Result<LoadedPolicy> {
        let contents = fs::read_to_string(path)?;
        let def: PolicyDef = serde_json::from_str(&contents)?;
        Self::from_def(&def)
    }

    /// Like `load`, but a missing file yields the empty policy instead of an
    /// error. Any other failure still propagates.
    pub fn load_or_default(path: &Path) -> Result<LoadedPolicy> {
        if !path.exists() {
            warn!(path = %path.display(), "policy file not found, using empty policy");
            return Ok(LoadedPolicy {
                policy: Policy::empty(),
                warnings: Vec::new(),
            });
        }
        Self::load(path)
    }

    /// Validate a parsed definition and build the typed policy.
    pub fn from_def(def: &PolicyDef) -> Result<LoadedPolicy> {
        let validation = validate_policy(def);
        if !validation.valid {
            let joined = validation
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.path, e.message))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(PolicyError::Validation(joined));
        }

        for warning in &validation.warnings {
            warn!(path = %warning.path, "{}", warning.message);
        }

        let policy = Policy::from_def(def);
        info!(
            policy = %policy.name,
            rules = policy.rules.len(),
            warnings = validation.warnings.len(),
            "policy loaded"
        );
        Ok(LoadedPolicy {
            policy,
            warnings: validation.warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;

    fn write_policy(contents: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("create tempdir");
        let path = dir.path().join("policy.json");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn load_valid_policy() {
        let (_dir, path) = write_policy(
            r#"{
                "policy_name": "Test Policy",
                "rules": [
                    {"rule_id": "R1", "description": "big transfers", "field": "amount", "operator": ">", "threshold": 9000}
                ]
            }"#,
        );

        let loaded = PolicyLoader::load(&path).unwrap();
        assert_eq!(loaded.policy.name, "Test Policy");
        assert_eq!(loaded.policy.rules.len(), 1);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn load_carries_warnings() {
        let (_dir, path) = write_policy(
            r#"{"rules": [{"rule_id": "R1", "description": "incomplete threshold"}]}"#,
        );

        let loaded = PolicyLoader::load(&path).unwrap();
        assert_eq!(loaded.policy.rules.len(), 1);
        assert!(!loaded.warnings.is_empty());
    }

    #[test]
    fn duplicate_ids_fail_the_load() {
        let (_dir, path) = write_policy(
            r#"{
                "rules": [
                    {"rule_id": "R1", "description": "a", "field": "amount", "operator": ">", "threshold": 1},
                    {"rule_id": "R1", "description": "b", "field": "amount", "operator": "<", "threshold": 2}
                ]
            }"#,
        );

        let err = PolicyLoader::load(&path).unwrap_err();
        assert!(matches!(err, PolicyError::Validation(_)));
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn unknown_keys_fail_the_parse() {
        let (_dir, path) = write_policy(
            r#"{"rules": [{"rule_id": "R1", "description": "typo", "treshold": 5}]}"#,
        );
        assert!(matches!(
            PolicyLoader::load(&path),
            Err(PolicyError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = PolicyLoader::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, PolicyError::Io(_)));
    }

    #[test]
    fn load_or_default_substitutes_empty_policy() {
        let loaded = PolicyLoader::load_or_default(Path::new("does/not/exist.json")).unwrap();
        assert_eq!(loaded.policy.name, "Policy");
        assert!(loaded.policy.rules.is_empty());
    }
}
