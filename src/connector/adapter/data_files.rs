use std::path::Path;

use tracing::{debug, info, warn};

use crate::domain::{DomainError, MajorsRegistry, RuleTable};

/// Default location of the majors data file, relative to the working directory.
pub const DEFAULT_MAJORS_FILE: &str = "data/majors.json";

/// Default dotenv file, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Copy `KEY=value` pairs from a dotenv file into the process environment.
///
/// Variables already set in the environment win. Returns `Ok(false)` when the
/// file does not exist.
pub fn load_env_file(path: &Path) -> Result<bool, DomainError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(DomainError::parse(format!("{}: {e}", path.display()))),
    }
}

/// Load the majors registry from `path`.
///
/// Never fails: a missing, unreadable or malformed file yields an empty
/// registry and the classifier falls back to its built-in major list.
pub fn load_majors_registry(path: &Path) -> MajorsRegistry {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Majors file {} not found, using defaults", path.display());
            return MajorsRegistry::empty();
        }
        Err(e) => {
            warn!("Failed to read majors file {}: {e}", path.display());
            return MajorsRegistry::empty();
        }
    };

    match MajorsRegistry::from_json_str(&contents) {
        Ok(registry) => {
            info!("Loaded {} majors from {}", registry.len(), path.display());
            registry
        }
        Err(e) => {
            warn!("Ignoring malformed majors file {}: {e}", path.display());
            MajorsRegistry::empty()
        }
    }
}

/// Load a rule table from a JSON file.
///
/// Unlike the majors file this is only read when explicitly requested, so
/// problems are reported instead of silently replaced.
pub fn load_rule_table(path: &Path) -> Result<RuleTable, DomainError> {
    let contents = std::fs::read_to_string(path)?;
    let table = RuleTable::from_json_str(&contents)?;
    info!("Loaded {} keyword rules from {}", table.len(), path.display());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn env_file_fills_unset_variables_only() {
        std::env::set_var("FUTUREME_TEST_PRESET", "from-process");
        let file = temp_file(
            "FUTUREME_TEST_DOTENV_KEY=sk-from-file\nFUTUREME_TEST_PRESET=from-file\n",
        );

        assert!(load_env_file(file.path()).unwrap());
        assert_eq!(
            std::env::var("FUTUREME_TEST_DOTENV_KEY").as_deref(),
            Ok("sk-from-file")
        );
        assert_eq!(
            std::env::var("FUTUREME_TEST_PRESET").as_deref(),
            Ok("from-process")
        );
    }

    #[test]
    fn missing_env_file_is_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(!load_env_file(&dir.path().join(".env")).unwrap());
    }

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn missing_majors_file_is_empty_registry() {
        let dir = tempfile::tempdir().expect("tempdir");
        let registry = load_majors_registry(&dir.path().join("nope.json"));
        assert!(registry.is_empty());
    }

    #[test]
    fn malformed_majors_file_is_empty_registry() {
        let file = temp_file("{ this is not json");
        assert!(load_majors_registry(file.path()).is_empty());
    }

    #[test]
    fn loads_majors_in_file_order() {
        let file = temp_file(r#"{"Zoology": {}, "Anthropology": {}}"#);
        let registry = load_majors_registry(file.path());
        assert_eq!(registry.suggestions(3), vec!["Zoology", "Anthropology"]);
    }

    #[test]
    fn loads_rule_table() {
        let file = temp_file(r#"[{"name": "Music", "keywords": ["song"], "response": "Music!"}]"#);
        let table = load_rule_table(file.path()).unwrap();
        assert_eq!(table.rules()[0].name(), "Music");
    }

    #[test]
    fn missing_rule_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_rule_table(&dir.path().join("rules.json")).unwrap_err();
        assert!(matches!(err, DomainError::Io(_)));
    }

    #[test]
    fn invalid_rule_file_is_parse_error() {
        let file = temp_file(r#"[{"name": "Bad", "keywords": [""], "response": "x"}]"#);
        let err = load_rule_table(file.path()).unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
    }
}
