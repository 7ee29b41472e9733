use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Majors suggested by the generic reply when no registry data is available.
pub const DEFAULT_MAJORS: &[&str] = &["Computer Science", "Psychology", "Business"];

/// Descriptive metadata for one major. Every field is optional so partially
/// filled data files still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MajorInfo {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub careers: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Read-only mapping from major name to [`MajorInfo`], in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MajorsRegistry {
    entries: Vec<(String, MajorInfo)>,
}

impl MajorsRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `name -> fields`.
    ///
    /// Entries whose value is not an object are kept with empty metadata;
    /// only the name is needed for suggestions.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let map: Map<String, Value> = serde_json::from_str(json)?;
        let entries = map
            .into_iter()
            .map(|(name, value)| {
                let info: MajorInfo = serde_json::from_value(value).unwrap_or_default();
                (name, info)
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&MajorInfo> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, info)| info)
    }

    /// Up to `count` major names, substituting [`DEFAULT_MAJORS`] when empty.
    pub fn suggestions(&self, count: usize) -> Vec<&str> {
        if self.entries.is_empty() {
            DEFAULT_MAJORS.iter().copied().take(count).collect()
        } else {
            self.names().take(count).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_suggests_defaults() {
        let registry = MajorsRegistry::empty();
        assert_eq!(
            registry.suggestions(3),
            vec!["Computer Science", "Psychology", "Business"]
        );
    }

    #[test]
    fn suggestions_keep_file_order() {
        let json = r#"{
            "Nursing": {"description": "Care for patients"},
            "Architecture": {"careers": ["Architect"]},
            "Economics": {},
            "Music": {}
        }"#;
        let registry = MajorsRegistry::from_json_str(json).unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.suggestions(3),
            vec!["Nursing", "Architecture", "Economics"]
        );
    }

    #[test]
    fn suggestions_shorter_than_count() {
        let registry = MajorsRegistry::from_json_str(r#"{"Nursing": {}}"#).unwrap();
        assert_eq!(registry.suggestions(3), vec!["Nursing"]);
    }

    #[test]
    fn parses_metadata_and_extras() {
        let json = r#"{"Nursing": {"description": "Care", "skills": ["empathy"], "salary": "varies"}}"#;
        let registry = MajorsRegistry::from_json_str(json).unwrap();
        let info = registry.get("Nursing").unwrap();
        assert_eq!(info.description.as_deref(), Some("Care"));
        assert_eq!(info.skills, vec!["empathy".to_string()]);
        assert_eq!(info.extra.get("salary"), Some(&Value::from("varies")));
    }

    #[test]
    fn non_object_values_still_register_name() {
        let registry = MajorsRegistry::from_json_str(r#"{"Law": "argue well"}"#).unwrap();
        assert_eq!(registry.suggestions(3), vec!["Law"]);
        assert_eq!(registry.get("Law"), Some(&MajorInfo::default()));
    }

    #[test]
    fn rejects_non_object_document() {
        assert!(MajorsRegistry::from_json_str("[1, 2]").is_err());
    }
}
