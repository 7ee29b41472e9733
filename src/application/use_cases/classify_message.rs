use std::sync::Arc;

use crate::application::{ResponseObserver, TracingObserver};
use crate::domain::{CategoryRule, MajorsRegistry, RuleTable};

/// How many registry entries the generic reply suggests.
pub const GENERIC_SUGGESTION_COUNT: usize = 3;

/// Deterministic, rule-based reply generator used whenever the LLM path is
/// unavailable.
///
/// The lowercased message is tested against each [`CategoryRule`] in table
/// order; the first rule with a keyword contained in the message wins. When
/// nothing matches, a generic reply lists the first few majors from the
/// [`MajorsRegistry`].
pub struct KeywordClassifier {
    rules: Arc<RuleTable>,
    registry: Arc<MajorsRegistry>,
    observer: Arc<dyn ResponseObserver>,
}

impl KeywordClassifier {
    pub fn new(rules: Arc<RuleTable>, registry: Arc<MajorsRegistry>) -> Self {
        Self {
            rules,
            registry,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ResponseObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn registry(&self) -> &MajorsRegistry {
        &self.registry
    }

    pub fn matching_rule(&self, message: &str) -> Option<&CategoryRule> {
        self.rules.first_match(message)
    }

    pub fn classify(&self, message: &str) -> String {
        if let Some(rule) = self.matching_rule(message) {
            self.observer.rule_matched(rule.name());
            return rule.response().to_string();
        }

        let suggested = self.registry.suggestions(GENERIC_SUGGESTION_COUNT);
        self.observer.generic_reply(&suggested);
        generic_reply(&suggested.join(", "))
    }
}

fn generic_reply(majors: &str) -> String {
    format!(
        "That's interesting! Based on what you've shared, you might want to explore majors like \
{majors}. Tell me more about your specific interests - do you enjoy working with people, \
solving technical problems, or being creative?"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> KeywordClassifier {
        KeywordClassifier::new(
            Arc::new(RuleTable::default()),
            Arc::new(MajorsRegistry::empty()),
        )
    }

    #[test]
    fn recommends_computer_science() {
        let reply = classifier().classify("I love computers and coding");
        assert!(reply.contains("Computer Science"));
    }

    #[test]
    fn recommends_psychology() {
        let reply = classifier().classify("I want to help people with their problems");
        assert!(reply.contains("Psychology"));
    }

    #[test]
    fn recommends_business() {
        let reply = classifier().classify("Someday I want to be an ENTREPRENEUR");
        assert!(reply.contains("Business"));
    }

    #[test]
    fn recommends_fine_arts() {
        let reply = classifier().classify("I enjoy painting");
        assert!(reply.contains("Fine Arts"));
    }

    #[test]
    fn recommends_sciences() {
        let reply = classifier().classify("Chemistry experiments are fun");
        assert!(reply.contains("Biology"));
        assert!(reply.contains("Chemistry"));
    }

    #[test]
    fn earlier_rule_wins_on_overlap() {
        let c = classifier();
        let reply = c.classify("I write code and read psychology papers");
        assert_eq!(reply, RuleTable::default().rules()[0].response());
        assert_eq!(
            c.matching_rule("psychology and code").unwrap().name(),
            "Computer Science"
        );
    }

    #[test]
    fn generic_reply_lists_default_majors() {
        let reply = classifier().classify("zzz unrelated text");
        assert!(reply.contains("Computer Science, Psychology, Business"));
        assert!(reply.starts_with("That's interesting!"));
    }

    #[test]
    fn generic_reply_uses_registry_entries() {
        let registry = MajorsRegistry::from_json_str(
            r#"{"Nursing": {}, "Architecture": {}, "Economics": {}, "Music": {}}"#,
        )
        .unwrap();
        let c = KeywordClassifier::new(Arc::new(RuleTable::default()), Arc::new(registry));
        let reply = c.classify("zzz");
        assert!(reply.contains("Nursing, Architecture, Economics."));
        assert!(!reply.contains("Music"));
    }

    #[test]
    fn classification_is_deterministic() {
        let c = classifier();
        assert_eq!(c.classify("I like design"), c.classify("I like design"));
    }
}
