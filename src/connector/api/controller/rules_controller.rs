use crate::domain::RuleTable;

use super::super::Container;

pub struct RulesController<'a> {
    container: &'a Container,
}

impl<'a> RulesController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub fn list(&self) -> String {
        let responder = self.container.responder();
        let classifier = responder.classifier();
        let mut output = self.format_rules(classifier.rules());

        let suggestions = classifier.registry().suggestions(3);
        output.push_str(&format!(
            "\nGeneric reply suggests: {}",
            suggestions.join(", ")
        ));
        output
    }

    fn format_rules(&self, rules: &RuleTable) -> String {
        let mut output = format!("Keyword rules ({} total, first match wins):\n\n", rules.len());
        for (i, rule) in rules.rules().iter().enumerate() {
            output.push_str(&format!(
                "{}. {}\n   Keywords: {}\n",
                i + 1,
                rule.name(),
                rule.keywords().join(", ")
            ));
        }
        output
    }
}
