use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A keyword-triggered recommendation.
///
/// `keywords` are matched as lowercase substrings of the user's message;
/// `response` is returned verbatim when any of them occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    name: String,
    keywords: Vec<String>,
    response: String,
}

impl CategoryRule {
    pub fn new<K, S>(name: impl Into<String>, keywords: K, response: impl Into<String>) -> Self
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
            response: response.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    /// `lowered` must already be lowercase.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::parse("rule name must not be empty"));
        }
        if self.keywords.is_empty() {
            return Err(DomainError::parse(format!(
                "rule '{}' has no keywords",
                self.name
            )));
        }
        // An empty substring is contained in every message and would shadow all later rules.
        if self.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(DomainError::parse(format!(
                "rule '{}' has an empty keyword",
                self.name
            )));
        }
        if self.response.trim().is_empty() {
            return Err(DomainError::parse(format!(
                "rule '{}' has an empty response",
                self.name
            )));
        }
        Ok(())
    }
}

/// Ordered list of [`CategoryRule`]s. Earlier rules take priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<CategoryRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<CategoryRule>) -> Result<Self, DomainError> {
        if rules.is_empty() {
            return Err(DomainError::parse("rule table must contain at least one rule"));
        }
        for rule in &rules {
            rule.validate()?;
        }
        Ok(Self { rules })
    }

    /// Parse a JSON array of `{name, keywords, response}` objects.
    ///
    /// Keywords are lowercased so hand-edited files may use any casing.
    pub fn from_json_str(json: &str) -> Result<Self, DomainError> {
        let raw: Vec<CategoryRule> = serde_json::from_str(json)
            .map_err(|e| DomainError::parse(format!("invalid rules file: {e}")))?;
        let rules = raw
            .into_iter()
            .map(|r| CategoryRule::new(r.name, r.keywords, r.response))
            .collect();
        Self::new(rules)
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule (in priority order) with a keyword contained in `message`.
    pub fn first_match(&self, message: &str) -> Option<&CategoryRule> {
        let lowered = message.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&lowered))
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            "Computer Science",
            ["code", "programming", "computer", "tech", "software"],
            "Based on your interest in technology, you might enjoy **Computer Science**! \
It involves problem-solving through code and building innovative solutions.\n\n\
**Career paths:** software engineer, data scientist, cybersecurity analyst, game developer.\n\
**Skills you'll build:** programming, algorithms, systems thinking, debugging.\n\n\
What excites you most about technology - building apps, working with data, or something else?",
        ),
        CategoryRule::new(
            "Psychology",
            ["people", "help", "psychology", "mind", "behavior"],
            "It sounds like you're interested in understanding people! **Psychology** could be a \
great fit - it's the study of behavior and the mind.\n\n\
**Career paths:** counselor, clinical psychologist, UX researcher, human resources specialist.\n\
**Skills you'll build:** empathy, research methods, statistics, communication.\n\n\
Would you rather work one-on-one with people or study how groups behave?",
        ),
        CategoryRule::new(
            "Business",
            ["business", "leadership", "money", "management", "entrepreneur"],
            "Your interest in leadership suggests **Business** might be perfect for you! \
It focuses on decision-making and organizational leadership.\n\n\
**Career paths:** entrepreneur, marketing manager, financial analyst, management consultant.\n\
**Skills you'll build:** strategy, negotiation, financial literacy, team leadership.\n\n\
Do you picture yourself starting your own company or leading a team inside one?",
        ),
        CategoryRule::new(
            "Fine Arts",
            ["art", "creative", "design", "draw", "paint"],
            "Your creative interests point toward **Fine Arts**! It's all about expressing \
creativity and developing artistic skills.\n\n\
**Career paths:** illustrator, graphic designer, art director, animator.\n\
**Skills you'll build:** visual composition, critique, portfolio development, art history.\n\n\
Which mediums do you enjoy most - drawing, painting, digital design, or something else?",
        ),
        CategoryRule::new(
            "Biology or Chemistry",
            ["science", "research", "experiment", "biology", "chemistry"],
            "You seem drawn to scientific inquiry! Consider **Biology** or **Chemistry** - both \
involve research and understanding the natural world.\n\n\
**Career paths:** research scientist, doctor, pharmacist, environmental scientist.\n\
**Skills you'll build:** lab technique, data analysis, critical thinking, scientific writing.\n\n\
Are you more curious about living things or about what everything is made of?",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_keeps_priority_order() {
        let table = RuleTable::default();
        let names: Vec<&str> = table
            .rules()
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(
            names,
            vec![
                "Computer Science",
                "Psychology",
                "Business",
                "Fine Arts",
                "Biology or Chemistry"
            ]
        );
    }

    #[test]
    fn default_rules_are_valid() {
        let table = RuleTable::default();
        assert!(RuleTable::new(table.rules().to_vec()).is_ok());
    }

    #[test]
    fn keywords_are_lowercased() {
        let rule = CategoryRule::new("Music", ["Guitar", "PIANO"], "Try Music!");
        assert_eq!(rule.keywords(), &["guitar".to_string(), "piano".to_string()]);
    }

    #[test]
    fn first_match_is_case_insensitive() {
        let table = RuleTable::default();
        let rule = table.first_match("I build SOFTWARE at night").unwrap();
        assert_eq!(rule.name(), "Computer Science");
    }

    #[test]
    fn first_match_prefers_earlier_rule() {
        let table = RuleTable::default();
        let rule = table.first_match("I like to code and read psychology books").unwrap();
        assert_eq!(rule.name(), "Computer Science");
    }

    #[test]
    fn substring_matching_is_literal() {
        // "art" is contained in "start".
        let table = RuleTable::default();
        let rule = table.first_match("I want to start something").unwrap();
        assert_eq!(rule.name(), "Fine Arts");
    }

    #[test]
    fn no_match_returns_none() {
        assert!(RuleTable::default().first_match("zzz unrelated text").is_none());
    }

    #[test]
    fn from_json_str_parses_rules_in_order() {
        let json = r#"[
            {"name": "Music", "keywords": ["Guitar", "song"], "response": "Try Music!"},
            {"name": "History", "keywords": ["past"], "response": "Try History!"}
        ]"#;
        let table = RuleTable::from_json_str(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rules()[0].name(), "Music");
        assert_eq!(table.rules()[0].keywords()[0], "guitar");
        assert_eq!(table.first_match("my GUITAR").unwrap().name(), "Music");
    }

    #[test]
    fn from_json_str_rejects_empty_keyword() {
        let json = r#"[{"name": "Everything", "keywords": ["  "], "response": "Hi"}]"#;
        let err = RuleTable::from_json_str(json).unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
    }

    #[test]
    fn from_json_str_rejects_empty_table() {
        assert!(RuleTable::from_json_str("[]").is_err());
    }

    #[test]
    fn from_json_str_rejects_malformed_json() {
        assert!(RuleTable::from_json_str("{not json").is_err());
    }
}
