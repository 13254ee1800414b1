//! Intent Classification using ordered keyword and regex rules.
//!
//! Rule groups are evaluated in a fixed order and the first group that
//! matches decides the intent. Later groups never override earlier ones.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::patterns::{
    find_keyword, find_pattern, COMMERCIAL_KEYWORDS, INFO_PATTERNS, NAVIGATIONAL_KEYWORDS,
    PARAPHRASE_TRIGGERS, QUIZ_PATTERNS,
};

/// Detected intent type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Buying, pricing, plans (buy, price, upgrade, etc.)
    #[serde(rename = "commercial")]
    Commercial,
    /// Rewording or editing a text (rewrite, proofread, translate, etc.)
    #[serde(rename = "paraphrase/edit")]
    ParaphraseEdit,
    /// Quiz questions and concept definitions
    #[serde(rename = "educational/quiz")]
    EducationalQuiz,
    /// Open questions (how to, what is, why, etc.)
    #[serde(rename = "informational")]
    Informational,
    /// Reaching a page or account area (login, dashboard, settings, etc.)
    #[serde(rename = "navigational")]
    Navigational,
    /// Fallback
    #[serde(rename = "other")]
    Other,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Intent {
    /// Every intent, in declaration order
    pub const ALL: [Intent; 6] = [
        Intent::Commercial,
        Intent::ParaphraseEdit,
        Intent::EducationalQuiz,
        Intent::Informational,
        Intent::Navigational,
        Intent::Other,
    ];

    /// Stable identifier used in persisted output
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Commercial => "commercial",
            Intent::ParaphraseEdit => "paraphrase/edit",
            Intent::EducationalQuiz => "educational/quiz",
            Intent::Informational => "informational",
            Intent::Navigational => "navigational",
            Intent::Other => "other",
        }
    }
}

/// Result of intent classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentResult {
    /// Detected intent
    pub intent: Intent,
    /// Keyword or pattern text that decided the intent (None for the fallback)
    pub matched: Option<String>,
}

/// What a rule looks for in the normalized query
#[derive(Clone, Copy)]
enum Matcher {
    Keywords(&'static [&'static str]),
    Patterns(&'static LazyLock<Vec<Regex>>),
}

impl Matcher {
    fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        match self {
            Matcher::Keywords(keywords) => find_keyword(text, keywords),
            Matcher::Patterns(patterns) => find_pattern(text, patterns),
        }
    }
}

/// One entry of the precedence table
#[derive(Clone, Copy)]
struct IntentRule {
    intent: Intent,
    matcher: Matcher,
}

/// Intent classifier over an ordered rule table
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

static DEFAULT_CLASSIFIER: LazyLock<IntentClassifier> = LazyLock::new(IntentClassifier::new);

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a classifier with the standard precedence:
    /// navigational, commercial, paraphrase/edit, educational/quiz, informational.
    pub fn new() -> Self {
        let rules = vec![
            IntentRule {
                intent: Intent::Navigational,
                matcher: Matcher::Keywords(NAVIGATIONAL_KEYWORDS),
            },
            IntentRule {
                intent: Intent::Commercial,
                matcher: Matcher::Keywords(COMMERCIAL_KEYWORDS),
            },
            IntentRule {
                intent: Intent::ParaphraseEdit,
                matcher: Matcher::Keywords(PARAPHRASE_TRIGGERS),
            },
            IntentRule {
                intent: Intent::EducationalQuiz,
                matcher: Matcher::Patterns(&QUIZ_PATTERNS),
            },
            IntentRule {
                intent: Intent::Informational,
                matcher: Matcher::Patterns(&INFO_PATTERNS),
            },
        ];

        Self { rules }
    }

    /// Classify a query, reporting which keyword or pattern decided it
    pub fn classify(&self, query: Option<&str>) -> IntentResult {
        let Some(query) = query else {
            return IntentResult {
                intent: Intent::Other,
                matched: None,
            };
        };

        let text = query.to_lowercase();
        let text = text.trim();

        self.rules
            .iter()
            .find_map(|rule| {
                rule.matcher.find(text).map(|m| IntentResult {
                    intent: rule.intent,
                    matched: Some(m.to_string()),
                })
            })
            .unwrap_or(IntentResult {
                intent: Intent::Other,
                matched: None,
            })
    }

    /// Whether the rule for `intent` alone matches the query.
    /// Ignores precedence; used to audit rules one by one.
    pub fn rule_matches(&self, intent: Intent, query: &str) -> bool {
        let text = query.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| rule.intent == intent)
            .any(|rule| rule.matcher.find(text.trim()).is_some())
    }
}

/// Classify a query with the shared default classifier.
/// Absent, empty or whitespace-only queries yield [`Intent::Other`].
pub fn classify_intent(query: Option<&str>) -> Intent {
    DEFAULT_CLASSIFIER.classify(query).intent
}

/// Same as [`classify_intent`] but keeps the deciding keyword or pattern
pub fn classify_intent_detailed(query: Option<&str>) -> IntentResult {
    DEFAULT_CLASSIFIER.classify(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commercial_detection() {
        assert_eq!(classify_intent(Some("I want to buy a subscription")), Intent::Commercial);
        assert_eq!(classify_intent(Some("How much does it cost?")), Intent::Commercial);
    }

    #[test]
    fn test_informational_detection() {
        assert_eq!(classify_intent(Some("How to install something?")), Intent::Informational);
    }

    #[test]
    fn test_navigational_detection() {
        assert_eq!(classify_intent(Some("Go to my dashboard")), Intent::Navigational);
    }

    #[test]
    fn test_unknown_detection() {
        assert_eq!(classify_intent(None), Intent::Other);
        assert_eq!(classify_intent(Some("")), Intent::Other);
        assert_eq!(classify_intent(Some("   ")), Intent::Other);
    }

    #[test]
    fn test_detailed_reports_matched_keyword() {
        let result = classify_intent_detailed(Some("Please REWORD this"));
        assert_eq!(result.intent, Intent::ParaphraseEdit);
        assert_eq!(result.matched.as_deref(), Some("reword"));

        let result = classify_intent_detailed(Some("Hello there"));
        assert_eq!(result.matched, None);
    }

    #[test]
    fn test_precedence_order() {
        let classifier = IntentClassifier::new();
        let precedence: Vec<Intent> = classifier.rules.iter().map(|rule| rule.intent).collect();
        assert_eq!(
            precedence,
            vec![
                Intent::Navigational,
                Intent::Commercial,
                Intent::ParaphraseEdit,
                Intent::EducationalQuiz,
                Intent::Informational,
            ]
        );
    }

    #[test]
    fn test_labels_serialize_to_identifiers() {
        for intent in Intent::ALL {
            let json = serde_json::to_string(&intent).unwrap();
            assert_eq!(json, format!("\"{}\"", intent.label()));
        }
    }
}
