//! Funnel stage classification.
//!
//! Maps a (query, intent) pair onto a marketing-funnel stage with a small
//! decision table. The intent is taken as given; it does not have to come
//! from the same query.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::intent::Intent;
use super::patterns::{contains_any, COMPARISON_KEYWORDS, SUPPORT_KEYWORDS};

/// Marketing-funnel position of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunnelStage {
    Awareness,
    Consideration,
    Decision,
    Retention,
}

impl fmt::Display for FunnelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FunnelStage {
    pub const ALL: [FunnelStage; 4] = [
        FunnelStage::Awareness,
        FunnelStage::Consideration,
        FunnelStage::Decision,
        FunnelStage::Retention,
    ];

    /// Stable identifier used in persisted output
    pub fn label(&self) -> &'static str {
        match self {
            FunnelStage::Awareness => "awareness",
            FunnelStage::Consideration => "consideration",
            FunnelStage::Decision => "decision",
            FunnelStage::Retention => "retention",
        }
    }
}

enum Condition {
    IntentIs(Intent),
    Keywords(&'static [&'static str]),
    IntentIn(&'static [Intent]),
}

impl Condition {
    fn holds(&self, text: &str, intent: Intent) -> bool {
        match self {
            Condition::IntentIs(expected) => intent == *expected,
            Condition::Keywords(keywords) => contains_any(text, keywords),
            Condition::IntentIn(intents) => intents.contains(&intent),
        }
    }
}

struct FunnelRule {
    condition: Condition,
    stage: FunnelStage,
}

// Order matters: a commercial query mentioning "error" is still a decision.
const FUNNEL_RULES: &[FunnelRule] = &[
    FunnelRule {
        condition: Condition::IntentIs(Intent::Commercial),
        stage: FunnelStage::Decision,
    },
    FunnelRule {
        condition: Condition::IntentIs(Intent::Navigational),
        stage: FunnelStage::Retention,
    },
    FunnelRule {
        condition: Condition::Keywords(SUPPORT_KEYWORDS),
        stage: FunnelStage::Retention,
    },
    FunnelRule {
        condition: Condition::Keywords(COMPARISON_KEYWORDS),
        stage: FunnelStage::Consideration,
    },
    FunnelRule {
        condition: Condition::IntentIn(&[Intent::Informational, Intent::EducationalQuiz]),
        stage: FunnelStage::Awareness,
    },
];

/// Classify the funnel stage of a query given its intent.
///
/// An absent or empty query is always [`FunnelStage::Awareness`], whatever the
/// intent. Whitespace-only text counts as present.
pub fn classify_funnel(query: Option<&str>, intent: Intent) -> FunnelStage {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return FunnelStage::Awareness;
    };

    let text = query.to_lowercase();

    FUNNEL_RULES
        .iter()
        .find(|rule| rule.condition.holds(&text, intent))
        .map(|rule| rule.stage)
        .unwrap_or(FunnelStage::Awareness)
}
