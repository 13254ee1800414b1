//! Pattern Library.
//!
//! Keyword sets and pre-compiled regex patterns shared by the classifiers.
//! Keywords are plain substrings and are always matched against text that
//! has already been lower-cased.

use regex::Regex;
use std::sync::LazyLock;

/// Reaching a specific page, area or account screen
pub const NAVIGATIONAL_KEYWORDS: &[&str] = &[
    "go to", "open", "find my", "login", "log in", "dashboard", "account", "settings", "profile",
];

/// Buying, pricing and plan changes
pub const COMMERCIAL_KEYWORDS: &[&str] = &[
    "buy",
    "purchase",
    "price",
    "discount",
    "deal",
    "cost",
    "subscription",
    "pricing",
    "upgrade",
    "license",
];

/// Requests to rework a piece of text
pub const PARAPHRASE_TRIGGERS: &[&str] = &[
    "reword",
    "rewrite",
    "paraphrase",
    "summarize",
    "edit",
    "improve",
    "make it better",
    "proofread",
    "check grammar",
    "translate",
];

/// Troubleshooting vocabulary (funnel retention)
pub const SUPPORT_KEYWORDS: &[&str] = &[
    "reset",
    "error",
    "fix",
    "help",
    "forgot",
    "issue",
    "problem",
    "trouble",
    "broken",
    "not working",
];

/// Support flag vocabulary. Same as [`SUPPORT_KEYWORDS`] plus "support".
pub const SUPPORT_FLAG_KEYWORDS: &[&str] = &[
    "reset",
    "error",
    "fix",
    "help",
    "forgot",
    "issue",
    "problem",
    "trouble",
    "broken",
    "not working",
    "support",
];

/// Comparison and feature research (funnel consideration).
/// " vs " keeps its surrounding spaces so that words like "canvas" don't match.
pub const COMPARISON_KEYWORDS: &[&str] = &[
    " vs ",
    "compare",
    "pros",
    "cons",
    "features",
    "difference",
    "better",
    "best",
    "alternative",
    "review",
    "recommendation",
];

// Compile patterns once at startup
pub static QUIZ_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // A. B. C. D. answer options
        Regex::new(r"(?i)\b(A|B|C|D)\.").expect("Invalid regex: letter option markers"),
        Regex::new(r"(?i)select the correct answer").expect("Invalid regex: select the correct answer"),
        Regex::new(r"(?i)which of the following").expect("Invalid regex: which of the following"),
        Regex::new(r"(?i)what is.*called").expect("Invalid regex: what is ... called"),
        Regex::new(r"(?i)definition of").expect("Invalid regex: definition of"),
        Regex::new(r"(?i)what does.*mean").expect("Invalid regex: what does ... mean"),
        Regex::new(r"(?i)explain.*concept").expect("Invalid regex: explain ... concept"),
        Regex::new(r"(?i)how does.*work").expect("Invalid regex: how does ... work"),
        Regex::new(r"(?i)what is the difference between").expect("Invalid regex: difference between"),
    ]
});

/// Question openers. Anchored at the start of the (trimmed) query.
pub static INFO_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)^(how to|how do|how does)\s+").expect("Invalid regex: how openers"),
        Regex::new(r"(?i)^(what is|what are|what was|what were)\s+").expect("Invalid regex: what openers"),
        Regex::new(r"(?i)^(who is|who are)\s+").expect("Invalid regex: who openers"),
        Regex::new(r"(?i)^why\s+").expect("Invalid regex: why opener"),
        Regex::new(r"(?i)^where\s+").expect("Invalid regex: where opener"),
        Regex::new(r"(?i)^when\s+").expect("Invalid regex: when opener"),
        Regex::new(r"(?i)^can you\s+").expect("Invalid regex: can you opener"),
        Regex::new(r"(?i)^(tell me|give me|show me) about").expect("Invalid regex: tell me about opener"),
    ]
});

/// First keyword of `keywords` found in `text`
pub fn find_keyword(text: &str, keywords: &[&'static str]) -> Option<&'static str> {
    keywords.iter().copied().find(|kw| text.contains(kw))
}

pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Text of the first pattern match, in pattern order
pub fn find_pattern<'t>(text: &'t str, patterns: &[Regex]) -> Option<&'t str> {
    patterns.iter().find_map(|p| p.find(text)).map(|m| m.as_str())
}
