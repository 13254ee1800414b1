//! Brand Lexicon and brand extraction.
//!
//! The catalog is searched longest entry first so that a short name contained
//! in a longer one ("google" in "google cloud") never shadows the more
//! specific match. Entries of equal length keep their catalog order: when two
//! of them occur in the same query, the one defined first wins. That tie-break
//! is an artifact of catalog order, not a semantic rule.

use aho_corasick::{AhoCorasick, BuildError};
use serde::{Serialize, Serializer};
use std::cmp::Reverse;
use std::fmt;
use std::sync::LazyLock;

/// Sentinel reported when no catalog entry matches
pub const NO_BRAND: &str = "none";

/// Known brands and organizations, lower-case, in definition order
pub const BRAND_CATALOG: &[&str] = &[
    // Global tech
    "adgent", "google", "microsoft", "apple", "amazon", "facebook", "meta", "twitter", "x",
    "intel", "samsung", "sony", "ibm", "oracle", "cisco", "dell", "hp", "lenovo", "huawei",
    "xiaomi", "nvidia", "amd", "arm", "palantir",
    // SaaS & cloud
    "openai", "chatgpt", "anthropic", "claude", "bard", "slack", "asana", "zoom", "dropbox",
    "box", "figma", "notion", "monday", "airtable", "shopify", "stripe", "zendesk", "hubspot",
    "mailchimp", "salesforce", "adobe", "canva", "atlassian", "jira", "confluence", "trello",
    "datadog", "snowflake", "twilio", "okta", "workday", "service now", "splunk", "tableau",
    "segment", "intercom", "freshdesk", "zapier", "clickup", "miro", "lucidchart", "github",
    "gitlab", "bitbucket", "docker", "kubernetes", "heroku", "netlify", "vercel", "aws",
    "azure", "gcp", "google cloud", "amazon web services",
    // Ecommerce & D2C
    "nike", "tesla", "uber", "airbnb", "netflix", "spotify", "instacart", "doordash", "lyft",
    "shein", "temu", "alibaba", "aliexpress", "ebay", "walmart", "target", "costco",
    "best buy", "wayfair", "etsy", "sephora", "glossier", "allbirds", "warby parker", "casper",
    "peloton", "patagonia", "uniqlo", "zara", "hm", "lulu", "lululemon", "gap", "old navy",
    "banana republic", "adidas", "reebok", "under armour", "the north face", "columbia",
    // Automotive
    "ford", "toyota", "honda", "bmw", "mercedes", "audi", "volkswagen",
    // Travel & hospitality
    "expedia", "booking.com", "tripadvisor", "kayak",
    // Food & beverage
    "mcdonalds", "starbucks", "burger king", "wendys", "kfc", "dominos", "pizza hut", "pepsi",
    "coca-cola",
    // Media & entertainment
    "disney", "warner bros", "comcast", "verizon", "at&t", "t-mobile",
    // Financial services
    "bank of america", "jpmorgan chase", "wells fargo", "citigroup", "goldman sachs",
    "morgan stanley",
    // Niche / other
    "duckduckgo", "brave", "vimeo", "soundcloud", "substack", "medium", "quora", "reddit",
    "pinterest", "tiktok", "snapchat", "discord", "twitch", "kickstarter", "indiegogo",
    "coursera", "udemy", "khan academy", "duolingo", "robinhood", "coinbase", "binance",
    "square", "block", "sofi", "chime", "wise", "revolut", "monzo", "n26", "transferwise",
    "mint", "intuit", "quickbooks", "freshbooks",
];

/// Brand mentioned by a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brand {
    Known(&'static str),
    None,
}

impl Brand {
    /// Catalog entry, or [`NO_BRAND`]
    pub fn as_str(&self) -> &'static str {
        match self {
            Brand::Known(name) => name,
            Brand::None => NO_BRAND,
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Brand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Brand catalog sorted longest-first, backed by an Aho-Corasick automaton
pub struct BrandLexicon {
    entries: Vec<&'static str>,
    automaton: AhoCorasick,
}

static DEFAULT_LEXICON: LazyLock<BrandLexicon> = LazyLock::new(|| {
    BrandLexicon::new(BRAND_CATALOG).expect("Invalid brand catalog: automaton build failed")
});

impl BrandLexicon {
    /// Build a lexicon from a catalog given in definition order.
    /// Entries are expected in lower case.
    pub fn new(catalog: &[&'static str]) -> Result<Self, BuildError> {
        let mut entries = catalog.to_vec();
        // Stable: equal lengths keep definition order
        entries.sort_by_key(|entry| Reverse(entry.chars().count()));

        let automaton = AhoCorasick::new(&entries)?;

        Ok(Self { entries, automaton })
    }

    /// The lexicon used by [`extract_brand`]
    pub fn shared() -> &'static BrandLexicon {
        &DEFAULT_LEXICON
    }

    /// Entries in search order
    pub fn entries(&self) -> &[&'static str] {
        &self.entries
    }

    /// Longest entry occurring in `text` (already lower-cased).
    ///
    /// Pattern ids follow search order, so the smallest id among all
    /// overlapping matches is exactly what a linear longest-first scan
    /// would return.
    pub fn find(&self, text: &str) -> Option<&'static str> {
        self.automaton
            .find_overlapping_iter(text)
            .map(|m| m.pattern().as_usize())
            .min()
            .map(|id| self.entries[id])
    }
}

/// Extract the most specific brand mentioned by a query
pub fn extract_brand(query: Option<&str>) -> Brand {
    match query {
        Some(q) if !q.is_empty() => DEFAULT_LEXICON
            .find(&q.to_lowercase())
            .map_or(Brand::None, Brand::Known),
        _ => Brand::None,
    }
}
