//! Query Analyzer - runs the four classifiers on one query.
//!
//! Order is fixed: intent first, then funnel stage using that intent, then
//! brand and support flag, which are independent of the other two.

use tracing::debug;

use super::brands::extract_brand;
use super::funnel::classify_funnel;
use super::intent::classify_intent;
use super::record::ClassificationRecord;
use super::support::classify_support;

/// Classify a single query on every taxonomy
pub fn analyze(query: Option<&str>) -> ClassificationRecord {
    let intent = classify_intent(query);
    let funnel_stage = classify_funnel(query, intent);
    let brand = extract_brand(query);
    let is_support = classify_support(query);

    debug!(
        intent = %intent,
        funnel_stage = %funnel_stage,
        brand = %brand,
        is_support,
        "query analyzed"
    );

    ClassificationRecord {
        query: query.map(str::to_string),
        intent,
        funnel_stage,
        brand,
        is_support,
    }
}
