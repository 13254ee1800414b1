//! Classification Record - Output structure for query analysis.

use serde::Serialize;

use super::brands::Brand;
use super::funnel::FunnelStage;
use super::intent::Intent;

/// Labels computed once from a single query. Immutable by construction:
/// build it with [`crate::brain::analyze`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationRecord {
    /// Original user query (None when the message had no text content)
    pub query: Option<String>,

    /// Detected intent
    pub intent: Intent,

    /// Funnel stage, derived from the query and `intent`
    pub funnel_stage: FunnelStage,

    /// Most specific brand mentioned, or the "none" sentinel
    #[serde(rename = "brand_mentioned")]
    pub brand: Brand,

    /// Whether the query looks like a support request
    pub is_support: bool,
}
