//! Support request flag.

use super::patterns::{contains_any, SUPPORT_FLAG_KEYWORDS};

/// True if the query reads like a troubleshooting or help request.
/// Absent or empty queries are never support requests.
pub fn classify_support(query: Option<&str>) -> bool {
    match query {
        Some(q) if !q.is_empty() => contains_any(&q.to_lowercase(), SUPPORT_FLAG_KEYWORDS),
        _ => false,
    }
}
