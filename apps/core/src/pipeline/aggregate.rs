//! Aggregate statistics over the labeled sample.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::LabeledQuery;

/// Brands kept in the JSON summary
pub const SUMMARY_TOP_BRANDS: usize = 20;

/// Frequency of each label, most frequent first (ties by label).
/// Serializes as a JSON object that keeps this order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Breakdown(Vec<(String, u64)>);

impl Breakdown {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for label in labels {
            *counts.entry(label.as_ref().to_string()).or_default() += 1;
        }

        let mut entries: Vec<(String, u64)> = counts.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Self(entries)
    }

    /// The `n` most frequent labels
    pub fn top(&self, n: usize) -> Self {
        Self(self.0.iter().take(n).cloned().collect())
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<u64> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, c)| *c)
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.0
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, c)| c).sum()
    }
}

impl Serialize for Breakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, count) in &self.0 {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

/// Median; the mean of the two middle values for an even count
pub fn median(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Two decimals, halves rounded to even
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Session-level statistics over the sampled rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionMetrics {
    pub avg_session_length: f64,
    pub avg_user_messages_per_session: f64,
    pub median_session_length: f64,
    pub median_user_messages_per_session: f64,
}

impl SessionMetrics {
    pub fn from_rows(rows: &[LabeledQuery]) -> Self {
        let lengths: Vec<u64> = rows.iter().map(|r| r.session_length).collect();
        let user_counts: Vec<u64> = rows.iter().map(|r| r.num_user_messages).collect();

        Self {
            avg_session_length: mean(&lengths),
            avg_user_messages_per_session: mean(&user_counts),
            median_session_length: median(&lengths),
            median_user_messages_per_session: median(&user_counts),
        }
    }
}

/// JSON summary of one run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub total_sessions_scanned: u64,
    pub total_queries_sampled: u64,
    pub intent_breakdown: Breakdown,
    pub funnel_breakdown: Breakdown,
    /// Top [`SUMMARY_TOP_BRANDS`] brands, "none" included
    pub brand_breakdown: Breakdown,
    pub support_count: u64,
    pub support_percentage: f64,
    pub session_metrics: SessionMetrics,
}

impl PipelineSummary {
    pub fn build(run_id: Uuid, total_sessions_scanned: u64, rows: &[LabeledQuery]) -> Self {
        let total = rows.len() as u64;
        let support_count = rows.iter().filter(|r| r.labels.is_support).count() as u64;
        let support_percentage = if total == 0 {
            0.0
        } else {
            round2(support_count as f64 / total as f64 * 100.0)
        };

        Self {
            run_id,
            generated_at: Utc::now(),
            total_sessions_scanned,
            total_queries_sampled: total,
            intent_breakdown: Breakdown::from_labels(rows.iter().map(|r| r.labels.intent.label())),
            funnel_breakdown: Breakdown::from_labels(
                rows.iter().map(|r| r.labels.funnel_stage.label()),
            ),
            brand_breakdown: brand_breakdown(rows).top(SUMMARY_TOP_BRANDS),
            support_count,
            support_percentage,
            session_metrics: SessionMetrics::from_rows(rows),
        }
    }
}

/// Full brand frequency table, "none" included
pub fn brand_breakdown(rows: &[LabeledQuery]) -> Breakdown {
    Breakdown::from_labels(rows.iter().map(|r| r.labels.brand.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_sorted_by_count_then_label() {
        let breakdown = Breakdown::from_labels(["b", "a", "c", "c", "b"]);
        assert_eq!(
            breakdown.entries(),
            &[("b".to_string(), 2), ("c".to_string(), 2), ("a".to_string(), 1)]
        );
        assert_eq!(breakdown.total(), 5);
        assert_eq!(breakdown.top(1).entries().len(), 1);
        assert_eq!(breakdown.get("a"), Some(1));
        assert_eq!(breakdown.get("z"), None);
    }

    #[test]
    fn test_breakdown_serializes_in_order() {
        let breakdown = Breakdown::from_labels(["x", "y", "y"]);
        assert_eq!(serde_json::to_string(&breakdown).unwrap(), r#"{"y":2,"x":1}"#);
    }

    #[test]
    fn test_mean_and_median() {
        assert_eq!(mean(&[1, 2, 3, 4]), 2.5);
        assert_eq!(median(&[4, 1, 3, 2]), 2.5);
        assert_eq!(median(&[5, 1, 3]), 3.0);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(12.5 / 100.0), 0.12);
    }
}
