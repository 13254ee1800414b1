//! Pipeline Tests
//!
//! Scanning, sampling, labeling and aggregation over small session files.

use crate::brain::{Brand, FunnelStage, Intent};
use crate::error::AppError;
use crate::models::{PipelineConfig, SampledQuery};
use crate::pipeline::{label, scan_and_sample, Breakdown, PipelineSummary};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};
use uuid::Uuid;

fn write_sessions(dir: &Path, lines: &[&str]) -> PipelineConfig {
    let input_path = dir.join("sessions.jsonl");
    fs::write(&input_path, lines.join("\n")).expect("Failed to write sessions file");
    PipelineConfig {
        input_path,
        sample_frac: 1.0,
        output_dir: dir.join("out"),
        ..PipelineConfig::default()
    }
}

fn sampled(session_id: &str, query: Option<&str>, length: u64, users: u64) -> SampledQuery {
    SampledQuery {
        session_id: session_id.to_string(),
        query: query.map(str::to_string),
        session_length: length,
        num_user_messages: users,
    }
}

fn fixture() -> (TempDir, PipelineConfig) {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = write_sessions(
        dir.path(),
        &[
            r#"{"id": "s1", "messages": [{"role": "user", "content": "Go to my dashboard"}, {"role": "assistant", "content": "ok"}]}"#,
            r#"{"id": "s2", "messages": [{"role": "assistant", "content": "hi"}]}"#,
            r#"{"id": "s3", "messages": [{"role": "user", "content": "I want to buy a subscription"}, {"role": "user", "content": null}, {"role": "assistant", "content": "sure"}]}"#,
        ],
    );
    (dir, config)
}

#[cfg(test)]
mod scan_tests {
    use super::*;

    #[test]
    fn test_scan_counts_sessions_and_user_rows() {
        let (_dir, config) = fixture();
        let scan = scan_and_sample(&config).unwrap();
        assert_eq!(scan.total_sessions, 3);
        assert_eq!(scan.chunks_read, 1);
        assert_eq!(
            scan.sampled,
            vec![
                sampled("s1", Some("Go to my dashboard"), 2, 1),
                sampled("s3", Some("I want to buy a subscription"), 3, 2),
                sampled("s3", None, 3, 2),
            ]
        );
    }

    #[test]
    fn test_smoke_test_stops_after_first_productive_chunk() {
        let (_dir, mut config) = fixture();
        config.chunk_size = 1;
        config.smoke_test = true;
        let scan = scan_and_sample(&config).unwrap();
        assert_eq!(scan.chunks_read, 1);
        assert_eq!(scan.total_sessions, 1);
        assert_eq!(scan.sampled.len(), 1);
    }

    #[test]
    fn test_smoke_test_skips_chunks_without_user_messages() {
        let dir = tempdir().unwrap();
        let mut config = write_sessions(
            dir.path(),
            &[
                r#"{"id": "a", "messages": [{"role": "system", "content": "x"}]}"#,
                r#"{"id": "b", "messages": [{"role": "user", "content": "hello"}]}"#,
                r#"{"id": "c", "messages": [{"role": "user", "content": "again"}]}"#,
            ],
        );
        config.chunk_size = 1;
        config.smoke_test = true;
        let scan = scan_and_sample(&config).unwrap();
        assert_eq!(scan.chunks_read, 2);
        assert_eq!(scan.total_sessions, 2);
        assert_eq!(scan.sampled[0].session_id, "b");
    }

    #[test]
    fn test_sampling_fraction_applies_per_chunk() {
        let dir = tempdir().unwrap();
        let lines: Vec<String> = (0..40)
            .map(|i| format!(r#"{{"id": {}, "messages": [{{"role": "user", "content": "q{}"}}]}}"#, i, i))
            .collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut config = write_sessions(dir.path(), &refs);
        config.chunk_size = 20;
        config.sample_frac = 0.25;

        let first = scan_and_sample(&config).unwrap();
        assert_eq!(first.chunks_read, 2);
        assert_eq!(first.sampled.len(), 10);

        let second = scan_and_sample(&config).unwrap();
        assert_eq!(first.sampled, second.sampled);
    }

    #[test]
    fn test_malformed_line_aborts_scan() {
        let dir = tempdir().unwrap();
        let config = write_sessions(dir.path(), &[r#"{"id": "ok"}"#, r#"{"id": "#]);
        match scan_and_sample(&config) {
            Err(AppError::MalformedRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected malformed record error, got {:?}", other.map(|s| s.total_sessions)),
        }
    }

    #[test]
    fn test_non_string_role_does_not_abort_scan() {
        let dir = tempdir().unwrap();
        let config = write_sessions(
            dir.path(),
            &[
                r#"{"id": "a", "messages": [{"role": 1, "content": "numeric role"}, {"role": "user", "content": "hello"}]}"#,
                r#"{"id": "b", "messages": [{"role": ["user"], "content": "list role"}]}"#,
            ],
        );
        let scan = scan_and_sample(&config).unwrap();
        assert_eq!(scan.total_sessions, 2);
        assert_eq!(scan.sampled, vec![sampled("a", Some("hello"), 2, 1)]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let config = PipelineConfig {
            input_path: dir.path().join("nope.jsonl"),
            ..PipelineConfig::default()
        };
        assert!(matches!(scan_and_sample(&config), Err(AppError::Io(_))));
    }
}

#[cfg(test)]
mod summary_tests {
    use super::*;

    #[test]
    fn test_label_runs_every_classifier() {
        let rows = label(vec![
            sampled("s1", Some("Go to my dashboard"), 2, 1),
            sampled("s2", Some("I use Google Cloud Platform"), 4, 2),
            sampled("s3", None, 1, 1),
        ]);
        assert_eq!(rows[0].labels.intent, Intent::Navigational);
        assert_eq!(rows[0].labels.funnel_stage, FunnelStage::Retention);
        assert_eq!(rows[1].labels.brand, Brand::Known("google cloud"));
        assert_eq!(rows[2].labels.intent, Intent::Other);
        assert_eq!(rows[2].query(), None);
        assert_eq!(rows[1].session_length, 4);
    }

    #[test]
    fn test_summary_statistics() {
        let rows = label(vec![
            sampled("s1", Some("I need help with an error"), 2, 1),
            sampled("s2", Some("buy a license"), 4, 2),
            sampled("s2", Some("upgrade my plan"), 4, 2),
            sampled("s3", Some("hello"), 10, 5),
        ]);
        let summary = PipelineSummary::build(Uuid::new_v4(), 7, &rows);

        assert_eq!(summary.total_sessions_scanned, 7);
        assert_eq!(summary.total_queries_sampled, 4);
        assert_eq!(summary.intent_breakdown.get("commercial"), Some(2));
        assert_eq!(summary.intent_breakdown.get("other"), Some(2));
        assert_eq!(summary.funnel_breakdown.get("decision"), Some(2));
        assert_eq!(summary.funnel_breakdown.get("retention"), Some(1));
        assert_eq!(summary.funnel_breakdown.get("awareness"), Some(1));
        assert_eq!(summary.brand_breakdown.get("none"), Some(4));
        assert_eq!(summary.support_count, 1);
        assert_eq!(summary.support_percentage, 25.0);
        assert_eq!(summary.session_metrics.avg_session_length, 5.0);
        assert_eq!(summary.session_metrics.median_session_length, 4.0);
        assert_eq!(summary.session_metrics.avg_user_messages_per_session, 2.5);
        assert_eq!(summary.session_metrics.median_user_messages_per_session, 2.0);
    }

    #[test]
    fn test_support_percentage_rounds_half_to_even() {
        let mut queries = vec![sampled("s0", Some("I need help with an error"), 1, 1)];
        queries.extend((1..800).map(|i| sampled(&format!("s{}", i), Some("hello"), 1, 1)));
        let summary = PipelineSummary::build(Uuid::new_v4(), 800, &label(queries));

        assert_eq!(summary.support_count, 1);
        // 1 / 800 = 0.125%
        assert_eq!(summary.support_percentage, 0.12);
    }

    #[test]
    fn test_brand_breakdown_keeps_top_twenty() {
        let brands = crate::brain::BRAND_CATALOG
            .iter()
            .filter(|b| b.len() > 6)
            .take(25)
            .map(|b| sampled("s", Some(*b), 1, 1))
            .collect();
        let rows = label(brands);
        let summary = PipelineSummary::build(Uuid::new_v4(), 1, &rows);
        assert_eq!(summary.brand_breakdown.entries().len(), 20);
    }

    #[test]
    fn test_summary_json_shape() {
        let rows = label(vec![sampled("s1", Some("Compare these options"), 3, 1)]);
        let summary = PipelineSummary::build(Uuid::nil(), 1, &rows);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["run_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["intent_breakdown"]["other"], 1);
        assert_eq!(json["funnel_breakdown"]["consideration"], 1);
        assert_eq!(json["support_percentage"], 0.0);
        assert_eq!(json["session_metrics"]["median_session_length"], 3.0);
        assert!(json["generated_at"].is_string());
    }

    #[test]
    fn test_breakdown_total_matches_rows() {
        let breakdown = Breakdown::from_labels(Intent::ALL.iter().map(|i| i.label()));
        assert_eq!(breakdown.total(), 6);
        assert!(breakdown.entries().iter().all(|(_, c)| *c == 1));
    }
}
