//! # Pipeline
//!
//! Samples user queries from a sessions file and labels them.
//!
//! 1. Read sessions in bounded chunks (`reader`)
//! 2. Explode each chunk into user-message rows (`explode`)
//! 3. Sample a fixed fraction of each chunk (`sampler`)
//! 4. Classify every sampled query (`crate::brain`)
//! 5. Aggregate and write the outputs (`aggregate`, `output`)

pub mod aggregate;
pub mod explode;
pub mod output;
pub mod reader;
pub mod sampler;

use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info, info_span};
use uuid::Uuid;

use crate::brain::analyze;
use crate::error::AppError;
use crate::models::{LabeledQuery, PipelineConfig, SampledQuery};
use crate::preflight::run_preflight_checks;

pub use aggregate::{Breakdown, PipelineSummary, SessionMetrics};
pub use reader::SessionChunks;
pub use sampler::Sampler;

/// Name of the labeled dataset inside the output directory
pub const LABELED_FILENAME: &str = "sampled_queries.arrow";
/// Name of the summary inside the output directory
pub const SUMMARY_FILENAME: &str = "pipeline_summary.json";

const PREVIEW_ROWS: usize = 5;
const LOG_TOP_BRANDS: usize = 10;

/// What a scan of the sessions file produced
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub total_sessions: u64,
    pub chunks_read: usize,
    pub sampled: Vec<SampledQuery>,
}

/// Files written by a successful run, with its summary
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub summary: PipelineSummary,
    pub labeled_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Read, explode and sample the sessions file chunk by chunk
pub fn scan_and_sample(config: &PipelineConfig) -> Result<ScanResult, AppError> {
    let sampler = Sampler::new(config.sample_frac, config.seed);
    let mut scan = ScanResult::default();

    let mut chunks = SessionChunks::open(&config.input_path, config.chunk_size)?;
    for (i, chunk) in chunks.by_ref().enumerate() {
        let chunk = chunk?;
        let chunk_no = i + 1;
        scan.chunks_read = chunk_no;
        scan.total_sessions += chunk.len() as u64;

        let user_rows = explode::user_queries(&chunk);
        if user_rows.is_empty() {
            info!(chunk = chunk_no, sessions = chunk.len(), user_msgs = 0, sampled = 0, "chunk scanned");
            continue;
        }

        let user_msgs = user_rows.len();
        let sampled = sampler.sample(user_rows);
        info!(
            chunk = chunk_no,
            sessions = chunk.len(),
            user_msgs,
            sampled = sampled.len(),
            "chunk scanned"
        );
        scan.sampled.extend(sampled);

        if config.smoke_test {
            info!("Smoke test mode: stopping after first chunk");
            break;
        }
    }

    info!(lines = chunks.lines_read(), chunks = scan.chunks_read, "scan finished");
    Ok(scan)
}

/// Classify sampled rows
pub fn label(sampled: Vec<SampledQuery>) -> Vec<LabeledQuery> {
    sampled
        .into_iter()
        .map(|row| {
            let labels = analyze(row.query.as_deref());
            LabeledQuery::new(row, labels)
        })
        .collect()
}

fn log_report(rows: &[LabeledQuery], summary: &PipelineSummary) {
    info!("Sample queries (first {}):", PREVIEW_ROWS);
    for row in rows.iter().take(PREVIEW_ROWS) {
        info!(
            intent = %row.labels.intent,
            funnel_stage = %row.labels.funnel_stage,
            brand = %row.labels.brand,
            is_support = row.labels.is_support,
            session_length = row.session_length,
            num_user_messages = row.num_user_messages,
            "  {}",
            row.query().unwrap_or("<no text>")
        );
    }

    let total = summary.total_queries_sampled;
    let sections = [
        ("Intent breakdown", &summary.intent_breakdown),
        ("Funnel stage breakdown", &summary.funnel_breakdown),
    ];
    for (title, breakdown) in sections {
        info!("{}:", title);
        for (label, count) in breakdown.entries() {
            info!("  {:<20} {}", label, count);
        }
        info!("  Total: {}", breakdown.total());
    }

    info!("Top brands mentioned:");
    for (label, count) in aggregate::brand_breakdown(rows).top(LOG_TOP_BRANDS).entries() {
        info!("  {:<20} {}", label, count);
    }
    info!("  Total: {}", total);

    info!(
        "Support queries count: {} ({:.1}%)",
        summary.support_count, summary.support_percentage
    );
}

/// Run the whole pipeline: preflight, scan, classify, aggregate, write.
///
/// On error nothing is written.
pub fn run(config: &PipelineConfig) -> Result<PipelineOutcome, AppError> {
    let run_id = Uuid::new_v4();
    let span = info_span!("pipeline", %run_id);
    let _guard = span.enter();
    let start = Instant::now();

    info!("Starting pipeline...");
    info!("Reading from: {}", config.input_path.display());
    info!("Chunk size: {}", config.chunk_size);
    info!("Sample fraction: {}%", config.sample_frac * 100.0);
    info!("Smoke test mode: {}", config.smoke_test);

    run_preflight_checks(config).into_result()?;

    let scan = scan_and_sample(config)?;
    if scan.sampled.is_empty() {
        error!("No data found!");
        return Err(AppError::NoData);
    }

    info!("Total sessions scanned: {}", scan.total_sessions);
    info!("Total user queries sampled: {}", scan.sampled.len());

    info!("Classifying queries...");
    let rows = label(scan.sampled);
    let summary = PipelineSummary::build(run_id, scan.total_sessions, &rows);

    log_report(&rows, &summary);

    let labeled_path = config.output_dir.join(LABELED_FILENAME);
    let summary_path = config.output_dir.join(SUMMARY_FILENAME);
    output::write_outputs(&labeled_path, &summary_path, &rows, &summary)?;
    info!("➡️ Written {}", labeled_path.display());
    info!("➡️ Written {}", summary_path.display());

    info!(elapsed_ms = start.elapsed().as_millis() as u64, "Pipeline finished");

    Ok(PipelineOutcome {
        summary,
        labeled_path,
        summary_path,
    })
}
