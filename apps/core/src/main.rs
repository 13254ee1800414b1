// Chat Funnel Entry Point

use anyhow::{Context, Result};
use clap::Parser as _;
use tracing::{error, info};
use validator::Validate as _;

use chatfunnel_core::brain;
use chatfunnel_core::cli::{Cli, Commands, RunArgs};
use chatfunnel_core::{logging, pipeline};

fn main() -> Result<()> {
    // A missing .env is fine
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => handle_run(args),
        Commands::Classify { query } => handle_classify(&query),
    }
}

fn handle_run(args: RunArgs) -> Result<()> {
    let config = args.into_config();
    config.validate().context("invalid pipeline configuration")?;

    logging::init_with_file(&config.log_file)?;

    match pipeline::run(&config) {
        Ok(outcome) => {
            info!(
                sampled = outcome.summary.total_queries_sampled,
                labeled = %outcome.labeled_path.display(),
                summary = %outcome.summary_path.display(),
                "Run complete"
            );
            Ok(())
        }
        Err(e) => {
            error!("Error processing data: {}", e);
            Err(e.into())
        }
    }
}

fn handle_classify(query: &str) -> Result<()> {
    logging::init_console()?;

    let record = brain::analyze(Some(query));
    let matched = brain::classify_intent_detailed(Some(query)).matched;

    let output = serde_json::json!({
        "record": record,
        "intent_matched": matched,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
