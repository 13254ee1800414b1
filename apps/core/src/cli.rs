use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::models::PipelineConfig;

#[derive(Debug, Parser)]
#[command(name = "chat-funnel")]
#[command(about = "Sample chat sessions and label user queries by intent, funnel stage, brand and support flag", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Sample a sessions file, classify the sample and write the outputs")]
    Run(RunArgs),

    #[command(about = "Classify a single query and print its labels as JSON")]
    Classify {
        #[arg(help = "The query to classify")]
        query: String,
    },
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(
        short,
        long,
        env = "FUNNEL_INPUT",
        default_value = "./chat_sessions_dec2024.json",
        help = "Newline-delimited JSON file of chat sessions"
    )]
    pub input: PathBuf,

    #[arg(long, env = "FUNNEL_CHUNK_SIZE", default_value_t = 100_000, help = "Sessions per chunk")]
    pub chunk_size: usize,

    #[arg(long, env = "FUNNEL_SAMPLE_FRAC", default_value_t = 0.01, help = "Fraction of user queries to sample")]
    pub sample_frac: f64,

    #[arg(long, env = "FUNNEL_SEED", default_value_t = 42, help = "Sampler seed")]
    pub seed: u64,

    #[arg(long, env = "FUNNEL_SMOKE_TEST", help = "Stop after the first chunk with user messages")]
    pub smoke_test: bool,

    #[arg(short, long, env = "FUNNEL_OUTPUT_DIR", default_value = ".", help = "Directory for the output files")]
    pub output_dir: PathBuf,

    #[arg(long, env = "FUNNEL_LOG_FILE", default_value = "pipeline_output.txt", help = "JSON log file")]
    pub log_file: PathBuf,
}

impl RunArgs {
    pub fn into_config(self) -> PipelineConfig {
        PipelineConfig {
            input_path: self.input,
            chunk_size: self.chunk_size,
            sample_frac: self.sample_frac,
            seed: self.seed,
            smoke_test: self.smoke_test,
            output_dir: self.output_dir,
            log_file: self.log_file,
        }
    }
}
