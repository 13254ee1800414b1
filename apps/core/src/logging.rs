//! Tracing setup.
//!
//! Human-readable output on stdout, plus a JSON (bunyan) stream appended to
//! a log file so every run leaves a machine-readable trace behind.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

use crate::error::AppError;

const APP_NAME: &str = "chat-funnel";
const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Console-only logging (used by commands that write no files)
pub fn init_console() -> Result<(), AppError> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| AppError::Internal(format!("Failed to initialize logging: {}", e)))
}

/// Console logging plus a bunyan JSON layer appending to `log_file`
pub fn init_with_file(log_file: &Path) -> Result<(), AppError> {
    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(false))
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(APP_NAME.into(), Arc::new(file)))
        .try_init()
        .map_err(|e| AppError::Internal(format!("Failed to initialize logging: {}", e)))
}
