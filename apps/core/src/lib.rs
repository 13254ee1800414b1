// Chat Funnel Core
// Samples user queries from chat sessions and labels them with rule-based classifiers

pub mod brain;
pub mod cli;
pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod preflight;

#[cfg(test)]
mod tests;

pub use error::AppError;
