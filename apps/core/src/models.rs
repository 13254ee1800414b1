use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use validator::Validate;

use crate::brain::ClassificationRecord;

/// Configuration of one sampling run.
#[derive(Debug, Clone, Validate)]
pub struct PipelineConfig {
    /// Newline-delimited JSON file of chat sessions. Checked by preflight.
    pub input_path: PathBuf,
    /// Number of sessions held in memory at a time.
    #[validate(range(min = 1))]
    pub chunk_size: usize,
    /// Fraction of user queries sampled from each chunk, in (0, 1].
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub sample_frac: f64,
    /// Seed for the per-chunk sampler.
    pub seed: u64,
    /// Stop after the first chunk that contains user messages.
    pub smoke_test: bool,
    /// Directory receiving the labeled dataset and the summary.
    pub output_dir: PathBuf,
    /// File receiving the JSON log stream.
    pub log_file: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("./chat_sessions_dec2024.json"),
            chunk_size: 100_000,
            sample_frac: 0.01,
            seed: 42,
            smoke_test: false,
            output_dir: PathBuf::from("."),
            log_file: PathBuf::from("pipeline_output.txt"),
        }
    }
}

/// Represents a single message within a chat session.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender (e.g., "user", "assistant").
    /// Kept as raw JSON: a non-string role just means "not a user".
    #[serde(default)]
    pub role: Value,
    /// The message content. Anything other than a JSON string is not a query.
    #[serde(default)]
    pub content: Value,
}

impl ChatMessage {
    pub fn is_user(&self) -> bool {
        self.role.as_str() == Some("user")
    }

    /// Text content, if the content is a string
    pub fn text(&self) -> Option<&str> {
        self.content.as_str()
    }
}

/// Represents one line of the sessions file.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionRecord {
    /// Session identifier, any JSON value.
    #[serde(default)]
    pub id: Value,
    /// Messages in conversation order.
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl SessionRecord {
    /// Session id as text: strings verbatim, null as empty, anything else as JSON
    pub fn session_id(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Total number of messages, all roles included.
    pub fn session_length(&self) -> usize {
        self.messages.len()
    }

    pub fn num_user_messages(&self) -> usize {
        self.messages.iter().filter(|m| m.is_user()).count()
    }
}

/// A user query drawn from a session, with its session metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledQuery {
    pub session_id: String,
    pub query: Option<String>,
    pub session_length: u64,
    pub num_user_messages: u64,
}

/// A sampled query with its labels. One row of the labeled dataset.
#[derive(Debug, Clone)]
pub struct LabeledQuery {
    pub session_id: String,
    pub session_length: u64,
    pub num_user_messages: u64,
    pub labels: ClassificationRecord,
}

impl LabeledQuery {
    pub fn new(sampled: SampledQuery, labels: ClassificationRecord) -> Self {
        Self {
            session_id: sampled.session_id,
            session_length: sampled.session_length,
            num_user_messages: sampled.num_user_messages,
            labels,
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.labels.query.as_deref()
    }
}
