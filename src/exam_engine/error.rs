//! Error types for loading, configuring and generating exams.

use std::path::PathBuf;

use thiserror::Error;

use crate::exam_engine::models::Topic;

/// The question bank could not be loaded. Fatal for the whole session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("question bank {} does not exist", .path.display())]
    NotFound { path: PathBuf },
    #[error("could not read question bank {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A read failed while parsing from a reader with no known path.
    #[error("could not read question bank: {0}")]
    Read(#[source] std::io::Error),
    #[error("row {row} has {found} fields, expected {expected}")]
    RaggedRow { row: usize, expected: u64, found: u64 },
    #[error("malformed question bank: {0}")]
    Malformed(#[source] csv::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("missing columns {missing:?}; expected {expected:?}")]
    MissingColumns {
        missing: Vec<String>,
        expected: Vec<String>,
    },
    #[error("invalid topics {values:?}; topics must be one of {allowed:?}")]
    InvalidTopics { values: Vec<String>, allowed: Vec<u8> },
    #[error("invalid correct answers {values:?}; must be A, B or C")]
    InvalidCorrectKeys { values: Vec<String> },
    #[error("rows {rows:?} have an empty statement or option")]
    EmptyFields { rows: Vec<usize> },
}

/// A topic has fewer questions than its quota. Fatal for one generate attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("topic {topic} needs {required} questions but only {available} are available (short by {})", short_by(.required, .available))]
pub struct InsufficientPoolError {
    pub topic: Topic,
    pub required: usize,
    pub available: usize,
}

fn short_by(required: &usize, available: &usize) -> usize {
    required.saturating_sub(*available)
}

impl InsufficientPoolError {
    pub fn shortfall(&self) -> usize {
        short_by(&self.required, &self.available)
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("could not read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
