//! Exam parameters and process settings.
//!
//! [`ExamConfig`] holds the externally visible contract (quota table, pass
//! score, delimiter, default-answer policy). Its `Default` matches the
//! reference deployment: 20 questions over 7 topics, 16 to pass, `;` files.
//! [`Settings`] reads the process environment for the terminal front end.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::exam_engine::error::ConfigError;
use crate::exam_engine::models::Topic;

pub const EXAM_SIZE: usize = 20;
pub const PASS_SCORE: usize = 16;
pub const DEFAULT_DELIMITER: char = ';';

/// Questions drawn per topic. Sums to [`EXAM_SIZE`].
pub const DEFAULT_TOPIC_QUOTAS: [(u8, usize); 7] =
    [(1, 3), (2, 3), (3, 2), (4, 3), (5, 3), (6, 3), (7, 3)];

/// What an untouched question counts as when graded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerPolicy {
    /// No answer until the user picks one; grades as wrong.
    #[default]
    Unanswered,
    /// Showing a question records option A unless something is already recorded.
    PrefillFirst,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamConfig {
    pub quotas: BTreeMap<u8, usize>,
    pub pass_score: usize,
    /// Single ASCII field separator, written as a one-character string in JSON.
    pub delimiter: char,
    pub answer_policy: AnswerPolicy,
}

impl Default for ExamConfig {
    fn default() -> Self {
        ExamConfig {
            quotas: DEFAULT_TOPIC_QUOTAS.into_iter().collect(),
            pass_score: PASS_SCORE,
            delimiter: DEFAULT_DELIMITER,
            answer_policy: AnswerPolicy::Unanswered,
        }
    }
}

impl ExamConfig {
    /// Total exam length: the sum of all quotas.
    pub fn exam_size(&self) -> usize {
        self.quotas.values().sum()
    }

    /// Topics in draw order (ascending).
    pub fn topics(&self) -> impl Iterator<Item = Topic> + '_ {
        self.quotas.keys().map(|&t| Topic(t))
    }

    pub fn quota(&self, topic: Topic) -> Option<usize> {
        self.quotas.get(&topic.0).copied()
    }

    pub fn is_valid_topic(&self, topic: Topic) -> bool {
        self.quotas.contains_key(&topic.0)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: ExamConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quotas.is_empty() {
            return Err(ConfigError::Invalid("quota table is empty".into()));
        }
        if let Some((topic, _)) = self.quotas.iter().find(|(_, n)| **n == 0) {
            return Err(ConfigError::Invalid(format!("topic {topic} has a zero quota")));
        }
        if self.pass_score > self.exam_size() {
            return Err(ConfigError::Invalid(format!(
                "pass score {} exceeds exam size {}",
                self.pass_score,
                self.exam_size()
            )));
        }
        self.delimiter_byte()?;
        Ok(())
    }

    /// The delimiter as the byte the csv reader expects.
    ///
    /// Quotes and line breaks are rejected: the reader could not split rows
    /// with them.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        match u8::try_from(self.delimiter) {
            Ok(byte) if byte.is_ascii() && !matches!(byte, b'"' | b'\n' | b'\r') => Ok(byte),
            _ => Err(ConfigError::Invalid(format!(
                "delimiter {:?} is not usable",
                self.delimiter
            ))),
        }
    }
}

/// Process-level settings for the terminal front end.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bank_path: PathBuf,
    pub exam: ExamConfig,
    pub rust_log: String,
}

impl Settings {
    /// Read the process environment, after loading a `.env` file if one is
    /// present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from `EXAM_BANK_PATH`, `EXAM_CONFIG_PATH`,
    /// `EXAM_PASS_SCORE` and `RUST_LOG` as returned by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bank_path = lookup("EXAM_BANK_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("preguntas.csv"));

        let mut exam = match lookup("EXAM_CONFIG_PATH") {
            Some(path) => ExamConfig::from_file(Path::new(&path))?,
            None => ExamConfig::default(),
        };

        if let Some(raw) = lookup("EXAM_PASS_SCORE") {
            exam.pass_score = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("EXAM_PASS_SCORE {raw:?} is not a number"))
            })?;
            exam.validate()?;
        }

        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Settings { bank_path, exam, rust_log })
    }
}
