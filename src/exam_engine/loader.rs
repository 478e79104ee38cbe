//! Question bank loader.
//!
//! Reads a delimited file with a header row and turns it into a validated
//! [`QuestionBank`]. Validation is all-or-nothing: every row is checked and
//! offending values are collected, then the first violated category is
//! reported in this order:
//!
//! 1. missing columns
//! 2. topics outside the configured quota table
//! 3. correct keys outside A/B/C (after trim + uppercase)
//! 4. rows with an empty statement or option
//!
//! A partial bank is never returned. Header names are matched after trimming
//! and without regard to ASCII case, so `Tema` and ` a ` are accepted.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{info, warn};

use crate::exam_engine::{
    config::ExamConfig,
    error::LoadError,
    models::{OptionKey, QuestionBank, QuestionRecord, Topic},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Topic,
    Statement,
    A,
    B,
    C,
    Correct,
}

impl Column {
    const ALL: [Column; 6] = [
        Column::Topic,
        Column::Statement,
        Column::A,
        Column::B,
        Column::C,
        Column::Correct,
    ];

    fn canonical(self) -> &'static str {
        match self {
            Column::Topic     => "tema",
            Column::Statement => "enunciado",
            Column::A         => "A",
            Column::B         => "B",
            Column::C         => "C",
            Column::Correct   => "correcta",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Topic     => &["tema", "topic"],
            Column::Statement => &["enunciado", "statement"],
            Column::A         => &["A"],
            Column::B         => &["B"],
            Column::C         => &["C"],
            Column::Correct   => &["correcta", "correct"],
        }
    }
}

/// Header position of each [`Column`], indexed by `Column as usize`.
fn resolve_columns(headers: &csv::StringRecord) -> Result<[usize; 6], LoadError> {
    let mut positions = [0usize; 6];
    let mut missing = Vec::new();

    for col in Column::ALL {
        let found = headers
            .iter()
            .position(|h| col.aliases().iter().any(|a| h.trim().eq_ignore_ascii_case(a)));
        match found {
            Some(pos) => positions[col as usize] = pos,
            None => missing.push(col.canonical().to_string()),
        }
    }

    if missing.is_empty() {
        Ok(positions)
    } else {
        Err(LoadError::MissingColumns {
            missing,
            expected: Column::ALL.iter().map(|c| c.canonical().to_string()).collect(),
        })
    }
}

/// Map a csv failure to the loader's own variants. `row` is the 1-based data
/// row being read, or 0 for the header.
fn csv_error(err: csv::Error, row: usize) -> LoadError {
    if err.is_io_error() {
        return LoadError::Read(io::Error::from(err));
    }
    if let csv::ErrorKind::UnequalLengths { expected_len, len, .. } = *err.kind() {
        return LoadError::RaggedRow { row, expected: expected_len, found: len };
    }
    LoadError::Malformed(err)
}

/// Topics are matched as exact strings ("1".."7"), so "01" or "1.0" are rejected.
fn parse_topic(raw: &str, config: &ExamConfig) -> Option<Topic> {
    let topic = Topic(raw.parse::<u8>().ok()?);
    (config.is_valid_topic(topic) && topic.to_string() == raw).then_some(topic)
}

/// Parse and validate a question bank from any reader.
pub fn parse_bank<R: Read>(reader: R, config: &ExamConfig) -> Result<QuestionBank, LoadError> {
    let delimiter = config.delimiter_byte()?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(|e| csv_error(e, 0))?.clone();
    let positions = resolve_columns(&headers)?;

    let mut bad_topics = BTreeSet::new();
    let mut bad_keys = BTreeSet::new();
    let mut empty_rows = Vec::new();
    let mut records = Vec::new();

    for (i, row) in csv_reader.records().enumerate() {
        let source_row = i + 1;
        let row = row.map_err(|e| csv_error(e, source_row))?;
        let field = |col: Column| row.get(positions[col as usize]).unwrap_or("").trim();

        let topic_raw = field(Column::Topic);
        let topic = parse_topic(topic_raw, config);
        if topic.is_none() {
            bad_topics.insert(topic_raw.to_string());
        }

        let correct_raw = field(Column::Correct);
        let correct = OptionKey::parse(correct_raw);
        if correct.is_none() {
            bad_keys.insert(correct_raw.to_ascii_uppercase());
        }

        let statement = field(Column::Statement);
        let options = [field(Column::A), field(Column::B), field(Column::C)];
        if statement.is_empty() || options.iter().any(|o| o.is_empty()) {
            empty_rows.push(source_row);
        }

        if let (Some(topic), Some(correct)) = (topic, correct) {
            records.push(QuestionRecord {
                source_row,
                topic,
                statement: statement.to_string(),
                options: options.map(str::to_string),
                correct,
            });
        }
    }

    if !bad_topics.is_empty() {
        return Err(LoadError::InvalidTopics {
            values: bad_topics.into_iter().collect(),
            allowed: config.quotas.keys().copied().collect(),
        });
    }
    if !bad_keys.is_empty() {
        return Err(LoadError::InvalidCorrectKeys { values: bad_keys.into_iter().collect() });
    }
    if !empty_rows.is_empty() {
        return Err(LoadError::EmptyFields { rows: empty_rows });
    }

    Ok(QuestionBank::new(records))
}

/// Load the question bank at `path`.
pub fn load_bank(path: impl AsRef<Path>, config: &ExamConfig) -> Result<QuestionBank, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound { path: path.to_path_buf() },
        _ => LoadError::Io { path: path.to_path_buf(), source },
    })?;

    match parse_bank(file, config) {
        Ok(bank) => {
            info!(path = %path.display(), questions = bank.len(), "question bank loaded");
            Ok(bank)
        }
        Err(err) => {
            let err = match err {
                LoadError::Read(source) => LoadError::Io { path: path.to_path_buf(), source },
                other => other,
            };
            warn!(path = %path.display(), error = %err, "question bank rejected");
            Err(err)
        }
    }
}
