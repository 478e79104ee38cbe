use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Question primitives
// ---------------------------------------------------------------------------

/// Numbered category grouping related questions (1..=7 in the default table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Topic(pub u8);

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
}

impl OptionKey {
    /// All keys in display order.
    pub const ALL: [OptionKey; 3] = [OptionKey::A, OptionKey::B, OptionKey::C];

    /// Parse a key leniently: surrounding whitespace and case are ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "A" => Some(OptionKey::A),
            "B" => Some(OptionKey::B),
            "C" => Some(OptionKey::C),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            OptionKey::A => 0,
            OptionKey::B => 1,
            OptionKey::C => 2,
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKey::A => write!(f, "A"),
            OptionKey::B => write!(f, "B"),
            OptionKey::C => write!(f, "C"),
        }
    }
}

/// One validated row of the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// 1-based data row in the source file. Identifies the original row.
    pub source_row: usize,
    pub topic: Topic,
    pub statement: String,
    /// Option texts in A, B, C order.
    pub options: [String; 3],
    pub correct: OptionKey,
}

impl QuestionRecord {
    pub fn option(&self, key: OptionKey) -> &str {
        &self.options[key.index()]
    }

    pub fn is_correct(&self, key: OptionKey) -> bool {
        self.correct == key
    }
}

// ---------------------------------------------------------------------------
// Bank / exam
// ---------------------------------------------------------------------------

/// Validated, immutable question collection. Shared read-only across sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    records: Vec<QuestionRecord>,
}

impl QuestionBank {
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        QuestionBank { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.records.iter()
    }

    /// Every record tagged with `topic`, in source order.
    pub fn pool(&self, topic: Topic) -> Vec<&QuestionRecord> {
        self.records.iter().filter(|r| r.topic == topic).collect()
    }

    /// Number of records per topic.
    pub fn topic_counts(&self) -> BTreeMap<Topic, usize> {
        let mut counts = BTreeMap::new();
        for r in &self.records {
            *counts.entry(r.topic).or_insert(0) += 1;
        }
        counts
    }
}

/// A generated exam: fixed order for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    questions: Vec<QuestionRecord>,
}

impl Exam {
    pub(crate) fn new(questions: Vec<QuestionRecord>) -> Self {
        Exam { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }
}

// ---------------------------------------------------------------------------
// Grading output
// ---------------------------------------------------------------------------

/// A question whose recorded answer did not match the correct key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedQuestion {
    /// Position in the exam (0-based).
    pub index: usize,
    pub question: QuestionRecord,
    /// `None` when the question was never answered.
    pub selected: Option<OptionKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingResult {
    pub correct: usize,
    pub wrong: usize,
    pub total: usize,
    pub pass_score: usize,
    pub passed: bool,
    /// Missed questions in exam order.
    pub missed: Vec<MissedQuestion>,
}
