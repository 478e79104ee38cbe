//! Per-user exam session.
//!
//! An [`ExamSession`] owns the current exam, the cursor and the recorded
//! answers. Every user action is an explicit method; the presentation layer
//! re-reads state (or a [`SessionSnapshot`](crate::exam_engine::snapshot::SessionSnapshot))
//! after each one.
//!
//! ## Phases
//!
//! | Phase        | Entered by            | Left by               |
//! |--------------|-----------------------|-----------------------|
//! | `NoExam`     | `new`, `reset`        | successful `generate` |
//! | `InProgress` | successful `generate` | `reset`, `generate`   |
//!
//! Finishing is not a phase. [`ExamSession::finish`] grades the answers as
//! they stand and leaves the session untouched, so it can be called again.
//!
//! Navigation past either end is a disabled action: `next`/`previous` return
//! `false` and change nothing.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::exam_engine::{
    config::{AnswerPolicy, ExamConfig},
    error::InsufficientPoolError,
    generator::{generate_exam, generate_exam_from_entropy},
    grading::grade,
    models::{Exam, GradingResult, OptionKey, QuestionBank, QuestionRecord},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    NoExam,
    InProgress,
}

/// Aggregated answer counts, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
}

#[derive(Debug, Clone)]
pub struct ExamSession {
    bank: Arc<QuestionBank>,
    config: ExamConfig,
    exam: Option<Exam>,
    cursor: usize,
    answers: HashMap<usize, OptionKey>,
}

impl ExamSession {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, config: ExamConfig) -> Self {
        ExamSession {
            bank,
            config,
            exam: None,
            cursor: 0,
            answers: HashMap::new(),
        }
    }

    // ── actions ──────────────────────────────────────────────────────────────

    /// Start a fresh exam with an entropy-seeded RNG.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientPoolError` when a topic cannot fill its quota; the
    /// previous exam, cursor and answers are kept as they were.
    pub fn generate(&mut self) -> Result<(), InsufficientPoolError> {
        let result = generate_exam_from_entropy(&self.bank, &self.config);
        self.start(result)
    }

    /// Same as [`generate`](Self::generate) with a caller-supplied RNG.
    pub fn generate_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), InsufficientPoolError> {
        let result = generate_exam(&self.bank, &self.config, rng);
        self.start(result)
    }

    fn start(&mut self, result: Result<Exam, InsufficientPoolError>) -> Result<(), InsufficientPoolError> {
        let exam = result.map_err(|err| {
            warn!(error = %err, "exam generation failed");
            err
        })?;
        info!(questions = exam.len(), "exam started");
        self.exam = Some(exam);
        self.cursor = 0;
        self.answers.clear();
        self.show_current();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.exam = None;
        self.cursor = 0;
        self.answers.clear();
        debug!("session reset");
    }

    /// Record `key` for question `index`. Returns `false` when there is no
    /// exam or the index is out of range.
    pub fn select_answer(&mut self, index: usize, key: OptionKey) -> bool {
        match &self.exam {
            Some(exam) if index < exam.len() => {
                self.answers.insert(index, key);
                true
            }
            _ => false,
        }
    }

    /// Record `key` for the question under the cursor.
    pub fn answer_current(&mut self, key: OptionKey) -> bool {
        self.select_answer(self.cursor, key)
    }

    pub fn next(&mut self) -> bool {
        if self.exam.is_none() || self.is_last() {
            return false;
        }
        self.cursor += 1;
        self.show_current();
        debug!(cursor = self.cursor, "moved to next question");
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.exam.is_none() || self.is_first() {
            return false;
        }
        self.cursor -= 1;
        self.show_current();
        debug!(cursor = self.cursor, "moved to previous question");
        true
    }

    /// Grade the exam as it stands. `None` before the first generate.
    pub fn finish(&self) -> Option<GradingResult> {
        let exam = self.exam.as_ref()?;
        let result = grade(exam, &self.answers, self.config.pass_score);
        info!(correct = result.correct, wrong = result.wrong, passed = result.passed, "exam graded");
        Some(result)
    }

    /// Applies the default-answer policy to the question being shown.
    fn show_current(&mut self) {
        if self.config.answer_policy != AnswerPolicy::PrefillFirst {
            return;
        }
        let in_range = self.exam.as_ref().is_some_and(|e| self.cursor < e.len());
        if in_range {
            self.answers.entry(self.cursor).or_insert(OptionKey::A);
        }
    }

    // ── queries ──────────────────────────────────────────────────────────────

    pub fn phase(&self) -> SessionPhase {
        match self.exam {
            Some(_) => SessionPhase::InProgress,
            None => SessionPhase::NoExam,
        }
    }

    pub fn exam(&self) -> Option<&Exam> {
        self.exam.as_ref()
    }

    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.exam.as_ref()?.get(self.cursor)
    }

    pub fn current_index(&self) -> usize {
        self.cursor
    }

    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_last(&self) -> bool {
        self.exam.as_ref().map_or(true, |e| self.cursor + 1 >= e.len())
    }

    pub fn answer_for(&self, index: usize) -> Option<OptionKey> {
        self.answers.get(&index).copied()
    }

    /// The selection to present for the current question.
    pub fn current_selection(&self) -> Option<OptionKey> {
        self.answer_for(self.cursor)
    }

    pub fn progress(&self) -> SessionProgress {
        let total = self.exam.as_ref().map_or(0, Exam::len);
        let answered = self.answers.len();
        SessionProgress { total, answered, remaining: total.saturating_sub(answered) }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn config(&self) -> &ExamConfig {
        &self.config
    }
}
