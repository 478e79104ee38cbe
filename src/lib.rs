//! # exam_drill
//!
//! An offline multiple-choice exam trainer.
//!
//! The library loads a bank of questions tagged by topic, assembles a
//! fixed-composition randomised exam (a set number of questions per topic,
//! then shuffled), walks the user through it one question at a time and
//! grades it against a pass threshold.
//!
//! ## How it works
//!
//! 1. [`load_bank`] reads a `;`-delimited file with the columns
//!    `tema;enunciado;A;B;C;correcta` and validates every row. Any bad row
//!    rejects the whole file.
//! 2. [`ExamSession::generate`] draws the per-topic quota (3,3,2,3,3,3,3 by
//!    default) without replacement and shuffles the 20 questions.
//! 3. The front end calls `next`, `previous` and `answer_current`, reading
//!    [`ExamSession::snapshot`] after each action.
//! 4. [`ExamSession::finish`] grades the answers: 16 correct to pass, with a
//!    review of every missed question.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use exam_drill::{parse_bank, ExamConfig, ExamSession, OptionKey};
//!
//! let mut csv = String::from("tema;enunciado;A;B;C;correcta\n");
//! for topic in 1..=7 {
//!     for i in 0..3 {
//!         csv.push_str(&format!("{topic};Question {topic}.{i};yes;no;maybe;A\n"));
//!     }
//! }
//!
//! let config = ExamConfig::default();
//! let bank = parse_bank(csv.as_bytes(), &config).unwrap();
//! let mut session = ExamSession::new(Arc::new(bank), config);
//!
//! session.generate().unwrap();
//! session.answer_current(OptionKey::A);
//! while session.next() {
//!     session.answer_current(OptionKey::A);
//! }
//!
//! let result = session.finish().unwrap();
//! assert_eq!(result.correct, 20);
//! assert!(result.passed);
//! ```

pub mod exam_engine;

// Convenience re-exports so callers can use `exam_drill::ExamSession`
// directly without reaching into `exam_engine::`.
pub use exam_engine::{
    check_quotas, generate_exam, grade, load_bank, parse_bank, AnswerPolicy, ConfigError, Exam,
    ExamConfig, ExamSession, GradingResult, InsufficientPoolError, LoadError, MissedQuestion,
    OptionKey, QuestionBank, QuestionRecord, SessionPhase, SessionProgress, SessionSnapshot,
    Settings, Topic, EXAM_SIZE, PASS_SCORE,
};

#[cfg(test)]
mod tests;
