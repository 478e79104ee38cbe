//! Core exam engine — bank loading, exam assembly, session state and grading.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: topics, option keys, question records, bank, exam, grading result |
//! | `config`    | Quota table, pass score, delimiter, answer policy, environment settings |
//! | `error`     | `LoadError`, `InsufficientPoolError`, `ConfigError` |
//! | `loader`    | Delimited file → validated `QuestionBank` |
//! | `generator` | Stratified per-topic draw followed by a global shuffle |
//! | `grading`   | Pure scoring and missed-question review |
//! | `session`   | `ExamSession` state machine driven by user actions |
//! | `snapshot`  | Serializable session view for the presentation layer |

pub mod config;
pub mod error;
pub mod generator;
pub mod grading;
pub mod loader;
pub mod models;
pub mod session;
pub mod snapshot;

pub use config::{AnswerPolicy, ExamConfig, Settings, EXAM_SIZE, PASS_SCORE};
pub use error::{ConfigError, InsufficientPoolError, LoadError};
pub use generator::{check_quotas, generate_exam};
pub use grading::grade;
pub use loader::{load_bank, parse_bank};
pub use models::{
    Exam, GradingResult, MissedQuestion, OptionKey, QuestionBank, QuestionRecord, Topic,
};
pub use session::{ExamSession, SessionPhase, SessionProgress};
pub use snapshot::{OptionView, QuestionView, SessionSnapshot};
