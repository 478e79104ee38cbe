//! Read-only view of a session for the presentation layer.
//!
//! Correct keys are stripped; the view only says which option is selected.

use serde::{Deserialize, Serialize};

use crate::exam_engine::{
    models::{OptionKey, Topic},
    session::{ExamSession, SessionPhase},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionView {
    pub key: OptionKey,
    pub text: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    /// 1-based position, as shown to the user.
    pub number: usize,
    pub topic: Topic,
    pub statement: String,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub index: usize,
    pub total: usize,
    pub answered: usize,
    pub is_first: bool,
    pub is_last: bool,
    pub question: Option<QuestionView>,
}

impl From<&ExamSession> for SessionSnapshot {
    fn from(session: &ExamSession) -> Self {
        let selection = session.current_selection();
        let question = session.current_question().map(|q| QuestionView {
            number: session.current_index() + 1,
            topic: q.topic,
            statement: q.statement.clone(),
            options: OptionKey::ALL
                .iter()
                .map(|&key| OptionView {
                    key,
                    text: q.option(key).to_string(),
                    selected: selection == Some(key),
                })
                .collect(),
        });
        let progress = session.progress();

        SessionSnapshot {
            phase: session.phase(),
            index: session.current_index(),
            total: progress.total,
            answered: progress.answered,
            is_first: session.is_first(),
            is_last: session.is_last(),
            question,
        }
    }
}

impl ExamSession {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(self)
    }
}
