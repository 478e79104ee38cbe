use std::collections::HashMap;

use crate::exam_engine::models::{Exam, GradingResult, MissedQuestion, OptionKey};

/// Score `exam` against the recorded answers.
///
/// Pure and total: a missing entry counts as a wrong answer, never an error.
pub fn grade(exam: &Exam, answers: &HashMap<usize, OptionKey>, pass_score: usize) -> GradingResult {
    let mut correct = 0usize;
    let mut missed = Vec::new();

    for (index, question) in exam.questions().iter().enumerate() {
        let selected = answers.get(&index).copied();
        if selected == Some(question.correct) {
            correct += 1;
        } else {
            missed.push(MissedQuestion { index, question: question.clone(), selected });
        }
    }

    GradingResult {
        correct,
        wrong: missed.len(),
        total: exam.len(),
        pass_score,
        passed: correct >= pass_score,
        missed,
    }
}
