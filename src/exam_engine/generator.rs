use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::exam_engine::{
    config::ExamConfig,
    error::InsufficientPoolError,
    models::{Exam, QuestionBank, QuestionRecord},
};

/// Fail on the first topic (ascending) whose pool is smaller than its quota.
pub fn check_quotas(bank: &QuestionBank, config: &ExamConfig) -> Result<(), InsufficientPoolError> {
    let counts = bank.topic_counts();
    for topic in config.topics() {
        let required = config.quota(topic).unwrap_or(0);
        let available = counts.get(&topic).copied().unwrap_or(0);
        if available < required {
            return Err(InsufficientPoolError { topic, required, available });
        }
    }
    Ok(())
}

/// Stratified draw: `quota` questions per topic without replacement, then a
/// uniform shuffle of the whole exam. Option labels are left as loaded.
pub fn generate_exam<R: Rng + ?Sized>(
    bank: &QuestionBank,
    config: &ExamConfig,
    rng: &mut R,
) -> Result<Exam, InsufficientPoolError> {
    let mut questions: Vec<QuestionRecord> = Vec::with_capacity(config.exam_size());

    for topic in config.topics() {
        let required = config.quota(topic).unwrap_or(0);
        let pool = bank.pool(topic);
        if pool.len() < required {
            return Err(InsufficientPoolError { topic, required, available: pool.len() });
        }
        questions.extend(pool.choose_multiple(&mut *rng, required).map(|&q| q.clone()));
    }

    questions.shuffle(rng);
    debug!(questions = questions.len(), "exam generated");
    Ok(Exam::new(questions))
}

/// Generate with a freshly seeded RNG; every call is an independent trial.
pub fn generate_exam_from_entropy(
    bank: &QuestionBank,
    config: &ExamConfig,
) -> Result<Exam, InsufficientPoolError> {
    let mut rng = StdRng::from_entropy();
    generate_exam(bank, config, &mut rng)
}
