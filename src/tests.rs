//! End-to-end tests for the `exam_drill` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! # Coverage
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Composition | 20 questions; per-topic counts equal the quota table; no repeated source row |
//! | Minimum bank | A bank holding exactly the quota uses every row once |
//! | Shuffle | Each topic lands in every position with roughly equal frequency |
//! | Loader → session | Rejections surface before any exam exists; pool shortfall names topic 3 |
//! | Grading | `correct + wrong == total`; `passed == correct >= 16`; finish idempotence |
//! | Walkthrough | Answer, navigate, revisit, finish, review |

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::exam_engine::{
    generate_exam, parse_bank, ExamConfig, ExamSession, InsufficientPoolError, LoadError,
    OptionKey, QuestionBank, Topic,
};

// ── helpers ──────────────────────────────────────────────────────────────────

const HEADER: &str = "tema;enunciado;A;B;C;correcta";

/// Correct key for a row, cycling A, B, C so grading tests see all three.
fn key_for(row: usize) -> OptionKey {
    OptionKey::ALL[row % 3]
}

/// Build a `;` file with `n` questions for each `(topic, n)` pair.
fn bank_csv(counts: &[(u8, usize)]) -> String {
    let mut csv = format!("{HEADER}\n");
    let mut row = 0usize;
    for &(topic, n) in counts {
        for i in 0..n {
            csv.push_str(&format!(
                "{topic};Topic {topic} question {i};first;second;third;{}\n",
                key_for(row)
            ));
            row += 1;
        }
    }
    csv
}

fn bank(counts: &[(u8, usize)]) -> QuestionBank {
    parse_bank(bank_csv(counts).as_bytes(), &ExamConfig::default()).unwrap()
}

/// Exactly the default quota: 3,3,2,3,3,3,3.
const MINIMUM: [(u8, usize); 7] = [(1, 3), (2, 3), (3, 2), (4, 3), (5, 3), (6, 3), (7, 3)];
/// A roomier bank with 8 questions per topic.
const ROOMY: [(u8, usize); 7] = [(1, 8), (2, 8), (3, 8), (4, 8), (5, 8), (6, 8), (7, 8)];

/// Seeds that span different RNG states.
const SEEDS: [u64; 5] = [1, 42, 999, 0xDEAD_BEEF, 7];

// ── composition ──────────────────────────────────────────────────────────────

#[test]
fn every_exam_matches_the_quota_table() {
    let bank = bank(&ROOMY);
    let config = ExamConfig::default();
    for seed in SEEDS {
        let exam = generate_exam(&bank, &config, &mut StdRng::seed_from_u64(seed)).unwrap();
        assert_eq!(exam.len(), 20, "seed={seed}");
        for topic in config.topics() {
            let n = exam.questions().iter().filter(|q| q.topic == topic).count();
            assert_eq!(Some(n), config.quota(topic), "topic {topic} seed={seed}");
        }
    }
}

#[test]
fn no_source_row_appears_twice() {
    let bank = bank(&ROOMY);
    let config = ExamConfig::default();
    for seed in 0..50u64 {
        let exam = generate_exam(&bank, &config, &mut StdRng::seed_from_u64(seed)).unwrap();
        let rows: HashSet<usize> = exam.questions().iter().map(|q| q.source_row).collect();
        assert_eq!(rows.len(), exam.len(), "duplicate row for seed={seed}");
    }
}

#[test]
fn option_labels_are_not_reshuffled() {
    let bank = bank(&ROOMY);
    let exam = generate_exam(&bank, &ExamConfig::default(), &mut StdRng::seed_from_u64(3)).unwrap();
    for q in exam.questions() {
        assert_eq!(q.options, ["first", "second", "third"]);
        assert_eq!(q.correct, key_for(q.source_row - 1));
    }
}

#[test]
fn minimum_bank_uses_every_row_once() {
    let bank = bank(&MINIMUM);
    assert_eq!(bank.len(), 20);
    let exam = generate_exam(&bank, &ExamConfig::default(), &mut StdRng::seed_from_u64(8)).unwrap();

    let mut rows: Vec<usize> = exam.questions().iter().map(|q| q.source_row).collect();
    let shown_order = rows.clone();
    rows.sort_unstable();
    assert_eq!(rows, (1..=20usize).collect::<Vec<_>>());
    assert_ne!(shown_order, rows, "exam should be shuffled across topics");
}

// ── shuffle uniformity ───────────────────────────────────────────────────────

#[test]
fn topics_spread_evenly_across_positions() {
    // Topic 3 contributes 2 of 20 questions, so each position should hold a
    // topic-3 question in about 10% of exams. Over 4000 trials that is 400
    // hits per position with a standard deviation of ~19.
    let bank = bank(&ROOMY);
    let config = ExamConfig::default();
    let mut rng = StdRng::seed_from_u64(2024);
    let trials = 4000;
    let mut hits = [0usize; 20];

    for _ in 0..trials {
        let exam = generate_exam(&bank, &config, &mut rng).unwrap();
        for (pos, q) in exam.questions().iter().enumerate() {
            if q.topic == Topic(3) {
                hits[pos] += 1;
            }
        }
    }

    for (pos, &n) in hits.iter().enumerate() {
        assert!((300..=500).contains(&n), "position {pos} held topic 3 {n} times out of {trials}");
    }
}

// ── loader → session ─────────────────────────────────────────────────────────

#[test]
fn loader_rejections_match_each_violation() {
    let config = ExamConfig::default();
    let cases: [(&str, fn(&LoadError) -> bool); 4] = [
        ("tema;enunciado;A;B;C\n1;Q;a;b;c\n", |e| {
            matches!(e, LoadError::MissingColumns { missing, .. } if missing == &["correcta"])
        }),
        ("tema;enunciado;A;B;C;correcta\n8;Q;a;b;c;A\n", |e| {
            matches!(e, LoadError::InvalidTopics { values, .. } if values == &["8"])
        }),
        ("tema;enunciado;A;B;C;correcta\n1;Q;a;b;c;D\n", |e| {
            matches!(e, LoadError::InvalidCorrectKeys { values } if values == &["D"])
        }),
        ("tema;enunciado;A;B;C;correcta\n1; ;a;b;c;A\n", |e| {
            matches!(e, LoadError::EmptyFields { rows } if rows == &[1usize])
        }),
    ];
    for (body, check) in cases {
        let err = parse_bank(body.as_bytes(), &config).unwrap_err();
        assert!(check(&err), "unexpected error {err:?} for {body:?}");
    }
}

#[test]
fn short_topic_three_fails_generation() {
    let short: [(u8, usize); 7] = [(1, 3), (2, 3), (3, 1), (4, 3), (5, 3), (6, 3), (7, 3)];
    let mut session = ExamSession::new(Arc::new(bank(&short)), ExamConfig::default());
    let err = session.generate().unwrap_err();
    assert_eq!(
        err,
        InsufficientPoolError { topic: Topic(3), required: 2, available: 1 }
    );
    assert_eq!(err.shortfall(), 1);
    assert!(session.exam().is_none());
}

// ── grading ──────────────────────────────────────────────────────────────────

#[test]
fn counts_add_up_and_verdict_follows_threshold() {
    let bank = Arc::new(bank(&ROOMY));
    for seed in SEEDS {
        let mut session = ExamSession::new(Arc::clone(&bank), ExamConfig::default());
        session.generate_with(&mut StdRng::seed_from_u64(seed)).unwrap();

        // Answer a seed-dependent number of questions correctly, the rest with A.
        let right = (seed % 21) as usize;
        let exam = session.exam().unwrap().clone();
        for (i, q) in exam.questions().iter().enumerate() {
            let key = if i < right { q.correct } else { OptionKey::A };
            session.select_answer(i, key);
        }

        let result = session.finish().unwrap();
        assert_eq!(result.correct + result.wrong, result.total);
        assert_eq!(result.total, 20);
        assert_eq!(result.passed, result.correct >= 16);
        assert_eq!(result.wrong, result.missed.len());
        assert_eq!(session.finish().unwrap(), result, "finish must be idempotent");
    }
}

// ── walkthrough ──────────────────────────────────────────────────────────────

#[test]
fn full_walkthrough_with_review() {
    let mut session = ExamSession::new(Arc::new(bank(&MINIMUM)), ExamConfig::default());
    session.generate_with(&mut StdRng::seed_from_u64(77)).unwrap();

    let answer_key: HashMap<usize, OptionKey> = session
        .exam()
        .unwrap()
        .questions()
        .iter()
        .enumerate()
        .map(|(i, q)| (i, q.correct))
        .collect();

    // Answer everything correctly except question 5 (wrong) and 12 (skipped).
    loop {
        let i = session.current_index();
        if i != 12 {
            let key = if i == 5 {
                OptionKey::ALL.into_iter().find(|&k| k != answer_key[&i]).unwrap()
            } else {
                answer_key[&i]
            };
            assert!(session.answer_current(key));
        }
        if !session.next() {
            break;
        }
    }
    assert_eq!(session.current_index(), 19);

    // Walk back to question 5: the recorded answer is the current selection.
    while session.current_index() > 5 {
        assert!(session.previous());
    }
    assert_ne!(session.current_selection(), Some(answer_key[&5]));
    assert!(session.current_selection().is_some());

    let result = session.finish().unwrap();
    assert_eq!(result.correct, 18);
    assert!(result.passed);
    let missed: Vec<usize> = result.missed.iter().map(|m| m.index).collect();
    assert_eq!(missed, vec![5, 12]);
    assert_eq!(result.missed[1].selected, None);

    session.reset();
    assert!(session.finish().is_none());
}
