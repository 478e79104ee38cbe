//! Terminal front end.
//!
//! Run with: `cargo run` (reads `preguntas.csv` unless `EXAM_BANK_PATH` is set)
//!
//! Commands, one per line:
//!
//! | Key       | Action |
//! |-----------|--------|
//! | `g`       | generate a new exam |
//! | `r`       | reset |
//! | `a` `b` `c` | answer the current question |
//! | `n` / `p` | next / previous question |
//! | `f`       | finish and grade |
//! | `q`       | quit |

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use exam_drill::{
    check_quotas, load_bank, ExamSession, GradingResult, OptionKey, SessionPhase, Settings,
};
use tracing_subscriber::EnvFilter;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

fn print_current(session: &ExamSession) {
    let snap = session.snapshot();
    let Some(q) = snap.question else {
        println!("  Press g to generate an exam.");
        return;
    };

    println!("{RULE}");
    println!("  Question {}/{}  ·  Topic {}  ·  answered {}", q.number, snap.total, q.topic, snap.answered);
    println!("{RULE}");
    println!("  {}", q.statement);
    println!();
    for opt in &q.options {
        let marker = if opt.selected { "●" } else { "○" };
        println!("  {marker} {}) {}", opt.key, opt.text);
    }
    println!();
    let prev = if snap.is_first { "" } else { "[p]revious  " };
    let next = if snap.is_last { "" } else { "[n]ext  " };
    println!("  [a/b/c] answer  {prev}{next}[f]inish  [g]enerate  [r]eset  [q]uit");
}

fn print_result(result: &GradingResult) {
    println!("{RULE}");
    println!("  Result");
    println!("{RULE}");
    println!("  Correct: {}", result.correct);
    println!("  Wrong:   {}", result.wrong);
    if result.passed {
        println!("  PASSED ({} needed)", result.pass_score);
    } else {
        println!("  FAILED ({} needed)", result.pass_score);
    }

    if result.missed.is_empty() {
        return;
    }
    println!();
    println!("  Review (missed)");
    for m in &result.missed {
        let q = &m.question;
        println!();
        println!("  Question {} (Topic {})", m.index + 1, q.topic);
        println!("  {}", q.statement);
        for key in OptionKey::ALL {
            println!("    {key}) {}", q.option(key));
        }
        let yours = m.selected.map_or_else(|| "none".to_string(), |k| k.to_string());
        println!("  Your answer: {yours}");
        println!("  Correct:     {}", q.correct);
    }
}

fn main() -> ExitCode {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.rust_log))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let bank = match load_bank(&settings.bank_path, &settings.exam) {
        Ok(bank) => bank,
        Err(err) => {
            eprintln!("Error loading {}: {err}", settings.bank_path.display());
            return ExitCode::FAILURE;
        }
    };
    println!("Question bank loaded: {} questions", bank.len());
    if let Err(err) = check_quotas(&bank, &settings.exam) {
        tracing::warn!(error = %err, "bank cannot fill the quota table");
    }

    let mut session = ExamSession::new(Arc::new(bank), settings.exam);
    print_current(&session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                eprintln!("Input error: {err}");
                return ExitCode::FAILURE;
            }
            None => break,
        };

        match line.trim().to_ascii_lowercase().as_str() {
            "" => continue,
            "q" => break,
            "g" => {
                if let Err(err) = session.generate() {
                    println!("  Could not generate the exam: {err}");
                }
            }
            "r" => session.reset(),
            "n" => {
                session.next();
            }
            "p" => {
                session.previous();
            }
            "f" => match session.finish() {
                Some(result) => {
                    print_result(&result);
                    continue;
                }
                None => println!("  Nothing to grade yet."),
            },
            other => match OptionKey::parse(other) {
                Some(key) if session.phase() == SessionPhase::InProgress => {
                    session.answer_current(key);
                }
                _ => println!("  Unknown command {other:?}"),
            },
        }
        print_current(&session);
    }

    ExitCode::SUCCESS
}
