//! Interactive study sessions.
//!
//! Learn mode shows a card, reveals the translation on Enter and asks the
//! learner to grade themselves. Quiz and review modes ask for the translation
//! to be typed and check it.

use crate::config::AppConfig;
use crate::state::AppState;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use vocab_core::{check_answer, AnswerMode, SessionSummary, StudyMode, WordEntry};

#[derive(Debug, Serialize)]
pub struct StudyReport {
    pub mode: StudyMode,
    /// None when the session was left before the last card.
    pub summary: Option<SessionSummary>,
    /// Accuracy recorded in the performance history.
    pub accuracy: Option<f64>,
}

/// What the learner did with a card.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Answer(bool),
    Skip,
    Back,
    Quit,
}

/// Run one session over `input`, writing prompts to `out`.
///
/// Each first answer is recorded on the word immediately; the session
/// accuracy is recorded only when the last card is answered.
pub fn run_study<R: BufRead, W: Write>(
    state: &mut AppState,
    mode: StudyMode,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<StudyReport> {
    let mut session = state.engine.start_session(&state.repository, mode);
    if session.is_empty() {
        writeln!(out, "No words to study. Import words first.")?;
        return Ok(StudyReport {
            mode,
            summary: None,
            accuracy: None,
        });
    }
    tracing::info!(mode = mode.as_str(), cards = session.len(), "starting study session");

    while let Some(word) = session.current().cloned() {
        writeln!(out, "\n[{}/{}] {}", session.position() + 1, session.len(), word.english)?;

        let step = if session.is_answered() {
            revisit_card(&word, input, out)?
        } else {
            match mode.answer_mode() {
                AnswerMode::Flip => flip_card(&word, input, out)?,
                AnswerMode::Typed => typed_card(&word, &state.config, input, out)?,
            }
        };

        match step {
            Step::Answer(correct) => {
                if let Some(id) = session.answer(correct) {
                    state.repository.update_stats(&id, correct)?;
                }
            }
            Step::Skip => {
                if !session.next() {
                    writeln!(out, "  This is the last card. Answer it to finish.")?;
                }
            }
            Step::Back => {
                if !session.previous() {
                    writeln!(out, "  Already at the first card.")?;
                }
            }
            Step::Quit => break,
        }
    }

    let accuracy = state.engine.complete_session(&session)?;
    let summary = session.summary();
    match summary {
        Some(summary) => writeln!(
            out,
            "\nYou got {} out of {} words correct ({}%).",
            summary.correct,
            summary.total,
            accuracy.unwrap_or_default().round()
        )?,
        None => {
            tracing::info!(mode = mode.as_str(), "study session abandoned");
            writeln!(out, "\nSession ended early; nothing recorded.")?;
        }
    }

    Ok(StudyReport {
        mode,
        summary,
        accuracy,
    })
}

fn flip_card<R: BufRead, W: Write>(word: &WordEntry, input: &mut R, out: &mut W) -> io::Result<Step> {
    let Some(reply) = prompt(input, out, "  Enter = reveal, s = skip, b = back, q = quit")? else {
        return Ok(Step::Quit);
    };
    match reply.to_lowercase().as_str() {
        "s" => return Ok(Step::Skip),
        "b" => return Ok(Step::Back),
        "q" => return Ok(Step::Quit),
        _ => {}
    }

    writeln!(out, "  {}", word.russian)?;
    loop {
        let Some(reply) = prompt(input, out, "  Did you know it? [y/n]")? else {
            return Ok(Step::Quit);
        };
        match reply.to_lowercase().as_str() {
            "y" | "yes" => return Ok(Step::Answer(true)),
            "n" | "no" => return Ok(Step::Answer(false)),
            _ => writeln!(out, "  Please answer y or n.")?,
        }
    }
}

fn typed_card<R: BufRead, W: Write>(
    word: &WordEntry,
    config: &AppConfig,
    input: &mut R,
    out: &mut W,
) -> io::Result<Step> {
    loop {
        let Some(typed) = prompt(input, out, "  Type the translation (:s skip, :b back, :q quit)")?
        else {
            return Ok(Step::Quit);
        };
        match typed.as_str() {
            "" => continue,
            ":s" => return Ok(Step::Skip),
            ":b" => return Ok(Step::Back),
            ":q" => return Ok(Step::Quit),
            _ => {}
        }

        let check = check_answer(&typed, &word.russian, config.matching_mode, config.fuzzy_threshold);
        if check.is_correct {
            writeln!(out, "  Correct!")?;
        } else {
            writeln!(out, "  Incorrect. The answer is: {}", word.russian)?;
        }
        return Ok(Step::Answer(check.is_correct));
    }
}

/// A card answered earlier in this session can only be navigated past.
fn revisit_card<R: BufRead, W: Write>(word: &WordEntry, input: &mut R, out: &mut W) -> io::Result<Step> {
    writeln!(out, "  Already answered: {}", word.russian)?;
    let reply = prompt(input, out, "  Enter = next, b = back, q = quit")?.map(|r| r.to_lowercase());
    let step = match reply.as_deref() {
        None | Some("q") => Step::Quit,
        Some("b") => Step::Back,
        Some(_) => Step::Skip,
    };
    Ok(step)
}

/// Print `text` and read one trimmed line. None at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> io::Result<Option<String>> {
    writeln!(out, "{text}")?;
    write!(out, "> ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use vocab_core::{WordPair, WordUpdate};

    fn seeded() -> AppState {
        let mut state = AppState::in_memory();
        state
            .repository
            .add_words(&[WordPair::new("hello", "привет"), WordPair::new("bye", "пока")])
            .unwrap();
        state
    }

    fn study(state: &mut AppState, mode: StudyMode, input: &str) -> (StudyReport, String) {
        let mut out = Vec::<u8>::new();
        let report = run_study(state, mode, &mut Cursor::new(input), &mut out).unwrap();
        (report, String::from_utf8(out).unwrap())
    }

    fn counts(state: &AppState, english: &str) -> (u32, u32) {
        let word = state.repository.find_by_english(english).unwrap();
        (word.correct_count, word.incorrect_count)
    }

    #[test]
    fn review_session_checks_typed_answers() {
        let mut state = seeded();
        // equal scores keep insertion order: hello, bye
        let (report, output) = study(&mut state, StudyMode::Review, "Привет\nпакет\n");

        assert_eq!(report.summary, Some(SessionSummary { correct: 1, total: 2 }));
        assert_eq!(report.accuracy, Some(50.0));
        assert!(output.contains("Correct!"));
        assert!(output.contains("The answer is: пока"));
        assert_eq!(counts(&state, "hello"), (1, 0));
        assert_eq!(counts(&state, "bye"), (0, 1));
        assert_eq!(state.engine.recent_performance(), &[50.0]);
    }

    #[test]
    fn learn_session_self_graded() {
        let mut state = seeded();
        let (report, _) = study(&mut state, StudyMode::Learn, "\ny\n\nyes\n");

        assert_eq!(report.accuracy, Some(100.0));
        assert_eq!(counts(&state, "hello"), (1, 0));
        assert_eq!(counts(&state, "bye"), (1, 0));
    }

    #[test]
    fn quitting_records_answers_but_not_session() {
        let mut state = seeded();
        let (report, output) = study(&mut state, StudyMode::Review, "привет\n:q\n");

        assert_eq!(report.summary, None);
        assert!(output.contains("nothing recorded"));
        assert_eq!(counts(&state, "hello"), (1, 0));
        assert!(state.engine.recent_performance().is_empty());
    }

    #[test]
    fn flip_card_commands_ignore_case() {
        let mut state = seeded();
        let (report, output) = study(&mut state, StudyMode::Learn, "Q\n");

        assert_eq!(report.summary, None);
        assert!(!output.contains("привет"));
        assert!(!output.contains("пока"));
        assert_eq!(counts(&state, "hello"), (0, 0));
    }

    #[test]
    fn end_of_input_abandons_session() {
        let mut state = seeded();
        let (report, _) = study(&mut state, StudyMode::Learn, "");
        assert_eq!(report.summary, None);
        assert!(state.engine.recent_performance().is_empty());
    }

    #[test]
    fn skipped_card_counts_as_missed() {
        let mut state = seeded();
        let (report, _) = study(&mut state, StudyMode::Review, ":s\nпока\n");

        assert_eq!(report.summary, Some(SessionSummary { correct: 1, total: 2 }));
        assert_eq!(counts(&state, "hello"), (0, 0));
        assert_eq!(counts(&state, "bye"), (1, 0));
    }

    #[test]
    fn going_back_does_not_double_count() {
        let mut state = seeded();
        // answer hello, go back, step forward again, answer bye
        let (report, output) = study(&mut state, StudyMode::Review, "привет\n:b\n\nпока\n");

        assert!(output.contains("Already answered: привет"));
        assert_eq!(report.summary, Some(SessionSummary { correct: 2, total: 2 }));
        assert_eq!(counts(&state, "hello"), (1, 0));
    }

    #[test]
    fn fuzzy_matching_from_config() {
        let mut state = seeded();
        state.config.matching_mode = vocab_core::MatchingMode::Fuzzy;
        let bye = state.repository.list()[1].id.clone();
        state
            .repository
            .update_fields(
                &bye,
                WordUpdate {
                    english: None,
                    russian: Some("до свидания".to_string()),
                },
            )
            .unwrap();

        let (report, _) = study(&mut state, StudyMode::Review, "привет\nдо свиданья\n");
        assert_eq!(report.accuracy, Some(100.0));
    }

    #[test]
    fn empty_repository() {
        let mut state = AppState::in_memory();
        let (report, output) = study(&mut state, StudyMode::Quiz, "");
        assert_eq!(report.summary, None);
        assert!(output.contains("No words to study"));
    }
}
