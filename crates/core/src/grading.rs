//! Input resolution and exact-match grading.
//!
//! All user choices arrive as raw console lines holding a 1-based index.
//! Anything that does not resolve to a listed item (non-numeric text, `0`,
//! or an index past the end) resolves to `None`; callers decide whether that
//! aborts (quiz selection) or merely counts as a wrong answer.

use crate::model::Question;

/// Outcome of grading one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    /// The input did not resolve to an option. Graded as wrong.
    Invalid,
}

impl AnswerOutcome {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, AnswerOutcome::Correct)
    }
}

/// Parses a 1-based choice into a zero-based index.
///
/// Surrounding whitespace is ignored.
#[must_use]
pub fn parse_choice(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok()?.checked_sub(1)
}

/// Resolves a 1-based choice against a list.
#[must_use]
pub fn select<'a, T>(items: &'a [T], raw: &str) -> Option<&'a T> {
    parse_choice(raw).and_then(|index| items.get(index))
}

/// Grades a raw answer line against a question.
///
/// The selected option must equal the stored answer exactly.
#[must_use]
pub fn grade(question: &Question, raw: &str) -> AnswerOutcome {
    match parse_choice(raw).and_then(|index| question.option(index)) {
        Some(selected) if question.is_correct(selected) => AnswerOutcome::Correct,
        Some(_) => AnswerOutcome::Incorrect,
        None => AnswerOutcome::Invalid,
    }
}
