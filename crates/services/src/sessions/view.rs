//! Display strings for an attempt.

use quiz_core::model::{Question, Quiz, Score};

pub const CHOOSE_QUIZ_PROMPT: &str = "Choose a quiz by number: ";
pub const ANSWER_PROMPT: &str = "Your answer: ";
pub const INVALID_SELECTION: &str = "Invalid choice.";
pub const INVALID_ANSWER: &str = "Invalid answer.";
pub const NO_QUESTIONS: &str = "No questions available for this quiz.";

/// Numbered list of quizzes, 1-based.
#[must_use]
pub fn quiz_menu(quizzes: &[Quiz]) -> String {
    let mut out = String::from("\nAvailable Quizzes:");
    for (idx, quiz) in quizzes.iter().enumerate() {
        out.push_str(&format!("\n{}. {}", idx + 1, quiz.name()));
    }
    out
}

/// Question text followed by its options, 1-based in stored order.
#[must_use]
pub fn question_block(question: &Question) -> String {
    let mut out = format!("\n{}", question.text());
    for (idx, option) in question.options().iter().enumerate() {
        out.push_str(&format!("\n{}. {}", idx + 1, option));
    }
    out
}

#[must_use]
pub fn score_line(score: Score) -> String {
    format!("\nYou scored {score}!")
}
