use thiserror::Error;

use crate::grading::{self, AnswerOutcome};
use crate::model::{Question, Quiz, Score, ScoreError};

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Why an attempt ended without a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    InvalidSelection,
    NoQuestionsAvailable,
}

/// Lifecycle of a single attempt.
///
/// `SelectingQuiz -> Answering(0) -> .. -> Answering(n - 1) -> Completed`,
/// or `SelectingQuiz -> Aborted` when no question set can be administered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    SelectingQuiz,
    Answering(usize),
    Completed,
    Aborted(AbortReason),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("invalid quiz selection")]
    InvalidSelection,

    #[error("no questions available for this quiz")]
    NoQuestionsAvailable,

    #[error("operation not allowed while attempt is {0:?}")]
    WrongState(AttemptState),

    #[error(transparent)]
    Score(#[from] ScoreError),
}

//
// ─── ATTEMPT ───────────────────────────────────────────────────────────────────
//

/// Pure state machine for one quiz attempt.
///
/// Holds no I/O; the services layer feeds it the quiz list, the question
/// set, and raw answer lines in presentation order.
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    state: AttemptState,
    quiz: Option<Quiz>,
    questions: Vec<Question>,
    outcomes: Vec<AnswerOutcome>,
    correct: u32,
}

impl Default for QuizAttempt {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizAttempt {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: AttemptState::SelectingQuiz,
            quiz: None,
            questions: Vec::new(),
            outcomes: Vec::new(),
            correct: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> AttemptState {
        self.state
    }

    /// Resolve a 1-based selection against the catalog.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::InvalidSelection` (and aborts) if the input does
    /// not name a listed quiz, or `WrongState` if a quiz was already chosen.
    pub fn select_quiz(&mut self, quizzes: &[Quiz], raw: &str) -> Result<&Quiz, AttemptError> {
        if self.state != AttemptState::SelectingQuiz || self.quiz.is_some() {
            return Err(AttemptError::WrongState(self.state));
        }
        let Some(quiz) = grading::select(quizzes, raw) else {
            self.state = AttemptState::Aborted(AbortReason::InvalidSelection);
            return Err(AttemptError::InvalidSelection);
        };
        Ok(self.quiz.insert(quiz.clone()))
    }

    /// Load the selected quiz's questions and start answering.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::NoQuestionsAvailable` (and aborts) for an empty
    /// set, `WrongState` if no quiz is selected or answering already began.
    pub fn start(&mut self, questions: Vec<Question>) -> Result<(), AttemptError> {
        if self.state != AttemptState::SelectingQuiz || self.quiz.is_none() {
            return Err(AttemptError::WrongState(self.state));
        }
        if questions.is_empty() {
            self.state = AttemptState::Aborted(AbortReason::NoQuestionsAvailable);
            return Err(AttemptError::NoQuestionsAvailable);
        }
        if u32::try_from(questions.len()).is_err() {
            return Err(ScoreError::TooManyQuestions {
                len: questions.len(),
            }
            .into());
        }
        self.outcomes = Vec::with_capacity(questions.len());
        self.questions = questions;
        self.state = AttemptState::Answering(0);
        Ok(())
    }

    /// The question awaiting an answer, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            AttemptState::Answering(index) => self.questions.get(index),
            _ => None,
        }
    }

    /// Grade the raw answer for the current question and advance.
    ///
    /// Unresolvable input is graded `Invalid` and never fails the attempt.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::WrongState` when not answering.
    pub fn answer_current(&mut self, raw: &str) -> Result<AnswerOutcome, AttemptError> {
        let AttemptState::Answering(index) = self.state else {
            return Err(AttemptError::WrongState(self.state));
        };
        let question = self
            .questions
            .get(index)
            .ok_or(AttemptError::WrongState(self.state))?;

        let outcome = grading::grade(question, raw);
        if outcome.is_correct() {
            self.correct = self.correct.saturating_add(1);
        }
        self.outcomes.push(outcome);

        let next = index + 1;
        self.state = if next < self.questions.len() {
            AttemptState::Answering(next)
        } else {
            AttemptState::Completed
        };
        Ok(outcome)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == AttemptState::Completed
    }

    /// Per-question outcomes in presentation order.
    #[must_use]
    pub fn outcomes(&self) -> &[AnswerOutcome] {
        &self.outcomes
    }

    /// Final score, available once every question has been answered.
    #[must_use]
    pub fn score(&self) -> Option<Score> {
        if !self.is_complete() {
            return None;
        }
        let total = u32::try_from(self.questions.len()).ok()?;
        Score::new(self.correct, total).ok()
    }
}
