use std::sync::Arc;

use quiz_core::model::{Quiz, Score, ScoreRecordId};
use quiz_core::{AnswerOutcome, AttemptError, Clock, QuizAttempt};
use storage::repository::{NewScoreRecord, QuizRepository, ScoreRepository};

use super::view;
use crate::account_service::UserSession;
use crate::console::Console;
use crate::error::SessionError;

/// A finished attempt and the score record written for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedAttempt {
    pub quiz: Quiz,
    pub score: Score,
    pub record_id: ScoreRecordId,
}

/// How an attempt that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Completed(CompletedAttempt),
    /// The chosen quiz had no questions; nothing was recorded.
    NoQuestionsAvailable,
}

/// Drives one quiz attempt through a console and records the score.
#[derive(Clone)]
pub struct QuizSessionService {
    clock: Clock,
    quizzes: Arc<dyn QuizRepository>,
    scores: Arc<dyn ScoreRepository>,
}

impl QuizSessionService {
    #[must_use]
    pub fn new(
        clock: Clock,
        quizzes: Arc<dyn QuizRepository>,
        scores: Arc<dyn ScoreRepository>,
    ) -> Self {
        Self {
            clock,
            quizzes,
            scores,
        }
    }

    /// Run a full attempt: pick a quiz, answer every question in order,
    /// persist exactly one score record.
    ///
    /// Malformed answers count as wrong and never abort the attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSelection` if the quiz choice does not
    /// resolve (nothing is written), `SessionError::Console` if input ends
    /// mid-attempt (nothing is written), or `SessionError::Storage`.
    pub async fn run_attempt(
        &self,
        session: &UserSession,
        console: &mut dyn Console,
    ) -> Result<AttemptOutcome, SessionError> {
        let quizzes = self.quizzes.list_quizzes().await?;
        console.display(&view::quiz_menu(&quizzes));
        let choice = console.prompt_line(view::CHOOSE_QUIZ_PROMPT)?;

        let mut attempt = QuizAttempt::new();
        let quiz = match attempt.select_quiz(&quizzes, &choice) {
            Ok(quiz) => quiz.clone(),
            Err(AttemptError::InvalidSelection) => {
                tracing::warn!(user_id = %session.user_id(), choice = %choice.trim(), "invalid quiz selection");
                console.display(view::INVALID_SELECTION);
                return Err(SessionError::InvalidSelection);
            }
            Err(e) => return Err(e.into()),
        };

        let questions = self.quizzes.questions_for_quiz(quiz.id()).await?;
        match attempt.start(questions) {
            Ok(()) => {}
            Err(AttemptError::NoQuestionsAvailable) => {
                tracing::info!(quiz_id = %quiz.id(), "quiz has no questions");
                console.display(view::NO_QUESTIONS);
                return Ok(AttemptOutcome::NoQuestionsAvailable);
            }
            Err(e) => return Err(e.into()),
        }

        while let Some(question) = attempt.current_question() {
            let block = view::question_block(question);
            let question_id = question.id();
            console.display(&block);
            let raw = console.prompt_line(view::ANSWER_PROMPT)?;
            let outcome = attempt.answer_current(&raw)?;
            tracing::debug!(question_id = %question_id, ?outcome, "graded answer");
            if outcome == AnswerOutcome::Invalid {
                console.display(view::INVALID_ANSWER);
            }
        }

        let score = attempt
            .score()
            .ok_or(AttemptError::WrongState(attempt.state()))?;
        let record_id = self
            .scores
            .append_score(&NewScoreRecord {
                user_id: session.user_id(),
                quiz_id: quiz.id(),
                score,
                recorded_at: self.clock.now(),
            })
            .await?;
        tracing::info!(
            user_id = %session.user_id(),
            quiz_id = %quiz.id(),
            %score,
            "attempt completed"
        );

        console.display(&view::score_line(score));
        Ok(AttemptOutcome::Completed(CompletedAttempt {
            quiz,
            score,
            record_id,
        }))
    }
}
