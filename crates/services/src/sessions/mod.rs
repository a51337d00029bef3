pub mod view;
mod workflow;

pub use crate::error::SessionError;
pub use workflow::{AttemptOutcome, CompletedAttempt, QuizSessionService};
