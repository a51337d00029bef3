#![forbid(unsafe_code)]

pub mod attempt;
pub mod error;
pub mod grading;
pub mod model;
pub mod time;

pub use attempt::{AbortReason, AttemptError, AttemptState, QuizAttempt};
pub use error::Error;
pub use grading::AnswerOutcome;
pub use time::Clock;
