mod ids;
mod question;
mod quiz;
mod score;
mod user;

pub use ids::{QuestionId, QuizId, ScoreRecordId, UserId};
pub use question::{Question, QuestionDraft, QuestionError};
pub use quiz::{Quiz, QuizError};
pub use score::{Score, ScoreError, ScoreRecord};
pub use user::{Credentials, User, Username};
