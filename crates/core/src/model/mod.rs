mod difficulty;
pub mod question;
mod topic;

pub use difficulty::{Difficulty, DifficultyError};
pub use question::{
    FillCode, IdentifyDefect, MultipleChoice, OPTION_COUNT, OPTION_LETTERS, Question, QuestionBody,
    QuestionError, QuestionKind,
};
pub use topic::{TopicError, TopicName};
