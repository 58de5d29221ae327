use thiserror::Error;

use crate::history::HistoryError;
use crate::model::{DifficultyError, QuestionError, TopicError};
use crate::navigation::NavigationError;
use crate::ordering::OrderingError;

/// Umbrella over the domain errors of this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Topic(#[from] TopicError),
    #[error(transparent)]
    Difficulty(#[from] DifficultyError),
    #[error(transparent)]
    Ordering(#[from] OrderingError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    History(#[from] HistoryError),
}
