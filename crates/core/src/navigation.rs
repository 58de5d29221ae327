use thiserror::Error;

use crate::history::HistoryError;

/// A requested move is not legal from the current position.
///
/// The navigator's state is unchanged when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NavigationError {
    #[error("there is no next question")]
    NoNextQuestion,

    #[error("there is no previous question")]
    NoPreviousQuestion,

    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Movement contract consumed by presentation layers.
pub trait Navigable {
    /// Move to the next position.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::NoNextQuestion` at the last position.
    fn advance(&mut self) -> Result<(), NavigationError>;

    /// Move back to where the learner was before the last advance.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::NoPreviousQuestion` at the first position.
    fn retreat(&mut self) -> Result<(), NavigationError>;

    /// Hard reset to the first position.
    ///
    /// # Errors
    ///
    /// Implementations may fail, but the session engine never does.
    fn return_to_menu(&mut self) -> Result<(), NavigationError>;
}
