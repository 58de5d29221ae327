//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::NavigationError;
use storage::repository::QuestionLoadError;

pub use crate::config::ConfigError;

/// Errors emitted by topic sessions and the session service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    Load(#[from] QuestionLoadError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
