mod engine;
mod progress;
mod summary;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use engine::{AnswerOutcome, TopicSession};
pub use progress::{SessionProgress, render_cells};
pub use summary::TopicSummary;
pub use workflow::TopicSessionService;
