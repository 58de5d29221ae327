#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod sessions;
pub mod stats;

pub use drill_core::Clock;
pub use sessions as session;

pub use config::SessionConfig;
pub use error::{ConfigError, SessionError};
pub use stats::{SessionStats, StatsRecorder, StatsSnapshot};

pub use sessions::{
    AnswerOutcome, SessionProgress, TopicSession, TopicSessionService, TopicSummary,
};
