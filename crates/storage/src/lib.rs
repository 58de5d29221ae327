#![forbid(unsafe_code)]

pub mod json;
pub mod record;
pub mod repository;

pub use record::{QuestionRecord, TopicFile};
pub use repository::{InMemoryCatalog, QuestionCatalog, QuestionLoadError, Storage, TopicInfo};
