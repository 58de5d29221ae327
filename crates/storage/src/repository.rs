use drill_core::model::{Question, QuestionError, TopicError, TopicName};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors surfaced while locating or decoding topic question sets.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionLoadError {
    #[error("topic not found: {topic}")]
    NotFound { topic: TopicName },

    #[error("topic {topic} has no questions")]
    Empty { topic: TopicName },

    #[error(transparent)]
    InvalidTopic(#[from] TopicError),

    #[error("question {index} of topic {topic} is invalid")]
    InvalidQuestion {
        topic: TopicName,
        index: usize,
        #[source]
        source: QuestionError,
    },

    #[error("topic {topic} is defined more than once")]
    DuplicateTopic { topic: TopicName },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Menu entry for one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicInfo {
    pub name: TopicName,
    pub title: String,
    pub question_count: usize,
}

/// Source of topic question sets.
pub trait QuestionCatalog: Send + Sync {
    /// Topics in menu order.
    fn topics(&self) -> Vec<TopicInfo>;

    /// Fresh copy of the questions of one topic, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionLoadError::NotFound` for an unknown topic and
    /// `QuestionLoadError::Empty` when the topic has no questions.
    fn load_questions(&self, topic: &TopicName) -> Result<Vec<Question>, QuestionLoadError>;

    /// Number of topics the catalog knows about.
    fn topic_count(&self) -> usize {
        self.topics().len()
    }
}

#[derive(Debug, Clone)]
struct TopicEntry {
    info: TopicInfo,
    questions: Vec<Question>,
}

/// Catalog held entirely in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: Vec<TopicEntry>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a topic.
    ///
    /// # Errors
    ///
    /// Returns `QuestionLoadError::DuplicateTopic` if the name is already present.
    pub fn insert(
        &mut self,
        name: TopicName,
        title: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<(), QuestionLoadError> {
        if self.entries.iter().any(|e| e.info.name == name) {
            return Err(QuestionLoadError::DuplicateTopic { topic: name });
        }

        let title = title.into();
        let title = if title.trim().is_empty() {
            name.to_string()
        } else {
            title
        };

        debug!(topic = %name, questions = questions.len(), "registered topic");
        self.entries.push(TopicEntry {
            info: TopicInfo {
                name,
                title,
                question_count: questions.len(),
            },
            questions,
        });
        Ok(())
    }

    /// Builder form of [`InMemoryCatalog::insert`].
    ///
    /// # Errors
    ///
    /// Returns `QuestionLoadError::DuplicateTopic` if the name is already present.
    pub fn with_topic(
        mut self,
        name: TopicName,
        title: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, QuestionLoadError> {
        self.insert(name, title, questions)?;
        Ok(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl QuestionCatalog for InMemoryCatalog {
    fn topics(&self) -> Vec<TopicInfo> {
        self.entries.iter().map(|e| e.info.clone()).collect()
    }

    fn load_questions(&self, topic: &TopicName) -> Result<Vec<Question>, QuestionLoadError> {
        let entry = self
            .entries
            .iter()
            .find(|e| &e.info.name == topic)
            .ok_or_else(|| QuestionLoadError::NotFound {
                topic: topic.clone(),
            })?;

        if entry.questions.is_empty() {
            return Err(QuestionLoadError::Empty {
                topic: topic.clone(),
            });
        }
        Ok(entry.questions.clone())
    }

    fn topic_count(&self) -> usize {
        self.entries.len()
    }
}

/// Catalog handle shared by services.
#[derive(Clone)]
pub struct Storage {
    pub catalog: Arc<dyn QuestionCatalog>,
}

impl Storage {
    #[must_use]
    pub fn new(catalog: impl QuestionCatalog + 'static) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Empty in-memory catalog, mostly for tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(InMemoryCatalog::new())
    }
}
