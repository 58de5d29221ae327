use std::sync::Arc;

use drill_core::OrderingPolicy;
use drill_core::model::TopicName;
use storage::repository::{QuestionCatalog, Storage, TopicInfo};
use tracing::info;

use super::engine::TopicSession;
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::stats::StatsRecorder;

/// Wires the catalog and configuration into ready topic sessions.
#[derive(Clone)]
pub struct TopicSessionService {
    catalog: Arc<dyn QuestionCatalog>,
    config: SessionConfig,
}

impl TopicSessionService {
    #[must_use]
    pub fn new(catalog: Arc<dyn QuestionCatalog>) -> Self {
        Self {
            catalog,
            config: SessionConfig::default(),
        }
    }

    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        Self::new(Arc::clone(&storage.catalog))
    }

    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Topics in menu order.
    #[must_use]
    pub fn topics(&self) -> Vec<TopicInfo> {
        self.catalog.topics()
    }

    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.catalog.topic_count()
    }

    /// Load a topic, order it and mark it studied.
    ///
    /// `ordering` falls back to the configured default. The recorder is only
    /// touched once the questions have loaded.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Load` when the catalog cannot supply the topic.
    pub fn start_topic<'r, R: StatsRecorder + ?Sized>(
        &self,
        topic: &TopicName,
        ordering: Option<OrderingPolicy>,
        recorder: &'r mut R,
    ) -> Result<TopicSession<'r, R>, SessionError> {
        let questions = self.catalog.load_questions(topic)?;
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        let title = self
            .catalog
            .topics()
            .into_iter()
            .find(|info| &info.name == topic)
            .map_or_else(|| topic.to_string(), |info| info.title);

        recorder.mark_topic_studied(topic);
        let mut session = TopicSession::new(topic.clone(), title, questions, &self.config, recorder)?;
        session.apply_ordering(ordering.unwrap_or(self.config.default_ordering()));

        info!(topic = %topic, questions = session.len(), ordering = ?session.ordering(), "topic session started");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::SessionStats;
    use drill_core::model::{Difficulty, MultipleChoice, Question};
    use storage::repository::{InMemoryCatalog, QuestionLoadError};

    fn question(prompt: &str, difficulty: Difficulty) -> Question {
        Question::new(
            prompt,
            difficulty,
            "explained",
            MultipleChoice::new(["a", "b", "c", "d"].map(String::from), "A").unwrap(),
        )
        .unwrap()
    }

    fn service() -> TopicSessionService {
        let catalog = InMemoryCatalog::new()
            .with_topic(
                TopicName::new("interfaces").unwrap(),
                "Interfaces",
                vec![
                    question("h", Difficulty::Hard),
                    question("e", Difficulty::Easy),
                    question("m", Difficulty::Medium),
                ],
            )
            .unwrap();
        TopicSessionService::new(Arc::new(catalog))
            .with_config(SessionConfig::default().with_shuffle_seed(Some(11)))
    }

    #[test]
    fn unknown_topic_leaves_recorder_untouched() {
        let mut stats = SessionStats::new();
        let err = service()
            .start_topic(&TopicName::new("generics").unwrap(), None, &mut stats)
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::Load(QuestionLoadError::NotFound { .. })
        ));
        assert!(stats.studied_topics().is_empty());
        assert_eq!(stats.answered() + stats.skipped(), 0);
    }

    #[test]
    fn start_orders_and_marks_topic() {
        let mut stats = SessionStats::new();
        let topic = TopicName::new("Interfaces").unwrap();
        let session = service()
            .start_topic(&topic, Some(OrderingPolicy::Ascending), &mut stats)
            .unwrap();

        let prompts: Vec<&str> = session.questions().iter().map(Question::prompt).collect();
        assert_eq!(prompts, vec!["e", "m", "h"]);
        assert_eq!(session.title(), "Interfaces");
        assert_eq!(session.position(), 0);
        drop(session);
        assert_eq!(stats.current_topic(), Some(&topic));
    }

    #[test]
    fn default_ordering_comes_from_config() {
        let service = service().with_config(
            SessionConfig::default().with_default_ordering(OrderingPolicy::Descending),
        );
        let mut stats = SessionStats::new();
        let session = service
            .start_topic(&TopicName::new("interfaces").unwrap(), None, &mut stats)
            .unwrap();
        assert_eq!(session.ordering(), Some(OrderingPolicy::Descending));
        assert_eq!(session.current().unwrap().prompt(), "h");
    }
}
