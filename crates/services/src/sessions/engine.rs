use std::fmt;

use drill_core::model::{Question, TopicName};
use drill_core::{Navigable, NavigationError, NavigationHistory, OrderingPolicy, Sequencer};
use tracing::{debug, info};

use super::progress::SessionProgress;
use super::summary::TopicSummary;
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::stats::StatsRecorder;

//
// ─── ANSWER OUTCOME ────────────────────────────────────────────────────────────
//

/// Feedback for one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub canonical_answer: String,
    pub explanation: String,
    /// Only set for incorrect fill-in answers.
    pub hint: Option<&'static str>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Practice run over one topic's question set.
///
/// Owns the ordered questions, the current position and the navigation
/// history; borrows the recorder that receives answer and skip events.
pub struct TopicSession<'r, R: StatsRecorder + ?Sized> {
    topic: TopicName,
    title: String,
    questions: Vec<Question>,
    position: usize,
    history: NavigationHistory,
    /// `None` until an ordering is applied; the list is in catalog order.
    ordering: Option<OrderingPolicy>,
    sequencer: Sequencer,
    config: SessionConfig,
    recorder: &'r mut R,
}

impl<'r, R: StatsRecorder + ?Sized> TopicSession<'r, R> {
    /// Create a session positioned on the first question, in catalog order.
    ///
    /// History capacity is the larger of the configured capacity and the
    /// question count, so a forward walk can never overflow it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `questions` is empty.
    pub fn new(
        topic: TopicName,
        title: impl Into<String>,
        questions: Vec<Question>,
        config: &SessionConfig,
        recorder: &'r mut R,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        let capacity = config.history_capacity().max(questions.len());
        let sequencer = config
            .shuffle_seed()
            .map_or_else(Sequencer::new, Sequencer::seeded);

        Ok(Self {
            topic,
            title: title.into(),
            questions,
            position: 0,
            history: NavigationHistory::with_capacity(capacity),
            ordering: None,
            sequencer,
            config: config.clone(),
            recorder,
        })
    }

    #[must_use]
    pub fn topic(&self) -> &TopicName {
        &self.topic
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed session.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Zero-based index of the current question.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    #[must_use]
    pub fn ordering(&self) -> Option<OrderingPolicy> {
        self.ordering
    }

    #[must_use]
    pub fn recorder(&self) -> &R {
        &*self.recorder
    }

    #[must_use]
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.position)
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.position + 1 < self.questions.len()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.position > 0
    }

    /// Re-sort the question list in place.
    ///
    /// The position is kept, so the question under it may change. Waits for
    /// the configured sort pause first.
    pub fn apply_ordering(&mut self, policy: OrderingPolicy) {
        let pause = self.config.sort_pause();
        if !pause.is_zero() {
            std::thread::sleep(pause);
        }

        self.sequencer.reorder(&mut self.questions, policy);
        self.ordering = Some(policy);
        info!(topic = %self.topic, policy = %policy, position = self.position, "applied ordering");
    }

    /// Check `answer` against the current question and record the result.
    ///
    /// Returns `None`, recording nothing, when there is no current question.
    pub fn answer_current(&mut self, answer: &str) -> Option<AnswerOutcome> {
        let question = self.questions.get(self.position)?;
        let correct = question.verify(answer);

        let outcome = AnswerOutcome {
            correct,
            canonical_answer: question.canonical_answer().to_owned(),
            explanation: question.explanation().to_owned(),
            hint: if correct { None } else { question.hint() },
        };

        if correct {
            self.recorder.record_correct();
        } else {
            self.recorder.record_incorrect();
        }
        debug!(topic = %self.topic, position = self.position, correct, "answer submitted");
        Some(outcome)
    }

    /// [`TopicSession::answer_current`] reduced to its correctness flag.
    pub fn submit_answer(&mut self, answer: &str) -> bool {
        self.answer_current(answer)
            .is_some_and(|outcome| outcome.correct)
    }

    /// Record a skip of the current question. Does not move.
    pub fn skip(&mut self) {
        self.recorder.record_skip();
        debug!(topic = %self.topic, position = self.position, "question skipped");
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            current: self.position + 1,
            total: self.questions.len(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> TopicSummary {
        TopicSummary {
            topic: self.topic.clone(),
            title: self.title.clone(),
            question_count: self.questions.len(),
            progress_percent: self.progress().percent(),
            ordering: self.ordering,
        }
    }
}

impl<R: StatsRecorder + ?Sized> Navigable for TopicSession<'_, R> {
    fn advance(&mut self) -> Result<(), NavigationError> {
        if !self.has_next() {
            return Err(NavigationError::NoNextQuestion);
        }

        self.history.push(self.position)?;
        self.position += 1;
        debug!(position = self.position, "advanced");
        Ok(())
    }

    fn retreat(&mut self) -> Result<(), NavigationError> {
        if !self.has_previous() {
            return Err(NavigationError::NoPreviousQuestion);
        }

        self.position = match self.history.pop() {
            Ok(previous) => previous,
            Err(_) => self.position - 1,
        };
        debug!(position = self.position, "retreated");
        Ok(())
    }

    fn return_to_menu(&mut self) -> Result<(), NavigationError> {
        self.position = 0;
        self.history.clear();
        debug!(topic = %self.topic, "returned to menu");
        Ok(())
    }
}

impl<R: StatsRecorder + ?Sized> fmt::Debug for TopicSession<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopicSession")
            .field("topic", &self.topic)
            .field("questions_len", &self.questions.len())
            .field("position", &self.position)
            .field("history_len", &self.history.len())
            .field("ordering", &self.ordering)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
