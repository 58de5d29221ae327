//! Learner statistics for one process lifetime.

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use tracing::debug;

use drill_core::Clock;
use drill_core::model::TopicName;

const REPORT_RULE_WIDTH: usize = 50;
const ACCURACY_BONUS_FACTOR: f64 = 0.1;

/// Sink for the events a topic session produces.
pub trait StatsRecorder {
    fn record_correct(&mut self);
    fn record_incorrect(&mut self);
    fn record_skip(&mut self);
    fn mark_topic_studied(&mut self, topic: &TopicName);
}

//
// ─── SESSION STATS ─────────────────────────────────────────────────────────────
//

/// Counters, studied topics and the session clock.
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    clock: Clock,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    correct: u32,
    incorrect: u32,
    skipped: u32,
    topics: Vec<TopicName>,
    current_topic: Option<TopicName>,
}

impl SessionStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    /// Start (or restart) the session clock.
    pub fn start(&mut self) {
        self.started_at = Some(self.clock.now());
        self.finished_at = None;
    }

    /// Stop the session clock. No effect if it was never started.
    pub fn finish(&mut self) {
        if self.started_at.is_some() {
            self.finished_at = Some(self.clock.now());
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.started_at.is_some() && self.finished_at.is_none()
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        let Some(started_at) = self.started_at else {
            return Duration::zero();
        };
        match self.finished_at {
            Some(finished_at) => (finished_at - started_at).max(Duration::zero()),
            None => self.clock.elapsed_since(started_at),
        }
    }

    /// `"2m 5s"`, or `"42s"` under a minute.
    #[must_use]
    pub fn format_elapsed(&self) -> String {
        format_duration(self.elapsed())
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    /// Correct plus incorrect; skips are not answers.
    #[must_use]
    pub fn answered(&self) -> u32 {
        self.correct + self.incorrect
    }

    #[must_use]
    pub fn studied_topics(&self) -> &[TopicName] {
        &self.topics
    }

    #[must_use]
    pub fn current_topic(&self) -> Option<&TopicName> {
        self.current_topic.as_ref()
    }

    #[must_use]
    pub fn accuracy_percent(&self) -> f64 {
        accuracy(self.correct, self.answered())
    }

    /// Share of topics studied, plus a bonus of a tenth of the accuracy once
    /// anything was answered. Capped at 100.
    #[must_use]
    pub fn overall_progress(&self, total_topics: usize) -> f64 {
        overall(self.topics.len(), total_topics, self.correct, self.answered())
    }

    /// Clear counters and topics. The session clock keeps running.
    pub fn reset(&mut self) {
        debug!("resetting learner statistics");
        self.correct = 0;
        self.incorrect = 0;
        self.skipped = 0;
        self.topics.clear();
        self.current_topic = None;
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            correct: self.correct,
            incorrect: self.incorrect,
            skipped: self.skipped,
            elapsed: self.elapsed(),
            topics: self.topics.clone(),
        }
    }
}

impl StatsRecorder for SessionStats {
    fn record_correct(&mut self) {
        self.correct += 1;
    }

    fn record_incorrect(&mut self) {
        self.incorrect += 1;
    }

    fn record_skip(&mut self) {
        self.skipped += 1;
    }

    fn mark_topic_studied(&mut self, topic: &TopicName) {
        if !self.topics.contains(topic) {
            self.topics.push(topic.clone());
        }
        self.current_topic = Some(topic.clone());
    }
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// Point-in-time copy of the statistics, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub correct: u32,
    pub incorrect: u32,
    pub skipped: u32,
    pub elapsed: Duration,
    pub topics: Vec<TopicName>,
}

impl StatsSnapshot {
    #[must_use]
    pub fn answered(&self) -> u32 {
        self.correct + self.incorrect
    }

    #[must_use]
    pub fn accuracy_percent(&self) -> f64 {
        accuracy(self.correct, self.answered())
    }

    #[must_use]
    pub fn overall_progress(&self, total_topics: usize) -> f64 {
        overall(self.topics.len(), total_topics, self.correct, self.answered())
    }

    /// Multi-line statistics screen.
    #[must_use]
    pub fn report(&self, total_topics: usize) -> String {
        let rule = "=".repeat(REPORT_RULE_WIDTH);
        let mut lines = vec![
            rule.clone(),
            "         SESSION STATISTICS".to_owned(),
            rule.clone(),
            format!("Questions answered: {}", self.answered()),
            format!("Correct: {}", self.correct),
            format!("Incorrect: {}", self.incorrect),
            format!("Skipped: {}", self.skipped),
            format!("Accuracy: {:.1}%", self.accuracy_percent()),
            format!("Session time: {}", format_duration(self.elapsed)),
            format!("Topics studied: {}/{total_topics}", self.topics.len()),
        ];
        if !self.topics.is_empty() {
            let names: Vec<&str> = self.topics.iter().map(TopicName::as_str).collect();
            lines.push(format!("Topics: {}", names.join(", ")));
        }
        lines.push(format!(
            "Overall progress: {:.1}%",
            self.overall_progress(total_topics)
        ));
        lines.push(rule);
        lines.join("\n")
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Answered: {} | Correct: {} ({:.1}%) | Incorrect: {} | Skipped: {} | Time: {} | Topics: {}",
            self.answered(),
            self.correct,
            self.accuracy_percent(),
            self.incorrect,
            self.skipped,
            format_duration(self.elapsed),
            self.topics.len()
        )
    }
}

fn accuracy(correct: u32, answered: u32) -> f64 {
    if answered == 0 {
        return 0.0;
    }
    f64::from(correct) / f64::from(answered) * 100.0
}

#[allow(clippy::cast_precision_loss)]
fn overall(studied: usize, total_topics: usize, correct: u32, answered: u32) -> f64 {
    if total_topics == 0 {
        return 0.0;
    }
    let mut progress = studied as f64 / total_topics as f64 * 100.0;
    if answered > 0 {
        progress += accuracy(correct, answered) * ACCURACY_BONUS_FACTOR;
    }
    progress.min(100.0)
}

fn format_duration(elapsed: Duration) -> String {
    let seconds = elapsed.num_seconds().max(0);
    let minutes = seconds / 60;
    if minutes > 0 {
        format!("{minutes}m {}s", seconds % 60)
    } else {
        format!("{seconds}s")
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
