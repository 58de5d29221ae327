use std::time::Duration;

use drill_core::{DEFAULT_HISTORY_CAPACITY, OrderingPolicy};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("history capacity must be greater than zero")]
    ZeroHistoryCapacity,
}

/// Knobs shared by every topic session started from one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    history_capacity: usize,
    default_ordering: OrderingPolicy,
    shuffle_seed: Option<u64>,
    sort_pause: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            default_ordering: OrderingPolicy::default(),
            shuffle_seed: None,
            sort_pause: Duration::ZERO,
        }
    }
}

impl SessionConfig {
    /// Build a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroHistoryCapacity` when `history_capacity` is zero.
    pub fn new(
        history_capacity: usize,
        default_ordering: OrderingPolicy,
        shuffle_seed: Option<u64>,
        sort_pause: Duration,
    ) -> Result<Self, ConfigError> {
        Self::default()
            .with_history_capacity(history_capacity)
            .map(|config| {
                config
                    .with_default_ordering(default_ordering)
                    .with_shuffle_seed(shuffle_seed)
                    .with_sort_pause(sort_pause)
            })
    }

    /// # Errors
    ///
    /// Returns `ConfigError::ZeroHistoryCapacity` when `capacity` is zero.
    pub fn with_history_capacity(mut self, capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        self.history_capacity = capacity;
        Ok(self)
    }

    #[must_use]
    pub fn with_default_ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.default_ordering = ordering;
        self
    }

    #[must_use]
    pub fn with_shuffle_seed(mut self, seed: Option<u64>) -> Self {
        self.shuffle_seed = seed;
        self
    }

    /// Cosmetic delay before each reorder, so a front end can show a
    /// "sorting" message. Zero disables it.
    #[must_use]
    pub fn with_sort_pause(mut self, pause: Duration) -> Self {
        self.sort_pause = pause;
        self
    }

    #[must_use]
    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    #[must_use]
    pub fn default_ordering(&self) -> OrderingPolicy {
        self.default_ordering
    }

    #[must_use]
    pub fn shuffle_seed(&self) -> Option<u64> {
        self.shuffle_seed
    }

    #[must_use]
    pub fn sort_pause(&self) -> Duration {
        self.sort_pause
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.history_capacity(), 100);
        assert_eq!(config.default_ordering(), OrderingPolicy::Randomized);
        assert_eq!(config.shuffle_seed(), None);
        assert_eq!(config.sort_pause(), Duration::ZERO);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(
            SessionConfig::default().with_history_capacity(0).unwrap_err(),
            ConfigError::ZeroHistoryCapacity
        );
        assert!(
            SessionConfig::new(0, OrderingPolicy::Ascending, None, Duration::ZERO).is_err()
        );
    }

    #[test]
    fn builders_apply() {
        let config =
            SessionConfig::new(5, OrderingPolicy::Descending, Some(7), Duration::from_millis(20))
                .unwrap();
        assert_eq!(config.history_capacity(), 5);
        assert_eq!(config.default_ordering(), OrderingPolicy::Descending);
        assert_eq!(config.shuffle_seed(), Some(7));
        assert_eq!(config.sort_pause(), Duration::from_millis(20));
    }
}
