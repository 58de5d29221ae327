//! Bounded LIFO of previously visited positions.

use std::num::NonZeroUsize;
use thiserror::Error;

/// Capacity used when nothing else is configured.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("navigation history is full (capacity {capacity})")]
    Full { capacity: usize },

    #[error("navigation history is empty")]
    Empty,
}

/// Stack of positions the session was at before each advance.
///
/// Overflow is reported, never resolved by dropping the oldest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: Vec<usize>,
    capacity: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl NavigationHistory {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    /// # Errors
    ///
    /// Returns `HistoryError::Full` when the stack already holds `capacity` entries.
    pub fn push(&mut self, position: usize) -> Result<(), HistoryError> {
        if self.is_full() {
            return Err(HistoryError::Full {
                capacity: self.capacity,
            });
        }
        self.entries.push(position);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `HistoryError::Empty` when there is nothing to pop.
    pub fn pop(&mut self) -> Result<usize, HistoryError> {
        self.entries.pop().ok_or(HistoryError::Empty)
    }

    /// # Errors
    ///
    /// Returns `HistoryError::Empty` when there is nothing on top.
    pub fn peek(&self) -> Result<usize, HistoryError> {
        self.entries.last().copied().ok_or(HistoryError::Empty)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries, or `None` when the history is empty.
    #[must_use]
    pub fn size(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.entries.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().rev().copied()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
