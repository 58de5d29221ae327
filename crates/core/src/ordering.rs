//! Question ordering: difficulty sorts and the shuffle.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{SeedableRng, rng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::Question;

//
// ─── POLICY ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderingError {
    #[error("unknown ordering policy: {0}")]
    Unknown(String),
}

/// How a question set is arranged before and during a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderingPolicy {
    /// Easy to hard.
    Ascending,
    /// Hard to easy.
    Descending,
    #[default]
    Randomized,
}

impl OrderingPolicy {
    pub const ALL: [OrderingPolicy; 3] = [
        OrderingPolicy::Randomized,
        OrderingPolicy::Ascending,
        OrderingPolicy::Descending,
    ];

    /// Lenient parse: unrecognized names fall back to `Randomized`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!(policy = name, "unrecognized ordering policy, shuffling instead");
            OrderingPolicy::Randomized
        })
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            OrderingPolicy::Ascending => "ascending",
            OrderingPolicy::Descending => "descending",
            OrderingPolicy::Randomized => "randomized",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            OrderingPolicy::Ascending => "easy to hard",
            OrderingPolicy::Descending => "hard to easy",
            OrderingPolicy::Randomized => "random order",
        }
    }
}

impl fmt::Display for OrderingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OrderingPolicy {
    type Err = OrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ascending" | "asc" | "easy-first" => Ok(Self::Ascending),
            "descending" | "desc" | "hard-first" => Ok(Self::Descending),
            "randomized" | "random" | "shuffled" => Ok(Self::Randomized),
            _ => Err(OrderingError::Unknown(s.to_string())),
        }
    }
}

//
// ─── SORT KEY ──────────────────────────────────────────────────────────────────
//

/// Anything the sequencer can order by an integer weight.
pub trait Weighted {
    fn weight(&self) -> u8;
}

impl Weighted for Question {
    fn weight(&self) -> u8 {
        Question::weight(self)
    }
}

impl Weighted for u8 {
    fn weight(&self) -> u8 {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// In-place partition-exchange sort on `Weighted::weight`.
///
/// Uses the last element as pivot. Not stable: equal weights may swap.
/// Recurses only into the smaller side, so stack depth stays logarithmic.
pub fn sort_by_weight<T: Weighted>(items: &mut [T], direction: SortDirection) {
    let mut rest = items;
    while rest.len() > 1 {
        let current = rest;
        let pivot = partition(current, direction);
        let (low, high) = current.split_at_mut(pivot);
        let high = &mut high[1..];
        if low.len() < high.len() {
            sort_by_weight(low, direction);
            rest = high;
        } else {
            sort_by_weight(high, direction);
            rest = low;
        }
    }
}

fn partition<T: Weighted>(items: &mut [T], direction: SortDirection) -> usize {
    let last = items.len() - 1;
    let pivot = items[last].weight();
    let mut store = 0;

    for j in 0..last {
        let value = items[j].weight();
        let goes_low = match direction {
            SortDirection::Ascending => value <= pivot,
            SortDirection::Descending => value >= pivot,
        };
        if goes_low {
            items.swap(store, j);
            store += 1;
        }
    }

    items.swap(store, last);
    store
}

//
// ─── SEQUENCER ─────────────────────────────────────────────────────────────────
//

/// Applies an [`OrderingPolicy`] to a question list, owning the random source.
pub struct Sequencer {
    rng: StdRng,
    seed: Option<u64>,
}

impl Sequencer {
    /// Sequencer seeded from the thread RNG.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rng()),
            seed: None,
        }
    }

    /// Sequencer whose shuffles are reproducible.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn reorder<T: Weighted>(&mut self, items: &mut [T], policy: OrderingPolicy) {
        if items.len() <= 1 {
            return;
        }

        debug!(policy = %policy, len = items.len(), "reordering questions");
        match policy {
            OrderingPolicy::Ascending => sort_by_weight(items, SortDirection::Ascending),
            OrderingPolicy::Descending => sort_by_weight(items, SortDirection::Descending),
            OrderingPolicy::Randomized => items.shuffle(&mut self.rng),
        }
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequencer")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
