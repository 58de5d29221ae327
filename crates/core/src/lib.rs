#![forbid(unsafe_code)]

pub mod error;
pub mod history;
pub mod model;
pub mod navigation;
pub mod ordering;
pub mod time;

pub use error::Error;
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryError, NavigationHistory};
pub use navigation::{Navigable, NavigationError};
pub use ordering::{OrderingError, OrderingPolicy, Sequencer, Weighted};
pub use time::Clock;
