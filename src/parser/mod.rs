//! Log line parsing.
//!
//! Turns raw Linkplay server log lines into typed [`LogEvent`]s.

mod classifier;
mod events;

pub use classifier::{ClassifierError, LineClassifier, LineRule};
pub use events::{EventKind, LogEvent, ScoreReport};
