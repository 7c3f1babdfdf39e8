//! Common utilities for integration tests
#![allow(dead_code)]

pub mod fixtures;
pub mod mock_simulators;
pub mod test_helpers;

// Re-export commonly used items
pub use fixtures::{naphtha_sample, naphtha_translator, OUTPUT_RECORD, TEMPLATE};
pub use mock_simulators::{CannedSimulator, FailingSimulator, FeedEchoSimulator};
pub use test_helpers::{assert_values_close, feed_lines, feed_pairs};
