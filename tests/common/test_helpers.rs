//! Helper functions for integration tests

use spyro_rs::record::format::{FEED_HEADER, FEED_TERMINATOR};
use spyro_rs::values::NamedValues;

/// Lines of the primary feed block, header and terminator line included
pub fn feed_lines(record: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut inside = false;

    for line in record.lines() {
        if line.starts_with(FEED_HEADER) {
            inside = true;
        }
        if inside {
            lines.push(line);
            if line.trim_end().ends_with(FEED_TERMINATOR) {
                break;
            }
        }
    }
    lines
}

/// `(name, value text)` pairs of the primary feed block, in order
pub fn feed_pairs(record: &str) -> Vec<(String, String)> {
    feed_lines(record)
        .iter()
        .skip(1)
        .flat_map(|line| line.split(','))
        .map(|item| item.trim().trim_end_matches('*').trim())
        .filter_map(|item| item.split_once('='))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Assert that two mappings hold the same names with close values
pub fn assert_values_close(actual: &NamedValues, expected: &NamedValues, tolerance: f64, message: &str) {
    assert_eq!(actual.len(), expected.len(), "{}: size mismatch", message);

    for (name, value) in expected.iter() {
        let found = actual
            .get(name)
            .unwrap_or_else(|| panic!("{}: '{}' missing", message, name));
        let diff = (found - value).abs();
        assert!(
            diff < tolerance,
            "{}: '{}' differs by {} (tolerance {})",
            message, name, diff, tolerance
        );
    }
}
