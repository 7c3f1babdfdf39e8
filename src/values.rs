//! Ordered name → value mapping
//!
//! Compositions and effluent categories are small (tens to a few hundred
//! entries) and their order matters: a feed is written back to the record in
//! the order the laboratory reported it. [`NamedValues`] keeps insertion order
//! and offers map-like lookup on top of a plain vector.

use std::fmt;

/// Insertion-ordered mapping from a component or parameter name to a value
///
/// Inserting an existing name overwrites its value in place, so the
/// position of the first insertion is kept.
///
/// # Example
///
/// ```rust
/// use spyro_rs::values::NamedValues;
///
/// let mut values = NamedValues::new();
/// values.insert("C2H6", 40.0);
/// values.insert("C3H8", 60.0);
/// values.insert("C2H6", 45.0);
///
/// assert_eq!(values.get("C2H6"), Some(45.0));
/// assert_eq!(values.names().collect::<Vec<_>>(), vec!["C2H6", "C3H8"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedValues {
    entries: Vec<(String, f64)>,
}

impl NamedValues {

    // ======================================= constructors =======================================

    /// Create an empty mapping
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Create an empty mapping with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    // ========================================= mutation =========================================

    /// Set `name` to `value`, keeping the original position if present
    ///
    /// Returns the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        let name = name.into();
        match self.position(&name) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Add `value` to the current value of `name` (zero when absent)
    pub fn accumulate(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.position(&name) {
            Some(index) => self.entries[index].1 += value,
            None => self.entries.push((name, value)),
        }
    }

    /// Remove `name` and return its value
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.position(name).map(|index| self.entries.remove(index).1)
    }

    /// Apply `f` to every value
    pub fn map_values(&mut self, f: impl Fn(f64) -> f64) {
        for (_, value) in &mut self.entries {
            *value = f(*value);
        }
    }

    // ========================================== queries =========================================

    /// Value stored under `name`
    pub fn get(&self, name: &str) -> Option<f64> {
        self.position(name).map(|index| self.entries[index].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all values
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, value)| value).sum()
    }

    /// Names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(existing, _)| existing == name)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for NamedValues {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut values = NamedValues::new();
        for (name, value) in iter {
            values.insert(name, value);
        }
        values
    }
}

impl fmt::Display for NamedValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{:<12} {:>12.5}", name, value)?;
        }
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut values = NamedValues::new();
        values.insert("A", 1.0);
        values.insert("B", 2.0);
        assert_eq!(values.insert("A", 3.0), Some(1.0));

        let collected: Vec<_> = values.iter().collect();
        assert_eq!(collected, vec![("A", 3.0), ("B", 2.0)]);
    }

    #[test]
    fn test_accumulate_sums_duplicates() {
        let mut values = NamedValues::new();
        values.accumulate("IC5", 1.5);
        values.accumulate("NC5", 2.0);
        values.accumulate("IC5", 0.5);

        assert_eq!(values.get("IC5"), Some(2.0));
        assert_eq!(values.len(), 2);
        assert!((values.total() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_remove_and_map_values() {
        let mut values: NamedValues = vec![("A", 1.0), ("B", 2.0)].into_iter().collect();
        assert_eq!(values.remove("A"), Some(1.0));
        assert_eq!(values.remove("A"), None);

        values.map_values(|v| v * 10.0);
        assert_eq!(values.get("B"), Some(20.0));
    }
}
