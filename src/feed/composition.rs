//! Laboratory and simulator feed compositions
//!
//! - [`RawComposition`]: the laboratory table as reported, one row per
//!   measured quantity, any unit, possibly censored values.
//! - [`WeightComposition`]: simulator keys → weight percent, the shape the
//!   record encoder consumes.

use std::fmt;

use crate::values::NamedValues;

/// Unit tag of weight-percent rows in laboratory tables
pub const WEIGHT_PERCENT_UNIT: &str = "PCT_GEW";

/// Value reported by the laboratory when a component is below its detection limit
pub const BELOW_DETECTION_MARKER: &str = "<0.50";

// =================================================================================================
// Raw laboratory table
// =================================================================================================

/// A laboratory measurement value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue {
    Numeric(f64),

    /// Censored "below detection limit" value
    BelowDetection,
}

impl RawValue {
    /// Parse a laboratory cell
    ///
    /// Returns `None` when the cell is neither a finite number nor the
    /// censoring marker.
    ///
    /// ```rust
    /// use spyro_rs::feed::RawValue;
    ///
    /// assert_eq!(RawValue::parse("12,5", "<0.50"), Some(RawValue::Numeric(12.5)));
    /// assert_eq!(RawValue::parse("<0.50", "<0.50"), Some(RawValue::BelowDetection));
    /// assert_eq!(RawValue::parse("n.b.", "<0.50"), None);
    /// ```
    pub fn parse(cell: &str, below_detection: &str) -> Option<Self> {
        let cell = cell.trim();
        if cell == below_detection.trim() {
            return Some(RawValue::BelowDetection);
        }
        // Laboratory exports use a decimal comma
        cell.replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(RawValue::Numeric)
    }

    /// Numeric value, censored values counting as zero
    pub fn as_f64(&self) -> f64 {
        match self {
            RawValue::Numeric(value) => *value,
            RawValue::BelowDetection => 0.0,
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Numeric(value)
    }
}

/// One row of the laboratory composition table
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub description: String,
    pub unit: String,
    pub value: RawValue,
}

impl RawRow {
    pub fn new(description: &str, unit: &str, value: impl Into<RawValue>) -> Self {
        Self {
            description: description.trim().to_string(),
            unit: unit.trim().to_string(),
            value: value.into(),
        }
    }

    /// Weight-percent row with a numeric value
    pub fn weight_percent(description: &str, value: f64) -> Self {
        Self::new(description, WEIGHT_PERCENT_UNIT, value)
    }
}

/// Laboratory composition table, in reporting order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawComposition {
    rows: Vec<RawRow>,
}

impl RawComposition {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, row: RawRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Rows carrying the given unit tag
    pub fn rows_with_unit<'a>(&'a self, unit: &'a str) -> impl Iterator<Item = &'a RawRow> + 'a {
        self.rows.iter().filter(move |row| row.unit == unit)
    }

    /// First row with the given unit and description
    pub fn find(&self, unit: &str, description: &str) -> Option<&RawRow> {
        self.rows
            .iter()
            .find(|row| row.unit == unit && row.description == description)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<RawRow> for RawComposition {
    fn from_iter<I: IntoIterator<Item = RawRow>>(iter: I) -> Self {
        Self { rows: iter.into_iter().collect() }
    }
}

// =================================================================================================
// Simulator feed composition
// =================================================================================================

/// Simulator component key → weight percent
///
/// Values are non-negative. Several contributions to the same key
/// accumulate into one entry at the position of the first contribution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightComposition {
    values: NamedValues,
}

impl WeightComposition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` to `component`
    pub fn add(&mut self, component: &str, weight: f64) {
        self.values.accumulate(component, weight);
    }

    pub fn get(&self, component: &str) -> Option<f64> {
        self.values.get(component)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter()
    }

    pub fn total(&self) -> f64 {
        self.values.total()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy rescaled so that the values sum to 100
    ///
    /// A composition with a non-positive total cannot be rescaled and is
    /// returned unchanged.
    pub fn normalized(&self) -> Self {
        let total = self.total();
        let mut values = self.values.clone();
        if total > 0.0 {
            values.map_values(|v| v * 100.0 / total);
        }
        Self { values }
    }

    pub fn as_values(&self) -> &NamedValues {
        &self.values
    }
}

impl<'a> FromIterator<(&'a str, f64)> for WeightComposition {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut composition = WeightComposition::new();
        for (component, weight) in iter {
            composition.add(component, weight);
        }
        composition
    }
}

impl fmt::Display for WeightComposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.values)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
