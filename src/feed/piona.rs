//! PIONA cross-check
//!
//! The laboratory reports four family totals directly (aromatics,
//! iso-paraffins, n-paraffins, olefins). Naphthenes are never reported and
//! are derived as the remainder to 100 %. The same totals are recomputed
//! from the detailed composition through the translator's family column;
//! the absolute differences quantify how well the detailed analysis and
//! the translation table agree.

use std::fmt;

use crate::feed::composition::RawComposition;
use crate::feed::translator::{ComponentTranslator, PionaFamily};
use crate::feed::composition::WeightComposition;

/// Laboratory descriptions of the directly analysed family totals
pub const ANALYSED_FAMILY_LABELS: [(PionaFamily, &str); 4] = [
    (PionaFamily::Aromatic, "Totaal aromaten(gew)"),
    (PionaFamily::Isoparaffin, "Totaal iso-paraffinen(gew)"),
    (PionaFamily::Paraffin, "Totaal n-paraffinen(gew)"),
    (PionaFamily::Olefin, "Totaal olefinen(gew)"),
];

/// Whether a laboratory description is one of the analysed family totals
pub fn is_analysed_family_label(description: &str) -> bool {
    ANALYSED_FAMILY_LABELS
        .iter()
        .any(|(_, label)| *label == description)
}

/// Round half away from zero to two decimals
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One family of the PIONA comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PionaRow {
    pub family: PionaFamily,

    /// Sum of the detailed composition for this family (wt%, 2 decimals)
    pub calculated: f64,

    /// Laboratory family total (wt%, 2 decimals)
    pub analysed: f64,

    /// `|calculated - analysed|`
    pub difference: f64,
}

/// Calculated versus analysed PIONA breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct PionaAggregate {
    rows: Vec<PionaRow>,
}

impl PionaAggregate {
    /// Compare a composition with the analysed family totals of `raw`
    ///
    /// `unit` selects the laboratory rows that carry the totals. Missing or
    /// non-finite totals count as zero.
    pub fn compute(
        composition: &WeightComposition,
        raw: &RawComposition,
        translator: &ComponentTranslator,
        unit: &str,
    ) -> Self {
        let calculated = |family: PionaFamily| -> f64 {
            composition
                .iter()
                .filter(|(name, _)| translator.family_of(name) == Some(family))
                .map(|(_, weight)| weight)
                .sum()
        };

        let mut analysed: Vec<(PionaFamily, f64)> = ANALYSED_FAMILY_LABELS
            .iter()
            .map(|(family, label)| {
                let value = match raw.find(unit, label).map(|row| row.value.as_f64()) {
                    Some(value) if value.is_finite() => value,
                    _ => {
                        log::debug!("analysed PIONA total '{label}' missing or not finite, using 0");
                        0.0
                    }
                };
                (*family, value)
            })
            .collect();
        let reported: f64 = analysed.iter().map(|(_, value)| value).sum();
        analysed.push((PionaFamily::Naphthene, 100.0 - reported));

        let rows = analysed
            .into_iter()
            .map(|(family, analysed)| {
                let calculated = round2(calculated(family));
                let analysed = round2(analysed);
                PionaRow {
                    family,
                    calculated,
                    analysed,
                    difference: (calculated - analysed).abs(),
                }
            })
            .collect();

        Self { rows }
    }

    /// Rows in reporting order (A, I, P, O, N)
    pub fn rows(&self) -> &[PionaRow] {
        &self.rows
    }

    pub fn get(&self, family: PionaFamily) -> Option<&PionaRow> {
        self.rows.iter().find(|row| row.family == family)
    }

    /// Sum of the absolute family differences
    pub fn total_error(&self) -> f64 {
        self.rows.iter().map(|row| row.difference).sum()
    }
}

impl fmt::Display for PionaAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<12} {:>10} {:>10} {:>10}", "Family", "Calculated", "Analysed", "Difference")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<12} {:>10.2} {:>10.2} {:>10.2}",
                row.family, row.calculated, row.analysed, row.difference
            )?;
        }
        write!(f, "Total PIONA error: {:.2} %", self.total_error())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
