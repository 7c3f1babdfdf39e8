//! Export module for simulation results.
//!
//! # Architecture
//!
//! Results of several cases are first assembled into a [`ResultTable`]
//! (one row per label, one column per case), then written by an
//! [`Exporter`]. Each format is an independent implementation in its own
//! sub-module.
//!
//! | Format  | Module          |
//! |---------|-----------------|
//! | CSV     | [`csv`]         |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use spyro_rs::output::export::{CsvExporter, Exporter, ResultTable};
//! use spyro_rs::record::EffluentCategory;
//!
//! let reports = pipeline.run_all(&cases, &simulator);
//! let reports: Vec<_> = reports.into_iter().filter_map(Result::ok).collect();
//!
//! let yields = ResultTable::from_effluent(&reports, EffluentCategory::WeightYield);
//! CsvExporter::default().export_to_path(&yields, "yields.csv")?;
//! ```

pub mod csv;

pub use csv::{CsvConfig, CsvError, CsvExporter, CsvMetadata};

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::pipeline::CaseReport;
use crate::record::EffluentCategory;
use crate::values::NamedValues;

// =================================================================================================
// Result table
// =================================================================================================

/// Labels × cases table of results
///
/// Row order is the order labels are first seen across columns. A case
/// that does not report a label has an empty cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    row_header: String,
    cases: Vec<String>,
    rows: Vec<(String, Vec<Option<f64>>)>,
}

impl ResultTable {
    /// Create an empty table; `row_header` titles the label column
    pub fn new(row_header: &str) -> Self {
        Self {
            row_header: row_header.to_string(),
            cases: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Append one case column
    pub fn add_column(&mut self, case: &str, values: &NamedValues) {
        let width = self.cases.len();
        self.cases.push(case.to_string());

        for (_, cells) in &mut self.rows {
            cells.push(None);
        }

        for (label, value) in values.iter() {
            match self.rows.iter_mut().find(|(existing, _)| existing == label) {
                Some((_, cells)) => cells[width] = Some(value),
                None => {
                    let mut cells = vec![None; width + 1];
                    cells[width] = Some(value);
                    self.rows.push((label.to_string(), cells));
                }
            }
        }
    }

    /// One column per report, rows from an effluent category
    pub fn from_effluent(reports: &[CaseReport], category: EffluentCategory) -> Self {
        let mut table = ResultTable::new("Component");
        for report in reports {
            table.add_column(&report.name, report.output.effluent.category(category));
        }
        table
    }

    /// One column per report, rows from the general performance labels
    pub fn from_general(reports: &[CaseReport]) -> Self {
        let mut table = ResultTable::new("Parameter");
        for report in reports {
            table.add_column(&report.name, &report.output.general.to_named_values());
        }
        table
    }

    /// One column per report that has firebox performance
    pub fn from_firebox(reports: &[CaseReport]) -> Self {
        let mut table = ResultTable::new("Parameter");
        for report in reports {
            if let Some(performance) = report.output.firebox.performance() {
                table.add_column(&report.name, &performance.to_named_values());
            }
        }
        table
    }

    /// One column per report, rows from the reconciled feed
    pub fn from_feeds(reports: &[CaseReport]) -> Self {
        let mut table = ResultTable::new("Component");
        for report in reports {
            table.add_column(&report.name, report.reconciliation.composition.as_values());
        }
        table
    }

    pub fn row_header(&self) -> &str {
        &self.row_header
    }

    pub fn cases(&self) -> &[String] {
        &self.cases
    }

    pub fn rows(&self) -> &[(String, Vec<Option<f64>>)] {
        &self.rows
    }

    /// Cell of `label` in `case`
    pub fn get(&self, label: &str, case: &str) -> Option<f64> {
        let column = self.cases.iter().position(|c| c == case)?;
        self.rows
            .iter()
            .find(|(existing, _)| existing == label)
            .and_then(|(_, cells)| cells[column])
    }

    /// No cases or no rows
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty() || self.rows.is_empty()
    }
}

// =================================================================================================
// Exporter trait
// =================================================================================================

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so callers
/// can react precisely without a boxed error.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error + From<std::io::Error>;

    /// Write `table` to `writer`
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty, holds non-finite values, or
    /// the writer fails.
    fn export(&self, table: &ResultTable, writer: &mut dyn Write) -> Result<(), Self::Error>;

    /// Write `table` to a new file at `path`
    fn export_to_path(&self, table: &ResultTable, path: &str) -> Result<(), Self::Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.export(table, &mut writer)?;
        writer.flush()?;
        log::debug!("exported {} rows to {path}", table.rows().len());
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
