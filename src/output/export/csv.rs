//! CSV export of result tables
//!
//! Compatible with Excel, pandas and most spreadsheet tools. One row per
//! result label, one column per case; a cell the case did not report is
//! left empty.
//!
//! # Quick Examples
//!
//! ## Minimal Export
//!
//! ```rust
//! use spyro_rs::output::export::{CsvExporter, Exporter, ResultTable};
//! use spyro_rs::values::NamedValues;
//!
//! let base: NamedValues = vec![("C2H4", 28.4), ("C3H6", 15.1)].into_iter().collect();
//! let severe: NamedValues = vec![("C2H4", 31.0)].into_iter().collect();
//!
//! let mut table = ResultTable::new("Component");
//! table.add_column("base", &base);
//! table.add_column("severe", &severe);
//!
//! let mut buffer = Vec::new();
//! CsvExporter::default().export(&table, &mut buffer).unwrap();
//! assert_eq!(
//!     String::from_utf8(buffer).unwrap(),
//!     "Component,base,severe\nC2H4,28.400000,31.000000\nC3H6,15.100000,\n"
//! );
//! ```
//!
//! ## With Metadata
//!
//! ```rust,ignore
//! let metadata = CsvMetadata::from_run("spyro", "naphtha.ecf", 12);
//! let exporter = CsvExporter::new(CsvConfig::european().with_metadata(metadata));
//! exporter.export_to_path(&table, "yields.csv")?;
//! ```
//!
//! **Output** (`yields.csv`):
//! ```csv
//! # SPYRO Simulation Results
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Simulator: spyro
//! # Template: naphtha.ecf
//! # Cases: 12
//! #
//! Component;base;severe
//! C2H4;28,400000;31,000000
//! ```

use std::borrow::Cow;
use std::io::Write;

use thiserror::Error;

use crate::output::export::{Exporter, ResultTable};

// =================================================================================================
// Errors
// =================================================================================================

/// CSV export failure
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("empty table: no rows or no cases to export")]
    EmptyTable,

    #[error("non-finite value {value} in row '{row}', case '{case}'")]
    NonFinite { row: String, case: String, value: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =================================================================================================
// Configuration
// =================================================================================================

/// Layout of the exported text
///
/// A header block is written only when `metadata` is set.
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Decimal places of every value (default: 6)
    pub precision: usize,

    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// Semicolon-delimited with a decimal comma
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: attach a run description
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    fn cell(&self, value: Option<f64>) -> String {
        let Some(value) = value else {
            return String::new();
        };
        let text = format!("{value:.prec$}", prec = self.precision);
        match self.decimal_separator {
            '.' => text,
            separator => text.replace('.', &separator.to_string()),
        }
    }

    /// Quote a text field holding the delimiter, a quote or a line break
    fn field<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if text.contains(|c: char| c == self.delimiter || c == '"' || c == '\n' || c == '\r') {
            Cow::Owned(format!("\"{}\"", text.replace('"', "\"\"")))
        } else {
            Cow::Borrowed(text)
        }
    }
}

/// Run description written as `#` comment lines above the table
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    pub simulator_name: Option<String>,

    /// Input template the cases were built from
    pub template: Option<String>,

    pub n_cases: Option<usize>,

    /// Extra `key: value` lines, in insertion order
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    pub fn from_run(simulator: &str, template: &str, n_cases: usize) -> Self {
        Self {
            simulator_name: Some(simulator.to_string()),
            template: Some(template.to_string()),
            n_cases: Some(n_cases),
            ..Default::default()
        }
    }

    pub fn add_custom(&mut self, key: &str, value: &str) {
        self.custom.push((key.to_string(), value.to_string()));
    }

    fn write_header(&self, writer: &mut dyn Write) -> Result<(), CsvError> {
        writeln!(writer, "# SPYRO Simulation Results")?;
        writeln!(writer, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

        let fixed = [
            ("Simulator", self.simulator_name.clone()),
            ("Template", self.template.clone()),
            ("Cases", self.n_cases.map(|n| n.to_string())),
        ];
        let lines = fixed
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key.to_string(), value)))
            .chain(self.custom.iter().cloned());
        for (key, value) in lines {
            writeln!(writer, "# {key}: {value}")?;
        }

        writeln!(writer, "#")?;
        Ok(())
    }
}

// =================================================================================================
// Exporter
// =================================================================================================

/// Writes a [`ResultTable`] as delimited text
///
/// Labels and case names are quoted when they contain the delimiter, so
/// labels such as "Tube metal temperature, start of run (°C)" stay in one
/// column.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export(&self, table: &ResultTable, writer: &mut dyn Write) -> Result<(), CsvError> {
        let config = &self.config;

        // ============================= Validation =============================

        if table.is_empty() {
            return Err(CsvError::EmptyTable);
        }

        for (label, cells) in table.rows() {
            for (case, cell) in table.cases().iter().zip(cells) {
                if let Some(value) = cell
                    && !value.is_finite()
                {
                    return Err(CsvError::NonFinite {
                        row: label.clone(),
                        case: case.clone(),
                        value: *value,
                    });
                }
            }
        }

        // ============================= Header =================================

        if let Some(metadata) = &config.metadata {
            metadata.write_header(writer)?;
        }

        write!(writer, "{}", config.field(table.row_header()))?;
        for case in table.cases() {
            write!(writer, "{}{}", config.delimiter, config.field(case))?;
        }
        writeln!(writer)?;

        // ============================= Rows ===================================

        for (label, cells) in table.rows() {
            write!(writer, "{}", config.field(label))?;
            for cell in cells {
                write!(writer, "{}{}", config.delimiter, config.cell(*cell))?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
