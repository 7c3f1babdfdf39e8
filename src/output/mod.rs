//! Output module for simulation results
//!
//! Tables of results across cases and their export to files.
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! └── export/             ← Data export
//!     ├── mod.rs          ← ResultTable, Exporter trait
//!     └── csv.rs
//! ```

pub mod export;

pub use export::{CsvConfig, CsvError, CsvExporter, CsvMetadata, Exporter, ResultTable};
