//! Simulator record codec
//!
//! The simulator reads a keyword input record and writes a sectioned output
//! record. This module converts between those texts and typed values.
//!
//! # Architecture
//!
//! ```text
//! record/
//! ├── mod.rs          ← RecordError, re-exports
//! ├── format.rs       ← markers, keyword and number scanning
//! ├── encoder.rs      ← feed block encoding and patching
//! ├── convergence.rs  ← convergence target directives
//! ├── sections.rs     ← line-oriented section state machine
//! ├── labels.rs       ← renaming tables for scalar outputs
//! └── decoder.rs      ← effluent / general / firebox result sets
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use spyro_rs::feed::WeightComposition;
//! use spyro_rs::record::{decode_effluent, encode_feed, FeedFormat};
//!
//! let feed: WeightComposition = vec![("C2H6", 100.0)].into_iter().collect();
//! let text = encode_feed(&feed, FeedFormat::Primary, None);
//! assert_eq!(text, "KEYW=&NAME\n    C2H6=100.00000, END");
//!
//! let effluent = decode_effluent("[EFFLUENT] WC2H6 100.0 [EFFLUENT END]").unwrap();
//! assert_eq!(effluent.weight.get("C2H6"), Some(100.0));
//! ```
//!
//! # Errors
//!
//! A missing marker, a broken name/value sequence or an unreadable number
//! makes the whole call fail with a [`RecordError`]; no partially patched
//! or partially decoded value is ever returned.

pub mod format;
pub mod encoder;
pub mod convergence;
pub mod sections;
pub mod labels;
pub mod decoder;

pub use encoder::{decode_feed, encode_feed, patch_feed, EncoderConfig, FeedFormat};
pub use convergence::{patch_convergence, ConvergenceTarget, TargetKind};
pub use decoder::{
    decode_effluent, decode_firebox, decode_general, decode_output, DecodeOptions,
    EffluentCategory, EffluentResult, FireboxResult, ScalarResultSet, ScalarValue,
    SimulationOutput, RAW_C4_COMPONENTS,
};

use thiserror::Error;

/// Format error in an input template or output record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("marker '{marker}' not found in record")]
    MissingMarker { marker: String },

    #[error("section '{begin}' is not closed by '{end}'")]
    UnterminatedSection { begin: String, end: String },

    #[error("in {section}: '{token}' is not a name/value pair")]
    MalformedPair { section: String, token: String },

    #[error("in {section}: '{token}' is not a number")]
    InvalidNumber { section: String, token: String },

    #[error("invalid convergence target: {reason}")]
    InvalidTarget { reason: String },
}

impl RecordError {
    pub(crate) fn missing(marker: &str) -> Self {
        RecordError::MissingMarker { marker: marker.to_string() }
    }

    pub(crate) fn unterminated(begin: &str, end: &str) -> Self {
        RecordError::UnterminatedSection { begin: begin.to_string(), end: end.to_string() }
    }
}
