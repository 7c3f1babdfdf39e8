//! Feed composition handling
//!
//! This module turns laboratory analyses into simulator feed compositions.
//!
//! # Core Concepts
//!
//! - **Translation**: laboratory names → simulator component keys and PIONA
//!   families ([`ComponentTranslator`])
//! - **Reconciliation**: unit filtering, censoring, mass balance,
//!   normalization ([`reconcile`])
//! - **PIONA cross-check**: family totals recomputed from the detailed
//!   analysis versus the laboratory's own totals ([`PionaAggregate`])
//!
//! # Example
//!
//! ```rust
//! use spyro_rs::feed::{
//!     reconcile, ComponentTranslator, PionaFamily, RawComposition, RawRow,
//!     ReconcileOptions, TranslationEntry,
//! };
//!
//! let translator = ComponentTranslator::new(vec![
//!     TranslationEntry::new("n-Hexaan", "NC6", PionaFamily::Paraffin),
//!     TranslationEntry::new("Benzeen", "BENZ", PionaFamily::Aromatic),
//! ]);
//!
//! let raw = RawComposition::new(vec![
//!     RawRow::weight_percent("n-Hexaan", 78.5),
//!     RawRow::weight_percent("Benzeen", 20.0),
//! ]);
//!
//! let options = ReconcileOptions::default().check_piona(false);
//! let result = reconcile(&raw, &translator, &options);
//!
//! // 98.5 wt% reported: warned about, then normalized
//! assert_eq!(result.conditions.len(), 1);
//! assert!((result.composition.total() - 100.0).abs() < 1e-6);
//! ```

pub mod translator;
pub mod composition;
pub mod piona;
pub mod reconcile;

pub use translator::{ComponentTranslator, PionaFamily, Resolved, TranslationEntry, UnmappedComponent};
pub use composition::{
    RawComposition, RawRow, RawValue, WeightComposition, BELOW_DETECTION_MARKER,
    WEIGHT_PERCENT_UNIT,
};
pub use piona::{PionaAggregate, PionaRow, ANALYSED_FAMILY_LABELS};
pub use reconcile::{
    reconcile, reconcile_batch, FeedCondition, ReconcileOptions, Reconciliation, Severity,
};
