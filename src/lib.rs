//! spyro-rs: Feed reconciliation and record codec for a steam-cracking simulator
//!
//! Bridges laboratory feed analyses and a furnace simulator that speaks a
//! keyword text format. The library never runs the simulator itself: it
//! produces input records and consumes output records.
//!
//! # Architecture
//!
//! spyro-rs is built on two core principles:
//!
//! 1. **Separation of data and text**
//!    - Feed handling works on typed compositions (what to simulate)
//!    - The record codec works on text (how the simulator is told)
//!
//! 2. **Pure transformations**
//!    - Every component is a function of its inputs
//!    - Independent samples can be reconciled in parallel
//!
//! # Quick Start
//!
//! ```rust
//! use spyro_rs::prelude::*;
//!
//! // 1. Translate and reconcile a laboratory analysis
//! let translator = ComponentTranslator::new(vec![
//!     TranslationEntry::new("Ethaan", "C2H6", PionaFamily::Paraffin),
//!     TranslationEntry::new("Propaan", "C3H8", PionaFamily::Paraffin),
//! ]);
//! let raw = RawComposition::new(vec![
//!     RawRow::weight_percent("Ethaan", 70.0),
//!     RawRow::weight_percent("Propaan", 30.0),
//! ]);
//! let feed = reconcile(&raw, &translator, &ReconcileOptions::default().check_piona(false));
//!
//! // 2. Write it into an input template
//! let template = "KEYW=&NAME\n    C2H6=100.0, END\nCONOP=1\nTEMPO=835\n";
//! let input = patch_feed(template, &feed.composition, None).unwrap();
//! let target = ConvergenceTarget::new(TargetKind::OutletTemperature, 845.0).unwrap();
//! let input = patch_convergence(&input, &target).unwrap();
//! assert!(input.contains("C3H8=30.00000"));
//! assert!(input.contains("TEMPO=845"));
//!
//! // 3. Read the simulator's answer
//! let output = "[EFFLUENT] WC2H4 48.2 WCH4 6.1 [EFFLUENT END]";
//! let effluent = decode_effluent(output).unwrap();
//! assert_eq!(effluent.weight.get("C2H4"), Some(48.2));
//! ```
//!
//! # Modules
//!
//! - [`values`]: ordered name → value mapping
//! - [`feed`]: component translation and feed reconciliation
//! - [`record`]: input record encoding and output record decoding
//! - [`pipeline`]: per-case composition around an external simulator
//! - [`output`]: result tables and CSV export

// Core modules
pub mod values;
pub mod feed;
pub mod record;

pub mod pipeline;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use spyro_rs::prelude::*;
    //! ```
    pub use crate::values::NamedValues;
    pub use crate::feed::{
        reconcile,
        ComponentTranslator,
        FeedCondition,
        PionaFamily,
        RawComposition,
        RawRow,
        ReconcileOptions,
        Reconciliation,
        TranslationEntry,
        WeightComposition,
    };
    pub use crate::record::{
        decode_effluent,
        decode_output,
        encode_feed,
        patch_convergence,
        patch_feed,
        ConvergenceTarget,
        DecodeOptions,
        FeedFormat,
        RecordError,
        TargetKind,
    };
    pub use crate::pipeline::{CasePipeline, CaseReport, SimulationCase, Simulator};
    pub use crate::output::{CsvExporter, Exporter, ResultTable};
}
