//! Case pipeline
//!
//! Composes the four components around an external simulator:
//!
//! ```text
//! RawComposition ──reconcile──▶ WeightComposition ──patch_feed──┐
//!                                                               ▼
//!                     template ──────────────────────▶ input record ──patch_convergence──▶ Simulator
//!                                                                                             │
//!                   CaseReport ◀──decode_output── output record ◀──────────────────────────────┘
//! ```
//!
//! Running the simulator (files, working directories, processes) stays
//! behind the [`Simulator`] trait: this crate only produces the input text
//! and consumes the output text.

use thiserror::Error;

use crate::feed::{reconcile, ComponentTranslator, RawComposition, ReconcileOptions, Reconciliation};
use crate::record::{
    decode_output, patch_convergence, patch_feed, ConvergenceTarget, DecodeOptions, EncoderConfig,
    RecordError, SimulationOutput,
};

// =================================================================================================
// Errors
// =================================================================================================

/// Failure of an external simulator run
#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("simulator failed: {0}")]
    Failed(String),

    #[error("simulator I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of one pipeline case
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("record format error: {0}")]
    Record(#[from] RecordError),

    #[error(transparent)]
    Simulator(#[from] SimulatorError),
}

// =================================================================================================
// Simulator seam
// =================================================================================================

/// External process simulator
///
/// Takes a complete input record and returns the complete output record.
///
/// # Example
///
/// ```rust
/// use spyro_rs::pipeline::{Simulator, SimulatorError};
///
/// struct Canned(String);
///
/// impl Simulator for Canned {
///     fn name(&self) -> &str { "canned" }
///     fn run(&self, _input_record: &str) -> Result<String, SimulatorError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait Simulator {
    /// Simulator name, for logs and reports
    fn name(&self) -> &str;

    /// Run one case
    fn run(&self, input_record: &str) -> Result<String, SimulatorError>;
}

// =================================================================================================
// Cases
// =================================================================================================

/// One feed sample to simulate
#[derive(Debug, Clone)]
pub struct SimulationCase {
    pub name: String,

    /// Laboratory rows of the sample
    pub raw: RawComposition,

    /// Convergence target; `None` keeps the template's directives
    pub target: Option<ConvergenceTarget>,
}

impl SimulationCase {
    pub fn new(name: &str, raw: RawComposition) -> Self {
        Self { name: name.to_string(), raw, target: None }
    }

    /// Builder pattern: set the convergence target
    pub fn with_target(mut self, target: ConvergenceTarget) -> Self {
        self.target = Some(target);
        self
    }
}

/// A case ready for the simulator
#[derive(Debug, Clone)]
pub struct PreparedCase {
    pub reconciliation: Reconciliation,
    pub input_record: String,
}

/// Everything one case produced
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub name: String,
    pub reconciliation: Reconciliation,
    pub input_record: String,
    pub output: SimulationOutput,
}

impl CaseReport {
    /// The reconciled feed raised at least one error-level condition
    pub fn has_feed_errors(&self) -> bool {
        self.reconciliation.has_errors()
    }
}

// =================================================================================================
// Pipeline
// =================================================================================================

/// Reconcile, encode, simulate and decode cases against one input template
#[derive(Debug, Clone)]
pub struct CasePipeline {
    translator: ComponentTranslator,
    template: String,
    reconcile_options: ReconcileOptions,
    encoder_config: EncoderConfig,
    decode_options: DecodeOptions,
}

impl CasePipeline {
    /// Create a pipeline with default options
    pub fn new(translator: ComponentTranslator, template: &str) -> Self {
        Self {
            translator,
            template: template.to_string(),
            reconcile_options: ReconcileOptions::default(),
            encoder_config: EncoderConfig::default(),
            decode_options: DecodeOptions::default(),
        }
    }

    pub fn with_reconcile_options(mut self, options: ReconcileOptions) -> Self {
        self.reconcile_options = options;
        self
    }

    pub fn with_encoder_config(mut self, config: EncoderConfig) -> Self {
        self.encoder_config = config;
        self
    }

    pub fn with_decode_options(mut self, options: DecodeOptions) -> Self {
        self.decode_options = options;
        self
    }

    pub fn translator(&self) -> &ComponentTranslator {
        &self.translator
    }

    /// Reconcile the sample and build the input record
    ///
    /// Feed conditions never stop a case; they travel in the
    /// [`Reconciliation`].
    pub fn prepare(&self, case: &SimulationCase) -> Result<PreparedCase, PipelineError> {
        let reconciliation = reconcile(&case.raw, &self.translator, &self.reconcile_options);

        let mut input_record = patch_feed(
            &self.template,
            &reconciliation.composition,
            Some(&self.encoder_config),
        )?;
        if let Some(target) = &case.target {
            input_record = patch_convergence(&input_record, target)?;
        }

        Ok(PreparedCase { reconciliation, input_record })
    }

    /// Run one case through `simulator`
    pub fn run(
        &self,
        case: &SimulationCase,
        simulator: &dyn Simulator,
    ) -> Result<CaseReport, PipelineError> {
        log::info!("case '{}': running {}", case.name, simulator.name());

        let PreparedCase { reconciliation, input_record } = self.prepare(case)?;
        if reconciliation.has_errors() {
            log::warn!("case '{}': feed has error-level conditions", case.name);
        }

        let output_record = simulator.run(&input_record)?;
        let output = decode_output(&output_record, &self.decode_options)?;

        log::info!("case '{}': done", case.name);
        Ok(CaseReport {
            name: case.name.clone(),
            reconciliation,
            input_record,
            output,
        })
    }

    /// Run every case in order; a failing case does not stop the others
    pub fn run_all(
        &self,
        cases: &[SimulationCase],
        simulator: &dyn Simulator,
    ) -> Vec<Result<CaseReport, PipelineError>> {
        cases
            .iter()
            .map(|case| {
                self.run(case, simulator).inspect_err(|e| {
                    log::error!("case '{}' failed: {e}", case.name);
                })
            })
            .collect()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
