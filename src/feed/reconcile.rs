//! Feed reconciliation
//!
//! Turns a laboratory composition table into the simulator feed mapping:
//!
//! 1. keep weight-percent rows only
//! 2. translate laboratory names to simulator keys
//! 3. censored values count as zero
//! 4. check the mass balance against 100 %
//! 5. optionally normalize to 100 %
//! 6. optionally cross-check the PIONA family totals
//!
//! Every data-quality problem found on the way is returned as a
//! [`FeedCondition`] next to the composition. Reconciliation never fails:
//! the caller always gets a usable, possibly still imbalanced, feed.

use thiserror::Error;

use crate::feed::composition::{
    RawComposition, WeightComposition, WEIGHT_PERCENT_UNIT,
};
use crate::feed::piona::{is_analysed_family_label, PionaAggregate};
use crate::feed::translator::ComponentTranslator;

/// Deviation from 100 % above which the balance is reported as a warning
pub const BALANCE_WARNING_DEVIATION: f64 = 1.0;

/// Deviation from 100 % above which the balance is reported as an error
pub const BALANCE_ERROR_DEVIATION: f64 = 2.0;

/// Total PIONA error above which a warning is reported
pub const PIONA_WARNING_ERROR: f64 = 1.0;

/// Total PIONA error above which a mismatch is reported
pub const PIONA_MISMATCH_ERROR: f64 = 2.0;

// =================================================================================================
// Configuration
// =================================================================================================

/// Options for [`reconcile`]
///
/// # Example
///
/// ```rust
/// use spyro_rs::feed::ReconcileOptions;
///
/// let options = ReconcileOptions::default().normalize(false);
/// assert!(!options.normalize);
/// assert!(options.check_piona);
/// ```
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Rescale the composition to sum to 100 (default: true)
    pub normalize: bool,

    /// Compare with the analysed PIONA totals (default: true)
    pub check_piona: bool,

    /// Unit tag of weight-percent rows (default: "PCT_GEW")
    pub weight_unit: String,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            check_piona: true,
            weight_unit: WEIGHT_PERCENT_UNIT.to_string(),
        }
    }
}

impl ReconcileOptions {
    /// Builder pattern: set normalization
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Builder pattern: set PIONA check
    pub fn check_piona(mut self, check_piona: bool) -> Self {
        self.check_piona = check_piona;
        self
    }

    /// Builder pattern: set weight-percent unit tag
    pub fn weight_unit(mut self, unit: &str) -> Self {
        self.weight_unit = unit.to_string();
        self
    }
}

// =================================================================================================
// Conditions
// =================================================================================================

/// Severity of a [`FeedCondition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// Data-quality finding of a reconciliation
///
/// Conditions are reported, never raised.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedCondition {
    #[error("laboratory component '{lab_name}' is missing from the translation table")]
    Unmapped { lab_name: String },

    #[error("negative weight {value} for '{lab_name}' counted as zero")]
    NegativeValue { lab_name: String, value: f64 },

    #[error("non-finite weight for '{lab_name}' counted as zero")]
    NonFiniteValue { lab_name: String },

    #[error("feed sums to {total:.3} wt%, not 100; components may be missing from the translation table")]
    BalanceWarning { total: f64 },

    #[error("feed sums to {total:.3} wt%, more than 2 % off 100")]
    BalanceError { total: f64 },

    #[error("calculated PIONA differs slightly from the analysed one (total error {total_error:.2} %)")]
    PionaWarning { total_error: f64 },

    #[error("calculated PIONA does not match the analysed one (total error {total_error:.2} %)")]
    PionaMismatch { total_error: f64 },
}

impl FeedCondition {
    pub fn severity(&self) -> Severity {
        match self {
            FeedCondition::BalanceError { .. } | FeedCondition::PionaMismatch { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Classify a mass-balance total
    ///
    /// A deviation of 1 % or more is a warning; from 2 % on it is also an
    /// error, so an error-level total carries both conditions.
    ///
    /// ```rust
    /// use spyro_rs::feed::FeedCondition;
    ///
    /// assert!(FeedCondition::for_balance(100.0).is_empty());
    /// assert!(matches!(FeedCondition::for_balance(98.5)[..], [FeedCondition::BalanceWarning { .. }]));
    /// assert!(FeedCondition::for_balance(97.5)
    ///     .iter()
    ///     .any(|c| matches!(c, FeedCondition::BalanceWarning { .. })));
    /// assert!(FeedCondition::for_balance(96.0)
    ///     .iter()
    ///     .any(|c| matches!(c, FeedCondition::BalanceError { .. })));
    /// ```
    pub fn for_balance(total: f64) -> Vec<Self> {
        let deviation = (total - 100.0).abs();
        let mut conditions = Vec::new();
        if deviation >= BALANCE_ERROR_DEVIATION {
            conditions.push(FeedCondition::BalanceError { total });
        }
        if deviation >= BALANCE_WARNING_DEVIATION {
            conditions.push(FeedCondition::BalanceWarning { total });
        }
        conditions
    }

    /// Classify a total PIONA error
    pub fn for_piona(total_error: f64) -> Option<Self> {
        if total_error > PIONA_MISMATCH_ERROR {
            Some(FeedCondition::PionaMismatch { total_error })
        } else if total_error > PIONA_WARNING_ERROR {
            Some(FeedCondition::PionaWarning { total_error })
        } else {
            None
        }
    }

    fn log(&self) {
        match self.severity() {
            Severity::Warning => log::warn!("{self}"),
            Severity::Error => log::error!("{self}"),
        }
    }
}

// =================================================================================================
// Reconciliation
// =================================================================================================

/// Outcome of [`reconcile`]
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Simulator feed, normalized when requested
    pub composition: WeightComposition,

    /// Sum of the translated weights before normalization
    pub raw_total: f64,

    /// PIONA comparison, when requested
    pub piona: Option<PionaAggregate>,

    /// Data-quality findings, in detection order
    pub conditions: Vec<FeedCondition>,
}

impl Reconciliation {
    /// Laboratory names the translator could not resolve
    pub fn unmapped(&self) -> impl Iterator<Item = &str> + '_ {
        self.conditions.iter().filter_map(|condition| match condition {
            FeedCondition::Unmapped { lab_name } => Some(lab_name.as_str()),
            _ => None,
        })
    }

    /// Whether any error-level condition was found
    pub fn has_errors(&self) -> bool {
        self.conditions
            .iter()
            .any(|condition| condition.severity() == Severity::Error)
    }
}

/// Reconcile a laboratory composition into a simulator feed
///
/// # Example
///
/// ```rust
/// use spyro_rs::feed::{reconcile, ComponentTranslator, PionaFamily, RawComposition, RawRow, ReconcileOptions};
///
/// let translator = ComponentTranslator::identity([("C2H6", PionaFamily::Paraffin)]);
/// let raw = RawComposition::new(vec![RawRow::weight_percent("C2H6", 100.0)]);
///
/// let result = reconcile(&raw, &translator, &ReconcileOptions::default().check_piona(false));
/// assert_eq!(result.composition.get("C2H6"), Some(100.0));
/// assert!(result.conditions.is_empty());
/// ```
pub fn reconcile(
    raw: &RawComposition,
    translator: &ComponentTranslator,
    options: &ReconcileOptions,
) -> Reconciliation {
    let mut conditions = Vec::new();
    let mut composition = WeightComposition::new();

    // ============================= Translate ==============================

    for row in raw.rows_with_unit(&options.weight_unit) {
        let resolved = match translator.resolve(&row.description) {
            Ok(resolved) => resolved,
            Err(unmapped) => {
                if !is_analysed_family_label(&row.description) {
                    conditions.push(FeedCondition::Unmapped { lab_name: unmapped.lab_name });
                }
                continue;
            }
        };

        let mut weight = row.value.as_f64();
        if !weight.is_finite() {
            conditions.push(FeedCondition::NonFiniteValue { lab_name: row.description.clone() });
            weight = 0.0;
        } else if weight < 0.0 {
            conditions.push(FeedCondition::NegativeValue {
                lab_name: row.description.clone(),
                value: weight,
            });
            weight = 0.0;
        }
        composition.add(resolved.simulator_name, weight);
    }

    // ============================= Balance ================================

    let raw_total = composition.total();
    conditions.extend(FeedCondition::for_balance(raw_total));

    if options.normalize {
        if raw_total > 0.0 {
            composition = composition.normalized();
            log::debug!("feed normalized from {raw_total:.4} wt%");
        } else {
            log::warn!("feed total is {raw_total}, normalization skipped");
        }
    }

    // ============================= PIONA ==================================

    let piona = options.check_piona.then(|| {
        let piona = PionaAggregate::compute(&composition, raw, translator, &options.weight_unit);
        log::debug!("PIONA comparison:\n{piona}");
        conditions.extend(FeedCondition::for_piona(piona.total_error()));
        piona
    });

    for condition in &conditions {
        condition.log();
    }

    Reconciliation { composition, raw_total, piona, conditions }
}

/// Reconcile independent samples with a shared translator
///
/// Results come back in sample order. With the `parallel` feature the
/// samples are processed on the rayon thread pool.
pub fn reconcile_batch(
    samples: &[RawComposition],
    translator: &ComponentTranslator,
    options: &ReconcileOptions,
) -> Vec<Reconciliation> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        samples
            .par_iter()
            .map(|raw| reconcile(raw, translator, options))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        samples
            .iter()
            .map(|raw| reconcile(raw, translator, options))
            .collect()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
