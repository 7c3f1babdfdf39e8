//! Convergence target directives
//!
//! The simulator iterates the furnace until one controlled variable hits its
//! target. The input record selects the variable with `CONOP=<kind>` and
//! carries the target under a kind-dependent keyword:
//!
//! | Kind | Controlled variable               | Keyword  |
//! |------|-----------------------------------|----------|
//! | 1    | Coil outlet temperature           | `TEMPO`  |
//! | 2    | Propylene/ethylene ratio          | `CONVAL` |
//! | 3    | Methane/propylene ratio           | `CONVAL` |
//! | 4    | Ethylene/ethane ratio             | `CONVAL` |
//! | 5    | Key component decomposition       | `CONVAL` |
//! | 6    | Total absorbed duty               | `CONVAL` |

use std::fmt;

use crate::record::format::{find_assignment, splice, CONVERGENCE_KIND_KEYWORD};
use crate::record::RecordError;

/// Variable the simulator converges on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    OutletTemperature,
    PropyleneEthyleneRatio,
    MethanePropyleneRatio,
    EthyleneEthaneRatio,
    KeyComponentDecomposition,
    AbsorbedDuty,
}

impl TargetKind {
    pub const ALL: [TargetKind; 6] = [
        TargetKind::OutletTemperature,
        TargetKind::PropyleneEthyleneRatio,
        TargetKind::MethanePropyleneRatio,
        TargetKind::EthyleneEthaneRatio,
        TargetKind::KeyComponentDecomposition,
        TargetKind::AbsorbedDuty,
    ];

    /// Numeric code written after `CONOP=`
    pub fn code(&self) -> u8 {
        match self {
            TargetKind::OutletTemperature => 1,
            TargetKind::PropyleneEthyleneRatio => 2,
            TargetKind::MethanePropyleneRatio => 3,
            TargetKind::EthyleneEthaneRatio => 4,
            TargetKind::KeyComponentDecomposition => 5,
            TargetKind::AbsorbedDuty => 6,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, RecordError> {
        TargetKind::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| RecordError::InvalidTarget {
                reason: format!("kind {code} is outside 1..=6"),
            })
    }

    /// Keyword carrying the target value
    pub fn value_keyword(&self) -> &'static str {
        match self {
            TargetKind::OutletTemperature => "TEMPO",
            _ => "CONVAL",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TargetKind::OutletTemperature => "coil outlet temperature",
            TargetKind::PropyleneEthyleneRatio => "propylene/ethylene ratio",
            TargetKind::MethanePropyleneRatio => "methane/propylene ratio",
            TargetKind::EthyleneEthaneRatio => "ethylene/ethane ratio",
            TargetKind::KeyComponentDecomposition => "key component decomposition",
            TargetKind::AbsorbedDuty => "total absorbed duty",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

/// Active convergence target: one kind, one value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceTarget {
    pub kind: TargetKind,
    pub value: f64,
}

impl ConvergenceTarget {
    /// Create a target, rejecting non-finite values
    pub fn new(kind: TargetKind, value: f64) -> Result<Self, RecordError> {
        if !value.is_finite() {
            return Err(RecordError::InvalidTarget {
                reason: format!("value {value} for {} is not finite", kind.description()),
            });
        }
        Ok(Self { kind, value })
    }

    /// Create a target from its numeric kind code
    pub fn from_code(code: u8, value: f64) -> Result<Self, RecordError> {
        Self::new(TargetKind::from_code(code)?, value)
    }

    /// Target value as written in the record
    ///
    /// Free-form shortest representation, identical for every kind.
    pub fn formatted_value(&self) -> String {
        format!("{}", self.value)
    }
}

/// Point an input template at a new convergence target
///
/// Rewrites the argument of `CONOP=` with the kind code, then the argument
/// of the kind's value keyword with the target value.
///
/// # Errors
///
/// [`RecordError::MissingMarker`] when either directive is absent; the
/// template is then left untouched.
///
/// # Example
///
/// ```rust
/// use spyro_rs::record::{patch_convergence, ConvergenceTarget, TargetKind};
///
/// let template = "CONOP=1\nTEMPO=835\nCONVAL=0.5\n";
/// let target = ConvergenceTarget::new(TargetKind::PropyleneEthyleneRatio, 0.62).unwrap();
///
/// let patched = patch_convergence(template, &target).unwrap();
/// assert_eq!(patched, "CONOP=2\nTEMPO=835\nCONVAL=0.62\n");
/// ```
pub fn patch_convergence(template: &str, target: &ConvergenceTarget) -> Result<String, RecordError> {
    let kind_range = find_assignment(template, CONVERGENCE_KIND_KEYWORD)
        .ok_or_else(|| RecordError::missing(CONVERGENCE_KIND_KEYWORD))?;
    let with_kind = splice(template, kind_range, &target.kind.code().to_string());

    let keyword = target.kind.value_keyword();
    let value_range = find_assignment(&with_kind, keyword)
        .ok_or_else(|| RecordError::missing(keyword))?;
    Ok(splice(&with_kind, value_range, &target.formatted_value()))
}

// =================================================================================================
// Tests
// =================================================================================================
