//! Output record decoding
//!
//! Three independent passes over the same text:
//!
//! - **Effluent**: `[EFFLUENT] … [EFFLUENT END]`, a flat list of
//!   `token value` pairs classified by token prefix
//! - **General**: `[SPYROGENERAL] … [SPYROGENERAL END]`, lines of
//!   alternating code/value tokens renamed through [`GENERAL_LABELS`]
//! - **Firebox**: `[PERFORM]` block nested in `[FIREBOX]`, renamed through
//!   [`FIREBOX_LABELS`]; its absence is a result, not an error
//!
//! Every pass is a pure function of the text: decoding the same record
//! twice yields identical results.
//!
//! [`GENERAL_LABELS`]: crate::record::labels::GENERAL_LABELS
//! [`FIREBOX_LABELS`]: crate::record::labels::FIREBOX_LABELS

use std::fmt;

use crate::record::format::{
    parse_number, EFFLUENT_BEGIN, EFFLUENT_END, FIREBOX_BEGIN, FIREBOX_END, GENERAL_BEGIN,
    GENERAL_END, PERFORMANCE_BEGIN,
};
use crate::record::labels::{firebox_label, general_label};
use crate::record::sections::{nested_block_lines, section_lines, NestedBlock};
use crate::record::RecordError;
use crate::values::NamedValues;

/// Members of the raw C4 cut; every other `R` component is pyrolysis gasoline
pub const RAW_C4_COMPONENTS: [&str; 8] = ["C4H4", "BUTAD", "B1", "B2C", "B2T", "IB", "NBUTA", "IBUTA"];

// =================================================================================================
// Configuration
// =================================================================================================

/// Options for the scalar passes
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Keep codes missing from the renaming table under their raw code
    /// (default: true). When false they are dropped.
    pub retain_unmapped: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { retain_unmapped: true }
    }
}

impl DecodeOptions {
    /// Drop codes without a label
    pub fn drop_unmapped() -> Self {
        Self { retain_unmapped: false }
    }
}

// =================================================================================================
// Pair tokenizing
// =================================================================================================

/// Split `text` into `(name, value)` pairs of whitespace-separated tokens
fn tokenize_pairs<'a>(section: &str, text: &'a str) -> Result<Vec<(&'a str, f64)>, RecordError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut pairs = Vec::with_capacity(tokens.len() / 2);

    for chunk in tokens.chunks(2) {
        let [name, value] = chunk else {
            return Err(RecordError::MalformedPair {
                section: section.to_string(),
                token: chunk[0].to_string(),
            });
        };
        let number = parse_number(value).ok_or_else(|| RecordError::InvalidNumber {
            section: section.to_string(),
            token: format!("{name} {value}"),
        })?;
        pairs.push((*name, number));
    }

    Ok(pairs)
}

// =================================================================================================
// Effluent
// =================================================================================================

/// Category of an effluent result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffluentCategory {
    /// `W…`: yield, wt%
    WeightYield,
    /// `V…`: yield, vol%
    VolumeYield,
    /// `R…`: raw C4 and pyrolysis gasoline together
    C4Pygas,
    /// `R…` members of [`RAW_C4_COMPONENTS`]
    RawC4,
    /// other `R…` components
    Pygas,
    /// `HC…`: hydrogen/carbon ratio
    HydrogenCarbonRatio,
    /// `MW…`: molecular weight
    MolecularWeight,
    /// anything else, under its full token
    Misc,
}

/// Classify an effluent token by prefix
///
/// Returns the category and the key to store the value under.
///
/// ```rust
/// use spyro_rs::record::decoder::classify_token;
/// use spyro_rs::record::EffluentCategory;
///
/// assert_eq!(classify_token("WC2H4"), (EffluentCategory::WeightYield, "C2H4"));
/// assert_eq!(classify_token("HCPYGAS"), (EffluentCategory::HydrogenCarbonRatio, "PYGAS"));
/// assert_eq!(classify_token("COT"), (EffluentCategory::Misc, "COT"));
/// ```
pub fn classify_token(token: &str) -> (EffluentCategory, &str) {
    let prefixes: [(&str, EffluentCategory); 5] = [
        ("W", EffluentCategory::WeightYield),
        ("V", EffluentCategory::VolumeYield),
        ("R", EffluentCategory::C4Pygas),
        ("HC", EffluentCategory::HydrogenCarbonRatio),
        ("MW", EffluentCategory::MolecularWeight),
    ];

    for (prefix, category) in prefixes {
        if let Some(name) = token.strip_prefix(prefix)
            && !name.is_empty()
        {
            return (category, name);
        }
    }
    (EffluentCategory::Misc, token)
}

/// Categorized effluent composition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffluentResult {
    pub weight: NamedValues,
    pub volume: NamedValues,
    /// All `R` components; `raw_c4` and `pygas` partition it
    pub c4_pygas: NamedValues,
    pub raw_c4: NamedValues,
    pub pygas: NamedValues,
    pub hc_ratio: NamedValues,
    pub molecular_weight: NamedValues,
    pub misc: NamedValues,
}

impl EffluentResult {
    pub fn category(&self, category: EffluentCategory) -> &NamedValues {
        match category {
            EffluentCategory::WeightYield => &self.weight,
            EffluentCategory::VolumeYield => &self.volume,
            EffluentCategory::C4Pygas => &self.c4_pygas,
            EffluentCategory::RawC4 => &self.raw_c4,
            EffluentCategory::Pygas => &self.pygas,
            EffluentCategory::HydrogenCarbonRatio => &self.hc_ratio,
            EffluentCategory::MolecularWeight => &self.molecular_weight,
            EffluentCategory::Misc => &self.misc,
        }
    }

    fn category_mut(&mut self, category: EffluentCategory) -> &mut NamedValues {
        match category {
            EffluentCategory::WeightYield => &mut self.weight,
            EffluentCategory::VolumeYield => &mut self.volume,
            EffluentCategory::C4Pygas => &mut self.c4_pygas,
            EffluentCategory::RawC4 => &mut self.raw_c4,
            EffluentCategory::Pygas => &mut self.pygas,
            EffluentCategory::HydrogenCarbonRatio => &mut self.hc_ratio,
            EffluentCategory::MolecularWeight => &mut self.molecular_weight,
            EffluentCategory::Misc => &mut self.misc,
        }
    }
}

/// Decode the last effluent section of an output record
///
/// # Errors
///
/// - [`RecordError::MissingMarker`] without `[EFFLUENT]`
/// - [`RecordError::UnterminatedSection`] without a following `[EFFLUENT END]`
/// - [`RecordError::MalformedPair`] / [`RecordError::InvalidNumber`] on a
///   broken pair list
pub fn decode_effluent(text: &str) -> Result<EffluentResult, RecordError> {
    let begin = text
        .rfind(EFFLUENT_BEGIN)
        .ok_or_else(|| RecordError::missing(EFFLUENT_BEGIN))?
        + EFFLUENT_BEGIN.len();
    let end = text[begin..]
        .find(EFFLUENT_END)
        .map(|offset| begin + offset)
        .ok_or_else(|| RecordError::unterminated(EFFLUENT_BEGIN, EFFLUENT_END))?;

    let mut result = EffluentResult::default();
    for (token, value) in tokenize_pairs(EFFLUENT_BEGIN, &text[begin..end])? {
        let (category, name) = classify_token(token);
        result.category_mut(category).insert(name, value);
    }

    let (raw_c4, pygas): (Vec<(&str, f64)>, Vec<(&str, f64)>) = result
        .c4_pygas
        .iter()
        .partition(|(name, _)| RAW_C4_COMPONENTS.contains(name));
    result.raw_c4 = raw_c4.into_iter().collect();
    result.pygas = pygas.into_iter().collect();

    Ok(result)
}

// =================================================================================================
// Scalar result sets
// =================================================================================================

/// One renamed scalar output
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarValue {
    /// Code as written by the simulator
    pub code: String,
    /// Descriptive label, or the code itself when the table has none
    pub label: String,
    pub value: f64,
}

/// Ordered set of renamed scalar outputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarResultSet {
    values: Vec<ScalarValue>,
}

impl ScalarResultSet {
    /// Build from `(code, value)` pairs, renaming through `label_of`
    ///
    /// A repeated code overwrites the earlier value in place.
    fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, f64)>,
        label_of: fn(&str) -> Option<&'static str>,
        options: &DecodeOptions,
    ) -> Self {
        let mut set = ScalarResultSet::default();
        for (code, value) in pairs {
            let label = match label_of(code) {
                Some(label) => label.to_string(),
                None if options.retain_unmapped => code.to_string(),
                None => {
                    log::warn!("dropping unlabelled output code '{code}'");
                    continue;
                }
            };
            match set.values.iter_mut().find(|existing| existing.code == code) {
                Some(existing) => existing.value = value,
                None => set.values.push(ScalarValue { code: code.to_string(), label, value }),
            }
        }
        set
    }

    /// Value under a descriptive label
    pub fn get(&self, label: &str) -> Option<f64> {
        self.values.iter().find(|v| v.label == label).map(|v| v.value)
    }

    /// Value under a raw simulator code
    pub fn get_code(&self, code: &str) -> Option<f64> {
        self.values.iter().find(|v| v.code == code).map(|v| v.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScalarValue> + '_ {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Label → value view
    pub fn to_named_values(&self) -> NamedValues {
        self.values.iter().map(|v| (v.label.as_str(), v.value)).collect()
    }
}

impl fmt::Display for ScalarResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in &self.values {
            writeln!(f, "{:<48} {:>14.4}", value.label, value.value)?;
        }
        Ok(())
    }
}

/// Decode the general performance section
///
/// Every line of the last `[SPYROGENERAL]` section is a sequence of
/// alternating code/value tokens.
pub fn decode_general(text: &str, options: &DecodeOptions) -> Result<ScalarResultSet, RecordError> {
    let mut pairs = Vec::new();
    for line in section_lines(text, GENERAL_BEGIN, GENERAL_END)? {
        pairs.extend(tokenize_pairs(GENERAL_BEGIN, line)?);
    }
    Ok(ScalarResultSet::from_pairs(pairs, general_label, options))
}

// =================================================================================================
// Firebox
// =================================================================================================

/// Firebox performance, if the record has any
#[derive(Debug, Clone, PartialEq)]
pub enum FireboxResult {
    /// No `[FIREBOX]` section: the case was run without a firebox model
    Absent,

    /// A `[FIREBOX]` section without a `[PERFORM]` block
    MissingPerformance,

    Performance(ScalarResultSet),
}

impl FireboxResult {
    pub fn performance(&self) -> Option<&ScalarResultSet> {
        match self {
            FireboxResult::Performance(set) => Some(set),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FireboxResult::Absent)
    }
}

/// Decode the firebox performance block
///
/// Only the first line of the `[PERFORM]` block carries the summary pairs.
pub fn decode_firebox(text: &str, options: &DecodeOptions) -> Result<FireboxResult, RecordError> {
    match nested_block_lines(text, FIREBOX_BEGIN, FIREBOX_END, PERFORMANCE_BEGIN) {
        NestedBlock::SectionAbsent => {
            log::debug!("no firebox data in record");
            Ok(FireboxResult::Absent)
        }
        NestedBlock::SubsectionAbsent => {
            log::warn!("firebox section without {PERFORMANCE_BEGIN} block");
            Ok(FireboxResult::MissingPerformance)
        }
        NestedBlock::Found(lines) => {
            let pairs = match lines.first() {
                Some(line) => tokenize_pairs(PERFORMANCE_BEGIN, line)?,
                None => Vec::new(),
            };
            Ok(FireboxResult::Performance(ScalarResultSet::from_pairs(
                pairs,
                firebox_label,
                options,
            )))
        }
    }
}

// =================================================================================================
// Whole record
// =================================================================================================

/// Every result set of one output record
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutput {
    pub effluent: EffluentResult,
    pub general: ScalarResultSet,
    pub firebox: FireboxResult,
}

/// Run the three passes over one output record
pub fn decode_output(text: &str, options: &DecodeOptions) -> Result<SimulationOutput, RecordError> {
    Ok(SimulationOutput {
        effluent: decode_effluent(text)?,
        general: decode_general(text, options)?,
        firebox: decode_firebox(text, options)?,
    })
}

// =================================================================================================
// Tests
// =================================================================================================
