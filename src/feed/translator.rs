//! Laboratory → simulator component translation
//!
//! The laboratory reports components under its own descriptive names
//! ("n-Pentaan", "2-Methylbutaan", ...). The simulator only knows its own
//! short component keys (`NC5`, `IC5`, ...). A translation table maps each
//! laboratory name to a simulator key and to a PIONA family code.
//!
//! # Resolution rules
//!
//! - Several laboratory names may resolve to the same simulator key.
//! - When a laboratory name is listed twice, the first row wins.
//! - The PIONA family of a simulator key is taken from the **first** row
//!   that lists that key, whatever family later rows give it.
//! - An unknown laboratory name is an [`UnmappedComponent`], never a
//!   silently dropped row.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

// =================================================================================================
// PIONA family
// =================================================================================================

/// Coarse hydrocarbon classification of a feed component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PionaFamily {
    Paraffin,
    Isoparaffin,
    Olefin,
    Naphthene,
    Aromatic,
}

impl PionaFamily {
    /// All families, in the order the PIONA table is reported
    pub const ALL: [PionaFamily; 5] = [
        PionaFamily::Aromatic,
        PionaFamily::Isoparaffin,
        PionaFamily::Paraffin,
        PionaFamily::Olefin,
        PionaFamily::Naphthene,
    ];

    /// Parse the single-letter code used in translation tables
    ///
    /// ```rust
    /// use spyro_rs::feed::PionaFamily;
    ///
    /// assert_eq!(PionaFamily::from_code("A"), Some(PionaFamily::Aromatic));
    /// assert_eq!(PionaFamily::from_code(" i "), Some(PionaFamily::Isoparaffin));
    /// assert_eq!(PionaFamily::from_code("X"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "P" => Some(PionaFamily::Paraffin),
            "I" => Some(PionaFamily::Isoparaffin),
            "O" => Some(PionaFamily::Olefin),
            "N" => Some(PionaFamily::Naphthene),
            "A" => Some(PionaFamily::Aromatic),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            PionaFamily::Paraffin => 'P',
            PionaFamily::Isoparaffin => 'I',
            PionaFamily::Olefin => 'O',
            PionaFamily::Naphthene => 'N',
            PionaFamily::Aromatic => 'A',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PionaFamily::Paraffin => "Paraffin",
            PionaFamily::Isoparaffin => "Isoparaffin",
            PionaFamily::Olefin => "Olefin",
            PionaFamily::Naphthene => "Naphthene",
            PionaFamily::Aromatic => "Aromatic",
        }
    }
}

impl fmt::Display for PionaFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =================================================================================================
// Translation table
// =================================================================================================

/// One row of the translation table
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationEntry {
    /// Name as reported by the laboratory
    pub lab_name: String,

    /// Simulator component key; `None` when the table has no simulator
    /// counterpart for this laboratory name
    pub simulator_name: Option<String>,

    /// PIONA family declared on this row
    pub family: PionaFamily,
}

impl TranslationEntry {
    pub fn new(lab_name: &str, simulator_name: &str, family: PionaFamily) -> Self {
        let simulator_name = simulator_name.trim();
        Self {
            lab_name: lab_name.trim().to_string(),
            simulator_name: (!simulator_name.is_empty()).then(|| simulator_name.to_string()),
            family,
        }
    }
}

/// A laboratory name the translation table cannot resolve
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("laboratory component '{lab_name}' has no simulator counterpart")]
pub struct UnmappedComponent {
    pub lab_name: String,
}

/// Successful resolution of a laboratory name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub simulator_name: &'a str,
    pub family: PionaFamily,
}

/// Read-only laboratory → simulator name resolver
///
/// Built once per run from an ordered table scan and shared by reference
/// across every reconciliation of that run.
///
/// # Example
///
/// ```rust
/// use spyro_rs::feed::{ComponentTranslator, PionaFamily, TranslationEntry};
///
/// let translator = ComponentTranslator::new(vec![
///     TranslationEntry::new("n-Pentaan", "NC5", PionaFamily::Paraffin),
///     TranslationEntry::new("Cyclopentaan", "CC5", PionaFamily::Naphthene),
/// ]);
///
/// let resolved = translator.resolve("n-Pentaan").unwrap();
/// assert_eq!(resolved.simulator_name, "NC5");
/// assert!(translator.resolve("Onbekend").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComponentTranslator {
    /// Raw table, in the order it was supplied
    entries: Vec<TranslationEntry>,

    /// Laboratory name → index of its first row
    by_lab_name: HashMap<String, usize>,

    /// Simulator key → family of the first row listing it
    family_by_simulator_name: HashMap<String, PionaFamily>,
}

impl ComponentTranslator {
    /// Build the resolver from an ordered table
    pub fn new(entries: Vec<TranslationEntry>) -> Self {
        let mut by_lab_name = HashMap::with_capacity(entries.len());
        let mut family_by_simulator_name = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            by_lab_name.entry(entry.lab_name.clone()).or_insert(index);
            if let Some(simulator_name) = &entry.simulator_name {
                family_by_simulator_name
                    .entry(simulator_name.clone())
                    .or_insert(entry.family);
            }
        }

        Self { entries, by_lab_name, family_by_simulator_name }
    }

    /// Translator that maps every simulator key onto itself
    ///
    /// Useful when the laboratory already reports simulator keys.
    pub fn identity<'a>(components: impl IntoIterator<Item = (&'a str, PionaFamily)>) -> Self {
        Self::new(
            components
                .into_iter()
                .map(|(name, family)| TranslationEntry::new(name, name, family))
                .collect(),
        )
    }

    /// Resolve a laboratory name to its simulator key and PIONA family
    pub fn resolve(&self, lab_name: &str) -> Result<Resolved<'_>, UnmappedComponent> {
        let unmapped = || UnmappedComponent { lab_name: lab_name.to_string() };

        let index = *self.by_lab_name.get(lab_name.trim()).ok_or_else(unmapped)?;
        let simulator_name = self.entries[index]
            .simulator_name
            .as_deref()
            .ok_or_else(unmapped)?;
        let family = self
            .family_of(simulator_name)
            .unwrap_or(self.entries[index].family);

        Ok(Resolved { simulator_name, family })
    }

    /// PIONA family of a simulator key (first-seen precedence)
    pub fn family_of(&self, simulator_name: &str) -> Option<PionaFamily> {
        self.family_by_simulator_name.get(simulator_name).copied()
    }

    /// Raw translation table, for inspection
    pub fn entries(&self) -> &[TranslationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
