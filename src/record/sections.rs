//! Line-oriented section scanning
//!
//! Output records are read line by line with a small explicit state machine:
//!
//! ```text
//!                 begin                 end
//! SeekingSection ──────▶ InSection ──────────▶ (emit) ──▶ SeekingSection
//!
//!                 section                  subsection             next [marker]
//! SeekingSection ────────▶ SeekingSubsection ──────────▶ InSection ─────────────▶ (emit)
//! ```
//!
//! The last complete section of a record wins: the simulator appends a new
//! block per convergence pass and only the final one describes the
//! converged furnace.

use crate::record::RecordError;

/// State of the section scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    SeekingSection,
    SeekingSubsection,
    InSection,
}

/// Content after `marker` when the trimmed line starts with it
fn strip_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.trim().strip_prefix(marker).map(str::trim)
}

fn is_marker_line(line: &str) -> bool {
    line.trim_start().starts_with('[')
}

/// Non-empty, trimmed lines of the last `begin` … `end` section
///
/// Text after the begin marker on its own line counts as content.
///
/// # Errors
///
/// - [`RecordError::MissingMarker`] when `begin` never occurs
/// - [`RecordError::UnterminatedSection`] when no `begin` is followed by `end`
///
/// # Example
///
/// ```rust
/// use spyro_rs::record::sections::section_lines;
///
/// let text = "[A]\nx 1\n[A END]\n[A]\nx 2\n\n y 3 \n[A END]\n";
/// assert_eq!(section_lines(text, "[A]", "[A END]").unwrap(), vec!["x 2", "y 3"]);
/// ```
pub fn section_lines<'a>(text: &'a str, begin: &str, end: &str) -> Result<Vec<&'a str>, RecordError> {
    let mut state = ScanState::SeekingSection;
    let mut seen_begin = false;
    let mut current: Vec<&str> = Vec::new();
    let mut last_complete: Option<Vec<&str>> = None;

    for line in text.lines() {
        if let Some(rest) = strip_marker(line, begin) {
            seen_begin = true;
            state = ScanState::InSection;
            current.clear();
            if !rest.is_empty() {
                current.push(rest);
            }
            continue;
        }

        if state == ScanState::InSection {
            if strip_marker(line, end).is_some() {
                last_complete = Some(std::mem::take(&mut current));
                state = ScanState::SeekingSection;
            } else if !line.trim().is_empty() {
                current.push(line.trim());
            }
        }
    }

    match last_complete {
        Some(lines) => Ok(lines),
        None if seen_begin => Err(RecordError::unterminated(begin, end)),
        None => Err(RecordError::missing(begin)),
    }
}

/// Outcome of a nested block scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestedBlock<'a> {
    /// The outer section never occurs
    SectionAbsent,

    /// The outer section occurs but holds no such subsection
    SubsectionAbsent,

    /// Lines of the last subsection found
    Found(Vec<&'a str>),
}

/// Lines of a `subsection` block nested in `section`
///
/// The subsection runs to the next bracketed marker or the end of text.
/// The outer section ends at `section_end` or the end of text.
///
/// # Example
///
/// ```rust
/// use spyro_rs::record::sections::{nested_block_lines, NestedBlock};
///
/// let text = "[FIREBOX]\n[COILS]\nN 4\n[PERFORM]\nQFIRED 95.2\n[FIREBOX END]\n";
/// assert_eq!(
///     nested_block_lines(text, "[FIREBOX]", "[FIREBOX END]", "[PERFORM]"),
///     NestedBlock::Found(vec!["QFIRED 95.2"])
/// );
/// assert_eq!(
///     nested_block_lines("[FIREBOX]\n[COILS]\n", "[FIREBOX]", "[FIREBOX END]", "[PERFORM]"),
///     NestedBlock::SubsectionAbsent
/// );
/// ```
pub fn nested_block_lines<'a>(
    text: &'a str,
    section: &str,
    section_end: &str,
    subsection: &str,
) -> NestedBlock<'a> {
    let mut state = ScanState::SeekingSection;
    let mut seen_section = false;
    let mut current: Vec<&str> = Vec::new();
    let mut last_found: Option<Vec<&str>> = None;

    for line in text.lines() {
        let trimmed = line.trim();

        match state {
            ScanState::SeekingSection => {
                if strip_marker(line, section).is_some() {
                    seen_section = true;
                    state = ScanState::SeekingSubsection;
                }
            }
            ScanState::SeekingSubsection => {
                if let Some(rest) = strip_marker(line, subsection) {
                    current.clear();
                    if !rest.is_empty() {
                        current.push(rest);
                    }
                    state = ScanState::InSection;
                } else if strip_marker(line, section_end).is_some() {
                    state = ScanState::SeekingSection;
                }
            }
            ScanState::InSection => {
                if is_marker_line(line) {
                    last_found = Some(std::mem::take(&mut current));
                    state = if strip_marker(line, section_end).is_some() {
                        ScanState::SeekingSection
                    } else {
                        ScanState::SeekingSubsection
                    };
                    // A marker closing the block may itself open the next one
                    if let Some(rest) = strip_marker(line, subsection) {
                        if !rest.is_empty() {
                            current.push(rest);
                        }
                        state = ScanState::InSection;
                    }
                } else if !trimmed.is_empty() {
                    current.push(trimmed);
                }
            }
        }
    }

    if state == ScanState::InSection {
        last_found = Some(current);
    }

    match last_found {
        Some(lines) => NestedBlock::Found(lines),
        None if seen_section => NestedBlock::SubsectionAbsent,
        None => NestedBlock::SectionAbsent,
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_unterminated_sections() {
        assert_eq!(
            section_lines("nothing here", "[A]", "[A END]"),
            Err(RecordError::MissingMarker { marker: "[A]".to_string() })
        );
        assert_eq!(
            section_lines("[A]\nx 1\n", "[A]", "[A END]"),
            Err(RecordError::UnterminatedSection { begin: "[A]".to_string(), end: "[A END]".to_string() })
        );
    }

    #[test]
    fn test_content_on_marker_line() {
        let text = "[A] x 1\ny 2\n[A END]";
        assert_eq!(section_lines(text, "[A]", "[A END]").unwrap(), vec!["x 1", "y 2"]);
    }

    #[test]
    fn test_end_marker_is_not_mistaken_for_begin() {
        let text = "  [A]\n  x 1\n  [A END]\n";
        assert_eq!(section_lines(text, "[A]", "[A END]").unwrap(), vec!["x 1"]);
    }

    #[test]
    fn test_nested_absent_section() {
        assert_eq!(
            nested_block_lines("[OTHER]\nx 1\n", "[FIREBOX]", "[FIREBOX END]", "[PERFORM]"),
            NestedBlock::SectionAbsent
        );
    }

    #[test]
    fn test_nested_block_runs_to_end_of_text() {
        let text = "[FIREBOX]\n[PERFORM]\nQFIRED 90 QABS 40\n";
        assert_eq!(
            nested_block_lines(text, "[FIREBOX]", "[FIREBOX END]", "[PERFORM]"),
            NestedBlock::Found(vec!["QFIRED 90 QABS 40"])
        );
    }

    #[test]
    fn test_perform_outside_firebox_is_ignored() {
        let text = "[PERFORM]\nQFIRED 1\n[FIREBOX]\n[FIREBOX END]\n[PERFORM]\nQFIRED 2\n";
        assert_eq!(
            nested_block_lines(text, "[FIREBOX]", "[FIREBOX END]", "[PERFORM]"),
            NestedBlock::SubsectionAbsent
        );
    }

    #[test]
    fn test_last_nested_block_wins() {
        let text = "[FIREBOX]\n[PERFORM]\nQFIRED 1\n[FIREBOX END]\n[FIREBOX]\n[PERFORM]\nQFIRED 2\n[FIREBOX END]\n";
        assert_eq!(
            nested_block_lines(text, "[FIREBOX]", "[FIREBOX END]", "[PERFORM]"),
            NestedBlock::Found(vec!["QFIRED 2"])
        );
    }
}
