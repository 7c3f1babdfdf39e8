//! Record grammar shared by the encoder and the decoder
//!
//! Input records are free text holding `KEYWORD=value` directives and a
//! wrapped feed block. Output records are divided into bracketed sections.
//! The helpers here locate keywords and tokens on word boundaries so that
//! surrounding whitespace and layout never matter.

use std::ops::Range;

// =================================================================================================
// Markers
// =================================================================================================

/// Header of the feed block in the primary input format
pub const FEED_HEADER: &str = "KEYW=&NAME";

/// Token closing the feed block in the primary input format
pub const FEED_TERMINATOR: &str = "END";

/// Header of the feed block in the alternate input format
pub const ALTERNATE_FEED_HEADER: &str = "[NAME]";

/// Continuation marker ending every wrapped feed line but the last
pub const CONTINUATION_MARKER: char = '*';

/// Directive selecting the convergence target kind
pub const CONVERGENCE_KIND_KEYWORD: &str = "CONOP";

pub const EFFLUENT_BEGIN: &str = "[EFFLUENT]";
pub const EFFLUENT_END: &str = "[EFFLUENT END]";
pub const GENERAL_BEGIN: &str = "[SPYROGENERAL]";
pub const GENERAL_END: &str = "[SPYROGENERAL END]";
pub const FIREBOX_BEGIN: &str = "[FIREBOX]";
pub const FIREBOX_END: &str = "[FIREBOX END]";
pub const PERFORMANCE_BEGIN: &str = "[PERFORM]";

// =================================================================================================
// Numbers
// =================================================================================================

/// Parse a numeric token as written by the simulator
///
/// Accepts Fortran double-precision exponents (`1.5D+02`) and ignores
/// trailing separators.
///
/// ```rust
/// use spyro_rs::record::format::parse_number;
///
/// assert_eq!(parse_number("42.5"), Some(42.5));
/// assert_eq!(parse_number("1.5D+02"), Some(150.0));
/// assert_eq!(parse_number("0.25,"), Some(0.25));
/// assert_eq!(parse_number("C2H4"), None);
/// ```
pub fn parse_number(token: &str) -> Option<f64> {
    let trimmed = token.trim().trim_end_matches([',', ';']);
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replace(['D', 'd'], "E");
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}

// =================================================================================================
// Keyword search
// =================================================================================================

fn is_word_char(character: char) -> bool {
    character.is_ascii_alphanumeric() || character == '_'
}

/// Byte offset of the first occurrence of `token` at or after `from`
/// that is not part of a longer word
pub fn find_token(text: &str, token: &str, from: usize) -> Option<usize> {
    let mut start = from;
    while let Some(offset) = text.get(start..)?.find(token) {
        let position = start + offset;
        let end = position + token.len();
        let before_ok = text[..position].chars().next_back().is_none_or(|c| !is_word_char(c));
        let after_ok = text[end..].chars().next().is_none_or(|c| !is_word_char(c));
        if before_ok && after_ok {
            return Some(position);
        }
        start = position + token.len();
    }
    None
}

/// Byte range of the argument of a `KEYWORD=value` directive
///
/// Blanks around `=` are allowed. The argument runs up to the next blank,
/// comma or line end; the range is empty when no argument is written.
///
/// ```rust
/// use spyro_rs::record::format::find_assignment;
///
/// let text = "  CONOP = 3\n  CONVAL=0.55, TEMPO=840";
/// let range = find_assignment(text, "CONVAL").unwrap();
/// assert_eq!(&text[range], "0.55");
/// assert!(find_assignment(text, "CONO").is_none());
/// ```
pub fn find_assignment(text: &str, keyword: &str) -> Option<Range<usize>> {
    let mut from = 0;
    while let Some(position) = find_token(text, keyword, from) {
        let after_keyword = position + keyword.len();
        let rest = &text[after_keyword..];
        let blanks = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        let rest = &rest[blanks..];

        if let Some(argument) = rest.strip_prefix('=') {
            let value_start = text.len() - argument.trim_start_matches([' ', '\t']).len();
            let value_len = text[value_start..]
                .find(|c: char| c.is_whitespace() || c == ',')
                .unwrap_or(text.len() - value_start);
            return Some(value_start..value_start + value_len);
        }
        from = after_keyword;
    }
    None
}

/// Replace `range` of `text` with `replacement`, returning a new string
pub fn splice(text: &str, range: Range<usize>, replacement: &str) -> String {
    let mut patched = String::with_capacity(text.len() + replacement.len());
    patched.push_str(&text[..range.start]);
    patched.push_str(replacement);
    patched.push_str(&text[range.end..]);
    patched
}

// =================================================================================================
// Tests
// =================================================================================================
