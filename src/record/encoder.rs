//! Feed block encoding
//!
//! # Primary format
//!
//! ```text
//! KEYW=&NAME
//!     C2H6=10.00000, C3H8=20.00000, NC4=30.00000, IC4=15.00000, *
//!     NC5=25.00000, END
//! ```
//!
//! Pairs are comma separated and wrapped so that no pair is split; every
//! line but the last carries a trailing continuation marker and the last
//! one closes the block with `, END`.
//!
//! # Alternate format
//!
//! ```text
//! [NAME]
//! C2H6 10.00000 C3H8 20.00000 NC4 30.00000
//! ```

use crate::feed::WeightComposition;
use crate::record::format::{
    find_token, parse_number, splice, ALTERNATE_FEED_HEADER, CONTINUATION_MARKER, FEED_HEADER,
    FEED_TERMINATOR,
};
use crate::record::RecordError;

/// Layout of the feed block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    /// `KEYW=&NAME` block, wrapped `key=value` pairs, closed by `END`
    Primary,

    /// `[NAME]` header followed by a single line of `key value` pairs
    Alternate,
}

/// Layout parameters of the primary format
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Maximum width of the pair content of a line (default: 72)
    pub line_width: usize,

    /// Blanks in front of every pair line (default: 4)
    pub indent: usize,

    /// Decimal places of every value (default: 5)
    pub precision: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self { line_width: 72, indent: 4, precision: 5 }
    }
}

impl EncoderConfig {
    /// Builder pattern: set wrap width
    pub fn line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    /// Builder pattern: set indentation
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

// =================================================================================================
// Encoding
// =================================================================================================

/// Greedy wrap of `words` into lines no wider than `width`
///
/// A word wider than `width` gets a line of its own.
fn wrap_words(words: &[String], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in words {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Serialize a feed composition
///
/// Values are written with `config.precision` decimals in both formats.
///
/// # Example
///
/// ```rust
/// use spyro_rs::feed::WeightComposition;
/// use spyro_rs::record::{encode_feed, FeedFormat};
///
/// let feed: WeightComposition = vec![("C2H6", 60.0), ("C3H8", 40.0)].into_iter().collect();
///
/// assert_eq!(
///     encode_feed(&feed, FeedFormat::Primary, None),
///     "KEYW=&NAME\n    C2H6=60.00000, C3H8=40.00000, END"
/// );
/// assert_eq!(
///     encode_feed(&feed, FeedFormat::Alternate, None),
///     "[NAME]\nC2H6 60.00000 C3H8 40.00000"
/// );
/// ```
pub fn encode_feed(
    composition: &WeightComposition,
    format: FeedFormat,
    configuration: Option<&EncoderConfig>,
) -> String {
    let binding = EncoderConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    let precision = configuration.precision;

    match format {
        FeedFormat::Primary => {
            let count = composition.len();
            let words: Vec<String> = composition
                .iter()
                .enumerate()
                .map(|(i, (name, value))| {
                    let separator = if i + 1 < count { "," } else { "" };
                    format!("{name}={value:.precision$}{separator}")
                })
                .collect();

            let indent = " ".repeat(configuration.indent);
            let lines = wrap_words(&words, configuration.line_width);

            let mut text = format!("{FEED_HEADER}\n");
            if lines.is_empty() {
                text.push_str(&format!("{indent}{FEED_TERMINATOR}"));
                return text;
            }

            let last = lines.len() - 1;
            for (i, line) in lines.iter().enumerate() {
                if i < last {
                    text.push_str(&format!("{indent}{line} {CONTINUATION_MARKER}\n"));
                } else {
                    text.push_str(&format!("{indent}{line}, {FEED_TERMINATOR}"));
                }
            }
            text
        }
        FeedFormat::Alternate => {
            let pairs: Vec<String> = composition
                .iter()
                .map(|(name, value)| format!("{name} {value:.precision$}"))
                .collect();
            format!("{ALTERNATE_FEED_HEADER}\n{}", pairs.join(" "))
        }
    }
}

// =================================================================================================
// Decoding
// =================================================================================================

/// Byte range of the primary feed block, header through `END`
fn primary_block(text: &str) -> Result<std::ops::Range<usize>, RecordError> {
    let start = text
        .find(FEED_HEADER)
        .ok_or_else(|| RecordError::missing(FEED_HEADER))?;
    let terminator = find_token(text, FEED_TERMINATOR, start + FEED_HEADER.len())
        .ok_or_else(|| RecordError::unterminated(FEED_HEADER, FEED_TERMINATOR))?;
    Ok(start..terminator + FEED_TERMINATOR.len())
}

fn feed_value(section: &str, name: &str, value: &str) -> Result<f64, RecordError> {
    parse_number(value).ok_or_else(|| RecordError::InvalidNumber {
        section: section.to_string(),
        token: format!("{name}={value}"),
    })
}

/// Read the feed block of a record back into a composition
///
/// Inverse of [`encode_feed`] up to the written precision.
///
/// # Errors
///
/// - the format's header is missing
/// - the primary block has no `END`
/// - a pair is not `key=value` (primary) or the pair sequence is odd (alternate)
pub fn decode_feed(text: &str, format: FeedFormat) -> Result<WeightComposition, RecordError> {
    let mut composition = WeightComposition::new();

    match format {
        FeedFormat::Primary => {
            let block = primary_block(text)?;
            let body = &text[block.start + FEED_HEADER.len()..block.end - FEED_TERMINATOR.len()];
            let body = body.replace(CONTINUATION_MARKER, " ");

            for item in body.split(',').map(str::trim).filter(|item| !item.is_empty()) {
                let (name, value) = item.split_once('=').ok_or_else(|| RecordError::MalformedPair {
                    section: FEED_HEADER.to_string(),
                    token: item.to_string(),
                })?;
                let (name, value) = (name.trim(), value.trim());
                composition.add(name, feed_value(FEED_HEADER, name, value)?);
            }
        }
        FeedFormat::Alternate => {
            let start = text
                .find(ALTERNATE_FEED_HEADER)
                .ok_or_else(|| RecordError::missing(ALTERNATE_FEED_HEADER))?;
            let body = text[start + ALTERNATE_FEED_HEADER.len()..]
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .unwrap_or("");

            let tokens: Vec<&str> = body.split_whitespace().collect();
            for pair in tokens.chunks(2) {
                let [name, value] = pair else {
                    return Err(RecordError::MalformedPair {
                        section: ALTERNATE_FEED_HEADER.to_string(),
                        token: pair[0].to_string(),
                    });
                };
                composition.add(name, feed_value(ALTERNATE_FEED_HEADER, name, value)?);
            }
        }
    }

    Ok(composition)
}

// =================================================================================================
// Patching
// =================================================================================================

/// Replace the feed block of an input template
///
/// Everything from `KEYW=&NAME` through the closing `END` is replaced by
/// the primary encoding of `composition`; the rest of the template is
/// kept byte for byte.
///
/// # Errors
///
/// [`RecordError::MissingMarker`] without a feed header,
/// [`RecordError::UnterminatedSection`] without a closing `END`.
pub fn patch_feed(
    template: &str,
    composition: &WeightComposition,
    configuration: Option<&EncoderConfig>,
) -> Result<String, RecordError> {
    let block = primary_block(template)?;
    let encoded = encode_feed(composition, FeedFormat::Primary, configuration);
    Ok(splice(template, block, &encoded))
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn naphtha() -> WeightComposition {
        [
            ("C2H6", 0.12), ("C3H8", 0.85), ("IC4", 1.9), ("NC4", 4.25), ("IC5", 12.5),
            ("NC5", 18.0), ("CC5", 2.1), ("IC6", 14.3), ("NC6", 11.7), ("MCC5", 5.2),
            ("CC6", 4.1), ("BENZ", 1.6), ("IC7", 9.4), ("NC7", 6.3), ("TOL", 1.8),
            ("NC8", 5.78),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_single_component_primary() {
        let feed: WeightComposition = vec![("C2H6", 100.0)].into_iter().collect();
        assert_eq!(
            encode_feed(&feed, FeedFormat::Primary, None),
            "KEYW=&NAME\n    C2H6=100.00000, END"
        );
    }

    #[test]
    fn test_custom_indent() {
        let feed: WeightComposition = vec![("C2H6", 100.0)].into_iter().collect();
        let config = EncoderConfig::default().indent(2).precision(2);
        let text = encode_feed(&feed, FeedFormat::Primary, Some(&config));

        assert_eq!(text, "KEYW=&NAME\n  C2H6=100.00, END");
        let decoded = decode_feed(&text, FeedFormat::Primary).unwrap();
        assert_eq!(decoded.get("C2H6"), Some(100.0));
    }

    #[test]
    fn test_wrapping_respects_width_and_markers() {
        let text = encode_feed(&naphtha(), FeedFormat::Primary, None);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "KEYW=&NAME");
        assert!(lines.len() > 2, "expected the feed to wrap:\n{text}");

        let last = lines.len() - 1;
        for (i, line) in lines.iter().enumerate().skip(1) {
            assert!(line.starts_with("    "));
            let content = line.trim_start();
            if i < last {
                assert!(line.ends_with(" *"), "line {i} lacks continuation: {line}");
                assert!(content.len() - 2 <= 72, "line {i} too wide: {line}");
            } else {
                assert!(line.ends_with(", END"));
                assert!(content.len() - 5 <= 72);
            }
            // No pair is split across lines
            for item in content.trim_end_matches(" *").trim_end_matches(", END").split(',') {
                let item = item.trim();
                if !item.is_empty() {
                    assert!(item.contains('='), "split pair '{item}'");
                }
            }
        }
    }

    #[test]
    fn test_primary_round_trip() {
        let feed = naphtha();
        let text = encode_feed(&feed, FeedFormat::Primary, None);
        let decoded = decode_feed(&text, FeedFormat::Primary).unwrap();

        assert_eq!(decoded.len(), feed.len());
        for ((name_a, a), (name_b, b)) in feed.iter().zip(decoded.iter()) {
            assert_eq!(name_a, name_b);
            assert_relative_eq!(a, b, epsilon = 5e-6);
        }
    }

    #[test]
    fn test_alternate_round_trip() {
        let feed = naphtha();
        let text = encode_feed(&feed, FeedFormat::Alternate, None);
        assert_eq!(text.lines().count(), 2);

        let decoded = decode_feed(&text, FeedFormat::Alternate).unwrap();
        assert_relative_eq!(decoded.get("NC8").unwrap(), 5.78, epsilon = 5e-6);
    }

    #[test]
    fn test_empty_composition() {
        let text = encode_feed(&WeightComposition::new(), FeedFormat::Primary, None);
        assert_eq!(text, "KEYW=&NAME\n    END");
        assert!(decode_feed(&text, FeedFormat::Primary).unwrap().is_empty());
    }

    #[test]
    fn test_patch_feed_replaces_only_the_block() {
        let template = "TITLE NAPHTHA CASE\nKEYW=&NAME\n   C2H6=100, END\nCONOP=1\nTEMPO=840\n";
        let feed: WeightComposition = vec![("NC5", 50.0), ("IC5", 50.0)].into_iter().collect();

        let patched = patch_feed(template, &feed, None).unwrap();
        assert_eq!(
            patched,
            "TITLE NAPHTHA CASE\nKEYW=&NAME\n    NC5=50.00000, IC5=50.00000, END\nCONOP=1\nTEMPO=840\n"
        );
    }

    #[test]
    fn test_patch_feed_spanning_wrapped_block() {
        let template = encode_feed(&naphtha(), FeedFormat::Primary, None) + "\nCONOP=1\n";
        let feed: WeightComposition = vec![("C2H6", 100.0)].into_iter().collect();

        let patched = patch_feed(&template, &feed, None).unwrap();
        assert_eq!(patched, "KEYW=&NAME\n    C2H6=100.00000, END\nCONOP=1\n");
    }

    #[test]
    fn test_patch_feed_requires_markers() {
        let feed = naphtha();
        assert!(matches!(
            patch_feed("CONOP=1", &feed, None),
            Err(RecordError::MissingMarker { .. })
        ));
        assert!(matches!(
            patch_feed("KEYW=&NAME\n C2H6=100", &feed, None),
            Err(RecordError::UnterminatedSection { .. })
        ));
    }

    #[test]
    fn test_decode_feed_rejects_bad_pairs() {
        let err = decode_feed("KEYW=&NAME\n C2H6 100, END", FeedFormat::Primary).unwrap_err();
        assert!(matches!(err, RecordError::MalformedPair { .. }));

        let err = decode_feed("KEYW=&NAME\n C2H6=abc, END", FeedFormat::Primary).unwrap_err();
        assert!(matches!(err, RecordError::InvalidNumber { .. }));

        let err = decode_feed("[NAME]\nC2H6 100 C3H8", FeedFormat::Alternate).unwrap_err();
        assert!(matches!(err, RecordError::MalformedPair { .. }));
    }
}
