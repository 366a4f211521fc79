//! Link pattern scanner.

use crate::error::PatternError;
use crate::segment::Segment;

/// Marker of a foreign `${...}` placeholder that must not be parsed as a group.
const PLACEHOLDER_MARKER: &str = "${";

/// Parse a link pattern into an ordered list of segments.
///
/// Concatenating the segment labels in order reconstructs the text with link
/// groups replaced by their labels. Blank input yields a single segment holding
/// the input unchanged.
///
/// # Errors
///
/// Returns [`PatternError::UnbalancedGroup`] if braces outside quotes don't
/// balance. An unmatched quote is accepted and leaves the rest of the text
/// literal.
///
/// # Examples
///
/// ```
/// use reportkit_pattern::{Segment, parse};
///
/// assert_eq!(
///     parse("{A,u1}{B,u2}").unwrap(),
///     vec![Segment::link("A", "u1"), Segment::link("B", "u2")]
/// );
/// assert!(parse("{").is_err());
/// ```
pub fn parse(text: &str) -> Result<Vec<Segment<'_>>, PatternError> {
    if is_blank(text) {
        return Ok(vec![Segment::text(text)]);
    }

    if text.contains(PLACEHOLDER_MARKER) {
        return Ok(vec![placeholder_segment(text)]);
    }

    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut in_quote = false;
    // Signed: a stray `}` drives it negative and must fail too.
    let mut depth: isize = 0;
    let mut pending = 0;
    let mut i = 0;

    // All grammar characters are ASCII, so every slice boundary below falls on a
    // char boundary.
    while let Some(&byte) = bytes.get(i) {
        match byte {
            b'\'' if !in_quote && depth == 0 => {
                if bytes.get(i + 1) == Some(&b'\'') {
                    // `''` keeps the first quote and drops the second
                    segments.push(Segment::text(&text[pending..=i]));
                    i += 1;
                    pending = i + 1;
                } else {
                    in_quote = true;
                }
            }
            b'\'' => in_quote = false,
            b'{' if !in_quote => {
                if depth == 0 {
                    if i != pending {
                        segments.push(Segment::text(&text[pending..i]));
                    }
                    pending = i + 1;
                }
                depth += 1;
            }
            b'}' if !in_quote => {
                depth -= 1;
                if depth == 0 {
                    segments.push(group_segment(&text[pending..i]));
                    pending = i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    if depth != 0 {
        return Err(PatternError::UnbalancedGroup {
            pattern: text.to_owned(),
        });
    }

    let rest = &text[pending..];
    if !is_blank(rest) {
        segments.push(Segment::text(rest));
    }

    Ok(segments)
}

/// Turn the contents of a `{...}` group into a segment.
///
/// The last comma separates label from target, so `{Apache License, version 2.0, url}`
/// keeps the comma inside the label.
fn group_segment(captured: &str) -> Segment<'_> {
    match captured.rfind(',') {
        Some(comma) => Segment::new(
            captured[..comma].trim(),
            Some(captured[comma + 1..].trim()),
        ),
        None => Segment::text(captured),
    }
}

/// Handle text carrying a `${` placeholder.
///
/// Only the operand between the last `,` and the last `}` survives, if that
/// ordering exists; otherwise the whole text is kept as is.
fn placeholder_segment(text: &str) -> Segment<'_> {
    match (text.rfind(','), text.rfind('}')) {
        (Some(comma), Some(brace)) if comma < brace => {
            Segment::text(text[comma + 1..brace].trim())
        }
        _ => Segment::text(text),
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
