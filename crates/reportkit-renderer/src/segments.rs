//! Projection of parsed link patterns onto sink events.

use reportkit_pattern::Segment;

use crate::error::RenderError;
use crate::sink::Sink;

/// Placeholder emitted in place of empty or blank text.
pub const EMPTY_TEXT: &str = "-";

/// Emit text, substituting [`EMPTY_TEXT`] for blank input.
pub(crate) fn text(sink: &mut dyn Sink, text: &str) {
    if text.trim().is_empty() {
        sink.text(EMPTY_TEXT);
    } else {
        sink.text(text);
    }
}

/// Emit a hyperlink around `name`.
pub(crate) fn link(sink: &mut dyn Sink, href: &str, name: &str) {
    sink.link_start(href);
    text(sink, name);
    sink.link_end();
}

/// Emit each segment in order: plain text, or a link when it has a target.
pub fn render_segments(sink: &mut dyn Sink, segments: &[Segment<'_>]) {
    for segment in segments {
        match segment.target() {
            Some(href) => link(sink, href, segment.label()),
            None => text(sink, segment.label()),
        }
    }
}

/// Parse `pattern` as link-patterned text and emit the result.
///
/// Blank input emits [`EMPTY_TEXT`].
///
/// # Errors
///
/// Returns [`RenderError::UnbalancedGroup`] if the pattern has unmatched braces.
/// Nothing is emitted in that case.
pub fn link_patterned_text(sink: &mut dyn Sink, pattern: &str) -> Result<(), RenderError> {
    let segments = reportkit_pattern::parse(pattern)?;
    render_segments(sink, &segments);
    Ok(())
}
