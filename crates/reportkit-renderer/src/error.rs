//! Error types for report rendering.

use reportkit_pattern::PatternError;

/// Error raised while rendering a report.
///
/// These are authoring mistakes in the report itself; rendering stops at the
/// first one.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// Link-patterned text with unmatched braces.
    #[error(transparent)]
    UnbalancedGroup(#[from] PatternError),

    /// `end_section` called with no open section.
    #[error("too many closing sections")]
    UnbalancedSection,

    /// Malformed report content, such as a table row wider than its header.
    #[error("report error: {0}")]
    Report(String),
}
