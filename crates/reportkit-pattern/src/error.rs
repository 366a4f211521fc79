//! Error types for link pattern parsing.

/// Error raised while parsing a link pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PatternError {
    /// A `{` without a matching `}` (or a stray `}`).
    #[error("unmatched braces in link pattern: {pattern}")]
    UnbalancedGroup {
        /// The offending pattern text.
        pattern: String,
    },
}
