//! Link pattern parsing for report text.
//!
//! Report authors embed hyperlinks in plain strings using `{label, url}` groups:
//!
//! ```
//! use reportkit_pattern::{Segment, parse};
//!
//! let segments = parse("see {the docs, https://example.com/docs}").unwrap();
//! assert_eq!(
//!     segments,
//!     vec![
//!         Segment::text("see "),
//!         Segment::link("the docs", "https://example.com/docs"),
//!     ]
//! );
//! ```
//!
//! # Grammar
//!
//! - `{label, url}` becomes a link. The group is split at its last comma, so labels
//!   may contain commas themselves. A group without a comma is plain text.
//! - Braces nest: `{ {text} , url }` keeps `{text}` verbatim in the label.
//! - `'...'` quotes a span so braces inside it are literal.
//! - `''` is an escaped apostrophe.
//! - Strings containing a `${` placeholder bypass the grammar entirely.
//!
//! An unclosed `{` is an error ([`PatternError::UnbalancedGroup`]); an unclosed
//! quote is not, and leaves the rest of the text literal.

mod error;
mod parser;
mod segment;

pub use error::PatternError;
pub use parser::parse;
pub use segment::{Segment, flatten, link_pattern};
