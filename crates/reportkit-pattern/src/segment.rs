//! Parsed pattern segments.

/// One piece of a parsed link pattern: a label with an optional link target.
///
/// Both fields borrow from the parsed text. The target is never the empty
/// string; an empty target is normalized to `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Segment<'a> {
    label: &'a str,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    target: Option<&'a str>,
}

impl<'a> Segment<'a> {
    /// Create a segment, dropping an empty target.
    #[must_use]
    pub fn new(label: &'a str, target: Option<&'a str>) -> Self {
        Self {
            label,
            target: target.filter(|t| !t.is_empty()),
        }
    }

    /// Create a plain text segment.
    #[must_use]
    pub fn text(label: &'a str) -> Self {
        Self::new(label, None)
    }

    /// Create a link segment.
    #[must_use]
    pub fn link(label: &'a str, target: &'a str) -> Self {
        Self::new(label, Some(target))
    }

    pub fn label(&self) -> &'a str {
        self.label
    }

    pub fn target(&self) -> Option<&'a str> {
        self.target
    }

    /// Whether this segment renders as a hyperlink.
    pub fn is_link(&self) -> bool {
        self.target.is_some()
    }
}

/// Concatenate segment labels, dropping link targets.
///
/// # Examples
///
/// ```
/// use reportkit_pattern::{flatten, parse};
///
/// let segments = parse("read {the guide, guide.html} first").unwrap();
/// assert_eq!(flatten(&segments), "read the guide first");
/// ```
pub fn flatten(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::label).collect()
}

/// Build a link pattern `{text, href}` that [`parse`](crate::parse) turns back
/// into a link.
///
/// Without an `href` the text is returned unchanged.
///
/// # Examples
///
/// ```
/// use reportkit_pattern::link_pattern;
///
/// assert_eq!(link_pattern("Apache", Some("https://apache.org")), "{Apache, https://apache.org}");
/// assert_eq!(link_pattern("Apache", None), "Apache");
/// ```
pub fn link_pattern(text: &str, href: Option<&str>) -> String {
    match href {
        Some(href) => format!("{{{text}, {href}}}"),
        None => text.to_owned(),
    }
}
