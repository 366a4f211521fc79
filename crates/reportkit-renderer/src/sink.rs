//! Sink trait for structured report output.
//!
//! A sink receives discrete start/end events and text in document order. The
//! renderer never inspects what a sink produces, so HTML output, an event log,
//! or any other format plugs in behind the same trait.

/// Horizontal justification of a table column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

/// Consumer of structured document events.
///
/// Events arrive in document order and `*_start` / `*_end` pairs are always
/// balanced by [`ReportRenderer`](crate::ReportRenderer). Section levels start
/// at 1 for top-level sections.
pub trait Sink {
    /// Open the document head.
    fn head_start(&mut self);

    /// Close the document head.
    fn head_end(&mut self);

    /// Open the document title. Title text follows as [`text`](Self::text) events.
    fn title_start(&mut self);

    /// Close the document title.
    fn title_end(&mut self);

    /// Open the document body.
    fn body_start(&mut self);

    /// Close the document body.
    fn body_end(&mut self);

    /// Open a section at the given nesting level.
    fn section_start(&mut self, level: u32);

    /// Close the section at the given nesting level.
    fn section_end(&mut self, level: u32);

    /// Open the title of the section at the given level.
    fn section_title_start(&mut self, level: u32);

    /// Close the title of the section at the given level.
    fn section_title_end(&mut self, level: u32);

    /// Place a named anchor at the current position.
    fn anchor(&mut self, name: &str);

    /// Open a table.
    fn table_start(&mut self);

    /// Close a table.
    fn table_end(&mut self);

    /// Open the row block of a table.
    ///
    /// # Arguments
    ///
    /// * `justification` - Per-column justification; the last entry applies to
    ///   any further columns
    /// * `grid` - Whether cells are drawn with a grid
    fn table_rows_start(&mut self, justification: &[Justify], grid: bool);

    /// Close the row block of a table.
    fn table_rows_end(&mut self);

    fn table_row_start(&mut self);
    fn table_row_end(&mut self);
    fn table_header_cell_start(&mut self);
    fn table_header_cell_end(&mut self);
    fn table_cell_start(&mut self);
    fn table_cell_end(&mut self);
    fn table_caption_start(&mut self);
    fn table_caption_end(&mut self);
    fn paragraph_start(&mut self);
    fn paragraph_end(&mut self);

    /// Open a hyperlink to `href`. Link text follows as [`text`](Self::text) events.
    fn link_start(&mut self, href: &str);

    /// Close the current hyperlink.
    fn link_end(&mut self);

    /// Open a verbatim (preformatted) block, optionally boxed.
    fn verbatim_start(&mut self, boxed: bool);

    /// Close a verbatim block.
    fn verbatim_end(&mut self);

    /// Emit text. Sinks escape it for their output format.
    fn text(&mut self, text: &str);

    /// Emit text that is passed through to the output unescaped.
    fn raw_text(&mut self, text: &str);

    /// Flush buffered output.
    ///
    /// Default does nothing. Override for sinks writing to external resources.
    fn flush(&mut self) {}

    /// Close the sink. No events follow.
    ///
    /// Default does nothing.
    fn close(&mut self) {}
}
