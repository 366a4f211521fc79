//! Convenience layer for writing report bodies.

use std::fmt::{Display, Write};

use crate::error::RenderError;
use crate::section::SectionDepth;
use crate::segments;
use crate::sink::{Justify, Sink};

/// Report body writer bound to one sink for one render.
///
/// Wraps the raw [`Sink`] events in the building blocks reports are made of:
/// sections, tables, paragraphs, links and verbatim blocks. Cell text passed to
/// [`table_cell`](Self::table_cell) and [`table_row`](Self::table_row) may use
/// the `{label, url}` link pattern syntax.
///
/// # Example
///
/// ```
/// use reportkit_renderer::{HtmlSink, ReportRenderer};
///
/// let mut sink = HtmlSink::new();
/// let mut out = ReportRenderer::new(&mut sink);
/// out.start_section("Licenses");
/// out.start_table();
/// out.table_header(&["Name", "URL"]);
/// out.table_row(&["Apache", "{Apache License 2.0, https://www.apache.org/licenses/LICENSE-2.0}"])
///     .unwrap();
/// out.end_table();
/// out.end_section().unwrap();
/// assert!(sink.as_str().contains("<h2>Licenses</h2>"));
/// ```
pub struct ReportRenderer<'a> {
    sink: &'a mut dyn Sink,
    sections: SectionDepth,
}

impl<'a> ReportRenderer<'a> {
    /// Create a renderer writing to `sink`, starting outside any section.
    pub fn new(sink: &'a mut dyn Sink) -> Self {
        Self {
            sink,
            sections: SectionDepth::new(),
        }
    }

    /// Access the underlying sink for events without a convenience wrapper.
    pub fn sink(&mut self) -> &mut dyn Sink {
        &mut *self.sink
    }

    /// Current section nesting depth.
    pub fn section_depth(&self) -> u32 {
        self.sections.depth()
    }

    // Sections

    /// Open a section titled `name`, anchored by the same name.
    pub fn start_section(&mut self, name: &str) {
        self.start_section_with_anchor(name, name);
    }

    /// Open a section titled `name` with an explicit anchor.
    pub fn start_section_with_anchor(&mut self, name: &str, anchor: &str) {
        self.sections.open(self.sink, name, anchor);
    }

    /// Close the innermost section.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnbalancedSection`] if no section is open.
    pub fn end_section(&mut self) -> Result<(), RenderError> {
        self.sections.close(self.sink)
    }

    // Tables

    /// Open a left-justified table without grid.
    pub fn start_table(&mut self) {
        self.start_table_with(&[Justify::Left], false);
    }

    /// Open a table with per-column justification.
    pub fn start_table_with(&mut self, justification: &[Justify], grid: bool) {
        self.sink.table_start();
        self.sink.table_rows_start(justification, grid);
    }

    pub fn end_table(&mut self) {
        self.sink.table_rows_end();
        self.sink.table_end();
    }

    pub fn table_header_cell(&mut self, text: &str) {
        self.sink.table_header_cell_start();
        segments::text(self.sink, text);
        self.sink.table_header_cell_end();
    }

    /// Emit a table cell whose text may contain `{label, url}` links.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnbalancedGroup`] for malformed link patterns.
    pub fn table_cell(&mut self, text: &str) -> Result<(), RenderError> {
        self.sink.table_cell_start();
        segments::link_patterned_text(self.sink, text)?;
        self.sink.table_cell_end();
        Ok(())
    }

    /// Emit a table cell holding a link, or plain text when `href` is missing
    /// or empty.
    ///
    /// `text` is never parsed as a link pattern.
    pub fn table_link_cell(&mut self, text: &str, href: Option<&str>) {
        self.sink.table_cell_start();
        match href.filter(|h| !h.is_empty()) {
            Some(href) => segments::link(self.sink, href, text),
            None => segments::text(self.sink, text),
        }
        self.sink.table_cell_end();
    }

    /// Open a table row for cells emitted one by one.
    pub fn start_table_row(&mut self) {
        self.sink.table_row_start();
    }

    pub fn end_table_row(&mut self) {
        self.sink.table_row_end();
    }

    /// Emit a table cell containing raw markup, passed through unescaped.
    pub fn table_cell_html(&mut self, html: &str) {
        self.sink.table_cell_start();
        self.sink.raw_text(html);
        self.sink.table_cell_end();
    }

    /// Emit a row of link-patterned cells.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnbalancedGroup`] for malformed link patterns.
    pub fn table_row<S: AsRef<str>>(&mut self, cells: &[S]) -> Result<(), RenderError> {
        self.sink.table_row_start();
        for cell in cells {
            self.table_cell(cell.as_ref())?;
        }
        self.sink.table_row_end();
        Ok(())
    }

    /// Emit a row of header cells.
    pub fn table_header<S: AsRef<str>>(&mut self, cells: &[S]) {
        self.sink.table_row_start();
        for cell in cells {
            self.table_header_cell(cell.as_ref());
        }
        self.sink.table_row_end();
    }

    pub fn table_caption(&mut self, caption: &str) {
        self.sink.table_caption_start();
        segments::text(self.sink, caption);
        self.sink.table_caption_end();
    }

    // Text

    pub fn paragraph(&mut self, text: &str) {
        self.sink.paragraph_start();
        segments::text(self.sink, text);
        self.sink.paragraph_end();
    }

    pub fn link(&mut self, href: &str, name: &str) {
        segments::link(self.sink, href, name);
    }

    /// Emit text; blank text renders as [`EMPTY_TEXT`](crate::EMPTY_TEXT).
    pub fn text(&mut self, text: &str) {
        segments::text(self.sink, text);
    }

    /// Emit text as a boxed verbatim block.
    pub fn verbatim_text(&mut self, text: &str) {
        self.sink.verbatim_start(true);
        segments::text(self.sink, text);
        self.sink.verbatim_end();
    }

    /// Emit a boxed verbatim block linking to `href`.
    ///
    /// Falls back to [`verbatim_text`](Self::verbatim_text) when `href` is
    /// missing or empty.
    pub fn verbatim_link(&mut self, text: &str, href: Option<&str>) {
        match href.filter(|h| !h.is_empty()) {
            Some(href) => {
                self.sink.verbatim_start(true);
                self.link(href, text);
                self.sink.verbatim_end();
            }
            None => self.verbatim_text(text),
        }
    }

    /// Embed a script block as raw output.
    pub fn script(&mut self, code: &str) {
        self.sink.raw_text(&format!("<script>\n{code}</script>"));
    }

    /// Emit text containing `{label, url}` link patterns.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnbalancedGroup`] for malformed link patterns.
    pub fn link_patterned_text(&mut self, text: &str) -> Result<(), RenderError> {
        segments::link_patterned_text(self.sink, text)
    }
}

/// Format key/value pairs as `key=value` joined by `, `.
///
/// # Examples
///
/// ```
/// use reportkit_renderer::properties_to_string;
///
/// assert_eq!(properties_to_string([("a", 1), ("b", 2)]), "a=1, b=2");
/// assert_eq!(properties_to_string(Vec::<(String, String)>::new()), "");
/// ```
pub fn properties_to_string<K, V, I>(props: I) -> String
where
    K: Display,
    V: Display,
    I: IntoIterator<Item = (K, V)>,
{
    let mut out = String::new();
    for (key, value) in props {
        if !out.is_empty() {
            out.push_str(", ");
        }
        write!(out, "{key}={value}").unwrap();
    }
    out
}
