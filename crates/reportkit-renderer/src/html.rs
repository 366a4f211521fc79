//! HTML sink.
//!
//! Produces a standalone HTML5 document.

use std::fmt::Write;

use crate::sink::{Justify, Sink};
use crate::state::{TableState, encode_anchor, escape_html};

/// Highest heading level HTML supports.
const MAX_HEADING: u32 = 6;

/// HTML sink.
///
/// Produces HTML5 with:
/// - `<section>` per report section, titled `<h2>`..`<h6>` (the document title
///   owns `<h1>`)
/// - `<a id>` anchors
/// - `<table>` with per-column `text-align` styles
/// - `<pre>` for verbatim text, boxed inside `<div class="source">`
pub struct HtmlSink {
    output: String,
    encoding: String,
    /// Open tables, innermost last. Tables nest inside cells.
    tables: Vec<OpenTable>,
    boxed_verbatim: bool,
}

impl HtmlSink {
    /// Create a sink declaring UTF-8 output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            encoding: "UTF-8".to_owned(),
            tables: Vec::new(),
            boxed_verbatim: false,
        }
    }

    /// Set the charset declared in the document head.
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Rendered HTML so far.
    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Consume the sink and return the rendered HTML.
    #[must_use]
    pub fn into_html(self) -> String {
        self.output
    }

    fn alignment_style(&self) -> &'static str {
        self.tables
            .last()
            .map_or("", |table| table.state.current_alignment_style())
    }

    fn next_cell(&mut self) {
        if let Some(table) = self.tables.last_mut() {
            table.state.next_cell();
        }
    }
}

impl Default for HtmlSink {
    fn default() -> Self {
        Self::new()
    }
}

/// A table being written.
struct OpenTable {
    /// Offset of the `<table` tag, for adding the grid border.
    tag: usize,
    state: TableState,
}

fn heading_level(section_level: u32) -> u32 {
    section_level.saturating_add(1).min(MAX_HEADING)
}

impl Sink for HtmlSink {
    fn head_start(&mut self) {
        writeln!(
            self.output,
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"{}\">",
            escape_html(&self.encoding)
        )
        .unwrap();
    }

    fn head_end(&mut self) {
        self.output.push_str("</head>\n");
    }

    fn title_start(&mut self) {
        self.output.push_str("<title>");
    }

    fn title_end(&mut self) {
        self.output.push_str("</title>\n");
    }

    fn body_start(&mut self) {
        self.output.push_str("<body>\n");
    }

    fn body_end(&mut self) {
        self.output.push_str("</body>\n</html>\n");
    }

    fn section_start(&mut self, _level: u32) {
        self.output.push_str("<section>");
    }

    fn section_end(&mut self, _level: u32) {
        self.output.push_str("</section>\n");
    }

    fn section_title_start(&mut self, level: u32) {
        write!(self.output, "<h{}>", heading_level(level)).unwrap();
    }

    fn section_title_end(&mut self, level: u32) {
        writeln!(self.output, "</h{}>", heading_level(level)).unwrap();
    }

    fn anchor(&mut self, name: &str) {
        let id = encode_anchor(name);
        if !id.is_empty() {
            write!(self.output, r#"<a id="{id}"></a>"#).unwrap();
        }
    }

    fn table_start(&mut self) {
        self.tables.push(OpenTable {
            tag: self.output.len(),
            state: TableState::default(),
        });
        self.output.push_str("<table>");
    }

    fn table_end(&mut self) {
        self.tables.pop();
        self.output.push_str("</table>\n");
    }

    fn table_rows_start(&mut self, justification: &[Justify], grid: bool) {
        if let Some(table) = self.tables.last_mut() {
            // Outer `<table` tags precede this one, so their offsets are unaffected.
            if grid {
                self.output.insert_str(table.tag + "<table".len(), r#" border="1""#);
            }
            table.state.start(justification);
        }
    }

    fn table_rows_end(&mut self) {}

    fn table_row_start(&mut self) {
        if let Some(table) = self.tables.last_mut() {
            table.state.start_row();
        }
        self.output.push_str("<tr>");
    }

    fn table_row_end(&mut self) {
        self.output.push_str("</tr>\n");
    }

    fn table_header_cell_start(&mut self) {
        write!(self.output, "<th{}>", self.alignment_style()).unwrap();
    }

    fn table_header_cell_end(&mut self) {
        self.output.push_str("</th>");
        self.next_cell();
    }

    fn table_cell_start(&mut self) {
        write!(self.output, "<td{}>", self.alignment_style()).unwrap();
    }

    fn table_cell_end(&mut self) {
        self.output.push_str("</td>");
        self.next_cell();
    }

    fn table_caption_start(&mut self) {
        self.output.push_str("<caption>");
    }

    fn table_caption_end(&mut self) {
        self.output.push_str("</caption>");
    }

    fn paragraph_start(&mut self) {
        self.output.push_str("<p>");
    }

    fn paragraph_end(&mut self) {
        self.output.push_str("</p>\n");
    }

    fn link_start(&mut self, href: &str) {
        write!(self.output, r#"<a href="{}">"#, escape_html(href)).unwrap();
    }

    fn link_end(&mut self) {
        self.output.push_str("</a>");
    }

    fn verbatim_start(&mut self, boxed: bool) {
        self.boxed_verbatim = boxed;
        if boxed {
            self.output.push_str(r#"<div class="source"><pre>"#);
        } else {
            self.output.push_str("<pre>");
        }
    }

    fn verbatim_end(&mut self) {
        if std::mem::take(&mut self.boxed_verbatim) {
            self.output.push_str("</pre></div>\n");
        } else {
            self.output.push_str("</pre>\n");
        }
    }

    fn text(&mut self, text: &str) {
        self.output.push_str(&escape_html(text));
    }

    fn raw_text(&mut self, text: &str) {
        self.output.push_str(text);
    }
}
