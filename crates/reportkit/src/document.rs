//! Declarative report files.
//!
//! A report file is TOML with a title, an output name and a body of blocks:
//!
//! ```toml
//! title = "Dependencies"
//! output_name = "dependencies"
//!
//! [[body]]
//! type = "section"
//! title = "Compile"
//!
//! [[body.blocks]]
//! type = "table"
//! header = ["Artifact", "License"]
//! rows = [
//!     ["serde", "{MIT, https://opensource.org/license/mit}"],
//!     ["toml", { text = "MIT OR Apache-2.0" }],
//! ]
//! ```
//!
//! String table cells and `text` blocks accept `{label, url}` link patterns.
//! Cells written as `{ text, href }` tables are taken literally.
//!
//! Extra documents go in `[[pages]]`, each with its own title, output name and
//! body. A report with `external = "path"` points at a file produced by
//! another tool; it is copied into the output directory instead of rendered.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use reportkit_renderer::{
    Justify, RenderError, Report, ReportRenderer, SinkFactory, render_page,
};
use serde::Deserialize;

use crate::error::CliError;

/// A report loaded from a TOML file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ReportDocument {
    title: String,
    output_name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    body: Vec<Block>,
    #[serde(default)]
    pages: Vec<Page>,
    /// Output produced elsewhere, relative to the report file.
    #[serde(default)]
    external: Option<PathBuf>,

    /// Directory of the report file (set after loading).
    #[serde(skip)]
    base_dir: PathBuf,
}

/// Additional document of a multi-page report.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Page {
    title: String,
    output_name: String,
    #[serde(default)]
    body: Vec<Block>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Block {
    Section {
        title: String,
        #[serde(default)]
        anchor: Option<String>,
        #[serde(default)]
        blocks: Vec<Block>,
    },
    Paragraph {
        text: String,
    },
    /// Inline text with link patterns.
    Text {
        text: String,
    },
    Link {
        href: String,
        text: String,
    },
    Table(Table),
    Verbatim {
        text: String,
        #[serde(default)]
        href: Option<String>,
    },
    Script {
        code: String,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Table {
    caption: Option<String>,
    header: Vec<String>,
    rows: Vec<Vec<Cell>>,
    justification: Vec<Justify>,
    grid: bool,
}

/// Table cell: a link-patterned string or an explicit text/href pair.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Cell {
    Pattern(String),
    Link { text: String, href: Option<String> },
}

impl Cell {
    fn render(&self, out: &mut ReportRenderer<'_>) -> Result<(), RenderError> {
        match self {
            Self::Pattern(pattern) => out.table_cell(pattern),
            Self::Link { text, href } => {
                out.table_link_cell(text, href.as_deref());
                Ok(())
            }
        }
    }
}

/// Check that `name` can be used as an output file name.
pub(crate) fn check_output_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("output_name cannot be empty".to_owned());
    }
    if name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(format!("output_name `{name}` must be a plain file name"));
    }
    Ok(())
}

impl ReportDocument {
    /// Load a report file.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read, isn't a valid report, or names
    /// an unusable output file.
    pub(crate) fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)?;
        let mut document: Self =
            toml::from_str(&content).map_err(|source| CliError::Document {
                path: path.to_path_buf(),
                source,
            })?;
        document.base_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        document.validate()?;
        Ok(document)
    }

    fn validate(&self) -> Result<(), CliError> {
        let mut names = HashSet::new();
        let all_names = std::iter::once(self.output_name.as_str())
            .chain(self.pages.iter().map(|page| page.output_name.as_str()));
        for name in all_names {
            check_output_name(name)
                .map_err(|message| CliError::Validation(format!("{}: {message}", self.title)))?;
            if !names.insert(name) {
                return Err(CliError::Validation(format!(
                    "{}: output_name `{name}` is used twice",
                    self.title
                )));
            }
        }
        Ok(())
    }

    /// Resolved path of the externally produced output, if any.
    pub(crate) fn external_source(&self) -> Option<PathBuf> {
        self.external.as_ref().map(|path| self.base_dir.join(path))
    }
}

impl Report for ReportDocument {
    fn title(&self) -> &str {
        &self.title
    }

    fn output_name(&self) -> &str {
        &self.output_name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn can_generate(&self) -> bool {
        !self.body.is_empty() || !self.pages.is_empty() || self.external.is_some()
    }

    fn is_external(&self) -> bool {
        self.external.is_some()
    }

    fn render_body(&self, out: &mut ReportRenderer<'_>) -> Result<(), RenderError> {
        render_blocks(&self.body, out)
    }

    fn render_pages(&self, pages: &mut dyn SinkFactory) -> Result<(), RenderError> {
        for page in &self.pages {
            let sink = pages.create_sink(&page.output_name)?;
            render_page(sink, &page.title, |out| render_blocks(&page.body, out))?;
        }
        Ok(())
    }
}

fn render_blocks(blocks: &[Block], out: &mut ReportRenderer<'_>) -> Result<(), RenderError> {
    for block in blocks {
        match block {
            Block::Section {
                title,
                anchor,
                blocks,
            } => {
                out.start_section_with_anchor(title, anchor.as_deref().unwrap_or(title));
                render_blocks(blocks, out)?;
                out.end_section()?;
            }
            Block::Paragraph { text } => out.paragraph(text),
            Block::Text { text } => out.link_patterned_text(text)?,
            Block::Link { href, text } => out.link(href, text),
            Block::Table(table) => render_table(table, out)?,
            Block::Verbatim { text, href } => out.verbatim_link(text, href.as_deref()),
            Block::Script { code } => out.script(code),
        }
    }
    Ok(())
}

fn render_table(table: &Table, out: &mut ReportRenderer<'_>) -> Result<(), RenderError> {
    let columns = table.header.len();
    for (index, row) in table.rows.iter().enumerate() {
        if columns > 0 && row.len() != columns {
            return Err(RenderError::Report(format!(
                "table row {} has {} cells, header has {columns}",
                index + 1,
                row.len()
            )));
        }
    }

    if table.justification.is_empty() {
        out.start_table_with(&[Justify::Left], table.grid);
    } else {
        out.start_table_with(&table.justification, table.grid);
    }
    if let Some(caption) = &table.caption {
        out.table_caption(caption);
    }
    if columns > 0 {
        out.table_header(&table.header);
    }
    for row in &table.rows {
        out.start_table_row();
        for cell in row {
            cell.render(out)?;
        }
        out.end_table_row();
    }
    out.end_table();
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reportkit_renderer::{EventLog, HtmlSink, SinkEvent, render_report};

    use super::*;

    fn parse(toml: &str) -> ReportDocument {
        toml::from_str(toml).unwrap()
    }

    fn text(text: &str) -> SinkEvent {
        SinkEvent::Text {
            text: text.to_owned(),
        }
    }

    #[test]
    fn test_parse_minimal_document() {
        let doc = parse("title = \"Empty\"\noutput_name = \"empty\"\n");
        assert_eq!(doc.title(), "Empty");
        assert_eq!(doc.output_name(), "empty");
        assert_eq!(doc.description(), None);
        assert!(!doc.can_generate());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ReportDocument, _> =
            toml::from_str("title = \"T\"\noutput_name = \"t\"\nauthor = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_name() {
        for name in ["", "  ", "../escape", "nested/name", ".hidden"] {
            let doc = parse(&format!("title = \"T\"\noutput_name = {name:?}\n"));
            assert!(
                matches!(doc.validate(), Err(CliError::Validation(_))),
                "expected `{name}` to be rejected"
            );
        }
    }

    #[test]
    fn test_section_with_paragraph() {
        let doc = parse(
            r#"
title = "Summary"
output_name = "summary"

[[body]]
type = "section"
title = "Overview"
anchor = "overview"

[[body.blocks]]
type = "paragraph"
text = "All good."
"#,
        );
        let mut log = EventLog::new();
        let mut out = ReportRenderer::new(&mut log);
        doc.render_body(&mut out).unwrap();
        assert_eq!(out.section_depth(), 0);
        assert_eq!(
            log.into_events(),
            vec![
                SinkEvent::SectionStart { level: 1 },
                SinkEvent::Anchor {
                    name: "overview".to_owned()
                },
                SinkEvent::SectionTitleStart { level: 1 },
                text("Overview"),
                SinkEvent::SectionTitleEnd { level: 1 },
                SinkEvent::ParagraphStart,
                text("All good."),
                SinkEvent::ParagraphEnd,
                SinkEvent::SectionEnd { level: 1 },
            ]
        );
    }

    #[test]
    fn test_table_cells_accept_patterns_and_links() {
        let doc = parse(
            r#"
title = "Licenses"
output_name = "licenses"

[[body]]
type = "table"
header = ["Name"]
rows = [
    ["{Apache, http://apache.org}"],
    [{ text = "MIT", href = "http://mit.edu" }],
    [{ text = "Unknown" }],
]
"#,
        );
        let mut log = EventLog::new();
        doc.render_body(&mut ReportRenderer::new(&mut log)).unwrap();
        let events = log.into_events();

        let links: Vec<&SinkEvent> = events
            .iter()
            .filter(|e| matches!(e, SinkEvent::LinkStart { .. }))
            .collect();
        assert_eq!(
            links,
            vec![
                &SinkEvent::LinkStart {
                    href: "http://apache.org".to_owned()
                },
                &SinkEvent::LinkStart {
                    href: "http://mit.edu".to_owned()
                },
            ]
        );
        assert!(events.contains(&text("Unknown")));
        assert!(events.contains(&SinkEvent::TableRowsStart {
            justification: vec![Justify::Left],
            grid: false,
        }));
    }

    #[test]
    fn test_row_cell_count_mismatch() {
        let doc = parse(
            r#"
title = "Bad"
output_name = "bad"

[[body]]
type = "table"
header = ["A", "B"]
rows = [["1", "2"], ["3"]]
"#,
        );
        let mut log = EventLog::new();
        let result = doc.render_body(&mut ReportRenderer::new(&mut log));
        assert!(matches!(result, Err(RenderError::Report(_))));
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_text_block_with_broken_pattern() {
        let doc = parse(
            r#"
title = "Bad"
output_name = "bad"

[[body]]
type = "text"
text = "see {docs"
"#,
        );
        let mut log = EventLog::new();
        let result = doc.render_body(&mut ReportRenderer::new(&mut log));
        assert!(matches!(result, Err(RenderError::UnbalancedGroup(_))));
    }

    #[test]
    fn test_render_document_to_html() {
        let doc = parse(
            r#"
title = "Project Info"
output_name = "index"
description = "General project information"

[[body]]
type = "section"
title = "Project Info"

[[body.blocks]]
type = "table"
caption = "Modules"
grid = true
justification = ["left", "right"]
header = ["Module", "Tests"]
rows = [["core", "42"]]

[[body.blocks]]
type = "verbatim"
text = "cargo install reportkit"

[[body.blocks]]
type = "link"
href = "https://example.com"
text = "Home"
"#,
        );
        let mut sink = HtmlSink::new();
        render_report(&doc, &mut sink).unwrap();
        let html = sink.into_html();

        assert!(html.contains("<title>Project Info</title>"));
        assert!(html.contains(r#"<table border="1">"#));
        assert!(html.contains("<caption>Modules</caption>"));
        assert!(html.contains(r#"<td style="text-align:right">42</td>"#));
        assert!(html.contains(r#"<div class="source"><pre>cargo install reportkit</pre></div>"#));
        assert!(html.contains(r#"<a href="https://example.com">Home</a>"#));
        assert_eq!(doc.description(), Some("General project information"));
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "title = ").unwrap();

        let err = ReportDocument::load(&path).unwrap_err();

        assert!(matches!(err, CliError::Document { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_link_cells_are_not_parsed_as_patterns() {
        let doc = parse(
            r#"
title = "Totals"
output_name = "totals"

[[body]]
type = "table"
rows = [
    [{ text = "a}b", href = "http://u" }],
    [{ text = "Total ${x}", href = "http://u" }],
]
"#,
        );
        let mut log = EventLog::new();
        doc.render_body(&mut ReportRenderer::new(&mut log)).unwrap();
        let events = log.into_events();

        let link = SinkEvent::LinkStart {
            href: "http://u".to_owned(),
        };
        assert_eq!(events.iter().filter(|e| **e == link).count(), 2);
        assert!(events.contains(&text("a}b")));
        assert!(events.contains(&text("Total ${x}")));
        assert!(!events.contains(&text("http://u")));
    }

    #[test]
    fn test_pages_render_through_factory() {
        struct Collect(Vec<(String, EventLog)>);

        impl SinkFactory for Collect {
            fn create_sink(
                &mut self,
                output_name: &str,
            ) -> Result<&mut dyn reportkit_renderer::Sink, RenderError> {
                self.0.push((output_name.to_owned(), EventLog::new()));
                Ok(&mut self.0.last_mut().unwrap().1)
            }
        }

        let doc = parse(
            r#"
title = "Modules"
output_name = "modules"

[[body]]
type = "link"
href = "core.html"
text = "core"

[[pages]]
title = "Module core"
output_name = "core"

[[pages.body]]
type = "paragraph"
text = "The core module."
"#,
        );
        assert!(doc.validate().is_ok());

        let mut pages = Collect(Vec::new());
        doc.render_pages(&mut pages).unwrap();

        assert_eq!(pages.0.len(), 1);
        let (name, log) = &pages.0[0];
        assert_eq!(name, "core");
        assert!(log.events().contains(&text("Module core")));
        assert!(log.events().contains(&text("The core module.")));
    }

    #[test]
    fn test_duplicate_page_name_rejected() {
        let doc = parse(
            r#"
title = "Modules"
output_name = "modules"

[[pages]]
title = "Again"
output_name = "modules"
"#,
        );
        let err = doc.validate().unwrap_err();
        assert!(err.to_string().contains("used twice"), "{err}");
    }

    #[test]
    fn test_external_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coverage.toml");
        std::fs::write(
            &path,
            "title = \"Coverage\"\noutput_name = \"coverage\"\nexternal = \"tool/index.html\"\n",
        )
        .unwrap();

        let doc = ReportDocument::load(&path).unwrap();

        assert!(doc.is_external());
        assert!(doc.can_generate());
        assert_eq!(
            doc.external_source(),
            Some(dir.path().join("tool/index.html"))
        );
    }
}
