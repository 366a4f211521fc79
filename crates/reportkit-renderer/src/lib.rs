//! Report rendering over a pluggable output sink.
//!
//! A report is written against [`ReportRenderer`], which turns building blocks
//! (sections, tables, paragraphs, links) into events on a [`Sink`]. Text in table
//! cells and [`ReportRenderer::link_patterned_text`] may embed links with the
//! `{label, url}` syntax of [`reportkit_pattern`].
//!
//! # Architecture
//!
//! - [`Sink`]: the event consumer trait
//! - [`HtmlSink`]: standalone HTML5 output
//! - [`EventLog`]: records [`SinkEvent`]s, serializable with the `serde` feature
//! - [`SectionDepth`]: keeps nested sections balanced
//! - [`Report`] and [`render_report`]: the document frame around a report body
//! - [`SinkFactory`] and [`render_report_with_pages`]: extra documents of a
//!   multi-page report
//!
//! # Example
//!
//! ```
//! use reportkit_renderer::{HtmlSink, RenderError, Report, ReportRenderer, render_report};
//!
//! struct Licenses;
//!
//! impl Report for Licenses {
//!     fn title(&self) -> &str {
//!         "Licenses"
//!     }
//!
//!     fn output_name(&self) -> &str {
//!         "licenses"
//!     }
//!
//!     fn render_body(&self, out: &mut ReportRenderer<'_>) -> Result<(), RenderError> {
//!         out.start_section("Project Licenses");
//!         out.link_patterned_text("Licensed under {Apache 2.0, https://www.apache.org/licenses/LICENSE-2.0}")?;
//!         out.end_section()
//!     }
//! }
//!
//! let mut sink = HtmlSink::new();
//! render_report(&Licenses, &mut sink).unwrap();
//! assert!(sink.as_str().contains(r#"<a href="https://www.apache.org/licenses/LICENSE-2.0">Apache 2.0</a>"#));
//! ```

mod error;
mod events;
mod html;
mod renderer;
mod report;
mod section;
mod segments;
mod sink;
mod state;

pub use error::RenderError;
pub use events::{EventLog, SinkEvent};
pub use html::HtmlSink;
pub use renderer::{ReportRenderer, properties_to_string};
pub use report::{Report, SinkFactory, render_page, render_report, render_report_with_pages};
pub use section::SectionDepth;
pub use segments::{EMPTY_TEXT, link_patterned_text, render_segments};
pub use sink::{Justify, Sink};
pub use state::{encode_anchor, escape_html};
