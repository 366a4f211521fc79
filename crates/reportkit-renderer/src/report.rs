//! Report descriptor and render lifecycle.

use crate::error::RenderError;
use crate::renderer::ReportRenderer;
use crate::segments;
use crate::sink::Sink;

/// A renderable report.
///
/// Implementors supply a title and a body; [`render_report`] wraps the body in
/// the document frame.
pub trait Report {
    /// Document title.
    fn title(&self) -> &str;

    /// Base name of the output file, without extension.
    fn output_name(&self) -> &str;

    /// One-line summary shown alongside the report name.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Whether the report has anything to render. Reports returning `false`
    /// are skipped.
    fn can_generate(&self) -> bool {
        true
    }

    /// Whether the report writes its own output.
    ///
    /// The body is still rendered, but hosts must not write the main sink's
    /// output for an external report.
    fn is_external(&self) -> bool {
        false
    }

    /// Render the document body.
    ///
    /// # Errors
    ///
    /// Returns any [`RenderError`] raised while writing the body.
    fn render_body(&self, out: &mut ReportRenderer<'_>) -> Result<(), RenderError>;

    /// Render additional documents, each into a sink obtained from `pages`.
    ///
    /// Single-page reports keep the default, which renders nothing.
    ///
    /// # Errors
    ///
    /// Returns any [`RenderError`] raised by the factory or while writing a page.
    fn render_pages(&self, pages: &mut dyn SinkFactory) -> Result<(), RenderError> {
        let _ = pages;
        Ok(())
    }
}

/// Source of sinks for the extra documents of a multi-page report.
pub trait SinkFactory {
    /// Open a sink for the document named `output_name` (no extension).
    ///
    /// The sink stays owned by the factory, which decides where its output goes.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Report`] if no document can be created under that
    /// name.
    fn create_sink(&mut self, output_name: &str) -> Result<&mut dyn Sink, RenderError>;
}

/// Render one complete document into `sink`: head with `title`, the body
/// written by `body`, then flush and close.
///
/// # Errors
///
/// Returns the first error raised by `body`. The sink is left open in that
/// case.
pub fn render_page<F>(sink: &mut dyn Sink, title: &str, body: F) -> Result<(), RenderError>
where
    F: FnOnce(&mut ReportRenderer<'_>) -> Result<(), RenderError>,
{
    sink.head_start();
    sink.title_start();
    segments::text(sink, title);
    sink.title_end();
    sink.head_end();

    sink.body_start();
    let mut out = ReportRenderer::new(&mut *sink);
    body(&mut out)?;
    let open_sections = out.section_depth();
    if open_sections > 0 {
        tracing::warn!(title, open_sections, "Document body left sections open");
    }
    sink.body_end();

    sink.flush();
    sink.close();
    Ok(())
}

/// Render a complete report document into `sink`.
///
/// Emits the head with the title, then the body, then flushes and closes the
/// sink.
///
/// # Errors
///
/// Returns the first error raised by the report body. The sink is left open in
/// that case.
pub fn render_report<R: Report + ?Sized>(
    report: &R,
    sink: &mut dyn Sink,
) -> Result<(), RenderError> {
    tracing::debug!(report = report.output_name(), "Rendering report");
    render_page(sink, report.title(), |out| report.render_body(out))?;
    tracing::debug!(report = report.output_name(), "Report rendered");
    Ok(())
}

/// Render a report into `sink` and its extra documents through `pages`.
///
/// # Errors
///
/// Returns the first error from the main document or any page. Pages are not
/// rendered when the main document fails.
pub fn render_report_with_pages<R: Report + ?Sized>(
    report: &R,
    sink: &mut dyn Sink,
    pages: &mut dyn SinkFactory,
) -> Result<(), RenderError> {
    render_report(report, sink)?;
    report.render_pages(pages)
}
