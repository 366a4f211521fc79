//! `reportkit render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use reportkit_config::{CliSettings, Config, OutputConfig, OutputFormat};
use reportkit_renderer::{
    EventLog, HtmlSink, RenderError, Report, Sink, SinkFactory, render_report_with_pages,
};

use crate::document::{ReportDocument, check_output_name};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Report files to render.
    #[arg(required = true)]
    reports: Vec<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format: html or events (overrides config).
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Path to configuration file (default: auto-discover reportkit.toml).
    #[arg(short, long, env = "REPORTKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output (show render details).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output_dir.clone(),
            format: self.format,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if config.render.skip {
            output.warning("Rendering skipped (render.skip = true)");
            return Ok(());
        }

        let target = &config.output_resolved;
        output.info(&format!("Output: {}", target.directory.display()));

        let mut written = 0usize;
        for path in &self.reports {
            let document = ReportDocument::load(path)?;
            if !document.can_generate() {
                tracing::info!(report = document.output_name(), "Report has no content");
                output.warning(&format!("Skipping {}: nothing to render", path.display()));
                continue;
            }

            let files = write_report(&document, target)?;
            match document.description() {
                Some(description) => output.highlight(&format!(
                    "{}: {description}",
                    document.title()
                )),
                None => output.highlight(document.title()),
            }
            for file in &files {
                output.info(&format!("  -> {}", file.display()));
            }
            written += 1;
        }

        output.success(&format!("Rendered {written} report(s)"));
        Ok(())
    }
}

/// Sink for one output document, in the configured format.
enum OutputSink {
    Html(HtmlSink),
    Events(EventLog),
}

impl OutputSink {
    fn new(target: &OutputConfig) -> Self {
        match target.format {
            OutputFormat::Html => Self::Html(HtmlSink::new().with_encoding(&target.encoding)),
            OutputFormat::Events => Self::Events(EventLog::new()),
        }
    }

    fn as_sink(&mut self) -> &mut dyn Sink {
        match self {
            Self::Html(sink) => sink,
            Self::Events(log) => log,
        }
    }

    fn into_content(self) -> Result<String, CliError> {
        match self {
            Self::Html(sink) => Ok(sink.into_html()),
            Self::Events(log) => {
                let mut json = serde_json::to_string_pretty(log.events())?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}

/// Collects the extra pages of a report until they are written.
struct PageSinks<'a> {
    target: &'a OutputConfig,
    /// Output name of the main document.
    main: &'a str,
    pages: Vec<(String, OutputSink)>,
}

impl<'a> PageSinks<'a> {
    fn new(target: &'a OutputConfig, main: &'a str) -> Self {
        Self {
            target,
            main,
            pages: Vec::new(),
        }
    }
}

impl SinkFactory for PageSinks<'_> {
    fn create_sink(&mut self, output_name: &str) -> Result<&mut dyn Sink, RenderError> {
        check_output_name(output_name).map_err(RenderError::Report)?;
        if output_name == self.main || self.pages.iter().any(|(name, _)| name == output_name) {
            return Err(RenderError::Report(format!(
                "page `{output_name}` is already rendered"
            )));
        }
        tracing::debug!(page = output_name, "Creating page sink");
        let index = self.pages.len();
        self.pages
            .push((output_name.to_owned(), OutputSink::new(self.target)));
        Ok(self.pages[index].1.as_sink())
    }
}

/// Render a report with its pages and write them to the output directory.
///
/// Returns the files written. The main document of an external report is not
/// written; its external output is copied under `<dir>/<output_name>/` instead.
/// Nothing is written when rendering fails.
fn write_report(document: &ReportDocument, target: &OutputConfig) -> Result<Vec<PathBuf>, CliError> {
    let mut main = OutputSink::new(target);
    let mut pages = PageSinks::new(target, document.output_name());
    render_report_with_pages(document, main.as_sink(), &mut pages)?;

    let mut files = Vec::new();
    if document.is_external() {
        if let Some(source) = document.external_source() {
            files.push(copy_external(&source, &target.directory, document.output_name())?);
        }
    } else {
        let file = target.file_path(document.output_name());
        write_file(&file, &main.into_content()?)?;
        files.push(file);
    }

    for (name, sink) in pages.pages {
        let file = target.file_path(&name);
        write_file(&file, &sink.into_content()?)?;
        files.push(file);
    }

    tracing::info!(report = document.output_name(), files = files.len(), "Wrote report");
    Ok(files)
}

/// Copy an externally produced file to `<directory>/<output_name>/<file name>`.
fn copy_external(source: &Path, directory: &Path, output_name: &str) -> Result<PathBuf, CliError> {
    let file_name = source.file_name().ok_or_else(|| {
        CliError::Validation(format!("external output {} is not a file", source.display()))
    })?;
    let dest = directory.join(output_name).join(file_name);
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(source, &dest)?;
    tracing::info!(source = %source.display(), dest = %dest.display(), "Copied external report");
    Ok(dest)
}

fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}
