//! `reportkit pattern` command implementation.

use clap::Args;
use reportkit_pattern::{Segment, flatten};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the pattern command.
#[derive(Args)]
pub(crate) struct PatternArgs {
    /// Text with `{label, url}` link patterns.
    text: String,

    /// Print the plain text with link targets removed instead of JSON.
    #[arg(long)]
    plain: bool,
}

impl PatternArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let segments = reportkit_pattern::parse(&self.text)?;
        tracing::debug!(segments = segments.len(), "Parsed link pattern");
        output.print(&format_segments(&segments, self.plain)?)?;
        Ok(())
    }
}

fn format_segments(segments: &[Segment<'_>], plain: bool) -> Result<String, CliError> {
    if plain {
        Ok(flatten(segments))
    } else {
        Ok(serde_json::to_string_pretty(segments)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_format_json() {
        let segments = reportkit_pattern::parse("see {docs, https://docs.rs}").unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&format_segments(&segments, false).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "label": "see " },
                { "label": "docs", "target": "https://docs.rs" }
            ])
        );
    }

    #[test]
    fn test_format_plain() {
        let segments = reportkit_pattern::parse("see {docs, https://docs.rs} today").unwrap();
        assert_eq!(format_segments(&segments, true).unwrap(), "see docs today");
    }
}
