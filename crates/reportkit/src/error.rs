//! CLI error types.

use std::path::PathBuf;

use reportkit_config::ConfigError;
use reportkit_pattern::PatternError;
use reportkit_renderer::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Pattern(#[from] PatternError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{}: {source}", path.display())]
    Document {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{0}")]
    Validation(String),
}
