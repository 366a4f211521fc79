//! Configuration management for reportkit.
//!
//! Parses `reportkit.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [output]
//! directory = "target/reports"   # relative to the config file
//! format = "html"                # "html" or "events"
//! encoding = "UTF-8"
//!
//! [render]
//! skip = false
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `output.directory` and `output.encoding` support `${VAR}` and
//! `${VAR:-default}`.

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "reportkit.toml";

/// Output directory used when the config doesn't name one.
const DEFAULT_OUTPUT_DIR: &str = "target/reports";

const DEFAULT_ENCODING: &str = "UTF-8";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override output format.
    pub format: Option<OutputFormat>,
    /// Override the skip flag.
    pub skip: Option<bool>,
}

/// Format reports are written in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Standalone HTML5 document.
    #[default]
    Html,
    /// JSON list of sink events.
    Events,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Events => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Html => "html",
            Self::Events => "events",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "events" => Ok(Self::Events),
            other => Err(format!(
                "unknown output format `{other}` (expected `html` or `events`)"
            )),
        }
    }
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Render configuration.
    pub render: RenderConfig,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    directory: Option<String>,
    format: Option<OutputFormat>,
    encoding: Option<String>,
}

/// Resolved output configuration with an absolute directory.
#[derive(Debug)]
pub struct OutputConfig {
    /// Directory reports are written to.
    pub directory: PathBuf,
    /// Output format.
    pub format: OutputFormat,
    /// Charset declared by the output.
    pub encoding: String,
}

impl OutputConfig {
    /// Path of the output file for a report.
    #[must_use]
    pub fn file_path(&self, output_name: &str) -> PathBuf {
        self.directory
            .join(format!("{output_name}.{}", self.format.extension()))
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: OutputFormat::default(),
            encoding: DEFAULT_ENCODING.to_owned(),
        }
    }
}

/// Render configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Skip rendering entirely.
    pub skip: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.directory`").
        field: String,
        /// Error message (e.g., "${`REPORT_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `reportkit.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output_dir) = &settings.output_dir {
            self.output_resolved.directory.clone_from(output_dir);
        }
        if let Some(format) = settings.format {
            self.output_resolved.format = format;
        }
        if let Some(skip) = settings.skip {
            self.render.skip = skip;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            output: OutputConfigRaw::default(),
            render: RenderConfig::default(),
            output_resolved: OutputConfig {
                directory: base.join(DEFAULT_OUTPUT_DIR),
                ..OutputConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let encoding = &self.output_resolved.encoding;
        if encoding.is_empty() {
            return Err(ConfigError::Validation(
                "output.encoding cannot be empty".to_owned(),
            ));
        }
        // Output is always written as UTF-8; declaring anything else would lie.
        if !matches!(encoding.to_ascii_lowercase().as_str(), "utf-8" | "utf8") {
            return Err(ConfigError::Validation(format!(
                "output.encoding `{encoding}` is not supported (only UTF-8)"
            )));
        }
        if self.output_resolved.directory.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output.directory cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.output.directory {
            self.output.directory = Some(expand::expand_env(dir, "output.directory")?);
        }
        if let Some(ref encoding) = self.output.encoding {
            self.output.encoding = Some(expand::expand_env(encoding, "output.encoding")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_resolved = OutputConfig {
            directory: config_dir.join(
                self.output
                    .directory
                    .as_deref()
                    .unwrap_or(DEFAULT_OUTPUT_DIR),
            ),
            format: self.output.format.unwrap_or_default(),
            encoding: self
                .output
                .encoding
                .clone()
                .unwrap_or_else(|| DEFAULT_ENCODING.to_owned()),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.output_resolved.directory,
            PathBuf::from("/test/target/reports")
        );
        assert_eq!(config.output_resolved.format, OutputFormat::Html);
        assert_eq!(config.output_resolved.encoding, "UTF-8");
        assert!(!config.render.skip);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.render.skip);
        assert!(config.output.directory.is_none());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[output]
directory = "site/reports"
format = "events"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.output_resolved.directory,
            PathBuf::from("/project/site/reports")
        );
        assert_eq!(config.output_resolved.format, OutputFormat::Events);
        assert_eq!(config.output_resolved.encoding, "UTF-8");
    }

    #[test]
    fn test_absolute_output_directory_is_kept() {
        let toml = r#"
[output]
directory = "/var/reports"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.output_resolved.directory,
            PathBuf::from("/var/reports")
        );
    }

    #[test]
    fn test_unknown_format_is_parse_error() {
        let result: Result<Config, _> = toml::from_str("[output]\nformat = \"pdf\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_file_path() {
        let output = OutputConfig {
            directory: PathBuf::from("/out"),
            format: OutputFormat::Events,
            encoding: "UTF-8".to_owned(),
        };
        assert_eq!(output.file_path("licenses"), PathBuf::from("/out/licenses.json"));
    }

    #[test]
    fn test_validate_rejects_other_encodings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.output_resolved.encoding = "ISO-8859-1".to_owned();
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("ISO-8859-1"));
    }

    #[test]
    fn test_validate_accepts_utf8_spellings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        for encoding in ["UTF-8", "utf-8", "utf8"] {
            config.output_resolved.encoding = encoding.to_owned();
            config.validate().unwrap();
        }
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            output_dir: Some(PathBuf::from("/custom")),
            format: Some(OutputFormat::Events),
            skip: Some(true),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.output_resolved.directory, PathBuf::from("/custom"));
        assert_eq!(config.output_resolved.format, OutputFormat::Events);
        assert!(config.render.skip);
    }

    #[test]
    fn test_apply_empty_cli_settings_changes_nothing() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(
            config.output_resolved.directory,
            PathBuf::from("/test/target/reports")
        );
        assert!(!config.render.skip);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[output]\ndirectory = \"out\"\n\n[render]\nskip = true\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.output_resolved.directory, dir.path().join("out"));
        assert!(config.render.skip);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_expands_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[output]\ndirectory = \"${REPORTKIT_TEST_LOAD_DIR:-generated}\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.output_resolved.directory,
            dir.path().join("generated")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/reportkit.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_applies_cli_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[output]\nformat = \"events\"\n").unwrap();
        let overrides = CliSettings {
            format: Some(OutputFormat::Html),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&overrides)).unwrap();

        assert_eq!(config.output_resolved.format, OutputFormat::Html);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("HTML".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("events".parse::<OutputFormat>(), Ok(OutputFormat::Events));
        assert!("pdf".parse::<OutputFormat>().is_err());
    }
}
