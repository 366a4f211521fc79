//! Environment variable expansion for configuration strings.
//!
//! Supports `${VAR}` (error if unset) and `${VAR:-default}`. Bare `$VAR` is left
//! alone.

use crate::ConfigError;

/// Variable that could not be resolved.
struct UnsetVar {
    name: String,
}

/// Expand `${...}` references in a config value.
///
/// `field` names the config key for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| match std::env::var(var) {
        Ok(val) => Ok(Some(val)),
        Err(_) => Err(UnsetVar {
            name: var.to_owned(),
        }),
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.name),
    })
}
