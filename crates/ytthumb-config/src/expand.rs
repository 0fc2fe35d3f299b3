//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a setting value.
///
/// Values without `${` are returned as-is, including any bare `$`. Once a
/// value contains `${`, the whole string goes through shell-style expansion,
/// so a bare `$VAR` next to it is expanded too.
pub(crate) fn expand_env(value: &str, key: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let expanded = shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map_err(|err| ConfigError::EnvVar {
            key: key.to_owned(),
            message: format!("${{{}}} not set", err.var_name),
        })?;
    Ok(expanded.into_owned())
}
