//! `${VAR}` and `${VAR:-fallback}` references in config values.

use std::cell::RefCell;
use std::convert::Infallible;

use crate::ConfigError;

/// Substitute environment references in `value`.
///
/// A reference without a fallback whose variable is unset is an error
/// attributed to `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let missing = RefCell::new(Vec::new());
    let expanded = shellexpand::env_with_context(value, |var| -> Result<Option<String>, Infallible> {
        if let Ok(val) = std::env::var(var) {
            Ok(Some(val))
        } else {
            missing.borrow_mut().push(var.to_owned());
            Ok(None)
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| -> ConfigError { match e.cause {} })?;

    // Unset variables with a default were replaced; those without are left verbatim.
    if let Some(var) = missing
        .into_inner()
        .into_iter()
        .find(|var| expanded.contains(&format!("${{{var}}}")))
    {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var}}} not set"),
        });
    }

    Ok(expanded)
}
