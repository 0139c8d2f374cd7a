//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// An unset variable without a default is an error naming `field`. Bare
/// `$VAR` and an unclosed `${` are kept literally.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(open) = rest.find("${") {
        let Some(close) = rest[open..].find('}').map(|offset| open + offset) else {
            break;
        };
        expanded.push_str(&rest[..open]);
        expanded.push_str(&expand_reference(&rest[open..=close], field)?);
        rest = &rest[close + 1..];
    }

    expanded.push_str(rest);
    Ok(expanded)
}

/// Expand a single `${...}` reference.
fn expand_reference(reference: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(reference, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

struct UnsetVar(String);
