//! Configuration validation helpers

use crate::{ConfigError, ConfigResult};

/// Trait for validating configuration values
pub trait Validate {
    /// Validate this configuration object
    ///
    /// # Errors
    /// Returns validation errors if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Validate a URL string
///
/// # Errors
/// Returns `ConfigError::InvalidUrl` unless the value is an http(s) URL with
/// a non-empty host part.
pub fn validate_url(url: &str) -> ConfigResult<()> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            url: url.to_string(),
        }),
    }
}

/// Validate a value is within a range
///
/// # Errors
/// Returns `ConfigError::OutOfRange` if value is outside the specified range
pub fn validate_range(value: u64, min: u64, max: u64, field_name: &str) -> ConfigResult<()> {
    if value < min || value > max {
        Err(ConfigError::OutOfRange {
            field: field_name.to_string(),
            value,
            min,
            max,
        })
    } else {
        Ok(())
    }
}

/// Validate a string is not empty
///
/// # Errors
/// Returns `ConfigError::MissingField` if the string is empty or whitespace-only
pub fn validate_non_empty(value: &str, field_name: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        Err(ConfigError::MissingField {
            field: field_name.to_string(),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https_urls() {
        assert!(validate_url("https://api.github.com").is_ok());
        assert!(validate_url("http://localhost:8080").is_ok());
    }

    #[test]
    fn rejects_other_schemes_and_empty_hosts() {
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("https://").is_err());
        assert!(validate_url("api.github.com").is_err());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(validate_range(1, 1, 100, "per_page").is_ok());
        assert!(validate_range(100, 1, 100, "per_page").is_ok());
        assert!(validate_range(0, 1, 100, "per_page").is_err());
        assert!(validate_range(101, 1, 100, "per_page").is_err());
    }

    #[test]
    fn whitespace_only_is_missing() {
        assert!(validate_non_empty("  ", "user_agent").is_err());
        assert!(validate_non_empty("reposcout", "user_agent").is_ok());
    }
}
