//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be read or parsed
    ConfigError(String),
    /// Locale filter is not a valid regular expression
    InvalidFilter(String),
    /// No rule group has a locale matching the filter
    NoMatchingLocales(String),
    /// Generation finished but counted failures
    GenerationFailures(usize),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::InvalidFilter(msg) => write!(f, "Invalid locale filter: {msg}"),
            CliError::NoMatchingLocales(filter) => {
                write!(f, "No locales match filter: {filter}")
            }
            CliError::GenerationFailures(count) => write!(f, "***Failures: {count}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_filter_errors_display() {
        let error = CliError::InvalidFilter("unclosed group".to_string());
        assert_eq!(error.to_string(), "Invalid locale filter: unclosed group");

        let error = CliError::NoMatchingLocales("^xx$".to_string());
        assert_eq!(error.to_string(), "No locales match filter: ^xx$");
    }

    #[test]
    fn test_failures_display() {
        assert_eq!(CliError::GenerationFailures(3).to_string(), "***Failures: 3");
    }

    #[test]
    fn test_converts_into_anyhow() {
        let failure: CliResult<()> = Err(CliError::GenerationFailures(1).into());
        let error = failure.unwrap_err();
        assert!(error.downcast_ref::<CliError>().is_some());
    }
}
