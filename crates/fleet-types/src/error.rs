//! Error types for fleet-efficiency

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing configuration value: {0}")]
    Missing(String),
}

/// Errors raised while turning an uploaded file into raw rows
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Workbook has no sheets")]
    NoSheets,

    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    #[error("Failed to parse CSV: {0}")]
    Csv(String),

    #[error("Invalid number format in row {row}, column {column}: {value}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No vehicles to analyze.")]
    NoVehicles,

    #[error("Please enter an email address.")]
    MissingEmailAddress,

    #[error("Email sending failed: {0}")]
    EmailFailed(String),

    #[error("Chart rendering error: {0}")]
    Chart(String),

    #[error("Excel export error: {0}")]
    Excel(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(Error::NoVehicles.to_string(), "No vehicles to analyze.");
        assert_eq!(
            Error::MissingEmailAddress.to_string(),
            "Please enter an email address."
        );
    }

    #[test]
    fn test_loader_error_converts() {
        let err: Error = LoaderError::InvalidNumber {
            row: 3,
            column: "Distance".to_string(),
            value: "abc".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Loader error: Invalid number format in row 3, column Distance: abc"
        );
    }
}
