use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocsError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8: {source}", path.display())]
    Decoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl DocsError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocsError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DocsError::Io { path, .. } => {
                format!("Could not read '{}'", path.display())
            }
            DocsError::Decoding { path, .. } => {
                format!("'{}' contains bytes that are not UTF-8 text", path.display())
            }
            DocsError::ConfigValidationError { field, message } => {
                format!("Configuration '{}' is invalid: {}", field, message)
            }
            DocsError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' = '{}' is not allowed ({})", field, value, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DocsError::Io { .. } => "Check that the documents directory is readable",
            DocsError::Decoding { .. } => "Re-save the document as UTF-8",
            DocsError::ConfigValidationError { .. } => "Check the TOML configuration file syntax",
            DocsError::InvalidConfigValueError { .. } => {
                "Fix the configuration value or the matching command line flag"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DocsError>;
