//! Error types for toolbox.
//!
//! Validating a command never fails: every verdict, including the error
//! levels, is a normal [`ValidationDetails`](crate::validation::ValidationDetails)
//! value. The errors here cover the fallible plumbing around the validator,
//! such as loading the manager catalog and reading configuration.

use thiserror::Error;

/// The main error type for toolbox operations.
#[derive(Debug, Error)]
pub enum ToolboxError {
    /// Configuration-related errors (file parsing, layering, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// The package manager catalog could not be parsed or broke an invariant
    #[error("Invalid package manager catalog: {0}")]
    Catalog(String),

    /// An application catalog entry is malformed
    #[error("Invalid application entry: {0}")]
    InvalidApp(String),

    /// A manager id was requested that the catalog does not contain
    #[error("Unknown package manager: {0}")]
    UnknownManager(String),

    /// Serialization failures when exporting data
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// A type alias for Results that use ToolboxError.
pub type Result<T> = std::result::Result<T, ToolboxError>;

impl ToolboxError {
    /// Creates a new Catalog error naming the offending manager.
    pub fn catalog<S1, S2>(manager: S1, msg: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        ToolboxError::Catalog(format!("{}: {}", manager.into(), msg.into()))
    }

    /// Creates a new InvalidApp error naming the offending application.
    pub fn invalid_app<S1, S2>(app: S1, reason: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        ToolboxError::InvalidApp(format!("{}: {}", app.into(), reason.into()))
    }

    /// Returns true if the error comes from user-supplied data rather than the environment.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            ToolboxError::Catalog(_) | ToolboxError::InvalidApp(_) | ToolboxError::UnknownManager(_)
        )
    }

    /// Returns the error category as a string for logging.
    pub fn category(&self) -> &'static str {
        match self {
            ToolboxError::Config(_) => "config",
            ToolboxError::Catalog(_) => "catalog",
            ToolboxError::InvalidApp(_) => "invalid_app",
            ToolboxError::UnknownManager(_) => "unknown_manager",
            ToolboxError::Serialization(_) => "serialization",
        }
    }
}

impl From<config::ConfigError> for ToolboxError {
    fn from(err: config::ConfigError) -> Self {
        ToolboxError::Config(anyhow::Error::from(err))
    }
}

impl From<serde_yaml::Error> for ToolboxError {
    fn from(err: serde_yaml::Error) -> Self {
        ToolboxError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for ToolboxError {
    fn from(err: serde_json::Error) -> Self {
        ToolboxError::Serialization(err.to_string())
    }
}
