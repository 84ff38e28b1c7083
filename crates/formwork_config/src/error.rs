//! Error types for config loading and variable resolution.

use thiserror::Error;

/// Result type alias for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading a schema or resolving variables.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("variable {0} not found")]
    VariableNotFound(String),

    #[error("variable {0} has no value")]
    EmptyValue(String),

    #[error("validation failed for variable {variable}: {message}")]
    ValidationFailed { variable: String, message: String },

    #[error("transformation failed for variable {variable}: {message}")]
    TransformationFailed { variable: String, message: String },

    #[error("invalid version {version}: {message}")]
    InvalidVersion { version: String, message: String },

    #[error("invalid version range {range}: {message}")]
    InvalidVersionRange { range: String, message: String },

    #[error("version {version} is outside of version range {range}")]
    VersionOutOfRange { version: String, range: String },

    #[error("invalid versions {range} for variable {variable}: {message}")]
    InvalidVariableRange {
        variable: String,
        range: String,
        message: String,
    },

    #[error("cyclical reference detected while resolving variable {0}")]
    CyclicalReference(String),

    #[error("variable {0} has no default value")]
    NoDefaultValue(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid schema document: {0}")]
    SchemaDecode(#[from] serde_yaml::Error),
}
