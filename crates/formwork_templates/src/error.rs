//! Error types for rendering.

use thiserror::Error;

use formwork_config::ConfigError;

/// Result type alias for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering a template tree.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("renderer has no config")]
    MissingConfig,

    #[error("renderer has no source path")]
    MissingSourcePath,

    #[error("renderer has no destination")]
    MissingDestination,

    #[error("renderer has no template source")]
    MissingSource,

    #[error("renderer has no target version")]
    MissingVersion,

    #[error("failed to render template {file}: {source}")]
    Template {
        file: String,
        #[source]
        source: tera::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
