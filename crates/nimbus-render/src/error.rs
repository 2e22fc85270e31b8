use thiserror::Error;

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors produced while rendering a value.
///
/// Errors are returned to the caller, never logged here; the CLI layer
/// decides how to present them.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unable to render a value of type {0}")]
    Unsupported(String),

    #[error("rendering {0} values here is not implemented")]
    NotImplemented(String),

    #[error("error converting to json: {0}")]
    Json(#[source] serde_json::Error),

    #[error("error converting to yaml: {0}")]
    Yaml(#[source] serde_yaml::Error),

    #[error("error converting to yaml (panic): {0}")]
    YamlPanic(String),

    #[error("unable to capture value: {0}")]
    Capture(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl serde::ser::Error for RenderError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        RenderError::Capture(msg.to_string())
    }
}
