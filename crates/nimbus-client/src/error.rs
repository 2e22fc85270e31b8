use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no target selected; run 'nimbus target add <label> <url> --set-current'")]
    NoTarget,

    #[error("target '{0}' not found")]
    UnknownTarget(String),

    #[error("target '{0}' already exists")]
    DuplicateTarget(String),

    #[error("not authenticated; run 'nimbus login <email>'")]
    Unauthorized,

    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response shape: {0}")]
    Decode(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid targets file: {0}")]
    TargetsFile(#[from] toml::de::Error),

    #[error("unable to write targets file: {0}")]
    TargetsWrite(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
