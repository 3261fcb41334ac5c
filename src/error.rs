use thiserror::Error;

/// Errors from the I/O and rendering layers. The data pipeline itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rendering failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
