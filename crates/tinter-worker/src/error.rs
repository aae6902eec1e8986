use tinter_core::FilterError;

/// Errors at the request boundary.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    /// Buffer or filter name missing, or the buffer is not a valid image.
    #[error("You must provide both imgData and filterName")]
    MalformedRequest,

    /// The worker answered with an error result.
    #[error("filter request rejected: {0}")]
    Rejected(String),

    /// The worker thread has stopped or dropped the request.
    #[error("filter worker is not running")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
