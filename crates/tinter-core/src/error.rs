//! Error types for curve construction, buffers, and filter tables.

/// Errors produced by the filter engine.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// Operation parameters that cannot produce a transform
    /// (too few control points, unknown channel selector).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Byte length does not match `width × height × 4`.
    #[error("invalid pixel buffer: {width}x{height} RGBA needs {expected} bytes, got {actual}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// A filter table entry failed to compile.
    #[error("filter `{name}` is invalid: {source}")]
    InvalidFilter {
        name: String,
        #[source]
        source: Box<FilterError>,
    },

    /// The filter table JSON could not be parsed.
    #[error("failed to parse filter table: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for filter engine operations.
pub type FilterResult<T> = Result<T, FilterError>;
