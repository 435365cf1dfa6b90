/// GridView error types
///
/// Two families of failure exist. `FetchError` comes from the source provider
/// and is recoverable: the controller shows an empty view with an error
/// indicator. `ViewError` marks misuse of the pipeline contracts (unknown sort
/// column, impossible page request) and is surfaced as a controller error state
/// rather than propagated into rendering.
///
/// An empty filter result is not an error; it is a derived view with
/// `total_count == 0`.

use thiserror::Error;

/// Failure reported by a `SourceProvider`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The transport answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The payload could not be decoded into a record collection.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// Local I/O failed while reading a payload.
    #[error("i/o error: {0}")]
    Io(String),

    /// The source could not be reached at all.
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err.to_string())
    }
}

/// Errors raised by the view pipeline and controller transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The sort key names a field (or column) that does not exist.
    #[error("invalid sort key '{0}'")]
    InvalidSortKey(String),

    /// The column exists but is not declared sortable.
    #[error("column '{0}' is not sortable")]
    ColumnNotSortable(String),

    /// Page size of zero, an unsupported size, or an offset that overflows.
    #[error("invalid page request: page {page_index} of size {page_size}")]
    InvalidPageRequest { page_index: usize, page_size: usize },

    /// Loading the collection failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

pub type Result<T, E = ViewError> = std::result::Result<T, E>;
