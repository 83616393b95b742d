//! Error type shared by the gem core, the fragment API and the page runtime.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GemError {
    /// Gem file or config JSON did not match the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Cell id is not one of the configured active cells.
    #[error("unknown cell `{0}`")]
    UnknownCell(String),

    /// A selection named a gem that is not offered in this cell.
    #[error("gem `{gem}` is not allowed in {cell}")]
    NotAllowed { gem: String, cell: String },

    #[error("no pair {index} in {cell}")]
    UnknownPair { cell: String, index: usize },

    /// Server answered with a non-2xx status.
    #[error("fetch {url} failed with status {status}")]
    Http { url: String, status: u16 },

    /// Transport-level failure before a response arrived.
    #[error("fetch {url} failed: {message}")]
    Fetch { url: String, message: String },

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("missing element: {0}")]
    MissingElement(String),
}
