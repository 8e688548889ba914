//! Error types for readable-article.
//!
//! Loading and scoring stages return these errors internally. The public
//! extraction entry points never surface them: a failure degrades into the
//! error placeholder document instead.

/// Error type for extraction stages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The markup could not be turned into a document tree at all.
    #[error("Failed to parse document contents: {0}")]
    ParseFailure(String),

    /// No node in the document produced a candidate score.
    #[error("No candidates found in document")]
    NoCandidates,

    /// A base URL supplied by the caller is not an absolute URL.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for extraction stages.
pub type Result<T> = std::result::Result<T, Error>;
