//! Error types for the `askdocs-rag` crate.

use thiserror::Error;

/// Errors that can occur in retrieval operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// Missing or invalid configuration, raised at construction time.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An error from the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    Store {
        /// The backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// An error from the embedding provider.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error while loading source content (web page or PDF).
    #[error("Loader error ({location}): {message}")]
    Loader {
        /// The URL or path that failed to load.
        location: String,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
