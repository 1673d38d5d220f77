//! Error types shared across the askdocs workspace.

use thiserror::Error;

/// Errors that can occur anywhere in the askdocs stack.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Missing or invalid configuration, raised at construction time.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An error from an LLM backend.
    #[error("Model error: {0}")]
    Model(String),

    /// An error raised while executing a tool.
    #[error("Tool error: {0}")]
    Tool(String),

    /// An error in agent orchestration.
    #[error("Agent error: {0}")]
    Agent(String),
}

/// A convenience result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
