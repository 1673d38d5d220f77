//! # askdocs-core
//!
//! Shared vocabulary for the askdocs workspace: the error type, chat
//! message types, the [`Llm`] trait implemented by model backends, and
//! the [`Tool`] trait implemented by anything an agent can call.

mod content;
mod error;
mod llm;
mod tool;

pub use content::{Message, Role, ToolCall, ToolDeclaration};
pub use error::{CoreError, Result};
pub use llm::{Llm, LlmRequest, LlmResponse, LlmResponseStream};
pub use tool::Tool;
