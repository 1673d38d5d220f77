//! The [`Llm`] trait implemented by model backends.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::content::{Message, ToolCall, ToolDeclaration};
use crate::error::Result;

/// A request to generate content from a model.
#[derive(Debug, Clone, Default)]
pub struct LlmRequest {
    /// The conversation so far, in order.
    pub messages: Vec<Message>,
    /// Tools the model may call. Empty for plain completion.
    pub tools: Vec<ToolDeclaration>,
}

impl LlmRequest {
    /// A request with messages and no tools.
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages, tools: Vec::new() }
    }

    /// Attach tool declarations to the request.
    pub fn with_tools(mut self, tools: Vec<ToolDeclaration>) -> Self {
        self.tools = tools;
        self
    }
}

/// One element of a model response stream.
///
/// Backends emit zero or more partial text deltas followed by exactly one
/// terminal response (`partial == false`) carrying any accumulated tool
/// calls. Collectors concatenate the deltas to recover the full text.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// A text fragment, present on partial deltas.
    pub text: Option<String>,
    /// Complete tool calls, present only on the terminal response.
    pub tool_calls: Vec<ToolCall>,
    /// Whether this is an incremental delta or the terminal response.
    pub partial: bool,
}

impl LlmResponse {
    /// An incremental text delta.
    pub fn delta(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), tool_calls: Vec::new(), partial: true }
    }

    /// The terminal response, closing the turn.
    pub fn complete(tool_calls: Vec<ToolCall>) -> Self {
        Self { text: None, tool_calls, partial: false }
    }
}

/// A stream of [`LlmResponse`] items.
pub type LlmResponseStream = Pin<Box<dyn Stream<Item = Result<LlmResponse>> + Send>>;

/// A large language model backend.
#[async_trait]
pub trait Llm: Send + Sync {
    /// The model identifier, for logging.
    fn name(&self) -> &str;

    /// Generate content for the request.
    ///
    /// Always returns a stream; non-streaming callers collect it. The
    /// `stream` flag is a hint for backends that distinguish the two paths.
    async fn generate_content(
        &self,
        request: LlmRequest,
        stream: bool,
    ) -> Result<LlmResponseStream>;
}
