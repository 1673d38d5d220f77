//! A scripted LLM for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use askdocs_core::{Llm, LlmRequest, LlmResponse, LlmResponseStream, Result};
use async_trait::async_trait;
use futures::stream;

/// An [`Llm`] that replays a fixed script.
///
/// Each call to [`generate_content`](Llm::generate_content) pops the next
/// scripted turn; when the script runs out it answers with an empty
/// terminal response.
pub struct MockLlm {
    turns: Mutex<VecDeque<Vec<LlmResponse>>>,
}

impl MockLlm {
    /// A mock replaying the given turns in order.
    pub fn new(turns: Vec<Vec<LlmResponse>>) -> Self {
        Self { turns: Mutex::new(turns.into()) }
    }

    /// A mock that always answers with the given text, one delta.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(vec![vec![LlmResponse::delta(text.into()), LlmResponse::complete(Vec::new())]])
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate_content(
        &self,
        _request: LlmRequest,
        _stream: bool,
    ) -> Result<LlmResponseStream> {
        let turn = self
            .turns
            .lock()
            .expect("mock script lock")
            .pop_front()
            .unwrap_or_else(|| vec![LlmResponse::complete(Vec::new())]);
        Ok(Box::pin(stream::iter(turn.into_iter().map(Ok))))
    }
}
