//! OpenAI client implementation.

use askdocs_core::{CoreError, Llm, LlmRequest, LlmResponse, LlmResponseStream};
use async_openai::{
    Client, config::OpenAIConfig as AsyncOpenAIConfig, types::CreateChatCompletionRequestArgs,
};
use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use tracing::debug;

use super::config::OpenAIConfig;
use super::convert;

/// Chat completions over the OpenAI API (and compatible services).
///
/// Always streams internally; non-streaming callers collect the stream.
pub struct OpenAIChatModel {
    client: Client<AsyncOpenAIConfig>,
    model: String,
}

impl OpenAIChatModel {
    /// Create a client from the given configuration.
    pub fn new(config: OpenAIConfig) -> askdocs_core::Result<Self> {
        if config.api_key.is_empty() {
            return Err(CoreError::Config("OpenAI API key must not be empty".into()));
        }

        let mut openai_config = AsyncOpenAIConfig::new().with_api_key(&config.api_key);
        if let Some(base_url) = &config.base_url {
            openai_config = openai_config.with_api_base(base_url);
        }

        Ok(Self { client: Client::with_config(openai_config), model: config.model })
    }

    /// Create a client from `OPENAI_API_KEY` with the default model.
    pub fn from_env() -> askdocs_core::Result<Self> {
        Self::new(OpenAIConfig::from_env()?)
    }
}

#[async_trait]
impl Llm for OpenAIChatModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate_content(
        &self,
        request: LlmRequest,
        _stream: bool, // always streams internally
    ) -> askdocs_core::Result<LlmResponseStream> {
        let model = self.model.clone();
        let client = self.client.clone();

        let stream = try_stream! {
            let messages = request
                .messages
                .iter()
                .map(convert::message_to_openai)
                .collect::<askdocs_core::Result<Vec<_>>>()?;

            let mut builder = CreateChatCompletionRequestArgs::default();
            builder.model(&model).messages(messages);
            if !request.tools.is_empty() {
                builder.tools(convert::tools_to_openai(&request.tools)?);
            }
            let openai_request = builder
                .build()
                .map_err(|e| CoreError::Model(format!("failed to build request: {e}")))?;

            debug!(model = %model, tools = request.tools.len(), "sending chat completion request");

            let mut stream = client
                .chat()
                .create_stream(openai_request)
                .await
                .map_err(|e| CoreError::Model(format!("OpenAI API error: {e}")))?;

            let mut tool_calls = convert::ToolCallAccumulator::default();
            while let Some(result) = stream.next().await {
                let chunk =
                    result.map_err(|e| CoreError::Model(format!("stream error: {e}")))?;
                if let Some(choice) = chunk.choices.first() {
                    if let Some(fragments) = &choice.delta.tool_calls {
                        tool_calls.apply(fragments);
                    }
                    if let Some(content) = &choice.delta.content {
                        if !content.is_empty() {
                            yield LlmResponse::delta(content.clone());
                        }
                    }
                }
            }

            yield LlmResponse::complete(tool_calls.finish()?);
        };

        Ok(Box::pin(stream))
    }
}
