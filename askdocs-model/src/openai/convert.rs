//! Conversions between askdocs types and async-openai wire types.

use std::collections::BTreeMap;

use askdocs_core::{CoreError, Message, Result, Role, ToolCall, ToolDeclaration};
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionMessageToolCallChunk,
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestToolMessageArgs,
    ChatCompletionRequestUserMessageArgs, ChatCompletionTool, ChatCompletionToolArgs,
    ChatCompletionToolType, FunctionCall, FunctionObjectArgs,
};
use serde_json::Value;

fn build_err(e: impl std::fmt::Display) -> CoreError {
    CoreError::Model(format!("failed to build request: {e}"))
}

/// Convert one conversation message to the OpenAI request shape.
pub(crate) fn message_to_openai(message: &Message) -> Result<ChatCompletionRequestMessage> {
    match message.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(message.content.clone())
            .build()
            .map(Into::into)
            .map_err(build_err),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(message.content.clone())
            .build()
            .map(Into::into)
            .map_err(build_err),
        Role::Assistant => {
            let mut args = ChatCompletionRequestAssistantMessageArgs::default();
            if !message.content.is_empty() {
                args.content(message.content.clone());
            }
            if !message.tool_calls.is_empty() {
                args.tool_calls(
                    message.tool_calls.iter().map(tool_call_to_openai).collect::<Vec<_>>(),
                );
            }
            args.build().map(Into::into).map_err(build_err)
        }
        Role::Tool => ChatCompletionRequestToolMessageArgs::default()
            .content(message.content.clone())
            .tool_call_id(message.tool_call_id.clone().unwrap_or_default())
            .build()
            .map(Into::into)
            .map_err(build_err),
    }
}

fn tool_call_to_openai(call: &ToolCall) -> ChatCompletionMessageToolCall {
    ChatCompletionMessageToolCall {
        id: call.id.clone(),
        r#type: ChatCompletionToolType::Function,
        function: FunctionCall { name: call.name.clone(), arguments: call.arguments.to_string() },
    }
}

/// Convert tool declarations to OpenAI function definitions.
pub(crate) fn tools_to_openai(tools: &[ToolDeclaration]) -> Result<Vec<ChatCompletionTool>> {
    tools
        .iter()
        .map(|tool| {
            let function = FunctionObjectArgs::default()
                .name(tool.name.clone())
                .description(tool.description.clone())
                .parameters(tool.parameters.clone())
                .build()
                .map_err(build_err)?;
            ChatCompletionToolArgs::default().function(function).build().map_err(build_err)
        })
        .collect()
}

/// Accumulates streamed tool-call fragments until the turn completes.
///
/// The API delivers tool calls as indexed deltas: the first fragment for
/// an index carries the id and name, later fragments append to the
/// arguments string.
#[derive(Debug, Default)]
pub(crate) struct ToolCallAccumulator {
    partial: BTreeMap<usize, PartialToolCall>,
}

#[derive(Debug, Default)]
struct PartialToolCall {
    id: String,
    name: String,
    arguments: String,
}

impl ToolCallAccumulator {
    /// Fold one delta's tool-call fragments into the accumulator.
    pub(crate) fn apply(&mut self, chunks: &[ChatCompletionMessageToolCallChunk]) {
        for chunk in chunks {
            let index = usize::try_from(chunk.index).unwrap_or_default();
            let entry = self.partial.entry(index).or_default();
            if let Some(id) = &chunk.id {
                entry.id.push_str(id);
            }
            if let Some(function) = &chunk.function {
                if let Some(name) = &function.name {
                    entry.name.push_str(name);
                }
                if let Some(arguments) = &function.arguments {
                    entry.arguments.push_str(arguments);
                }
            }
        }
    }

    /// Finalize into complete tool calls, parsing the argument JSON.
    pub(crate) fn finish(self) -> Result<Vec<ToolCall>> {
        self.partial
            .into_values()
            .map(|partial| {
                let arguments: Value = if partial.arguments.is_empty() {
                    Value::Object(serde_json::Map::new())
                } else {
                    serde_json::from_str(&partial.arguments).map_err(|e| {
                        CoreError::Model(format!(
                            "invalid tool call arguments for '{}': {e}",
                            partial.name
                        ))
                    })?
                };
                Ok(ToolCall { id: partial.id, name: partial.name, arguments })
            })
            .collect()
    }
}
