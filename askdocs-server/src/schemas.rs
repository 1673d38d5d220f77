//! Request and response shapes for the served routes.

use askdocs_core::{Message, Role};
use serde::{Deserialize, Serialize};

/// Body of `POST /basic-rag/invoke` and `/basic-rag/stream`.
#[derive(Debug, Clone, Deserialize)]
pub struct RagInput {
    /// The question to answer.
    pub input: String,
}

/// Body of `POST /basic-rag/batch`.
#[derive(Debug, Clone, Deserialize)]
pub struct RagBatchInput {
    /// Questions, answered independently.
    pub inputs: Vec<String>,
}

/// One prior conversational turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who authored the turn.
    pub role: Role,
    /// The turn's text.
    pub content: String,
}

impl From<ChatTurn> for Message {
    fn from(turn: ChatTurn) -> Self {
        Self { role: turn.role, content: turn.content, tool_calls: Vec::new(), tool_call_id: None }
    }
}

/// Body of `POST /basic-agent/invoke` and `/basic-agent/stream`.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentInput {
    /// The new question.
    pub input: String,
    /// Prior turns, oldest first.
    #[serde(default)]
    pub chat_history: Vec<ChatTurn>,
}

impl AgentInput {
    /// The prior turns as conversation messages.
    pub fn history(&self) -> Vec<Message> {
        self.chat_history.iter().cloned().map(Message::from).collect()
    }
}

/// Body of `POST /basic-agent/batch`.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentBatchInput {
    /// Inputs, answered independently.
    pub inputs: Vec<AgentInput>,
}

/// Response of the invoke routes.
#[derive(Debug, Clone, Serialize)]
pub struct Output {
    /// The answer text.
    pub output: String,
}

/// Response of the batch routes.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutput {
    /// Answers in input order.
    pub outputs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_input_parses_with_and_without_history() {
        let with: AgentInput = serde_json::from_str(
            r#"{"input": "and Germany?", "chat_history": [
                {"role": "user", "content": "capital of France?"},
                {"role": "assistant", "content": "Paris"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(with.chat_history.len(), 2);
        assert_eq!(with.history()[1].role, Role::Assistant);

        let without: AgentInput = serde_json::from_str(r#"{"input": "hi"}"#).unwrap();
        assert!(without.chat_history.is_empty());
    }

    #[test]
    fn output_serializes_to_the_wire_shape() {
        let json = serde_json::to_value(Output { output: "Paris".into() }).unwrap();
        assert_eq!(json, serde_json::json!({"output": "Paris"}));
    }
}
