//! # askdocs-agent
//!
//! A minimal agent executor: an LLM decides which of the attached tools
//! to call, the executor runs them and feeds the results back, and the
//! loop ends when the model produces a final answer. Tool selection and
//! termination are the model API's function calling; this crate only
//! wires model, tools, and instruction together and bounds the loop.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

use askdocs_core::{
    CoreError, Llm, LlmRequest, Message, Result, Tool, ToolCall, ToolDeclaration,
};
use async_stream::try_stream;
use futures::{Stream, StreamExt};
use tracing::{debug, info, warn};

/// Default bound on model ↔ tool round trips per run.
const DEFAULT_MAX_ITERATIONS: usize = 10;

/// What one model turn produced.
struct Turn {
    /// Text fragments in arrival order.
    deltas: Vec<String>,
    /// Tool calls requested by the turn, empty for a final answer.
    tool_calls: Vec<ToolCall>,
}

impl Turn {
    fn text(&self) -> String {
        self.deltas.concat()
    }
}

/// An LLM-driven agent with a set of callable tools.
///
/// Construct via [`ToolAgent::builder`]. Each run is independent; the
/// agent holds no state between calls.
pub struct ToolAgent {
    name: String,
    instruction: String,
    model: Arc<dyn Llm>,
    tools: HashMap<String, Arc<dyn Tool>>,
    declarations: Vec<ToolDeclaration>,
    max_iterations: usize,
}

impl ToolAgent {
    /// Create a new [`ToolAgentBuilder`].
    pub fn builder(name: impl Into<String>) -> ToolAgentBuilder {
        ToolAgentBuilder {
            name: name.into(),
            instruction: String::new(),
            model: None,
            tools: Vec::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// The agent name, for logging.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run to completion: prior turns plus the new input, returning the
    /// final answer text.
    pub async fn run(&self, history: &[Message], input: &str) -> Result<String> {
        let mut messages = self.seed(history, input);

        for iteration in 0..self.max_iterations {
            let turn = self.model_turn(&messages).await?;
            if turn.tool_calls.is_empty() {
                info!(agent = %self.name, iteration, "agent produced final answer");
                return Ok(turn.text());
            }
            self.apply_tool_calls(&mut messages, turn).await?;
        }

        Err(CoreError::Agent(format!(
            "agent '{}' exceeded {} iterations without a final answer",
            self.name, self.max_iterations
        )))
    }

    /// Run as a stream of the final answer's text fragments.
    ///
    /// Tool-calling turns execute silently; once a turn completes without
    /// tool calls its fragments are yielded in order.
    pub fn run_stream(
        self: Arc<Self>,
        history: Vec<Message>,
        input: String,
    ) -> Pin<Box<dyn Stream<Item = Result<String>> + Send>> {
        Box::pin(try_stream! {
            let mut messages = self.seed(&history, &input);

            for iteration in 0..self.max_iterations {
                let turn = self.model_turn(&messages).await?;
                if turn.tool_calls.is_empty() {
                    info!(agent = %self.name, iteration, "agent produced final answer");
                    for delta in turn.deltas {
                        yield delta;
                    }
                    return;
                }
                self.apply_tool_calls(&mut messages, turn).await?;
            }

            Err(CoreError::Agent(format!(
                "agent '{}' exceeded {} iterations without a final answer",
                self.name, self.max_iterations
            )))?;
        })
    }

    fn seed(&self, history: &[Message], input: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        if !self.instruction.is_empty() {
            messages.push(Message::system(self.instruction.clone()));
        }
        messages.extend(history.iter().cloned());
        messages.push(Message::user(input));
        messages
    }

    /// One model call, with the stream collected into a [`Turn`].
    async fn model_turn(&self, messages: &[Message]) -> Result<Turn> {
        let request =
            LlmRequest::new(messages.to_vec()).with_tools(self.declarations.clone());
        let mut stream = self.model.generate_content(request, true).await?;

        let mut turn = Turn { deltas: Vec::new(), tool_calls: Vec::new() };
        while let Some(response) = stream.next().await {
            let response = response?;
            if let Some(text) = response.text {
                turn.deltas.push(text);
            }
            if !response.partial {
                turn.tool_calls = response.tool_calls;
            }
        }
        Ok(turn)
    }

    /// Execute a turn's tool calls and append the exchange to the
    /// conversation.
    async fn apply_tool_calls(&self, messages: &mut Vec<Message>, turn: Turn) -> Result<()> {
        let text = turn.text();
        messages.push(Message::assistant_tool_calls(text, turn.tool_calls.clone()));

        for call in turn.tool_calls {
            let tool = self.tools.get(&call.name).ok_or_else(|| {
                warn!(agent = %self.name, tool = %call.name, "model requested unknown tool");
                CoreError::Agent(format!("model requested unknown tool '{}'", call.name))
            })?;

            debug!(agent = %self.name, tool = %call.name, "executing tool call");
            let result = tool.execute(call.arguments).await?;
            messages.push(Message::tool_result(call.id, result.to_string()));
        }
        Ok(())
    }
}

/// Builder for [`ToolAgent`].
pub struct ToolAgentBuilder {
    name: String,
    instruction: String,
    model: Option<Arc<dyn Llm>>,
    tools: Vec<Arc<dyn Tool>>,
    max_iterations: usize,
}

impl ToolAgentBuilder {
    /// Set the system instruction.
    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    /// Set the model.
    pub fn model(mut self, model: Arc<dyn Llm>) -> Self {
        self.model = Some(model);
        self
    }

    /// Attach a tool.
    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Override the iteration bound.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Build the agent.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] when no model is set or two tools
    /// share a name.
    pub fn build(self) -> Result<ToolAgent> {
        let model =
            self.model.ok_or_else(|| CoreError::Config("agent model is required".into()))?;

        let declarations: Vec<ToolDeclaration> =
            self.tools.iter().map(|t| t.declaration()).collect();
        let mut tools = HashMap::new();
        for tool in self.tools {
            if tools.insert(tool.name().to_string(), tool).is_some() {
                return Err(CoreError::Config("duplicate tool name in agent".into()));
            }
        }

        Ok(ToolAgent {
            name: self.name,
            instruction: self.instruction,
            model,
            tools,
            declarations,
            max_iterations: self.max_iterations,
        })
    }
}
