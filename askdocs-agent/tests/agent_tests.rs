//! Agent loop behavior against a scripted model.

use std::sync::{Arc, Mutex};

use askdocs_agent::ToolAgent;
use askdocs_core::{LlmResponse, Message, Tool, ToolCall};
use askdocs_model::MockLlm;
use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{Value, json};

/// A tool that records its invocations and answers with a fixed payload.
struct RecordingTool {
    calls: Arc<Mutex<Vec<Value>>>,
}

#[async_trait]
impl Tool for RecordingTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search for information from the web"
    }

    fn parameters_schema(&self) -> Value {
        json!({"type": "object", "properties": {"query": {"type": "string"}}})
    }

    async fn execute(&self, args: Value) -> askdocs_core::Result<Value> {
        self.calls.lock().unwrap().push(args);
        Ok(json!([{"text": "Paris is the capital of France.", "metadata": {}}]))
    }
}

fn search_call() -> ToolCall {
    ToolCall { id: "call_1".into(), name: "web_search".into(), arguments: json!({"query": "paris"}) }
}

#[tokio::test]
async fn answers_directly_when_the_model_calls_no_tools() {
    let agent = ToolAgent::builder("qa")
        .instruction("answer questions")
        .model(Arc::new(MockLlm::with_text("42")))
        .build()
        .unwrap();

    let answer = agent.run(&[], "what is the answer?").await.unwrap();
    assert_eq!(answer, "42");
}

#[tokio::test]
async fn executes_requested_tools_before_answering() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let model = MockLlm::new(vec![
        vec![LlmResponse::complete(vec![search_call()])],
        vec![LlmResponse::delta("Paris"), LlmResponse::complete(Vec::new())],
    ]);

    let agent = ToolAgent::builder("qa")
        .instruction("use tools")
        .model(Arc::new(model))
        .tool(Arc::new(RecordingTool { calls: calls.clone() }))
        .build()
        .unwrap();

    let answer = agent.run(&[], "capital of France?").await.unwrap();
    assert_eq!(answer, "Paris");

    let recorded = calls.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0]["query"], "paris");
}

#[tokio::test]
async fn prior_turns_are_passed_through() {
    let agent = ToolAgent::builder("qa")
        .instruction("answer questions")
        .model(Arc::new(MockLlm::with_text("as I said, Paris")))
        .build()
        .unwrap();

    let history =
        vec![Message::user("capital of France?"), Message::assistant("Paris")];
    let answer = agent.run(&history, "say that again").await.unwrap();
    assert_eq!(answer, "as I said, Paris");
}

#[tokio::test]
async fn the_iteration_bound_stops_a_looping_model() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let looping = MockLlm::new(vec![
        vec![LlmResponse::complete(vec![search_call()])],
        vec![LlmResponse::complete(vec![search_call()])],
        vec![LlmResponse::complete(vec![search_call()])],
    ]);

    let agent = ToolAgent::builder("qa")
        .model(Arc::new(looping))
        .tool(Arc::new(RecordingTool { calls }))
        .max_iterations(2)
        .build()
        .unwrap();

    let err = agent.run(&[], "loop forever").await.unwrap_err();
    assert!(err.to_string().contains("exceeded 2 iterations"));
}

#[tokio::test]
async fn an_unknown_tool_request_is_an_agent_error() {
    let model = MockLlm::new(vec![vec![LlmResponse::complete(vec![ToolCall {
        id: "call_1".into(),
        name: "no_such_tool".into(),
        arguments: json!({}),
    }])]]);

    let agent = ToolAgent::builder("qa").model(Arc::new(model)).build().unwrap();
    let err = agent.run(&[], "hi").await.unwrap_err();
    assert!(err.to_string().contains("no_such_tool"));
}

#[tokio::test]
async fn building_without_a_model_fails() {
    assert!(ToolAgent::builder("qa").build().is_err());
}

#[tokio::test]
async fn run_stream_yields_the_final_answer_fragments() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let model = MockLlm::new(vec![
        vec![LlmResponse::complete(vec![search_call()])],
        vec![
            LlmResponse::delta("Pa"),
            LlmResponse::delta("ris"),
            LlmResponse::complete(Vec::new()),
        ],
    ]);

    let agent = Arc::new(
        ToolAgent::builder("qa")
            .model(Arc::new(model))
            .tool(Arc::new(RecordingTool { calls }))
            .build()
            .unwrap(),
    );

    let fragments: Vec<String> = agent
        .run_stream(Vec::new(), "capital of France?".into())
        .map(|r| r.unwrap())
        .collect()
        .await;
    assert_eq!(fragments, vec!["Pa".to_string(), "ris".to_string()]);
}
