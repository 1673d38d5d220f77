//! A retriever exposed as an agent tool.

use askdocs_core::{CoreError, Tool};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::retriever::HybridRetriever;

/// Wraps a [`HybridRetriever`] as an [`askdocs_core::Tool`] so an agent
/// can perform retrieval as a tool call.
///
/// The tool takes a single required `query` string and returns the
/// retrieved documents as a JSON array.
pub struct RetrieverTool {
    retriever: HybridRetriever,
    name: String,
    description: String,
}

impl RetrieverTool {
    /// Create a tool with the given name and selection description.
    pub fn new(
        retriever: HybridRetriever,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self { retriever, name: name.into(), description: description.into() }
    }
}

#[async_trait]
impl Tool for RetrieverTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query to find relevant documents"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> askdocs_core::Result<Value> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| CoreError::Tool("missing required 'query' parameter".into()))?;

        info!(tool = %self.name, query, "retrieval tool called");

        let documents = self.retriever.retrieve(query).await.map_err(|e| {
            error!(tool = %self.name, error = %e, "retrieval failed");
            CoreError::Tool(format!("retrieval failed: {e}"))
        })?;

        serde_json::to_value(&documents)
            .map_err(|e| CoreError::Tool(format!("failed to serialize results: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::document::Document;
    use crate::embedding::EmbeddingProvider;
    use crate::memory::MemoryStore;
    use crate::schema::CollectionSchema;
    use crate::store::DocumentStore;

    struct FlatEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FlatEmbedder {
        async fn embed(&self, _text: &str) -> crate::error::Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        fn dimensions(&self) -> usize {
            2
        }
    }

    fn web_tool() -> RetrieverTool {
        let store =
            Arc::new(MemoryStore::new(CollectionSchema::web_documents(), Arc::new(FlatEmbedder)));
        RetrieverTool::new(
            HybridRetriever::new(store),
            "web_search",
            "Search for information from the web",
        )
    }

    #[tokio::test]
    async fn missing_query_is_a_tool_error() {
        let err = web_tool().execute(json!({})).await.unwrap_err();
        assert!(err.to_string().contains("query"));
    }

    #[tokio::test]
    async fn execute_returns_retrieved_documents_as_json() {
        let tool = web_tool();
        tool.retriever.store().ensure_collection().await.unwrap();
        tool.retriever
            .store()
            .add_document(
                &Document::new("Paris is the capital of France.")
                    .with_metadata("source", "https://example.com"),
            )
            .await
            .unwrap();

        let result = tool.execute(json!({"query": "capital of France"})).await.unwrap();
        let docs = result.as_array().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["text"], "Paris is the capital of France.");
        assert_eq!(docs[0]["metadata"]["source"], "https://example.com");
    }
}
