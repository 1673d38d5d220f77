//! The question-answering chain: retrieve, prompt, generate, parse.

use std::pin::Pin;
use std::sync::Arc;

use askdocs_core::{CoreError, Llm, LlmRequest, Message};
use askdocs_rag::{CollectionSchema, Document, HybridRetriever, VectorModel};
use async_stream::try_stream;
use futures::{Stream, StreamExt};
use serde_json::Value;
use tracing::info;

/// The fixed prompt rendered for every question.
const PROMPT_TEMPLATE: &str = "\
Answer the question based only on the following context:
{context}

Make sure when answering to provide the unique source links as citations in \
the format of: \"Source: <location>, Page: <page number>\".
Question: {question}
";

/// A linear question-answering pipeline: run the retriever, embed the
/// context and question in the prompt, invoke the model, return plain
/// text. No branching, no retries, no state across calls.
pub struct RagChain {
    retriever: HybridRetriever,
    model: Arc<dyn Llm>,
}

/// Build the served chain: PDF documents retriever over the Qdrant store.
pub fn basic_rag_chain(model: Arc<dyn Llm>) -> anyhow::Result<RagChain> {
    let store = VectorModel::new(CollectionSchema::pdf_documents())?;
    Ok(RagChain::new(HybridRetriever::new(Arc::new(store)), model))
}

impl RagChain {
    /// Create a chain over the given retriever and model.
    pub fn new(retriever: HybridRetriever, model: Arc<dyn Llm>) -> Self {
        Self { retriever, model }
    }

    /// Answer a question, returning the model's full text.
    pub async fn answer(&self, question: &str) -> askdocs_core::Result<String> {
        let request = self.build_request(question).await?;
        let mut stream = self.model.generate_content(request, false).await?;

        let mut answer = String::new();
        while let Some(response) = stream.next().await {
            if let Some(text) = response?.text {
                answer.push_str(&text);
            }
        }
        info!(question, chars = answer.len(), "rag chain answered");
        Ok(answer)
    }

    /// Answer a question as a stream of text fragments.
    pub fn answer_stream(
        self: Arc<Self>,
        question: String,
    ) -> Pin<Box<dyn Stream<Item = askdocs_core::Result<String>> + Send>> {
        Box::pin(try_stream! {
            let request = self.build_request(&question).await?;
            let mut stream = self.model.generate_content(request, true).await?;
            while let Some(response) = stream.next().await {
                if let Some(text) = response?.text {
                    yield text;
                }
            }
        })
    }

    async fn build_request(&self, question: &str) -> askdocs_core::Result<LlmRequest> {
        let documents = self
            .retriever
            .retrieve(question)
            .await
            .map_err(|e| CoreError::Agent(format!("retrieval failed: {e}")))?;

        let context =
            documents.iter().map(format_document).collect::<Vec<_>>().join("\n\n");
        let prompt =
            PROMPT_TEMPLATE.replace("{context}", &context).replace("{question}", question);

        Ok(LlmRequest::new(vec![Message::user(prompt)]))
    }
}

/// A document as it appears in the prompt context: the text followed by
/// its properties, so the model can cite sources.
fn format_document(document: &Document) -> String {
    if document.metadata.is_empty() {
        return document.text.clone();
    }
    let properties = document
        .metadata
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{key}: {s}"),
            other => format!("{key}: {other}"),
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}\n[{properties}]", document.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_documents_expose_their_source() {
        let doc = Document::new("Paris is the capital of France.")
            .with_metadata("source", "guide.pdf")
            .with_metadata("page", 12);
        let formatted = format_document(&doc);
        assert!(formatted.starts_with("Paris is the capital of France."));
        assert!(formatted.contains("source: guide.pdf"));
        assert!(formatted.contains("page: 12"));
    }

    #[test]
    fn the_template_mentions_both_holes() {
        assert!(PROMPT_TEMPLATE.contains("{context}"));
        assert!(PROMPT_TEMPLATE.contains("{question}"));
    }
}
