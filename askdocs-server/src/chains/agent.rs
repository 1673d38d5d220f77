//! The agent chain: a model choosing between two retrieval tools.

use std::sync::Arc;

use askdocs_agent::ToolAgent;
use askdocs_core::Llm;
use askdocs_rag::{CollectionSchema, HybridRetriever, RetrieverTool, VectorModel};

/// System instruction for the served agent.
const AGENT_INSTRUCTION: &str = "\
You are a helpful assistant. Use the web_search tool to look up \
information from the web and the pdf_search tool to look up information \
from the local document library. Answer from the retrieved context and \
cite sources where possible.";

/// Build the served agent: web and PDF retrieval tools over the Qdrant
/// store.
pub fn basic_agent(model: Arc<dyn Llm>) -> anyhow::Result<ToolAgent> {
    let web = HybridRetriever::new(Arc::new(VectorModel::new(
        CollectionSchema::web_documents(),
    )?));
    let pdf = HybridRetriever::new(Arc::new(VectorModel::new(
        CollectionSchema::pdf_documents(),
    )?));
    Ok(agent_with_retrievers(model, web, pdf)?)
}

/// Wire an agent over explicit retrievers; tests inject in-memory stores
/// here.
pub fn agent_with_retrievers(
    model: Arc<dyn Llm>,
    web: HybridRetriever,
    pdf: HybridRetriever,
) -> askdocs_core::Result<ToolAgent> {
    ToolAgent::builder("basic_agent")
        .instruction(AGENT_INSTRUCTION)
        .model(model)
        .tool(Arc::new(RetrieverTool::new(
            web,
            "web_search",
            "Search for information from the web",
        )))
        .tool(Arc::new(RetrieverTool::new(
            pdf,
            "pdf_search",
            "Search for information from the local library",
        )))
        .build()
}
