//! # askdocs-server
//!
//! The HTTP application: wires the RAG chain and the agent chain over
//! the retrieval layer and exposes each as invoke/stream/batch routes.

pub mod chains;
pub mod routes;
pub mod schemas;

use std::sync::Arc;

use askdocs_agent::ToolAgent;
use chains::RagChain;

/// Shared, immutable per-process state: the two chains.
///
/// Chains are stateless across calls, so handlers share them through
/// `Arc` with no locking.
#[derive(Clone)]
pub struct AppState {
    /// The question-answering chain.
    pub rag_chain: Arc<RagChain>,
    /// The tool-selecting agent chain.
    pub agent: Arc<ToolAgent>,
}
