//! The retriever adapter: "relevant documents for a query".

use std::sync::Arc;

use tracing::debug;

use crate::document::Document;
use crate::error::Result;
use crate::store::{DocumentStore, HybridOptions};

/// Retrieves relevant documents through a [`DocumentStore`]'s hybrid
/// search, ensuring the collection exists before each query.
///
/// Chains and agent tools consume this; the two concrete configurations
/// (web documents, PDF documents) differ only in the store's schema.
#[derive(Clone)]
pub struct HybridRetriever {
    store: Arc<dyn DocumentStore>,
    options: HybridOptions,
}

impl HybridRetriever {
    /// Create a retriever with default search options.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store, options: HybridOptions::default() }
    }

    /// Override the hybrid search options used for every query.
    pub fn with_options(mut self, options: HybridOptions) -> Self {
        self.options = options;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Retrieve documents relevant to the query.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<Document>> {
        self.store.ensure_collection().await?;
        let documents = self.store.search(query, &self.options).await?;
        debug!(
            collection = %self.store.schema().collection,
            query,
            results = documents.len(),
            "retrieved documents"
        );
        Ok(documents)
    }
}
