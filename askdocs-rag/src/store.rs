//! The document store contract and hybrid search options.

use async_trait::async_trait;

use crate::document::Document;
use crate::error::Result;
use crate::schema::CollectionSchema;

/// How many documents a search returns.
pub const SEARCH_LIMIT: usize = 3;

/// How the store fuses the keyword and vector rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FusionMethod {
    /// Reciprocal rank fusion.
    #[default]
    ReciprocalRank,
    /// Distribution-based relative score fusion.
    RelativeScore,
}

/// A keyword-search target property with its weight boost.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyWeight {
    /// The property to match query terms against.
    pub property: String,
    /// Multiplier applied to matches in this property.
    pub weight: f32,
}

impl PropertyWeight {
    /// A target property with the given boost.
    pub fn new(property: impl Into<String>, weight: f32) -> Self {
        Self { property: property.into(), weight }
    }
}

/// Caller-overridable knobs for a hybrid search.
///
/// The defaults search the collection's text property with no boost, use
/// the embedded query as the vector side, and fuse with reciprocal rank.
#[derive(Debug, Clone, Default)]
pub struct HybridOptions {
    /// Restrict and weight the keyword side to specific properties.
    pub target_properties: Option<Vec<PropertyWeight>>,
    /// Use this vector for the dense side instead of embedding the query.
    pub vector: Option<Vec<f32>>,
    /// Ranking fusion method.
    pub fusion: FusionMethod,
}

/// A named collection of documents supporting hybrid search.
///
/// Implemented by [`VectorModel`](crate::VectorModel) over Qdrant and by
/// the in-memory [`MemoryStore`](crate::MemoryStore) used in tests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// The declared schema of the collection this store manages.
    fn schema(&self) -> &CollectionSchema;

    /// Whether the collection exists in the store.
    async fn collection_exists(&self) -> Result<bool>;

    /// Create the collection with the declared schema if absent. No-op
    /// when it already exists.
    async fn ensure_collection(&self) -> Result<()>;

    /// Destroy the collection and all contained data. Deleting a missing
    /// collection is a no-op.
    async fn delete_collection(&self) -> Result<()>;

    /// Insert one document, returning its content-derived identifier.
    async fn add_document(&self, document: &Document) -> Result<String> {
        let ids = self.add_documents(std::slice::from_ref(document)).await?;
        ids.into_iter().next().ok_or_else(|| crate::error::RagError::Store {
            backend: "unknown".to_string(),
            message: "insert returned no identifier".to_string(),
        })
    }

    /// Insert documents through the batched write path, returning their
    /// content-derived identifiers in input order.
    async fn add_documents(&self, documents: &[Document]) -> Result<Vec<String>>;

    /// Hybrid search for the query, returning at most [`SEARCH_LIMIT`]
    /// documents ordered by fused relevance.
    async fn search(&self, query: &str, options: &HybridOptions) -> Result<Vec<Document>>;
}
