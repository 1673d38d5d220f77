//! Behavioral tests for the store contract, run against the in-memory
//! backend with a deterministic embedder.

use std::sync::Arc;

use askdocs_rag::{
    CollectionSchema, Document, DocumentStore, EmbeddingProvider, HybridOptions, HybridRetriever,
    MemoryStore, SEARCH_LIMIT,
};
use async_trait::async_trait;

/// Deterministic bag-of-words embedder: each term maps to a dimension,
/// so cosine similarity tracks term overlap.
struct BagOfWordsEmbedder {
    vocabulary: Vec<&'static str>,
}

impl BagOfWordsEmbedder {
    fn new() -> Self {
        Self {
            vocabulary: vec![
                "paris", "capital", "france", "berlin", "germany", "rust", "language", "memory",
                "safety", "python",
            ],
        }
    }
}

#[async_trait]
impl EmbeddingProvider for BagOfWordsEmbedder {
    async fn embed(&self, text: &str) -> askdocs_rag::Result<Vec<f32>> {
        let lower = text.to_lowercase();
        let mut embedding = vec![0.0f32; self.vocabulary.len()];
        for (i, term) in self.vocabulary.iter().enumerate() {
            if lower.contains(term) {
                embedding[i] = 1.0;
            }
        }
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }
}

fn web_store() -> MemoryStore {
    MemoryStore::new(CollectionSchema::web_documents(), Arc::new(BagOfWordsEmbedder::new()))
}

fn paris_doc() -> Document {
    Document::new("Paris is the capital of France.")
        .with_metadata("source", "https://example.com")
}

#[tokio::test]
async fn ingesting_the_same_document_twice_yields_the_same_identifier() {
    let store = web_store();
    store.ensure_collection().await.unwrap();

    let first = store.add_document(&paris_doc()).await.unwrap();
    let second = store.add_document(&paris_doc()).await.unwrap();
    assert_eq!(first, second);

    // The duplicate overwrote rather than duplicated.
    let results = store.search("capital of France", &HybridOptions::default()).await.unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn near_duplicate_text_with_different_metadata_gets_a_distinct_identifier() {
    let store = web_store();
    store.ensure_collection().await.unwrap();

    let a = store.add_document(&paris_doc()).await.unwrap();
    let b = store
        .add_document(
            &Document::new("Paris is the capital of France.")
                .with_metadata("source", "https://other.org"),
        )
        .await
        .unwrap();
    assert_ne!(a, b);
}

#[tokio::test]
async fn ensure_collection_is_idempotent() {
    let store = web_store();
    assert!(!store.collection_exists().await.unwrap());

    store.ensure_collection().await.unwrap();
    store.add_document(&paris_doc()).await.unwrap();
    store.ensure_collection().await.unwrap();

    assert!(store.collection_exists().await.unwrap());
    // The second call did not recreate the collection.
    let results = store.search("capital", &HybridOptions::default()).await.unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn deleting_a_missing_collection_is_a_noop() {
    let store = web_store();
    store.delete_collection().await.unwrap();
    store.delete_collection().await.unwrap();
    assert!(!store.collection_exists().await.unwrap());
}

#[tokio::test]
async fn delete_collection_destroys_the_data() {
    let store = web_store();
    store.ensure_collection().await.unwrap();
    store.add_document(&paris_doc()).await.unwrap();
    store.delete_collection().await.unwrap();

    assert!(!store.collection_exists().await.unwrap());
    // Searching a deleted collection is an error, not empty results.
    assert!(store.search("capital", &HybridOptions::default()).await.is_err());
}

#[tokio::test]
async fn search_separates_text_from_metadata() {
    let store = web_store();
    store.ensure_collection().await.unwrap();
    store.add_document(&paris_doc()).await.unwrap();

    let results = store.search("capital of France", &HybridOptions::default()).await.unwrap();
    assert_eq!(results.len(), 1);

    let doc = &results[0];
    assert_eq!(doc.text, "Paris is the capital of France.");
    assert_eq!(doc.metadata.get("source").and_then(|v| v.as_str()), Some("https://example.com"));
    assert!(!doc.metadata.contains_key("text"));
}

#[tokio::test]
async fn search_ranks_by_relevance_and_respects_the_limit() {
    let store = web_store();
    store.ensure_collection().await.unwrap();

    let documents = vec![
        Document::new("Paris is the capital of France.").with_metadata("source", "a"),
        Document::new("Berlin is the capital of Germany.").with_metadata("source", "b"),
        Document::new("Rust is a systems language with memory safety.")
            .with_metadata("source", "c"),
        Document::new("Python is a language.").with_metadata("source", "d"),
    ];
    store.add_documents(&documents).await.unwrap();

    let results = store.search("capital of France", &HybridOptions::default()).await.unwrap();
    assert!(results.len() <= SEARCH_LIMIT);
    assert_eq!(results[0].text, "Paris is the capital of France.");
}

#[tokio::test]
async fn a_custom_query_vector_overrides_the_embedded_query() {
    let store = web_store();
    store.ensure_collection().await.unwrap();
    store
        .add_documents(&[
            Document::new("Paris is the capital of France.").with_metadata("source", "a"),
            Document::new("Rust is a systems language.").with_metadata("source", "b"),
        ])
        .await
        .unwrap();

    // A vector pointing at the "rust"/"language" dimensions, paired with
    // an unrelated query string.
    let mut vector = vec![0.0f32; 10];
    vector[5] = 1.0;
    vector[6] = 1.0;
    let options = HybridOptions { vector: Some(vector), ..Default::default() };

    let results = store.search("capital of France", &options).await.unwrap();
    assert_eq!(results[0].text, "Rust is a systems language.");
}

#[tokio::test]
async fn retriever_creates_the_collection_before_querying() {
    let store = Arc::new(web_store());
    let retriever = HybridRetriever::new(store.clone());

    // No collection yet; retrieval must not error.
    let results = retriever.retrieve("anything").await.unwrap();
    assert!(results.is_empty());
    assert!(store.collection_exists().await.unwrap());
}
