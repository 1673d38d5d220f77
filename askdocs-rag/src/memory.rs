//! In-memory document store for development and tests.
//!
//! Implements the same contract as the Qdrant-backed model with the data
//! held in a `HashMap` behind a `tokio::sync::RwLock`. Ranking is cosine
//! similarity over the dense embeddings only; the keyword side of hybrid
//! search lives in the real store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Document, PropertyRecord, content_id};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::schema::CollectionSchema;
use crate::store::{DocumentStore, HybridOptions, SEARCH_LIMIT};

struct StoredRecord {
    record: PropertyRecord,
    embedding: Vec<f32>,
}

/// An in-memory [`DocumentStore`] keyed by content-derived identifier.
///
/// `None` models an absent collection, so lifecycle behavior (lazy
/// creation, no-op deletion) matches the real backend.
pub struct MemoryStore {
    schema: CollectionSchema,
    embedder: Arc<dyn EmbeddingProvider>,
    records: RwLock<Option<HashMap<String, StoredRecord>>>,
}

impl MemoryStore {
    /// Create an empty store for the schema, with no collection yet.
    pub fn new(schema: CollectionSchema, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { schema, embedder, records: RwLock::new(None) }
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn schema(&self) -> &CollectionSchema {
        &self.schema
    }

    async fn collection_exists(&self) -> Result<bool> {
        Ok(self.records.read().await.is_some())
    }

    async fn ensure_collection(&self) -> Result<()> {
        let mut records = self.records.write().await;
        if records.is_none() {
            *records = Some(HashMap::new());
        }
        Ok(())
    }

    async fn delete_collection(&self) -> Result<()> {
        *self.records.write().await = None;
        Ok(())
    }

    async fn add_documents(&self, documents: &[Document]) -> Result<Vec<String>> {
        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let mut guard = self.records.write().await;
        let store = guard.as_mut().ok_or_else(|| RagError::Store {
            backend: "memory".to_string(),
            message: format!("collection '{}' does not exist", self.schema.collection),
        })?;

        let mut ids = Vec::with_capacity(documents.len());
        for (document, embedding) in documents.iter().zip(embeddings) {
            let record = document.to_record(&self.schema.text_property);
            let id = content_id(&record);
            store.insert(id.clone(), StoredRecord { record, embedding });
            ids.push(id);
        }
        Ok(ids)
    }

    async fn search(&self, query: &str, options: &HybridOptions) -> Result<Vec<Document>> {
        let embedding = match &options.vector {
            Some(vector) => vector.clone(),
            None => self.embedder.embed(query).await?,
        };

        let guard = self.records.read().await;
        let store = guard.as_ref().ok_or_else(|| RagError::Store {
            backend: "memory".to_string(),
            message: format!("collection '{}' does not exist", self.schema.collection),
        })?;

        let mut scored: Vec<(f32, &String, &StoredRecord)> = store
            .iter()
            .map(|(id, stored)| (cosine_similarity(&stored.embedding, &embedding), id, stored))
            .collect();
        // Secondary sort on id keeps ties deterministic.
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal).then(a.1.cmp(b.1))
        });
        scored.truncate(SEARCH_LIMIT);

        Ok(scored
            .into_iter()
            .map(|(_, _, stored)| {
                Document::from_record(&self.schema.text_property, stored.record.clone())
            })
            .collect())
    }
}
