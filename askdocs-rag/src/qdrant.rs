//! Qdrant-backed vector model.
//!
//! [`VectorModel`] implements [`DocumentStore`] over the
//! [qdrant-client](https://docs.rs/qdrant-client) gRPC SDK. Documents are
//! stored as flat payload records with a named dense vector (cosine) and a
//! named sparse vector for the keyword side; searches run the store's own
//! hybrid query with server-side fusion.

use std::sync::Arc;

use async_trait::async_trait;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, CreateFieldIndexCollectionBuilder, Distance, FieldType, Fusion,
    Modifier, NamedVectors, PointStruct, PrefetchQueryBuilder, Query, QueryPointsBuilder,
    SparseVectorParamsBuilder, SparseVectorsConfigBuilder, UpsertPointsBuilder,
    Value as QdrantValue, Vector, VectorParamsBuilder, VectorsConfigBuilder,
};
use qdrant_client::{Payload, Qdrant};
use serde_json::Value;
use tracing::debug;

use crate::config::StoreConfig;
use crate::document::{Document, PropertyRecord, content_id};
use crate::embedding::{EmbeddingProvider, OpenAIEmbedding};
use crate::error::{RagError, Result};
use crate::schema::{CollectionSchema, DataType};
use crate::sparse;
use crate::store::{DocumentStore, FusionMethod, HybridOptions, PropertyWeight, SEARCH_LIMIT};

/// Name of the dense vector on each point.
const DENSE_VECTOR: &str = "dense";
/// Name of the sparse keyword vector on each point.
const SPARSE_VECTOR: &str = "sparse";
/// How many candidates each hybrid branch feeds into fusion.
const PREFETCH_LIMIT: u64 = 20;

/// A vector model of a document collection, backed by Qdrant.
///
/// Every operation opens a scoped connection, uses it, and drops it on
/// exit; there is no pooling. Construction fails fast when connection or
/// credential configuration is missing.
pub struct VectorModel {
    config: StoreConfig,
    schema: CollectionSchema,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl VectorModel {
    /// Create a model for the given schema from environment configuration.
    pub fn new(schema: CollectionSchema) -> Result<Self> {
        let config = StoreConfig::from_env()?;
        Self::with_config(config, schema)
    }

    /// Create a model from explicit configuration.
    pub fn with_config(config: StoreConfig, schema: CollectionSchema) -> Result<Self> {
        let embedder = Arc::new(OpenAIEmbedding::new(config.openai_api_key.clone())?);
        Ok(Self { config, schema, embedder })
    }

    /// Replace the embedding provider (the vectorization strategy).
    pub fn with_embedding(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = embedder;
        self
    }

    /// Open a connection for the duration of one operation.
    fn connect(&self) -> Result<Qdrant> {
        debug!(url = %self.config.url, environment = %self.config.environment, "connecting to qdrant");
        Qdrant::from_url(&self.config.url)
            .api_key(self.config.api_key.clone())
            .build()
            .map_err(Self::map_err)
    }

    fn map_err(e: qdrant_client::QdrantError) -> RagError {
        RagError::Store { backend: "qdrant".to_string(), message: e.to_string() }
    }

    fn default_targets(&self) -> Vec<PropertyWeight> {
        vec![PropertyWeight::new(self.schema.text_property.clone(), 1.0)]
    }

    fn record_to_payload(record: &PropertyRecord) -> Payload {
        let map: serde_json::Map<String, Value> =
            record.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        Payload::try_from(Value::Object(map)).unwrap_or_default()
    }

    fn payload_to_record(
        payload: impl IntoIterator<Item = (String, QdrantValue)>,
    ) -> PropertyRecord {
        payload
            .into_iter()
            .filter_map(|(key, value)| {
                let json = match value.kind {
                    Some(Kind::StringValue(s)) => Value::String(s),
                    Some(Kind::IntegerValue(i)) => Value::from(i),
                    Some(Kind::DoubleValue(d)) => Value::from(d),
                    Some(Kind::BoolValue(b)) => Value::Bool(b),
                    _ => return None,
                };
                Some((key, json))
            })
            .collect()
    }
}

#[async_trait]
impl DocumentStore for VectorModel {
    fn schema(&self) -> &CollectionSchema {
        &self.schema
    }

    async fn collection_exists(&self) -> Result<bool> {
        let client = self.connect()?;
        client.collection_exists(&self.schema.collection).await.map_err(Self::map_err)
    }

    async fn ensure_collection(&self) -> Result<()> {
        if self.collection_exists().await? {
            debug!(collection = %self.schema.collection, "collection already exists, skipping creation");
            return Ok(());
        }

        let client = self.connect()?;

        let mut dense = VectorsConfigBuilder::default();
        dense.add_named_vector_params(
            DENSE_VECTOR,
            VectorParamsBuilder::new(self.embedder.dimensions() as u64, Distance::Cosine),
        );
        let mut sparse = SparseVectorsConfigBuilder::default();
        sparse.add_named_vector_params(
            SPARSE_VECTOR,
            SparseVectorParamsBuilder::default().modifier(Modifier::Idf),
        );

        client
            .create_collection(
                CreateCollectionBuilder::new(&self.schema.collection)
                    .vectors_config(dense)
                    .sparse_vectors_config(sparse),
            )
            .await
            .map_err(Self::map_err)?;

        for property in &self.schema.properties {
            let field_type = match property.data_type {
                DataType::Text => FieldType::Text,
                DataType::Int => FieldType::Integer,
            };
            client
                .create_field_index(CreateFieldIndexCollectionBuilder::new(
                    &self.schema.collection,
                    &property.name,
                    field_type,
                ))
                .await
                .map_err(Self::map_err)?;
        }

        debug!(collection = %self.schema.collection, "created collection with declared schema");
        Ok(())
    }

    async fn delete_collection(&self) -> Result<()> {
        if !self.collection_exists().await? {
            return Ok(());
        }
        let client = self.connect()?;
        client.delete_collection(&self.schema.collection).await.map_err(Self::map_err)?;
        debug!(collection = %self.schema.collection, "deleted collection");
        Ok(())
    }

    async fn add_documents(&self, documents: &[Document]) -> Result<Vec<String>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<PropertyRecord> =
            documents.iter().map(|d| d.to_record(&self.schema.text_property)).collect();
        let ids: Vec<String> = records.iter().map(content_id).collect();

        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let points: Vec<PointStruct> = records
            .iter()
            .zip(ids.iter())
            .zip(embeddings)
            .map(|((record, id), embedding)| {
                let keywords = sparse::encode_record(record, &self.schema);
                let mut vectors = NamedVectors::default()
                    .add_vector(DENSE_VECTOR, Vector::new_dense(embedding));
                if !keywords.is_empty() {
                    vectors = vectors.add_vector(
                        SPARSE_VECTOR,
                        Vector::new_sparse(keywords.indices, keywords.values),
                    );
                }
                PointStruct::new(id.clone(), vectors, Self::record_to_payload(record))
            })
            .collect();

        let client = self.connect()?;
        client
            .upsert_points(UpsertPointsBuilder::new(&self.schema.collection, points).wait(true))
            .await
            .map_err(Self::map_err)?;

        debug!(collection = %self.schema.collection, count = ids.len(), "upserted documents");
        Ok(ids)
    }

    async fn search(&self, query: &str, options: &HybridOptions) -> Result<Vec<Document>> {
        let dense = match &options.vector {
            Some(vector) => vector.clone(),
            None => self.embedder.embed(query).await?,
        };
        let targets = options.target_properties.clone().unwrap_or_else(|| self.default_targets());
        let keywords = sparse::encode_query(query, &targets);
        let fusion = match options.fusion {
            FusionMethod::ReciprocalRank => Fusion::Rrf,
            FusionMethod::RelativeScore => Fusion::Dbsf,
        };

        let mut request = QueryPointsBuilder::new(&self.schema.collection)
            .add_prefetch(
                PrefetchQueryBuilder::default()
                    .query(Query::new_nearest(dense))
                    .using(DENSE_VECTOR)
                    .limit(PREFETCH_LIMIT),
            )
            .limit(SEARCH_LIMIT as u64)
            .with_payload(true);

        if !keywords.is_empty() {
            let pairs: Vec<(u32, f32)> =
                keywords.indices.into_iter().zip(keywords.values).collect();
            request = request.add_prefetch(
                PrefetchQueryBuilder::default()
                    .query(Query::new_nearest(pairs.as_slice()))
                    .using(SPARSE_VECTOR)
                    .limit(PREFETCH_LIMIT),
            );
        }

        let client = self.connect()?;
        let response =
            client.query(request.query(Query::new_fusion(fusion))).await.map_err(Self::map_err)?;

        let documents = response
            .result
            .into_iter()
            .map(|scored| {
                let record = Self::payload_to_record(scored.payload);
                Document::from_record(&self.schema.text_property, record)
            })
            .collect();

        Ok(documents)
    }
}
