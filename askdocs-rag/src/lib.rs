//! # askdocs-rag
//!
//! The retrieval layer of the askdocs QA service: documents with typed
//! collection schemas, deterministic content-derived identifiers, text
//! splitting, document ingestion from web pages and PDF directories, and
//! hybrid (keyword + vector) search over a Qdrant collection.
//!
//! The store contract is [`DocumentStore`]; [`VectorModel`] implements it
//! over Qdrant and [`MemoryStore`] implements it in memory for tests and
//! development. [`HybridRetriever`] adapts a store to the "retrieve
//! relevant documents for a query" interface consumed by chains, and
//! [`RetrieverTool`] exposes a retriever to agents.

pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod ingest;
pub mod loader;
pub mod memory;
pub mod qdrant;
pub mod retriever;
pub mod schema;
pub mod sparse;
pub mod splitter;
pub mod store;
pub mod tool;

pub use config::StoreConfig;
pub use document::{Document, PropertyRecord, content_id};
pub use embedding::{EmbeddingProvider, OpenAIEmbedding};
pub use error::{RagError, Result};
pub use ingest::{CHUNK_OVERLAP, CHUNK_SIZE, ingest_pdf_directory, ingest_webpage};
pub use loader::{PdfDirectoryLoader, WebPageLoader};
pub use memory::MemoryStore;
pub use qdrant::VectorModel;
pub use retriever::HybridRetriever;
pub use schema::{CollectionSchema, DataType, Property};
pub use splitter::TextSplitter;
pub use store::{DocumentStore, FusionMethod, HybridOptions, PropertyWeight, SEARCH_LIMIT};
pub use tool::RetrieverTool;
