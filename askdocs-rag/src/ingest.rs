//! Ingestion entry points: load, split, insert.

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::loader::{PdfDirectoryLoader, WebPageLoader};
use crate::splitter::TextSplitter;
use crate::store::DocumentStore;

/// Characters per chunk.
pub const CHUNK_SIZE: usize = 500;
/// Characters shared between adjacent chunks.
pub const CHUNK_OVERLAP: usize = 50;

/// Load a web page, split it, and insert the chunks into the store.
///
/// Returns the stored identifiers in chunk order.
pub async fn ingest_webpage(url: &str, store: &dyn DocumentStore) -> Result<Vec<String>> {
    let document = WebPageLoader::new(url).load().await?;
    let splits = TextSplitter::new(CHUNK_SIZE, CHUNK_OVERLAP)?
        .split_documents(std::slice::from_ref(&document));

    store.ensure_collection().await?;
    let ids = store.add_documents(&splits).await?;

    info!(url, chunks = ids.len(), "loaded web page into vector store");
    Ok(ids)
}

/// Load every PDF in a directory, split them, and insert the chunks.
///
/// Returns the stored identifiers in chunk order.
pub async fn ingest_pdf_directory(
    path: impl AsRef<Path>,
    store: &dyn DocumentStore,
) -> Result<Vec<String>> {
    let path = path.as_ref();
    let documents = PdfDirectoryLoader::new(path).load()?;
    let splits = TextSplitter::new(CHUNK_SIZE, CHUNK_OVERLAP)?.split_documents(&documents);

    store.ensure_collection().await?;
    let ids = store.add_documents(&splits).await?;

    info!(path = %path.display(), chunks = ids.len(), "loaded pdfs into vector store");
    Ok(ids)
}
