//! Ingestion CLI: load web pages and PDF directories into the store.

use std::path::PathBuf;

use askdocs_rag::{CollectionSchema, VectorModel, ingest_pdf_directory, ingest_webpage};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ingest", about = "Load documents into the askdocs vector store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a web page into the web documents collection
    Web {
        /// URL of the page to load
        url: String,
    },
    /// Load a directory of PDF files into the PDF documents collection
    Pdfs {
        /// Directory containing the PDF files
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let ids = match cli.command {
        Command::Web { url } => {
            let store = VectorModel::new(CollectionSchema::web_documents())?;
            ingest_webpage(&url, &store).await?
        }
        Command::Pdfs { dir } => {
            let store = VectorModel::new(CollectionSchema::pdf_documents())?;
            ingest_pdf_directory(&dir, &store).await?
        }
    };

    println!("stored {} chunks", ids.len());
    Ok(())
}
