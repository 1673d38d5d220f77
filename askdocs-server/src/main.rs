//! askdocs server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use askdocs_core::Llm;
use askdocs_model::OpenAIChatModel;
use askdocs_server::{AppState, chains, routes};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let model: Arc<dyn Llm> = Arc::new(OpenAIChatModel::from_env()?);
    let state = AppState {
        rag_chain: Arc::new(chains::basic_rag_chain(model.clone())?),
        agent: Arc::new(chains::basic_agent(model)?),
    };

    let addr: SocketAddr = "0.0.0.0:8000".parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("askdocs listening on http://{addr}");
    axum::serve(listener, routes::app_router(state)).await?;
    Ok(())
}
