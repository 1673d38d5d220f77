//! Route registration and handlers.

use std::convert::Infallible;

use askdocs_core::CoreError;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use futures::{Stream, StreamExt, future};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::AppState;
use crate::schemas::{AgentBatchInput, AgentInput, BatchOutput, Output, RagBatchInput, RagInput};

/// Build the application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(redirect_root_to_docs))
        .route("/docs", get(docs))
        .route("/basic-rag/invoke", post(rag_invoke))
        .route("/basic-rag/stream", post(rag_stream))
        .route("/basic-rag/batch", post(rag_batch))
        .route("/basic-agent/invoke", post(agent_invoke))
        .route("/basic-agent/stream", post(agent_stream))
        .route("/basic-agent/batch", post(agent_batch))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Chain failures surface as a generic server error.
struct ApiError(CoreError);

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}

async fn redirect_root_to_docs() -> Redirect {
    Redirect::to("/docs")
}

async fn docs() -> Html<&'static str> {
    Html(include_str!("docs.html"))
}

async fn rag_invoke(
    State(state): State<AppState>,
    Json(body): Json<RagInput>,
) -> Result<Json<Output>, ApiError> {
    let output = state.rag_chain.answer(&body.input).await?;
    Ok(Json(Output { output }))
}

async fn rag_stream(
    State(state): State<AppState>,
    Json(body): Json<RagInput>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    sse_from(state.rag_chain.clone().answer_stream(body.input))
}

async fn rag_batch(
    State(state): State<AppState>,
    Json(body): Json<RagBatchInput>,
) -> Result<Json<BatchOutput>, ApiError> {
    let outputs =
        future::try_join_all(body.inputs.iter().map(|input| state.rag_chain.answer(input)))
            .await?;
    Ok(Json(BatchOutput { outputs }))
}

async fn agent_invoke(
    State(state): State<AppState>,
    Json(body): Json<AgentInput>,
) -> Result<Json<Output>, ApiError> {
    let output = state.agent.run(&body.history(), &body.input).await?;
    Ok(Json(Output { output }))
}

async fn agent_stream(
    State(state): State<AppState>,
    Json(body): Json<AgentInput>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    sse_from(state.agent.clone().run_stream(body.history(), body.input))
}

async fn agent_batch(
    State(state): State<AppState>,
    Json(body): Json<AgentBatchInput>,
) -> Result<Json<BatchOutput>, ApiError> {
    let outputs = future::try_join_all(body.inputs.iter().map(|input| {
        let agent = state.agent.clone();
        let history = input.history();
        async move { agent.run(&history, &input.input).await }
    }))
    .await?;
    Ok(Json(BatchOutput { outputs }))
}

/// Adapt a text-fragment stream to server-sent events: one `data` event
/// per fragment, an `error` event on failure, a terminal `end` event.
fn sse_from(
    mut fragments: std::pin::Pin<
        Box<dyn Stream<Item = askdocs_core::Result<String>> + Send>,
    >,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = async_stream::stream! {
        while let Some(fragment) = fragments.next().await {
            match fragment {
                Ok(text) => yield Ok(Event::default().data(text)),
                Err(e) => {
                    error!(error = %e, "stream failed");
                    yield Ok(Event::default().event("error").data(e.to_string()));
                    return;
                }
            }
        }
        yield Ok(Event::default().event("end").data(""));
    };
    Sse::new(events)
}
