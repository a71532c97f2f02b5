//! HTTP/SSE transport for MCP

use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::error::ServerResult;
use crate::protocol::{McpMessage, RequestHandler};

/// Shared state for HTTP handlers
struct AppState {
    handler: RequestHandler,
}

/// HTTP transport for MCP protocol
pub struct HttpTransport {
    handler: RequestHandler,
    port: u16,
}

impl HttpTransport {
    pub fn new(handler: RequestHandler, port: u16) -> Self {
        Self { handler, port }
    }

    /// Bind and serve until the process is stopped
    pub async fn run(self) -> ServerResult<()> {
        let app = router(self.handler);

        let addr = format!("0.0.0.0:{}", self.port);
        info!("Starting MCP HTTP server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Build the MCP router around a request handler
pub fn router(handler: RequestHandler) -> Router {
    let state = Arc::new(AppState { handler });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/mcp", post(handle_mcp_request))
        .route("/mcp/sse", get(handle_mcp_sse))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

/// Handle one JSON-RPC message; notifications are acknowledged with 202
async fn handle_mcp_request(
    State(state): State<Arc<AppState>>,
    Json(message): Json<McpMessage>,
) -> Response {
    debug!("HTTP request: {:?}", message.method);

    match state.handler.handle(message) {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn handle_mcp_sse(
    State(_state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("SSE connection established");

    let stream = async_stream::stream! {
        yield Ok(Event::default().event("ready").data(r#"{"status":"ready"}"#));
    };

    Sse::new(stream)
}
