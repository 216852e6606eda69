//! HTTP request handlers

use super::assets::{get_index_html, serve_asset};
use super::types::{ChatForm, ErrorResponse, HistoryResponse, StatusResponse};
use super::AppState;
use crate::routing::Reply;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use std::path::Path;
use tower_http::services::ServeDir;

/// Create the API router. `static_dir` is served under `/static`.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        // Chat page and message submission
        .route("/", get(serve_index).post(send_message))
        // Reset the conversation
        .route("/clear", post(clear_chat))
        // Visible transcript for the page
        .route("/api/history", get(get_history))
        // Page scripts and styles
        .route("/assets/*path", get(serve_asset))
        // Generated image
        .nest_service("/static", ServeDir::new(static_dir))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Page
// ============================================================

async fn serve_index() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - chat page not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Conversation
// ============================================================

/// Route one message. The work runs on its own task so a client
/// disconnect cannot abandon a model call halfway through an exchange.
async fn send_message(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> Result<Json<Reply>, AppError> {
    let router = state.router.clone();
    let reply = tokio::spawn(async move { router.handle(&form.user_input).await })
        .await
        .map_err(|e| AppError::Internal(format!("message handler aborted: {e}")))?;

    Ok(Json(reply))
}

async fn clear_chat(State(state): State<AppState>) -> Json<StatusResponse> {
    state.router.reset().await;
    Json(StatusResponse::ok())
}

async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        messages: state.router.visible().await,
    })
}

async fn get_version() -> &'static str {
    concat!("sakhi ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
