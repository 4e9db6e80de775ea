//! Scribe HTTP API
//!
//! Axum-based HTTP server for creating and listing notes.
//!
//! Architecture: each endpoint has a thin axum handler that delegates to a pure
//! inner function. The inner functions are directly testable without axum dispatch
//! machinery.
//!
//! Endpoints (all behind the auth gate):
//! - POST /notes — spell-correct and store a note for the caller
//! - GET  /notes — list the caller's notes, newest first
//!
//! Any other method on /notes answers 405 without looking at credentials.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use bytes::Bytes;
use scribe_core::{CreateNoteRequest, CredentialResolver, Identity, NoteStore, SpellChecker};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::Instrument;
use uuid::Uuid;

/// Shared state for all HTTP handlers
#[derive(Clone)]
pub struct HttpState {
    pub store: Arc<dyn NoteStore>,
    pub speller: Arc<dyn SpellChecker>,
    pub credentials: Arc<dyn CredentialResolver>,
}

/// Build the Axum router with all endpoints
pub fn build_router(state: Arc<HttpState>) -> Router {
    let notes = get(list_notes_handler)
        .post(create_note_handler)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_identity,
        ))
        // Registered after the gate so it stays ungated. Without it axum
        // answers HEAD with the GET handler.
        .head(method_not_allowed_handler)
        .fallback(method_not_allowed_handler);

    Router::new()
        .route("/notes", notes)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Start the HTTP server on `0.0.0.0:port`.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    state: Arc<HttpState>,
    port: u16,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Starting server on port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Standard HTTP error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            status: "error".to_string(),
        }
    }
}

fn error_body(msg: impl Into<String>) -> serde_json::Value {
    serde_json::json!(ErrorResponse::new(msg))
}

// ============================================================================
// Inner (directly testable) business logic functions
// ============================================================================

/// Inner create — decode, correct title then content, persist.
/// Nothing is stored unless both corrections succeed.
pub async fn create_note_inner(
    state: &HttpState,
    identity: Identity,
    body: &[u8],
) -> (StatusCode, serde_json::Value) {
    let request: CreateNoteRequest = match serde_json::from_slice(body) {
        Ok(req) => req,
        Err(e) => {
            tracing::error!("Error decoding request body: {}", e);
            return (StatusCode::BAD_REQUEST, error_body(e.to_string()));
        }
    };

    let user_id = identity.user_id;
    let mut note = request.into_new_note(identity);

    tracing::info!("Creating note for user {}", user_id);

    note.title = match state.speller.correct_text(&note.title).await {
        Ok(title) => title,
        Err(e) => {
            tracing::error!(user_id, speller = state.speller.name(), "Error correcting title: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body(format!("Error correcting title: {}", e)),
            );
        }
    };

    note.content = match state.speller.correct_text(&note.content).await {
        Ok(content) => content,
        Err(e) => {
            tracing::error!(user_id, speller = state.speller.name(), "Error correcting content: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body(format!("Error correcting content: {}", e)),
            );
        }
    };

    match state.store.create(note).await {
        Ok(created) => {
            tracing::info!(user_id, "Note created successfully: {}", created.id);
            (StatusCode::CREATED, serde_json::json!(created))
        }
        Err(e) => {
            tracing::error!(user_id, store = state.store.name(), "Error creating note: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, error_body(e.to_string()))
        }
    }
}

/// Inner list — the caller's notes, newest first.
pub async fn list_notes_inner(
    state: &HttpState,
    identity: Identity,
) -> (StatusCode, serde_json::Value) {
    let user_id = identity.user_id;
    tracing::info!("Fetching notes for user {}", user_id);

    match state.store.list_by_user(user_id).await {
        Ok(notes) => {
            tracing::info!("Successfully fetched {} notes for user {}", notes.len(), user_id);
            (StatusCode::OK, serde_json::json!(notes))
        }
        Err(e) => {
            tracing::error!(user_id, store = state.store.name(), "Error fetching notes: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, error_body(e.to_string()))
        }
    }
}

// ============================================================================
// Axum handler wrappers (thin — delegate to inner functions)
// ============================================================================

pub async fn create_note_handler(
    State(state): State<Arc<HttpState>>,
    Extension(identity): Extension<Identity>,
    body: Bytes,
) -> impl IntoResponse {
    let (status, body) = create_note_inner(&state, identity, &body).await;
    (status, Json(body))
}

pub async fn list_notes_handler(
    State(state): State<Arc<HttpState>>,
    Extension(identity): Extension<Identity>,
) -> impl IntoResponse {
    let (status, body) = list_notes_inner(&state, identity).await;
    (status, Json(body))
}

pub async fn method_not_allowed_handler(request: Request) -> impl IntoResponse {
    tracing::error!("Method not allowed: {}", request.method());
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
}

// ============================================================================
// Middleware
// ============================================================================

/// Log every incoming request and run it inside a span carrying a request id.
pub async fn log_request(request: Request, next: Next) -> Response {
    let span = tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        path = %request.uri().path(),
    );
    span.in_scope(|| {
        tracing::info!("Received request: {} {}", request.method(), request.uri().path())
    });
    next.run(request).instrument(span).await
}

// ============================================================================
// Unit Tests — call inner functions directly
// ============================================================================
