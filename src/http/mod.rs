//! HTTP interface - router, shared state, and error mapping.
//!
//! Handlers are thin: they extract the caller's [`crate::identity::Actor`]
//! from the identity headers, deserialize the body, call one core function,
//! and serialize the result. Every error variant maps to one status code
//! here and nowhere else.

/// Budget target, transaction, and overview handlers
pub mod budget;
/// Confirmation-letter and event-report handlers
pub mod documents;
/// Caller identity extraction from the upstream proxy's headers
pub mod extract;
/// Inventory and condition-history handlers
pub mod inventory;
/// Letter preview and generation handlers
pub mod letters;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::{errors::Error, render::LetterRenderer, storage::DocumentStore};

/// Shared state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all repository operations
    pub db: DatabaseConnection,
    /// Document store holding uploads and generated letters
    pub store: Arc<dyn DocumentStore>,
    /// Renderer used for letter preview and generation
    pub renderer: Arc<dyn LetterRenderer>,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Confirmation letters
        .route(
            "/letters",
            get(documents::list_letters).post(documents::create_letter),
        )
        .route("/letters/preview", post(letters::preview))
        .route("/letters/generate", post(letters::generate))
        .route(
            "/letters/:id",
            get(documents::get_letter)
                .put(documents::update_letter)
                .delete(documents::delete_letter),
        )
        .route("/letters/:id/approve", post(documents::approve_letter))
        .route("/letters/:id/reject", post(documents::reject_letter))
        .route(
            "/letters/:id/file",
            put(documents::upload_letter_file).get(documents::download_letter_file),
        )
        // Event reports
        .route(
            "/reports",
            get(documents::list_reports).post(documents::create_report),
        )
        .route(
            "/reports/:id",
            get(documents::get_report)
                .put(documents::update_report)
                .delete(documents::delete_report),
        )
        .route("/reports/:id/approve", post(documents::approve_report))
        .route("/reports/:id/reject", post(documents::reject_report))
        .route(
            "/reports/:id/file",
            put(documents::upload_report_file).get(documents::download_report_file),
        )
        // Inventory
        .route(
            "/inventory",
            get(inventory::list_items).post(inventory::create_item),
        )
        .route(
            "/inventory/:id",
            get(inventory::get_item)
                .put(inventory::update_item)
                .delete(inventory::delete_item),
        )
        .route("/inventory/:id/history", get(inventory::item_history))
        // Budget
        .route("/budget", post(budget::set_target))
        .route("/budget/overview/:year", get(budget::overview))
        .route(
            "/budget/transactions",
            get(budget::list_transactions).post(budget::record_transaction),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthorized { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Storage { .. }
            | Self::Render { .. }
            | Self::Config { .. }
            | Self::Database(_)
            | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
