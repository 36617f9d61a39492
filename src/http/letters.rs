//! Letter preview and generation handlers.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    core::letter as core,
    core::letter::LetterDraft,
    entities::document::Model,
    errors::Result,
    identity::Actor,
};

use super::AppState;

/// Renders the letter and returns the bytes without persisting anything.
pub async fn preview(
    State(state): State<AppState>,
    _actor: Actor,
    Json(letter): Json<LetterDraft>,
) -> Result<Response> {
    let bytes = core::preview_letter(state.renderer.as_ref(), &letter)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        bytes,
    )
        .into_response())
}

/// Renders, stores, and commits an approved confirmation letter
/// (reviewer only).
pub async fn generate(
    State(state): State<AppState>,
    actor: Actor,
    Json(letter): Json<LetterDraft>,
) -> Result<(StatusCode, Json<Model>)> {
    let (model, _bytes) = core::generate_letter(
        &state.db,
        state.store.as_ref(),
        state.renderer.as_ref(),
        &actor,
        &letter,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(model)))
}
