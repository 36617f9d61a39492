//! Confirmation-letter and event-report handlers.
//!
//! Both kinds share one implementation; the route wrappers pin the
//! [`DocumentKind`] so a letter route can never read or mutate a report row
//! and vice versa.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    core::{approval, document as core},
    entities::document::{ApprovalStatus, DocumentKind, Model},
    errors::{Error, Result},
    identity::Actor,
};

use super::AppState;

/// Request body for creating or editing a document.
#[derive(Debug, Deserialize)]
pub struct DocumentBody {
    /// Name of the event the document concerns
    pub event_name: String,
    /// Date of the event
    pub event_date: NaiveDate,
    /// Free-text category or description
    pub description: String,
    /// Optional external link
    #[serde(default)]
    pub external_link: Option<String>,
}

impl From<DocumentBody> for core::DocumentFields {
    fn from(body: DocumentBody) -> Self {
        Self {
            event_name: body.event_name,
            event_date: body.event_date,
            description: body.description,
            external_link: body.external_link,
        }
    }
}

/// Query parameters accepted by the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Restrict to events in this calendar year
    pub year: Option<i32>,
    /// Restrict to events in this calendar month (1-12)
    pub month: Option<u32>,
    /// Restrict to this lifecycle state
    pub status: Option<ApprovalStatus>,
    /// Substring match on the event name
    pub search: Option<String>,
}

impl From<ListParams> for core::DocumentFilter {
    fn from(params: ListParams) -> Self {
        Self {
            year: params.year,
            month: params.month,
            status: params.status,
            search: params.search,
        }
    }
}

/// Fetches a document and checks it belongs to the kind the route serves.
async fn get_of_kind(state: &AppState, kind: DocumentKind, id: i64) -> Result<Model> {
    let document = core::get_document(&state.db, id)
        .await?
        .ok_or_else(|| Error::not_found("document", id))?;
    if document.kind == kind {
        Ok(document)
    } else {
        Err(Error::not_found("document", id))
    }
}

async fn list_impl(
    state: AppState,
    kind: DocumentKind,
    params: ListParams,
) -> Result<Json<Vec<Model>>> {
    let rows = core::list_documents(&state.db, kind, &params.into()).await?;
    Ok(Json(rows))
}

async fn create_impl(
    state: AppState,
    kind: DocumentKind,
    actor: Actor,
    body: DocumentBody,
) -> Result<(StatusCode, Json<Model>)> {
    let model = core::create_document(
        &state.db,
        state.store.as_ref(),
        &actor,
        kind,
        body.into(),
        None,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(model)))
}

async fn update_impl(
    state: AppState,
    kind: DocumentKind,
    actor: Actor,
    id: i64,
    body: DocumentBody,
) -> Result<Json<Model>> {
    get_of_kind(&state, kind, id).await?;
    let model = core::update_document(
        &state.db,
        state.store.as_ref(),
        &actor,
        id,
        body.into(),
        None,
    )
    .await?;
    Ok(Json(model))
}

async fn delete_impl(
    state: AppState,
    kind: DocumentKind,
    actor: Actor,
    id: i64,
) -> Result<StatusCode> {
    get_of_kind(&state, kind, id).await?;
    core::delete_document(&state.db, state.store.as_ref(), &actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn approve_impl(
    state: AppState,
    kind: DocumentKind,
    actor: Actor,
    id: i64,
) -> Result<Json<Model>> {
    // Refuse non-reviewers before touching the row so they cannot probe ids,
    // and pin the kind before the transition so a letter route can never
    // approve a report.
    if !actor.role.is_reviewer() {
        return Err(Error::unauthorized("approve documents"));
    }
    get_of_kind(&state, kind, id).await?;
    let model = approval::approve_document(&state.db, &actor, id).await?;
    Ok(Json(model))
}

async fn reject_impl(
    state: AppState,
    kind: DocumentKind,
    actor: Actor,
    id: i64,
) -> Result<Json<Model>> {
    if !actor.role.is_reviewer() {
        return Err(Error::unauthorized("reject documents"));
    }
    get_of_kind(&state, kind, id).await?;
    let model = approval::reject_document(&state.db, &actor, id).await?;
    Ok(Json(model))
}

async fn upload_impl(
    state: AppState,
    kind: DocumentKind,
    actor: Actor,
    id: i64,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Model>> {
    get_of_kind(&state, kind, id).await?;

    let file_name = headers
        .get("x-file-name")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("upload.bin");
    if body.is_empty() {
        return Err(Error::validation("file", "upload is empty"));
    }

    let model =
        core::attach_file(&state.db, state.store.as_ref(), &actor, id, file_name, &body).await?;
    Ok(Json(model))
}

async fn download_impl(
    state: AppState,
    kind: DocumentKind,
    _actor: Actor,
    id: i64,
) -> Result<Response> {
    let document = get_of_kind(&state, kind, id).await?;
    let locator = document
        .stored_file
        .ok_or_else(|| Error::not_found("stored file for document", id))?;
    let bytes = state.store.load(&locator).await?;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        bytes,
    )
        .into_response())
}

macro_rules! kind_routes {
    ($kind:expr,
     $list:ident, $create:ident, $get:ident, $update:ident, $delete:ident,
     $approve:ident, $reject:ident, $upload:ident, $download:ident) => {
        /// Lists documents of this kind, newest first, honoring the filters.
        pub async fn $list(
            State(state): State<AppState>,
            _actor: Actor,
            Query(params): Query<ListParams>,
        ) -> Result<Json<Vec<Model>>> {
            list_impl(state, $kind, params).await
        }

        /// Creates a pending document of this kind owned by the caller.
        pub async fn $create(
            State(state): State<AppState>,
            actor: Actor,
            Json(body): Json<DocumentBody>,
        ) -> Result<(StatusCode, Json<Model>)> {
            create_impl(state, $kind, actor, body).await
        }

        /// Fetches one document of this kind.
        pub async fn $get(
            State(state): State<AppState>,
            _actor: Actor,
            Path(id): Path<i64>,
        ) -> Result<Json<Model>> {
            get_of_kind(&state, $kind, id).await.map(Json)
        }

        /// Applies an owner edit, re-queueing the document for review.
        pub async fn $update(
            State(state): State<AppState>,
            actor: Actor,
            Path(id): Path<i64>,
            Json(body): Json<DocumentBody>,
        ) -> Result<Json<Model>> {
            update_impl(state, $kind, actor, id, body).await
        }

        /// Deletes the document and its stored file.
        pub async fn $delete(
            State(state): State<AppState>,
            actor: Actor,
            Path(id): Path<i64>,
        ) -> Result<StatusCode> {
            delete_impl(state, $kind, actor, id).await
        }

        /// Reviewer approval.
        pub async fn $approve(
            State(state): State<AppState>,
            actor: Actor,
            Path(id): Path<i64>,
        ) -> Result<Json<Model>> {
            approve_impl(state, $kind, actor, id).await
        }

        /// Reviewer rejection.
        pub async fn $reject(
            State(state): State<AppState>,
            actor: Actor,
            Path(id): Path<i64>,
        ) -> Result<Json<Model>> {
            reject_impl(state, $kind, actor, id).await
        }

        /// Attaches or replaces the stored file (owner edit).
        pub async fn $upload(
            State(state): State<AppState>,
            actor: Actor,
            Path(id): Path<i64>,
            headers: HeaderMap,
            body: Bytes,
        ) -> Result<Json<Model>> {
            upload_impl(state, $kind, actor, id, headers, body).await
        }

        /// Streams back the stored file.
        pub async fn $download(
            State(state): State<AppState>,
            actor: Actor,
            Path(id): Path<i64>,
        ) -> Result<Response> {
            download_impl(state, $kind, actor, id).await
        }
    };
}

kind_routes!(
    DocumentKind::ConfirmationLetter,
    list_letters,
    create_letter,
    get_letter,
    update_letter,
    delete_letter,
    approve_letter,
    reject_letter,
    upload_letter_file,
    download_letter_file
);

kind_routes!(
    DocumentKind::EventReport,
    list_reports,
    create_report,
    get_report,
    update_report,
    delete_report,
    approve_report,
    reject_report,
    upload_report_file,
    download_report_file
);
