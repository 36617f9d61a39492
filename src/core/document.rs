//! Approvable-document business logic - creation, owner edits, list filters,
//! and stored-file sequencing.
//!
//! File operations are ordered so a database row never references a file that
//! does not exist: uploads are stored before the row is committed, and on
//! replacement or deletion the old file is only removed after the row no
//! longer points at it.

use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, warn};

use crate::{
    entities::{
        Document,
        document::{self, ApprovalStatus, DocumentKind},
    },
    errors::{Error, Result},
    identity::Actor,
    storage::DocumentStore,
};

/// Descriptive fields supplied when creating or editing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFields {
    /// Name of the event the document concerns
    pub event_name: String,
    /// Date of the event
    pub event_date: NaiveDate,
    /// Free-text category or description
    pub description: String,
    /// Optional external link
    pub external_link: Option<String>,
}

/// An uploaded file accompanying a create or edit.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Original file name as given by the uploader
    pub file_name: String,
    /// Raw file content
    pub bytes: Vec<u8>,
}

/// Optional list filters; absent filters are no-ops and present ones combine
/// with AND semantics.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    /// Restrict to events in this calendar year
    pub year: Option<i32>,
    /// Restrict to events in this calendar month (1-12)
    pub month: Option<u32>,
    /// Restrict to this lifecycle state
    pub status: Option<ApprovalStatus>,
    /// Case-insensitive substring match on the event name
    pub search: Option<String>,
}

fn validate_fields(fields: &DocumentFields) -> Result<()> {
    if fields.event_name.trim().is_empty() {
        return Err(Error::validation("event_name", "cannot be empty"));
    }
    if fields.description.trim().is_empty() {
        return Err(Error::validation("description", "cannot be empty"));
    }
    Ok(())
}

fn month_start(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::validation("month", format!("{month} is not a calendar month")))
}

/// Creates a new document in `pending`, owned by the acting caller.
///
/// When an upload accompanies the creation, the file is stored first and the
/// row committed after, so a storage failure leaves no row behind.
pub async fn create_document(
    db: &DatabaseConnection,
    store: &dyn DocumentStore,
    actor: &Actor,
    kind: DocumentKind,
    fields: DocumentFields,
    upload: Option<Upload>,
) -> Result<document::Model> {
    validate_fields(&fields)?;

    let stored_file = match upload {
        Some(upload) => Some(
            store
                .store(&upload.bytes, kind.storage_category(), &upload.file_name)
                .await?,
        ),
        None => None,
    };

    let document = document::ActiveModel {
        kind: Set(kind),
        owner_user_id: Set(actor.user_id.clone()),
        event_name: Set(fields.event_name.trim().to_string()),
        event_date: Set(fields.event_date),
        description: Set(fields.description.trim().to_string()),
        external_link: Set(fields.external_link),
        stored_file: Set(stored_file),
        status: Set(ApprovalStatus::Pending),
        approved_at: Set(None),
        rejected_at: Set(None),
        approved_by: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let result = document.insert(db).await?;
    info!(
        "Created document {} ({:?}) for user {}",
        result.id, result.kind, actor.user_id
    );
    Ok(result)
}

/// Retrieves a document by its unique ID, returning None if it doesn't exist.
pub async fn get_document(
    db: &DatabaseConnection,
    document_id: i64,
) -> Result<Option<document::Model>> {
    Document::find_by_id(document_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists documents of one kind, newest first, applying the given filters.
///
/// Year and month constrain the event date; a month given without a year
/// matches that month across all years.
pub async fn list_documents(
    db: &DatabaseConnection,
    kind: DocumentKind,
    filter: &DocumentFilter,
) -> Result<Vec<document::Model>> {
    let mut query = Document::find().filter(document::Column::Kind.eq(kind));

    if let Some(year) = filter.year {
        let (start, end) = match filter.month {
            Some(month) => {
                let start = month_start(year, month)?;
                let end = if month == 12 {
                    month_start(year + 1, 1)?
                } else {
                    month_start(year, month + 1)?
                };
                (start, end)
            }
            None => (month_start(year, 1)?, month_start(year + 1, 1)?),
        };
        query = query
            .filter(document::Column::EventDate.gte(start))
            .filter(document::Column::EventDate.lt(end));
    } else if let Some(month) = filter.month {
        // Validated here even though the restriction is applied after the
        // fetch below; a month alone cannot be expressed as a date range.
        month_start(2000, month)?;
    }

    if let Some(status) = filter.status {
        query = query.filter(document::Column::Status.eq(status));
    }
    if let Some(search) = filter.search.as_deref() {
        query = query.filter(document::Column::EventName.contains(search));
    }

    let mut rows = query
        .order_by_desc(document::Column::CreatedAt)
        .order_by_desc(document::Column::Id)
        .all(db)
        .await?;

    if filter.year.is_none() {
        if let Some(month) = filter.month {
            rows.retain(|row| row.event_date.month() == month);
        }
    }

    Ok(rows)
}

/// Applies an owner edit, re-queueing the document for review.
///
/// Only the owning submitter may edit, and only while the document is not
/// approved; an approved document is immutable to its submitter. The edit
/// resets the status to `pending` and clears both timestamps and the approver
/// reference. A replacement upload is stored before the row is committed; the
/// superseded file is removed afterwards.
pub async fn update_document(
    db: &DatabaseConnection,
    store: &dyn DocumentStore,
    actor: &Actor,
    document_id: i64,
    fields: DocumentFields,
    upload: Option<Upload>,
) -> Result<document::Model> {
    validate_fields(&fields)?;

    let document = Document::find_by_id(document_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("document", document_id))?;

    if document.owner_user_id != actor.user_id {
        return Err(Error::unauthorized("edit a document owned by someone else"));
    }
    if document.status == ApprovalStatus::Approved {
        return Err(Error::unauthorized("edit an approved document"));
    }

    let replacement = match upload {
        Some(upload) => Some(
            store
                .store(
                    &upload.bytes,
                    document.kind.storage_category(),
                    &upload.file_name,
                )
                .await?,
        ),
        None => None,
    };
    let superseded = if replacement.is_some() {
        document.stored_file.clone()
    } else {
        None
    };

    let mut active: document::ActiveModel = document.into();
    active.event_name = Set(fields.event_name.trim().to_string());
    active.event_date = Set(fields.event_date);
    active.description = Set(fields.description.trim().to_string());
    active.external_link = Set(fields.external_link);
    if let Some(locator) = replacement {
        active.stored_file = Set(Some(locator));
    }
    active.status = Set(ApprovalStatus::Pending);
    active.approved_at = Set(None);
    active.rejected_at = Set(None);
    active.approved_by = Set(None);
    let updated = active.update(db).await?;

    // The row no longer references the old file; removing it afterwards can
    // at worst orphan a file, never dangle a reference.
    if let Some(old) = superseded {
        if let Err(e) = store.delete(&old).await {
            warn!("Failed to remove superseded file {}: {}", old, e);
        }
    }

    info!("Updated document {} for user {}", updated.id, actor.user_id);
    Ok(updated)
}

/// Deletes a document from any state, removing its stored file as well.
///
/// Permitted to the owning submitter and to reviewers. The row is deleted
/// first; a failure to remove the file afterwards is surfaced as a storage
/// error but can no longer leave a row pointing at missing bytes.
pub async fn delete_document(
    db: &DatabaseConnection,
    store: &dyn DocumentStore,
    actor: &Actor,
    document_id: i64,
) -> Result<()> {
    let document = Document::find_by_id(document_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("document", document_id))?;

    if document.owner_user_id != actor.user_id && !actor.role.is_reviewer() {
        return Err(Error::unauthorized("delete a document owned by someone else"));
    }

    let stored_file = document.stored_file.clone();
    document.delete(db).await?;

    if let Some(locator) = stored_file {
        store.delete(&locator).await.inspect_err(|e| {
            warn!("Document {} deleted but file {} remains: {}", document_id, locator, e);
        })?;
    }

    info!("Deleted document {}", document_id);
    Ok(())
}

/// Attaches or replaces the stored file of a document.
///
/// Counts as an owner edit: same ownership and not-approved rules as
/// [`update_document`], same reset to `pending`, and the same
/// store-new/commit-row/remove-old sequencing.
pub async fn attach_file(
    db: &DatabaseConnection,
    store: &dyn DocumentStore,
    actor: &Actor,
    document_id: i64,
    file_name: &str,
    bytes: &[u8],
) -> Result<document::Model> {
    let document = Document::find_by_id(document_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("document", document_id))?;

    if document.owner_user_id != actor.user_id {
        return Err(Error::unauthorized("edit a document owned by someone else"));
    }
    if document.status == ApprovalStatus::Approved {
        return Err(Error::unauthorized("edit an approved document"));
    }

    let locator = store
        .store(bytes, document.kind.storage_category(), file_name)
        .await?;
    let superseded = document.stored_file.clone();

    let mut active: document::ActiveModel = document.into();
    active.stored_file = Set(Some(locator));
    active.status = Set(ApprovalStatus::Pending);
    active.approved_at = Set(None);
    active.rejected_at = Set(None);
    active.approved_by = Set(None);
    let updated = active.update(db).await?;

    if let Some(old) = superseded {
        if let Err(e) = store.delete(&old).await {
            warn!("Failed to remove superseded file {}: {}", old, e);
        }
    }

    Ok(updated)
}
