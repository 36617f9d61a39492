//! Approval state machine shared by confirmation letters and event reports.
//!
//! Documents move between `pending`, `approved`, and `rejected` under one rule
//! set: only a reviewer (manager or co-manager) may approve or reject, and the
//! status, the mutually exclusive timestamp pair, and the approver reference
//! always change together in a single row update. Approving a rejected
//! document (or rejecting an approved one) is the same operation as acting on
//! a pending one - the opposite timestamp is overwritten; there is no
//! separate revert.
//!
//! The role check runs before the document is even fetched, so an
//! unauthorized caller can neither mutate state nor probe which ids exist.

use chrono::Utc;
use sea_orm::{Set, prelude::*};
use tracing::info;

use crate::{
    entities::{
        Document,
        document::{self, ApprovalStatus, DocumentKind},
    },
    errors::{Error, Result},
    identity::Actor,
};

fn ensure_reviewer(actor: &Actor, action: &str) -> Result<()> {
    if actor.role.is_reviewer() {
        Ok(())
    } else {
        Err(Error::unauthorized(action))
    }
}

/// Transitions a document to `approved`.
///
/// Requires a reviewer role. Sets `approved_at` to now, clears `rejected_at`,
/// and records the approver's identity for event reports only (confirmation
/// letters never carry an approver reference). Valid from `pending` or
/// `rejected`; re-approving an approved document refreshes its timestamp.
pub async fn approve_document(
    db: &DatabaseConnection,
    actor: &Actor,
    document_id: i64,
) -> Result<document::Model> {
    ensure_reviewer(actor, "approve documents")?;

    let document = Document::find_by_id(document_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("document", document_id))?;

    let approved_by = match document.kind {
        DocumentKind::EventReport => Some(actor.user_id.clone()),
        DocumentKind::ConfirmationLetter => None,
    };

    let mut active: document::ActiveModel = document.into();
    active.status = Set(ApprovalStatus::Approved);
    active.approved_at = Set(Some(Utc::now()));
    active.rejected_at = Set(None);
    active.approved_by = Set(approved_by);
    let updated = active.update(db).await?;

    info!(
        "Document {} approved by user {} ({})",
        updated.id, actor.user_id, actor.role
    );
    Ok(updated)
}

/// Transitions a document to `rejected`.
///
/// Requires a reviewer role. Sets `rejected_at` to now and clears both
/// `approved_at` and the approver reference. Valid from `pending` or
/// `approved`.
pub async fn reject_document(
    db: &DatabaseConnection,
    actor: &Actor,
    document_id: i64,
) -> Result<document::Model> {
    ensure_reviewer(actor, "reject documents")?;

    let document = Document::find_by_id(document_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("document", document_id))?;

    let mut active: document::ActiveModel = document.into();
    active.status = Set(ApprovalStatus::Rejected);
    active.rejected_at = Set(Some(Utc::now()));
    active.approved_at = Set(None);
    active.approved_by = Set(None);
    let updated = active.update(db).await?;

    info!(
        "Document {} rejected by user {} ({})",
        updated.id, actor.user_id, actor.role
    );
    Ok(updated)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{co_manager, create_test_document, manager, setup_test_db, staff};

    #[tokio::test]
    async fn manager_approves_a_pending_letter() -> Result<()> {
        let db = setup_test_db().await?;
        let document = create_test_document(&db, DocumentKind::ConfirmationLetter).await?;
        assert_eq!(document.status, ApprovalStatus::Pending);

        let updated = approve_document(&db, &manager(), document.id).await?;

        assert_eq!(updated.status, ApprovalStatus::Approved);
        let approved_at = updated.approved_at.unwrap();
        assert!(approved_at > updated.created_at);
        assert!(updated.rejected_at.is_none());
        // Confirmation letters never record who approved them
        assert!(updated.approved_by.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn approving_a_report_records_the_approver() -> Result<()> {
        let db = setup_test_db().await?;
        let document = create_test_document(&db, DocumentKind::EventReport).await?;

        let updated = approve_document(&db, &manager(), document.id).await?;

        assert_eq!(updated.approved_by.as_deref(), Some("manager-1"));
        Ok(())
    }

    #[tokio::test]
    async fn co_manager_has_the_same_review_rights() -> Result<()> {
        let db = setup_test_db().await?;
        let document = create_test_document(&db, DocumentKind::EventReport).await?;

        let updated = reject_document(&db, &co_manager(), document.id).await?;

        assert_eq!(updated.status, ApprovalStatus::Rejected);
        assert!(updated.rejected_at.is_some());
        assert!(updated.approved_at.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn staff_cannot_approve_and_the_row_is_untouched() -> Result<()> {
        let db = setup_test_db().await?;
        let document = create_test_document(&db, DocumentKind::ConfirmationLetter).await?;

        let err = approve_document(&db, &staff(), document.id).await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized { .. }));

        let reloaded = Document::find_by_id(document.id).one(&db).await?.unwrap();
        assert_eq!(reloaded, document);
        Ok(())
    }

    #[tokio::test]
    async fn staff_cannot_reject_either() -> Result<()> {
        let db = setup_test_db().await?;
        let document = create_test_document(&db, DocumentKind::EventReport).await?;

        let err = reject_document(&db, &staff(), document.id).await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized { .. }));

        let reloaded = Document::find_by_id(document.id).one(&db).await?.unwrap();
        assert_eq!(reloaded.status, ApprovalStatus::Pending);
        Ok(())
    }

    #[tokio::test]
    async fn approve_then_reject_overwrites_in_one_operation() -> Result<()> {
        let db = setup_test_db().await?;
        let document = create_test_document(&db, DocumentKind::ConfirmationLetter).await?;

        let approved = approve_document(&db, &manager(), document.id).await?;
        assert_eq!(approved.status, ApprovalStatus::Approved);
        assert!(approved.approved_at.is_some());
        assert!(approved.rejected_at.is_none());

        let rejected = reject_document(&db, &manager(), document.id).await?;
        assert_eq!(rejected.status, ApprovalStatus::Rejected);
        assert!(rejected.rejected_at.is_some());
        // The opposite timestamp is cleared by the same write, never left stale
        assert!(rejected.approved_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn rejecting_then_approving_clears_the_rejection() -> Result<()> {
        let db = setup_test_db().await?;
        let document = create_test_document(&db, DocumentKind::EventReport).await?;

        reject_document(&db, &manager(), document.id).await?;
        let approved = approve_document(&db, &co_manager(), document.id).await?;

        assert_eq!(approved.status, ApprovalStatus::Approved);
        assert!(approved.approved_at.is_some());
        assert!(approved.rejected_at.is_none());
        assert_eq!(approved.approved_by.as_deref(), Some("co-manager-1"));

        Ok(())
    }

    #[tokio::test]
    async fn missing_document_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let err = approve_document(&db, &manager(), 999).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn role_is_checked_before_existence() -> Result<()> {
        let db = setup_test_db().await?;

        // A staff caller probing a missing id still gets the authorization
        // error, not a not-found leak.
        let err = approve_document(&db, &staff(), 999).await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized { .. }));
        Ok(())
    }
}
