//! Confirmation-letter assembly - the structured field set, preview, and
//! generation.
//!
//! Preview renders and returns bytes without persisting anything. Generation
//! is a reviewer-only operation: the rendered letter is stored first, then a
//! confirmation-letter document row is committed already approved - a letter
//! a manager just generated needs no further review, and the role gate keeps
//! staff from using generation as a side door around the approval queue.

use chrono::{NaiveDate, Utc};
use sea_orm::{Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    entities::document::{self, ApprovalStatus, DocumentKind},
    errors::{Error, Result},
    identity::Actor,
    render::LetterRenderer,
    storage::DocumentStore,
};

/// One contracting party named in a letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyBlock {
    /// Legal or organization name
    pub name: String,
    /// Role in the agreement (e.g. "Venue provider")
    pub role: String,
}

/// One signature line at the foot of a letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureBlock {
    /// Caption above the signature (e.g. "First party")
    pub label: String,
    /// Signatory name
    pub name: String,
    /// Signatory role or title
    pub role: String,
}

/// The structured field set a renderer fills into the fixed letter layout.
///
/// Clause, support-point, and signature lists keep their given order in the
/// rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterDraft {
    /// Name of the event the agreement concerns
    pub event_name: String,
    /// Date of the event
    pub event_date: NaiveDate,
    /// Date the agreement is signed
    pub agreement_date: NaiveDate,
    /// First contracting party
    pub first_party: PartyBlock,
    /// Second contracting party
    pub second_party: PartyBlock,
    /// Numbered agreement clauses
    pub clauses: Vec<String>,
    /// Support points provided by the first party, in order
    #[serde(default)]
    pub first_party_support: Vec<String>,
    /// Support points provided by the second party, in order
    #[serde(default)]
    pub second_party_support: Vec<String>,
    /// Signature blocks, in order
    pub signatures: Vec<SignatureBlock>,
}

fn validate_letter(letter: &LetterDraft) -> Result<()> {
    if letter.event_name.trim().is_empty() {
        return Err(Error::validation("event_name", "cannot be empty"));
    }
    if letter.first_party.name.trim().is_empty() {
        return Err(Error::validation("first_party", "party name cannot be empty"));
    }
    if letter.second_party.name.trim().is_empty() {
        return Err(Error::validation("second_party", "party name cannot be empty"));
    }
    if letter.signatures.is_empty() {
        return Err(Error::validation(
            "signatures",
            "a letter needs at least one signature block",
        ));
    }
    Ok(())
}

/// Renders a letter and returns the bytes without persisting anything.
pub fn preview_letter(renderer: &dyn LetterRenderer, letter: &LetterDraft) -> Result<Vec<u8>> {
    validate_letter(letter)?;
    renderer.render(letter)
}

/// Renders a letter, stores the bytes, and commits an approved
/// confirmation-letter document owned by the acting reviewer.
///
/// The file is stored before the row ("write file, then commit row"), so a
/// storage failure leaves no document behind. Returns the new row together
/// with the rendered bytes.
pub async fn generate_letter(
    db: &DatabaseConnection,
    store: &dyn DocumentStore,
    renderer: &dyn LetterRenderer,
    actor: &Actor,
    letter: &LetterDraft,
) -> Result<(document::Model, Vec<u8>)> {
    if !actor.role.is_reviewer() {
        return Err(Error::unauthorized("generate confirmation letters"));
    }
    validate_letter(letter)?;

    let bytes = renderer.render(letter)?;
    let file_name = format!("{}.txt", letter.event_name.trim());
    let locator = store
        .store(
            &bytes,
            DocumentKind::ConfirmationLetter.storage_category(),
            &file_name,
        )
        .await?;

    let now = Utc::now();
    let row = document::ActiveModel {
        kind: Set(DocumentKind::ConfirmationLetter),
        owner_user_id: Set(actor.user_id.clone()),
        event_name: Set(letter.event_name.trim().to_string()),
        event_date: Set(letter.event_date),
        description: Set(format!(
            "Confirmation letter between {} and {}",
            letter.first_party.name, letter.second_party.name
        )),
        external_link: Set(None),
        stored_file: Set(Some(locator)),
        // Generated letters skip the pending stage; letters carry no
        // approver identity either way.
        status: Set(ApprovalStatus::Approved),
        approved_at: Set(Some(now)),
        rejected_at: Set(None),
        approved_by: Set(None),
        created_at: Set(now),
        ..Default::default()
    };
    let model = row.insert(db).await?;

    info!(
        "Generated confirmation letter {} for user {}",
        model.id, actor.user_id
    );
    Ok((model, bytes))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::Document;
    use crate::render::TextLetterRenderer;
    use crate::test_utils::{MemoryDocumentStore, manager, sample_letter, setup_test_db, staff};
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn preview_persists_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let renderer = TextLetterRenderer::default();

        let bytes = preview_letter(&renderer, &sample_letter())?;
        assert!(!bytes.is_empty());

        assert_eq!(Document::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn generate_commits_an_approved_letter_with_its_file() -> Result<()> {
        let db = setup_test_db().await?;
        let store = MemoryDocumentStore::default();
        let renderer = TextLetterRenderer::default();

        let (model, bytes) =
            generate_letter(&db, &store, &renderer, &manager(), &sample_letter()).await?;

        assert_eq!(model.kind, DocumentKind::ConfirmationLetter);
        assert_eq!(model.status, ApprovalStatus::Approved);
        assert!(model.approved_at.is_some());
        assert!(model.rejected_at.is_none());
        assert!(model.approved_by.is_none());
        assert_eq!(model.owner_user_id, "manager-1");

        let locator = model.stored_file.unwrap();
        assert_eq!(store.load(&locator).await?, bytes);
        Ok(())
    }

    #[tokio::test]
    async fn staff_cannot_generate_letters() -> Result<()> {
        let db = setup_test_db().await?;
        let store = MemoryDocumentStore::default();
        let renderer = TextLetterRenderer::default();

        let err = generate_letter(&db, &store, &renderer, &staff(), &sample_letter())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized { .. }));

        assert_eq!(Document::find().count(&db).await?, 0);
        assert_eq!(store.file_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn a_letter_without_signatures_is_invalid() -> Result<()> {
        let db = setup_test_db().await?;
        let store = MemoryDocumentStore::default();
        let renderer = TextLetterRenderer::default();

        let mut letter = sample_letter();
        letter.signatures.clear();

        let err = generate_letter(&db, &store, &renderer, &manager(), &letter)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation { field: "signatures", .. }));
        Ok(())
    }

    #[test]
    fn a_blank_event_name_is_invalid() {
        let renderer = TextLetterRenderer::default();
        let mut letter = sample_letter();
        letter.event_name = "  ".to_string();

        let err = preview_letter(&renderer, &letter).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "event_name", .. }));
    }
}
