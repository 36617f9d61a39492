//! Approvable document entity - the shared lifecycle shape for confirmation
//! letters and event reports.
//!
//! Both document kinds share one table with a `kind` variant tag instead of
//! duplicating the approval state machine per kind. The status field plus the
//! mutually exclusive `approved_at`/`rejected_at` pair and the optional
//! `approved_by` reference always change together in a single write.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Which of the two approvable document kinds a row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Sponsorship/tenant agreement confirmation letter
    #[sea_orm(string_value = "confirmation_letter")]
    ConfirmationLetter,
    /// Post-event report
    #[sea_orm(string_value = "event_report")]
    EventReport,
}

impl DocumentKind {
    /// Storage category used when filing uploads for this kind.
    #[must_use]
    pub const fn storage_category(self) -> &'static str {
        match self {
            Self::ConfirmationLetter => "letters",
            Self::EventReport => "reports",
        }
    }
}

/// Lifecycle state of an approvable document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[derive(Default)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Submitted and waiting for a reviewer
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    /// Accepted by a manager or co-manager
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Declined by a manager or co-manager
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Approvable document database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    /// Unique identifier for the document
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Variant tag: confirmation letter or event report
    pub kind: DocumentKind,
    /// User id of the submitter; immutable after creation
    pub owner_user_id: String,
    /// Name of the event the document concerns
    pub event_name: String,
    /// Date of the event
    pub event_date: Date,
    /// Free-text category or description
    pub description: String,
    /// Optional external link (e.g. a shared drive folder)
    pub external_link: Option<String>,
    /// Locator of the uploaded or generated file in the document store
    pub stored_file: Option<String>,
    /// Current lifecycle state
    pub status: ApprovalStatus,
    /// When the document was approved; exclusive with `rejected_at`
    pub approved_at: Option<DateTimeUtc>,
    /// When the document was rejected; exclusive with `approved_at`
    pub rejected_at: Option<DateTimeUtc>,
    /// Reviewer who approved; recorded for event reports only
    pub approved_by: Option<String>,
    /// When the document was submitted
    pub created_at: DateTimeUtc,
}

/// Documents reference users only through opaque ids from the identity
/// provider, so there are no table relationships here.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
