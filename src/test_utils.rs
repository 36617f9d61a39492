//! Shared test utilities for `MarcomDesk`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults, plus an in-memory
//! document store for exercising file sequencing without touching a disk.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::{
    core::{
        document as core_document,
        inventory,
        letter::{LetterDraft, PartyBlock, SignatureBlock},
    },
    entities::{
        document::{self, DocumentKind},
        inventory_item::{self, ItemCondition},
    },
    errors::{Error, Result},
    identity::{Actor, Role},
    storage::DocumentStore,
};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The canned manager used across tests.
#[must_use]
pub fn manager() -> Actor {
    Actor::new("manager-1", Role::Manager)
}

/// The canned co-manager used across tests.
#[must_use]
pub fn co_manager() -> Actor {
    Actor::new("co-manager-1", Role::CoManager)
}

/// The canned staff submitter used across tests.
#[must_use]
pub fn staff() -> Actor {
    Actor::new("staff-1", Role::Staff)
}

/// A staff actor with a specific user id, for ownership tests.
#[must_use]
pub fn staff_named(user_id: &str) -> Actor {
    Actor::new(user_id, Role::Staff)
}

/// Document fields with sensible defaults and the given event name.
#[must_use]
pub fn test_fields(event_name: &str) -> core_document::DocumentFields {
    core_document::DocumentFields {
        event_name: event_name.to_string(),
        event_date: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
        description: "Test document".to_string(),
        external_link: None,
    }
}

/// Creates a pending test document of the given kind, owned by [`staff`].
pub async fn create_test_document(
    db: &DatabaseConnection,
    kind: DocumentKind,
) -> Result<document::Model> {
    core_document::create_document(
        db,
        &MemoryDocumentStore::default(),
        &staff(),
        kind,
        test_fields("Test Event"),
        None,
    )
    .await
}

/// Creates a pending test document with a custom name and event date.
pub async fn create_custom_document(
    db: &DatabaseConnection,
    kind: DocumentKind,
    event_name: &str,
    event_date: NaiveDate,
) -> Result<document::Model> {
    let mut fields = test_fields(event_name);
    fields.event_date = event_date;
    core_document::create_document(
        db,
        &MemoryDocumentStore::default(),
        &staff(),
        kind,
        fields,
        None,
    )
    .await
}

/// Inventory item fields with sensible defaults and the given name.
///
/// # Defaults
/// * `category`: "general"
/// * `quantity`: 10
/// * `location`: "Storage room"
/// * `condition`: good, no notes
#[must_use]
pub fn test_item_fields(name: &str) -> inventory::ItemFields {
    inventory::ItemFields {
        name: name.to_string(),
        category: "general".to_string(),
        quantity: 10,
        location: "Storage room".to_string(),
        condition: ItemCondition::Good,
        condition_notes: None,
        image_link: None,
    }
}

/// Creates a test inventory item with sensible defaults.
pub async fn create_test_item(
    db: &DatabaseConnection,
    name: &str,
) -> Result<inventory_item::Model> {
    inventory::create_item(db, test_item_fields(name)).await
}

/// A complete, valid letter for renderer and generation tests.
#[must_use]
pub fn sample_letter() -> LetterDraft {
    LetterDraft {
        event_name: "Ramadan Night Market".to_string(),
        event_date: NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date"),
        agreement_date: NaiveDate::from_ymd_opt(2025, 2, 1).expect("valid date"),
        first_party: PartyBlock {
            name: "Grand Plaza Mall Management".to_string(),
            role: "Venue provider".to_string(),
        },
        second_party: PartyBlock {
            name: "PT Kuliner Nusantara".to_string(),
            role: "Event organizer".to_string(),
        },
        clauses: vec![
            "The venue is provided from 10:00 to 22:00.".to_string(),
            "All vendor booths are insured by the organizer.".to_string(),
        ],
        first_party_support: vec!["Atrium stage and sound system".to_string()],
        second_party_support: vec!["Thirty food vendors".to_string()],
        signatures: vec![
            SignatureBlock {
                label: "First party".to_string(),
                name: "A. Wijaya".to_string(),
                role: "Marketing Manager".to_string(),
            },
            SignatureBlock {
                label: "Second party".to_string(),
                name: "B. Santoso".to_string(),
                role: "Director".to_string(),
            },
        ],
    }
}

/// In-memory [`DocumentStore`] with deterministic locators.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
    next_id: Mutex<u64>,
}

impl MemoryDocumentStore {
    /// Number of files currently held.
    ///
    /// # Panics
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.lock().expect("store lock poisoned").len()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn store(&self, bytes: &[u8], category: &str, file_name: &str) -> Result<String> {
        let mut next_id = self.next_id.lock().expect("store lock poisoned");
        *next_id += 1;
        let locator = format!("{category}/{next_id}-{file_name}");
        drop(next_id);

        self.files
            .lock()
            .expect("store lock poisoned")
            .insert(locator.clone(), bytes.to_vec());
        Ok(locator)
    }

    async fn load(&self, locator: &str) -> Result<Vec<u8>> {
        self.files
            .lock()
            .expect("store lock poisoned")
            .get(locator)
            .cloned()
            .ok_or_else(|| Error::Storage {
                message: format!("no file at '{locator}'"),
            })
    }

    async fn delete(&self, locator: &str) -> Result<()> {
        self.files
            .lock()
            .expect("store lock poisoned")
            .remove(locator)
            .map(|_| ())
            .ok_or_else(|| Error::Storage {
                message: format!("no file at '{locator}'"),
            })
    }
}
