//! Inventory business logic - item CRUD and the append-only condition
//! history.
//!
//! A condition change and its history entry are written in one database
//! transaction, so the log and the item can never disagree. Field-level
//! updates that leave the condition untouched (quantity, location, links)
//! write no history at all.

use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

use crate::{
    entities::{
        ConditionHistory, InventoryItem, condition_history,
        inventory_item::{self, ItemCondition},
    },
    errors::{Error, Result},
    identity::Actor,
};

/// Field set supplied when creating or updating an inventory item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    /// Human-readable name (e.g. "Tripod")
    pub name: String,
    /// Category for organization
    pub category: String,
    /// Units on hand; never negative
    pub quantity: i32,
    /// Where the item is kept
    pub location: String,
    /// Physical condition
    pub condition: ItemCondition,
    /// Notes about the condition, carried onto the history entry on a change
    pub condition_notes: Option<String>,
    /// Optional photo or drive link
    pub image_link: Option<String>,
}

fn validate_fields(fields: &ItemFields) -> Result<()> {
    if fields.name.trim().is_empty() {
        return Err(Error::validation("name", "cannot be empty"));
    }
    if fields.quantity < 0 {
        return Err(Error::validation(
            "quantity",
            format!("{} is negative", fields.quantity),
        ));
    }
    Ok(())
}

/// Registers a new inventory item.
///
/// The condition given here is the implicit baseline of the history log; no
/// history entry is written at creation time.
pub async fn create_item(
    db: &DatabaseConnection,
    fields: ItemFields,
) -> Result<inventory_item::Model> {
    validate_fields(&fields)?;
    let now = Utc::now();

    let item = inventory_item::ActiveModel {
        name: Set(fields.name.trim().to_string()),
        category: Set(fields.category),
        quantity: Set(fields.quantity),
        location: Set(fields.location),
        condition: Set(fields.condition),
        condition_notes: Set(fields.condition_notes),
        condition_changed_at: Set(now),
        image_link: Set(fields.image_link),
        created_at: Set(now),
        ..Default::default()
    };

    let result = item.insert(db).await?;
    info!("Registered inventory item {} ({})", result.id, result.name);
    Ok(result)
}

/// Retrieves an item by its unique ID, returning None if it doesn't exist.
pub async fn get_item(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Option<inventory_item::Model>> {
    InventoryItem::find_by_id(item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists items alphabetically, optionally narrowed by a name substring.
pub async fn list_items(
    db: &DatabaseConnection,
    search: Option<&str>,
) -> Result<Vec<inventory_item::Model>> {
    let mut query = InventoryItem::find();
    if let Some(search) = search {
        query = query.filter(inventory_item::Column::Name.contains(search));
    }
    query
        .order_by_asc(inventory_item::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies a full field update to an item, logging the condition change if
/// there is one.
///
/// When the new condition differs from the current one, exactly one history
/// entry is appended - carrying the *new* condition, the notes, and the
/// acting user - and `condition_changed_at` is refreshed, all in the same
/// transaction as the item update. An unchanged condition writes no history.
pub async fn update_item(
    db: &DatabaseConnection,
    actor: &Actor,
    item_id: i64,
    fields: ItemFields,
) -> Result<inventory_item::Model> {
    validate_fields(&fields)?;

    let txn = db.begin().await?;

    let item = InventoryItem::find_by_id(item_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::not_found("inventory item", item_id))?;

    let condition_changed = item.condition != fields.condition;
    let now = Utc::now();

    if condition_changed {
        let entry = condition_history::ActiveModel {
            item_id: Set(item.id),
            condition: Set(fields.condition),
            notes: Set(fields.condition_notes.clone()),
            user_id: Set(actor.user_id.clone()),
            created_at: Set(now),
            ..Default::default()
        };
        entry.insert(&txn).await?;
    }

    let mut active: inventory_item::ActiveModel = item.into();
    active.name = Set(fields.name.trim().to_string());
    active.category = Set(fields.category);
    active.quantity = Set(fields.quantity);
    active.location = Set(fields.location);
    active.condition = Set(fields.condition);
    active.condition_notes = Set(fields.condition_notes);
    active.image_link = Set(fields.image_link);
    if condition_changed {
        active.condition_changed_at = Set(now);
    }
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    if condition_changed {
        info!(
            "Inventory item {} condition set to {:?} by user {}",
            updated.id, updated.condition, actor.user_id
        );
    }
    Ok(updated)
}

/// Retrieves the condition history of an item, newest first.
pub async fn item_history(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Vec<condition_history::Model>> {
    ConditionHistory::find()
        .filter(condition_history::Column::ItemId.eq(item_id))
        .order_by_desc(condition_history::Column::CreatedAt)
        .order_by_desc(condition_history::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an item together with its entire condition history.
///
/// Both deletions happen in one transaction; history rows never outlive
/// their item.
pub async fn delete_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let item = InventoryItem::find_by_id(item_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::not_found("inventory item", item_id))?;

    ConditionHistory::delete_many()
        .filter(condition_history::Column::ItemId.eq(item_id))
        .exec(&txn)
        .await?;
    item.delete(&txn).await?;

    txn.commit().await?;
    info!("Deleted inventory item {}", item_id);
    Ok(())
}
