//! Condition history entity - append-only audit trail of inventory condition
//! changes.
//!
//! Rows are written once and never updated; they are removed only when the
//! parent inventory item is deleted. Each row carries the condition value the
//! item changed *to*, so the item's creation-time condition is the implicit
//! baseline of the log.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::inventory_item::ItemCondition;

/// Condition history database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "condition_history")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The inventory item this entry belongs to
    pub item_id: i64,
    /// Condition the item changed to at this point in time
    pub condition: ItemCondition,
    /// Optional notes recorded with the change (e.g. "broken leg")
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    /// User who made the change
    pub user_id: String,
    /// When the change was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `ConditionHistory` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to one inventory item
    #[sea_orm(
        belongs_to = "super::inventory_item::Entity",
        from = "Column::ItemId",
        to = "super::inventory_item::Column::Id"
    )]
    InventoryItem,
}

impl Related<super::inventory_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
