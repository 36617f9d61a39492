//! Inventory item entity - physical assets held by the division.
//!
//! Each item carries a physical condition; every condition change appends one
//! row to `condition_history` in the same transaction that updates the item.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Physical condition of an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[derive(Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemCondition {
    /// Usable as-is
    #[sea_orm(string_value = "good")]
    #[default]
    Good,
    /// Needs repair before use
    #[sea_orm(string_value = "repair")]
    Repair,
    /// Damaged beyond field repair
    #[sea_orm(string_value = "damaged")]
    Damaged,
}

/// Inventory item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name (e.g. "Tripod")
    pub name: String,
    /// Category for organization (e.g. "photography")
    pub category: String,
    /// Units on hand; never negative
    pub quantity: i32,
    /// Where the item is kept
    pub location: String,
    /// Current physical condition
    pub condition: ItemCondition,
    /// Free-text notes about the current condition
    #[sea_orm(column_type = "Text", nullable)]
    pub condition_notes: Option<String>,
    /// When the condition last changed
    pub condition_changed_at: DateTimeUtc,
    /// Optional photo or drive link
    pub image_link: Option<String>,
    /// When the item was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `InventoryItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One item has many condition-history entries
    #[sea_orm(has_many = "super::condition_history::Entity")]
    ConditionHistory,
}

impl Related<super::condition_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ConditionHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
