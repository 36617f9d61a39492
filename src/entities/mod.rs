//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod budget;
pub mod budget_transaction;
pub mod condition_history;
pub mod document;
pub mod inventory_item;

// Re-export specific types to avoid conflicts
pub use budget::{Column as BudgetColumn, Entity as Budget, Model as BudgetModel};
pub use budget_transaction::{
    Column as BudgetTransactionColumn, Entity as BudgetTransaction, Model as BudgetTransactionModel,
};
pub use condition_history::{
    Column as ConditionHistoryColumn, Entity as ConditionHistory, Model as ConditionHistoryModel,
};
pub use document::{Column as DocumentColumn, Entity as Document, Model as DocumentModel};
pub use inventory_item::{
    Column as InventoryItemColumn, Entity as InventoryItem, Model as InventoryItemModel,
};
