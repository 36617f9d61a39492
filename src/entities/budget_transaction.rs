//! Budget transaction entity - the income/expense log behind the monthly
//! overview.
//!
//! The `status` field is a plain bookkeeping tag with no timestamps and no
//! gating rules; the approval state machine applies to documents only.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::budget::EntryType;

/// Bookkeeping tag on a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[derive(Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Recorded but not yet settled
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    /// Settled
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Cleared by the finance desk
    #[sea_orm(string_value = "approve")]
    Approve,
}

/// Budget transaction database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable description of the transaction
    pub description: String,
    /// Income or expense
    pub entry_type: EntryType,
    /// Amount in integer minor units; never negative
    pub amount: i64,
    /// The day the money moved
    pub occurred_on: Date,
    /// Bookkeeping tag; carries no lifecycle semantics
    pub status: TransactionStatus,
    /// When the row was recorded
    pub created_at: DateTimeUtc,
}

/// Transactions are matched to budget targets by (year, month, type), not by
/// a foreign key
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
