//! Budget entity - monthly budget targets.
//!
//! One row per (year, month, entry type). Amounts are integer minor units
//! throughout the budget tables; no floating point touches money.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of a budget line or transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Money coming in (sponsorships, tenant fees)
    #[sea_orm(string_value = "income")]
    Income,
    /// Money going out (event costs, purchases)
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// Budget target database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    /// Unique identifier for the budget row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Calendar year the target applies to
    pub year: i32,
    /// Calendar month (1-12) the target applies to
    pub month: i32,
    /// Whether this targets income or expense
    pub entry_type: EntryType,
    /// Target amount in integer minor units; never negative
    pub amount: i64,
}

/// Budget targets stand alone; actuals are summed from transactions by key
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
