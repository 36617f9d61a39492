//! Budget business logic - monthly targets, the transaction log, and the
//! monthly overview.
//!
//! All amounts are integer minor units. The overview is a pure read-side
//! fold: one row per calendar month, zero-filled, with the signed difference
//! oriented per entry type so a positive number is always the good direction.

use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

use crate::{
    entities::{
        Budget, BudgetTransaction, budget,
        budget::EntryType,
        budget_transaction::{self, TransactionStatus},
    },
    errors::{Error, Result},
};

/// One month's line of the yearly overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MonthOverview {
    /// Calendar month (1-12)
    pub month: u32,
    /// Budgeted target in minor units
    pub target: i64,
    /// Sum of matching transactions in minor units
    pub actual: i64,
    /// Signed difference; positive is good for both entry types
    pub difference: i64,
}

fn validate_month(month: u32) -> Result<i32> {
    i32::try_from(month)
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| Error::validation("month", format!("{month} is not a calendar month")))
}

fn validate_amount(amount: i64) -> Result<()> {
    if amount < 0 {
        return Err(Error::validation(
            "amount",
            format!("{amount} is negative"),
        ));
    }
    Ok(())
}

/// Sets the budget target for one (year, month, entry type) key, replacing
/// any previous target for the same key.
pub async fn set_budget(
    db: &DatabaseConnection,
    year: i32,
    month: u32,
    entry_type: EntryType,
    amount: i64,
) -> Result<budget::Model> {
    let month_key = validate_month(month)?;
    validate_amount(amount)?;

    let existing = Budget::find()
        .filter(budget::Column::Year.eq(year))
        .filter(budget::Column::Month.eq(month_key))
        .filter(budget::Column::EntryType.eq(entry_type))
        .one(db)
        .await?;

    let result = if let Some(row) = existing {
        let mut active: budget::ActiveModel = row.into();
        active.amount = Set(amount);
        active.update(db).await?
    } else {
        let row = budget::ActiveModel {
            year: Set(year),
            month: Set(month_key),
            entry_type: Set(entry_type),
            amount: Set(amount),
            ..Default::default()
        };
        row.insert(db).await?
    };

    info!(
        "Budget target for {year}-{month:02} ({entry_type:?}) set to {amount}"
    );
    Ok(result)
}

/// Records one income or expense transaction.
pub async fn record_transaction(
    db: &DatabaseConnection,
    description: String,
    entry_type: EntryType,
    amount: i64,
    occurred_on: NaiveDate,
    status: TransactionStatus,
) -> Result<budget_transaction::Model> {
    if description.trim().is_empty() {
        return Err(Error::validation("description", "cannot be empty"));
    }
    validate_amount(amount)?;

    let transaction = budget_transaction::ActiveModel {
        description: Set(description.trim().to_string()),
        entry_type: Set(entry_type),
        amount: Set(amount),
        occurred_on: Set(occurred_on),
        status: Set(status),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    transaction.insert(db).await.map_err(Into::into)
}

/// Lists transactions, most recent day first, with optional AND-combined
/// filters on year, month, and entry type.
pub async fn list_transactions(
    db: &DatabaseConnection,
    year: Option<i32>,
    month: Option<u32>,
    entry_type: Option<EntryType>,
) -> Result<Vec<budget_transaction::Model>> {
    if let Some(month) = month {
        validate_month(month)?;
    }

    let mut query = BudgetTransaction::find();
    if let Some(entry_type) = entry_type {
        query = query.filter(budget_transaction::Column::EntryType.eq(entry_type));
    }
    if let Some(year) = year {
        let start = year_start(year)?;
        let end = year_start(year + 1)?;
        query = query
            .filter(budget_transaction::Column::OccurredOn.gte(start))
            .filter(budget_transaction::Column::OccurredOn.lt(end));
    }

    let mut rows = query
        .order_by_desc(budget_transaction::Column::OccurredOn)
        .order_by_desc(budget_transaction::Column::Id)
        .all(db)
        .await?;

    if let Some(month) = month {
        rows.retain(|row| row.occurred_on.month() == month);
    }

    Ok(rows)
}

fn year_start(year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| Error::validation("year", format!("{year} is out of range")))
}

/// Produces the monthly overview for one year and entry type.
///
/// Always returns exactly 12 rows, months 1 through 12, even for a year with
/// no targets and no transactions. The difference is oriented so that a
/// positive value is the good direction for the given type: under budget for
/// expenses, above target for income.
pub async fn monthly_overview(
    db: &DatabaseConnection,
    year: i32,
    entry_type: EntryType,
) -> Result<Vec<MonthOverview>> {
    let mut targets = [0i64; 12];
    let budget_rows = Budget::find()
        .filter(budget::Column::Year.eq(year))
        .filter(budget::Column::EntryType.eq(entry_type))
        .all(db)
        .await?;
    for row in budget_rows {
        if let Some(slot) = usize::try_from(row.month - 1)
            .ok()
            .and_then(|index| targets.get_mut(index))
        {
            *slot = row.amount;
        }
    }

    let mut actuals = [0i64; 12];
    let start = year_start(year)?;
    let end = year_start(year + 1)?;
    let transactions = BudgetTransaction::find()
        .filter(budget_transaction::Column::EntryType.eq(entry_type))
        .filter(budget_transaction::Column::OccurredOn.gte(start))
        .filter(budget_transaction::Column::OccurredOn.lt(end))
        .all(db)
        .await?;
    for transaction in transactions {
        let index = transaction.occurred_on.month0() as usize;
        actuals[index] += transaction.amount;
    }

    Ok((0..12u32)
        .map(|index| {
            let target = targets[index as usize];
            let actual = actuals[index as usize];
            let difference = match entry_type {
                EntryType::Expense => target - actual,
                EntryType::Income => actual - target,
            };
            MonthOverview {
                month: index + 1,
                target,
                actual,
                difference,
            }
        })
        .collect())
}
