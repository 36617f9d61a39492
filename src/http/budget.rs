//! Budget target, transaction, and overview handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    core::budget as core,
    entities::{
        budget,
        budget::EntryType,
        budget_transaction::{self, TransactionStatus},
    },
    errors::Result,
    identity::Actor,
};

use super::AppState;

/// Request body for setting a monthly budget target.
#[derive(Debug, Deserialize)]
pub struct TargetBody {
    /// Calendar year
    pub year: i32,
    /// Calendar month (1-12)
    pub month: u32,
    /// Income or expense
    pub entry_type: EntryType,
    /// Target amount in minor units
    pub amount: i64,
}

/// Request body for recording a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionBody {
    /// Human-readable description
    pub description: String,
    /// Income or expense
    pub entry_type: EntryType,
    /// Amount in minor units
    pub amount: i64,
    /// The day the money moved
    pub occurred_on: NaiveDate,
    /// Bookkeeping tag; defaults to pending
    #[serde(default)]
    pub status: TransactionStatus,
}

/// Query parameters for the overview endpoint.
#[derive(Debug, Deserialize)]
pub struct OverviewParams {
    /// Which ledger side to aggregate
    pub entry_type: EntryType,
}

/// Query parameters for the transaction list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Restrict to this calendar year
    pub year: Option<i32>,
    /// Restrict to this calendar month (1-12)
    pub month: Option<u32>,
    /// Restrict to one ledger side
    pub entry_type: Option<EntryType>,
}

/// Sets (or replaces) the target for one (year, month, entry type) key.
pub async fn set_target(
    State(state): State<AppState>,
    _actor: Actor,
    Json(body): Json<TargetBody>,
) -> Result<Json<budget::Model>> {
    let model =
        core::set_budget(&state.db, body.year, body.month, body.entry_type, body.amount).await?;
    Ok(Json(model))
}

/// Twelve zero-filled monthly rows for one year and entry type.
pub async fn overview(
    State(state): State<AppState>,
    _actor: Actor,
    Path(year): Path<i32>,
    Query(params): Query<OverviewParams>,
) -> Result<Json<Vec<core::MonthOverview>>> {
    let rows = core::monthly_overview(&state.db, year, params.entry_type).await?;
    Ok(Json(rows))
}

/// Records one income or expense transaction.
pub async fn record_transaction(
    State(state): State<AppState>,
    _actor: Actor,
    Json(body): Json<TransactionBody>,
) -> Result<(StatusCode, Json<budget_transaction::Model>)> {
    let model = core::record_transaction(
        &state.db,
        body.description,
        body.entry_type,
        body.amount,
        body.occurred_on,
        body.status,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(model)))
}

/// Lists transactions, most recent day first, honoring the filters.
pub async fn list_transactions(
    State(state): State<AppState>,
    _actor: Actor,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<budget_transaction::Model>>> {
    let rows =
        core::list_transactions(&state.db, params.year, params.month, params.entry_type).await?;
    Ok(Json(rows))
}
