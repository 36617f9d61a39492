//! Inventory and condition-history handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    core::inventory as core,
    entities::{condition_history, inventory_item},
    errors::{Error, Result},
    identity::Actor,
};

use super::AppState;

/// Request body for creating or updating an inventory item.
#[derive(Debug, Deserialize)]
pub struct ItemBody {
    /// Human-readable name
    pub name: String,
    /// Category for organization
    pub category: String,
    /// Units on hand
    pub quantity: i32,
    /// Where the item is kept
    pub location: String,
    /// Physical condition
    pub condition: inventory_item::ItemCondition,
    /// Notes about the condition
    #[serde(default)]
    pub condition_notes: Option<String>,
    /// Optional photo or drive link
    #[serde(default)]
    pub image_link: Option<String>,
}

impl From<ItemBody> for core::ItemFields {
    fn from(body: ItemBody) -> Self {
        Self {
            name: body.name,
            category: body.category,
            quantity: body.quantity,
            location: body.location,
            condition: body.condition,
            condition_notes: body.condition_notes,
            image_link: body.image_link,
        }
    }
}

/// Query parameters accepted by the item list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Substring match on the item name
    pub search: Option<String>,
}

/// Lists items alphabetically, optionally narrowed by a name search.
pub async fn list_items(
    State(state): State<AppState>,
    _actor: Actor,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<inventory_item::Model>>> {
    let rows = core::list_items(&state.db, params.search.as_deref()).await?;
    Ok(Json(rows))
}

/// Registers a new item; its condition becomes the history baseline.
pub async fn create_item(
    State(state): State<AppState>,
    _actor: Actor,
    Json(body): Json<ItemBody>,
) -> Result<(StatusCode, Json<inventory_item::Model>)> {
    let model = core::create_item(&state.db, body.into()).await?;
    Ok((StatusCode::CREATED, Json(model)))
}

/// Fetches one item.
pub async fn get_item(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<i64>,
) -> Result<Json<inventory_item::Model>> {
    let model = core::get_item(&state.db, id)
        .await?
        .ok_or_else(|| Error::not_found("inventory item", id))?;
    Ok(Json(model))
}

/// Applies a full field update, logging a condition change if there is one.
pub async fn update_item(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(body): Json<ItemBody>,
) -> Result<Json<inventory_item::Model>> {
    let model = core::update_item(&state.db, &actor, id, body.into()).await?;
    Ok(Json(model))
}

/// Deletes the item together with its condition history.
pub async fn delete_item(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    core::delete_item(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the item's condition history, newest first.
pub async fn item_history(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<i64>,
) -> Result<Json<Vec<condition_history::Model>>> {
    // Distinguish "no item" from "an item with no changes yet"
    core::get_item(&state.db, id)
        .await?
        .ok_or_else(|| Error::not_found("inventory item", id))?;
    let rows = core::item_history(&state.db, id).await?;
    Ok(Json(rows))
}
