//! Asset API endpoints.

use std::collections::{BTreeMap, HashMap};

use api_types::asset::{AssetNew, AssetUpdate, BalanceQuery, MonthQuery};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use engine::{Asset, AssetCheckpoints, AssetSummary, RangeMode};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<AssetSummary>>, ServerError> {
    Ok(Json(state.engine.list_assets().await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AssetNew>,
) -> Result<Json<Asset>, ServerError> {
    let asset = state
        .engine
        .create_asset(&payload.name, &payload.icon, payload.starting_balance)
        .await?;
    Ok(Json(asset))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssetUpdate>,
) -> Result<Json<Asset>, ServerError> {
    let asset = state
        .engine
        .update_asset(
            id,
            payload.name.as_deref(),
            payload.icon.as_deref(),
            payload.starting_balance,
        )
        .await?;
    Ok(Json(asset))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_asset(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Day-by-day balance series, keyed by date.
pub async fn balance(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Query(payload): Query<BalanceQuery>,
) -> Result<Json<BTreeMap<NaiveDate, f64>>, ServerError> {
    let mode = match payload.range_mode.as_deref() {
        Some(raw) => RangeMode::try_from(raw)?,
        None => RangeMode::default(),
    };
    let series = state
        .engine
        .balance_series(id, mode, payload.start_date, payload.end_date)
        .await?;
    Ok(Json(series))
}

/// End-of-month checkpoints for every asset.
pub async fn monthly_balances(
    State(state): State<ServerState>,
    Query(payload): Query<MonthQuery>,
) -> Result<Json<HashMap<Uuid, AssetCheckpoints>>, ServerError> {
    let balances = state
        .engine
        .monthly_asset_balances(payload.year, payload.month)
        .await?;
    Ok(Json(balances))
}
