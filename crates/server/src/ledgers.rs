//! Ledger API endpoints.

use api_types::ledger::{LedgerNew, LedgerUpdate};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::Ledger;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Ledger>>, ServerError> {
    Ok(Json(state.engine.list_ledgers().await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<LedgerNew>,
) -> Result<Json<Ledger>, ServerError> {
    let ledger = state
        .engine
        .create_ledger(&payload.name, &payload.icon, &payload.color)
        .await?;
    Ok(Json(ledger))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<LedgerUpdate>,
) -> Result<Json<Ledger>, ServerError> {
    let ledger = state
        .engine
        .update_ledger(
            id,
            payload.name.as_deref(),
            payload.icon.as_deref(),
            payload.color.as_deref(),
        )
        .await?;
    Ok(Json(ledger))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_ledger(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
