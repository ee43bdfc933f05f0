//! Budget API endpoints. Months here are 0-indexed, matching the engine.

use api_types::budget::{BudgetNew, BudgetQuery, BudgetUpdate, YearMonth};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{Budget, BudgetReport, BudgetSettings};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub async fn list(
    State(state): State<ServerState>,
    Query(payload): Query<BudgetQuery>,
) -> Result<Json<Vec<BudgetReport>>, ServerError> {
    Ok(Json(
        state.engine.list_budgets(payload.year, payload.month).await?,
    ))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BudgetNew>,
) -> Result<Json<Budget>, ServerError> {
    let budget = state
        .engine
        .create_budget(
            payload.category_id,
            payload.year,
            payload.month,
            BudgetSettings {
                amount: payload.amount,
                rollover_enabled: payload.rollover_enabled,
                rollover_cap: payload.rollover_cap,
                alert_thresholds: payload.alert_thresholds,
            },
        )
        .await?;
    Ok(Json(budget))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BudgetUpdate>,
) -> Result<Json<Budget>, ServerError> {
    let budget = state
        .engine
        .update_budget(
            id,
            BudgetSettings {
                amount: payload.amount,
                rollover_enabled: payload.rollover_enabled,
                rollover_cap: payload.rollover_cap,
                alert_thresholds: payload.alert_thresholds,
            },
        )
        .await?;
    Ok(Json(budget))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_budget(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn year_months(
    State(state): State<ServerState>,
) -> Result<Json<Vec<YearMonth>>, ServerError> {
    let pairs = state.engine.budget_year_months().await?;
    Ok(Json(
        pairs
            .into_iter()
            .map(|(year, month)| YearMonth { year, month })
            .collect(),
    ))
}
