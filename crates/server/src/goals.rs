//! Savings goal API endpoints.

use api_types::goal::{GoalContribution, GoalNew};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{GoalDraft, SavingsGoal};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn to_draft(payload: GoalNew) -> GoalDraft {
    GoalDraft {
        name: payload.name,
        icon: payload.icon,
        color: payload.color,
        target_amount: payload.target_amount,
        target_date: payload.target_date,
        asset_id: payload.asset_id,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<SavingsGoal>>, ServerError> {
    Ok(Json(state.engine.list_goals().await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GoalNew>,
) -> Result<Json<SavingsGoal>, ServerError> {
    Ok(Json(state.engine.create_goal(to_draft(payload)).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GoalNew>,
) -> Result<Json<SavingsGoal>, ServerError> {
    Ok(Json(state.engine.update_goal(id, to_draft(payload)).await?))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_goal(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn contribute(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GoalContribution>,
) -> Result<Json<SavingsGoal>, ServerError> {
    Ok(Json(
        state.engine.contribute_to_goal(id, payload.amount).await?,
    ))
}
