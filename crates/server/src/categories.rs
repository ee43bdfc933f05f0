//! Category API endpoints.

use api_types::category::{CategoryNew, CategoryUpdate};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Category, CategoryKind};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Category>>, ServerError> {
    Ok(Json(state.engine.list_categories().await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryNew>,
) -> Result<Json<Category>, ServerError> {
    let kind = CategoryKind::try_from(payload.kind.as_str())?;
    let category = state
        .engine
        .create_category(&payload.name, &payload.icon, &payload.color, kind)
        .await?;
    Ok(Json(category))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryUpdate>,
) -> Result<Json<Category>, ServerError> {
    let category = state
        .engine
        .update_category(
            id,
            payload.name.as_deref(),
            payload.icon.as_deref(),
            payload.color.as_deref(),
        )
        .await?;
    Ok(Json(category))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
