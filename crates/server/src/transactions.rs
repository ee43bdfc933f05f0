//! Transaction API endpoints.

use api_types::transaction::TransactionNew;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{
    CategoryKind, IncomeExpenseDraft, Location, Transaction, TransactionDraft, TransferDraft,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn to_draft(payload: TransactionNew) -> Result<TransactionDraft, ServerError> {
    let draft = match payload {
        TransactionNew::IncomeExpense {
            kind,
            particulars,
            amount,
            date,
            asset_id,
            category_id,
            ledgers,
            location,
            receipt,
        } => TransactionDraft::IncomeExpense(IncomeExpenseDraft {
            kind: CategoryKind::try_from(kind.as_str())?,
            particulars,
            amount,
            date,
            asset_id,
            category_id,
            ledgers,
            location: location.map(|l| Location {
                name: l.name,
                latitude: l.latitude,
                longitude: l.longitude,
            }),
            receipt,
        }),
        TransactionNew::Transfer {
            amount,
            date,
            from_asset_id,
            to_asset_id,
            receipt,
        } => TransactionDraft::Transfer(TransferDraft {
            amount,
            date,
            from_asset_id,
            to_asset_id,
            receipt,
        }),
    };
    Ok(draft)
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<Transaction>>, ServerError> {
    Ok(Json(state.engine.list_transactions().await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<Json<Transaction>, ServerError> {
    let tx = match to_draft(payload)? {
        TransactionDraft::IncomeExpense(draft) => {
            state.engine.create_income_expense(draft).await?
        }
        TransactionDraft::Transfer(draft) => state.engine.create_transfer(draft).await?,
    };
    Ok(Json(tx))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionNew>,
) -> Result<Json<Transaction>, ServerError> {
    let tx = state.engine.update_transaction(id, to_draft(payload)?).await?;
    Ok(Json(tx))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_transaction(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
