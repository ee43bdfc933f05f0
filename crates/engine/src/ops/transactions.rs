//! Write path for the transaction ledger.
//!
//! Base rows and detail rows are always inserted or replaced inside one
//! DB transaction, so the ledger can never hold a base row without its
//! detail (or the other way around).

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    CategoryKind, EngineError, Location, ResultEngine, Transaction, TransactionDetail, assets,
    income_expenses, ledgers, transactions, transfers,
    util::{normalize_required_name, validate_amount},
};

use super::{Engine, with_tx};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncomeExpenseDraft {
    pub kind: CategoryKind,
    pub particulars: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub asset_id: Uuid,
    pub category_id: Uuid,
    #[serde(default)]
    pub ledgers: Vec<Uuid>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub receipt: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransferDraft {
    pub amount: f64,
    pub date: NaiveDate,
    pub from_asset_id: Uuid,
    pub to_asset_id: Uuid,
    #[serde(default)]
    pub receipt: Option<String>,
}

/// Either shape a transaction can take; used by the update path where
/// the caller may swap a transfer for an income/expense entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionDraft {
    IncomeExpense(IncomeExpenseDraft),
    Transfer(TransferDraft),
}

impl Engine {
    async fn validate_income_expense(
        &self,
        draft: &IncomeExpenseDraft,
    ) -> ResultEngine<(String, TransactionDetail)> {
        validate_amount(draft.amount)?;
        let particulars = normalize_required_name(&draft.particulars, "particulars")?;

        assets::Entity::find_by_id(draft.asset_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("asset not exists".to_string()))?;

        let category = self.require_category(draft.category_id).await?;
        if category.kind != draft.kind {
            return Err(EngineError::InvalidInput(format!(
                "category \"{}\" is {}, not {}",
                category.name,
                category.kind.as_str(),
                draft.kind.as_str()
            )));
        }

        for ledger_id in &draft.ledgers {
            ledgers::Entity::find_by_id(ledger_id.to_string())
                .one(&self.database)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("ledger not exists".to_string()))?;
        }

        Ok((
            particulars.clone(),
            TransactionDetail::IncomeExpense {
                kind: draft.kind,
                particulars,
                asset_id: draft.asset_id,
                category_id: draft.category_id,
                ledgers: draft.ledgers.clone(),
                location: draft.location.clone(),
            },
        ))
    }

    async fn validate_transfer(&self, draft: &TransferDraft) -> ResultEngine<TransactionDetail> {
        validate_amount(draft.amount)?;
        if draft.from_asset_id == draft.to_asset_id {
            return Err(EngineError::InvalidInput(
                "from_asset_id and to_asset_id must differ".to_string(),
            ));
        }
        for asset_id in [draft.from_asset_id, draft.to_asset_id] {
            assets::Entity::find_by_id(asset_id.to_string())
                .one(&self.database)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("asset not exists".to_string()))?;
        }
        Ok(TransactionDetail::Transfer {
            from_asset_id: draft.from_asset_id,
            to_asset_id: draft.to_asset_id,
        })
    }

    /// Record an income or expense entry.
    pub async fn create_income_expense(
        &self,
        draft: IncomeExpenseDraft,
    ) -> ResultEngine<Transaction> {
        let (particulars, detail) = self.validate_income_expense(&draft).await?;
        let tx = Transaction::new(draft.amount, draft.date, draft.receipt.clone(), detail)?;

        with_tx!(self, |db_tx| {
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            income_expenses::active_model(
                tx.id,
                draft.kind,
                &particulars,
                draft.asset_id,
                draft.category_id,
                &draft.ledgers,
                draft.location.as_ref(),
            )
            .insert(&db_tx)
            .await?;
            Ok::<_, EngineError>(())
        })?;
        Ok(tx)
    }

    /// Record a transfer between two assets. One row moves the amount;
    /// the per-asset split into outflow and inflow happens at read time.
    pub async fn create_transfer(&self, draft: TransferDraft) -> ResultEngine<Transaction> {
        let detail = self.validate_transfer(&draft).await?;
        let tx = Transaction::new(draft.amount, draft.date, draft.receipt.clone(), detail)?;

        with_tx!(self, |db_tx| {
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            transfers::active_model(tx.id, draft.from_asset_id, draft.to_asset_id)
                .insert(&db_tx)
                .await?;
            Ok::<_, EngineError>(())
        })?;
        Ok(tx)
    }

    /// Replace a transaction with the drafted shape. The detail row is
    /// rewritten, so the update may also change the transaction's kind.
    pub async fn update_transaction(
        &self,
        transaction_id: Uuid,
        draft: TransactionDraft,
    ) -> ResultEngine<Transaction> {
        let model = transactions::Entity::find_by_id(transaction_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?;

        let (amount, date, receipt, detail) = match &draft {
            TransactionDraft::IncomeExpense(d) => {
                let (_, detail) = self.validate_income_expense(d).await?;
                (d.amount, d.date, d.receipt.clone(), detail)
            }
            TransactionDraft::Transfer(d) => {
                let detail = self.validate_transfer(d).await?;
                (d.amount, d.date, d.receipt.clone(), detail)
            }
        };
        let updated_at = Utc::now();

        with_tx!(self, |db_tx| {
            income_expenses::Entity::delete_many()
                .filter(income_expenses::Column::TransactionId.eq(model.id.clone()))
                .exec(&db_tx)
                .await?;
            transfers::Entity::delete_many()
                .filter(transfers::Column::TransactionId.eq(model.id.clone()))
                .exec(&db_tx)
                .await?;

            match &detail {
                TransactionDetail::IncomeExpense {
                    kind,
                    particulars,
                    asset_id,
                    category_id,
                    ledgers,
                    location,
                } => {
                    income_expenses::active_model(
                        transaction_id,
                        *kind,
                        particulars,
                        *asset_id,
                        *category_id,
                        ledgers,
                        location.as_ref(),
                    )
                    .insert(&db_tx)
                    .await?;
                }
                TransactionDetail::Transfer {
                    from_asset_id,
                    to_asset_id,
                } => {
                    transfers::active_model(transaction_id, *from_asset_id, *to_asset_id)
                        .insert(&db_tx)
                        .await?;
                }
            }

            let base = transactions::ActiveModel {
                id: ActiveValue::Set(model.id.clone()),
                kind: ActiveValue::Set(detail.kind().as_str().to_string()),
                amount: ActiveValue::Set(amount),
                date: ActiveValue::Set(date),
                receipt: ActiveValue::Set(receipt.clone()),
                updated: ActiveValue::Set(updated_at),
                ..Default::default()
            };
            base.update(&db_tx).await?;
            Ok::<_, EngineError>(())
        })?;

        Ok(Transaction {
            id: transaction_id,
            amount,
            date,
            receipt,
            created: model.created,
            updated: updated_at,
            detail,
        })
    }

    /// Remove a transaction and its detail row.
    pub async fn delete_transaction(&self, transaction_id: Uuid) -> ResultEngine<()> {
        let model = transactions::Entity::find_by_id(transaction_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?;

        with_tx!(self, |db_tx| {
            income_expenses::Entity::delete_many()
                .filter(income_expenses::Column::TransactionId.eq(model.id.clone()))
                .exec(&db_tx)
                .await?;
            transfers::Entity::delete_many()
                .filter(transfers::Column::TransactionId.eq(model.id.clone()))
                .exec(&db_tx)
                .await?;
            transactions::Entity::delete_by_id(model.id.clone())
                .exec(&db_tx)
                .await?;
            Ok::<_, EngineError>(())
        })
    }

    /// All transactions with their details, newest first.
    pub async fn list_transactions(&self) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::Created)
            .all(&self.database)
            .await?;

        let mut details: HashMap<String, TransactionDetail> = HashMap::new();
        for row in income_expenses::Entity::find().all(&self.database).await? {
            let tx_id = row.transaction_id.clone();
            details.insert(tx_id, TransactionDetail::try_from(row)?);
        }
        for row in transfers::Entity::find().all(&self.database).await? {
            let tx_id = row.transaction_id.clone();
            details.insert(tx_id, TransactionDetail::try_from(row)?);
        }

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            let Some(detail) = details.remove(&model.id) else {
                continue;
            };
            out.push(Transaction::from_parts(model, detail)?);
        }
        Ok(out)
    }

    /// One transaction with its detail.
    pub async fn transaction(&self, transaction_id: Uuid) -> ResultEngine<Transaction> {
        let model = transactions::Entity::find_by_id(transaction_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?;

        let detail = if let Some(row) = income_expenses::Entity::find()
            .filter(income_expenses::Column::TransactionId.eq(model.id.clone()))
            .one(&self.database)
            .await?
        {
            TransactionDetail::try_from(row)?
        } else if let Some(row) = transfers::Entity::find()
            .filter(transfers::Column::TransactionId.eq(model.id.clone()))
            .one(&self.database)
            .await?
        {
            TransactionDetail::try_from(row)?
        } else {
            return Err(EngineError::KeyNotFound(
                "transaction not exists".to_string(),
            ));
        };

        Transaction::from_parts(model, detail)
    }
}
