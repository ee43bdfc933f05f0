//! Transaction primitives.
//!
//! A transaction is an immutable ledger event. The base row carries the
//! amount and date; exactly one detail row (income/expense or transfer)
//! carries the direction and the accounts it touches. Amounts are stored
//! positive, direction is derived from the detail at read time.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CategoryKind, EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    IncomeExpenses,
    Transfer,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IncomeExpenses => "income_expenses",
            Self::Transfer => "transfer",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income_expenses" => Ok(Self::IncomeExpenses),
            "transfer" => Ok(Self::Transfer),
            other => Err(EngineError::InvalidInput(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

/// Where an expense happened. Rows without a name or with missing/zero
/// coordinates never reach analytics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionDetail {
    IncomeExpense {
        kind: CategoryKind,
        particulars: String,
        asset_id: Uuid,
        category_id: Uuid,
        ledgers: Vec<Uuid>,
        location: Option<Location>,
    },
    Transfer {
        from_asset_id: Uuid,
        to_asset_id: Uuid,
    },
}

impl TransactionDetail {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::IncomeExpense { .. } => TransactionKind::IncomeExpenses,
            Self::Transfer { .. } => TransactionKind::Transfer,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    pub date: NaiveDate,
    pub receipt: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub detail: TransactionDetail,
}

impl Transaction {
    pub fn new(
        amount: f64,
        date: NaiveDate,
        receipt: Option<String>,
        detail: TransactionDetail,
    ) -> ResultEngine<Self> {
        crate::util::validate_amount(amount)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            amount,
            date,
            receipt,
            created: now,
            updated: now,
            detail,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub kind: String,
    pub amount: f64,
    pub date: Date,
    pub receipt: Option<String>,
    pub created: DateTimeUtc,
    pub updated: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::income_expenses::Entity")]
    IncomeExpenses,
    #[sea_orm(has_one = "super::transfers::Entity")]
    Transfers,
}

impl Related<super::income_expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncomeExpenses.def()
    }
}

impl Related<super::transfers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transfers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            kind: ActiveValue::Set(tx.detail.kind().as_str().to_string()),
            amount: ActiveValue::Set(tx.amount),
            date: ActiveValue::Set(tx.date),
            receipt: ActiveValue::Set(tx.receipt.clone()),
            created: ActiveValue::Set(tx.created),
            updated: ActiveValue::Set(tx.updated),
        }
    }
}

impl Transaction {
    /// Rebuild the domain transaction from its base row and the detail the
    /// caller joined back on. The base row's kind must agree with the detail.
    pub(crate) fn from_parts(model: Model, detail: TransactionDetail) -> ResultEngine<Self> {
        let kind = TransactionKind::try_from(model.kind.as_str())?;
        if kind != detail.kind() {
            return Err(EngineError::InvalidInput(
                "transaction detail does not match its kind".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("transaction not exists".to_string()))?,
            amount: model.amount,
            date: model.date,
            receipt: model.receipt,
            created: model.created,
            updated: model.updated,
            detail,
        })
    }
}
