//! Income/expense detail rows.
//!
//! One row per income/expense transaction. Ledger tags are stored as a
//! JSON array of ids; location columns are nullable and only meaningful
//! together.

use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{
    CategoryKind, EngineError, ResultEngine,
    transactions::{Location, TransactionDetail},
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "income_expense_details")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub transaction_id: String,
    pub kind: String,
    pub particulars: String,
    pub asset_id: String,
    pub category_id: String,
    pub ledgers: String,
    pub location_name: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lon: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::transactions::Entity",
        from = "Column::TransactionId",
        to = "super::transactions::Column::Id",
        on_delete = "Cascade"
    )]
    Transactions,
    #[sea_orm(
        belongs_to = "super::assets::Entity",
        from = "Column::AssetId",
        to = "super::assets::Column::Id"
    )]
    Assets,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Categories,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::assets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assets.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub(crate) fn encode_ledgers(ledgers: &[Uuid]) -> String {
    serde_json::to_string(&ledgers.iter().map(Uuid::to_string).collect::<Vec<_>>())
        .unwrap_or_else(|_| "[]".to_string())
}

pub(crate) fn decode_ledgers(raw: &str) -> Vec<Uuid> {
    serde_json::from_str::<Vec<String>>(raw)
        .unwrap_or_default()
        .iter()
        .filter_map(|s| Uuid::parse_str(s).ok())
        .collect()
}

/// Build the detail row for an income/expense transaction.
pub(crate) fn active_model(
    transaction_id: Uuid,
    kind: CategoryKind,
    particulars: &str,
    asset_id: Uuid,
    category_id: Uuid,
    ledgers: &[Uuid],
    location: Option<&Location>,
) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4().to_string()),
        transaction_id: ActiveValue::Set(transaction_id.to_string()),
        kind: ActiveValue::Set(kind.as_str().to_string()),
        particulars: ActiveValue::Set(particulars.to_string()),
        asset_id: ActiveValue::Set(asset_id.to_string()),
        category_id: ActiveValue::Set(category_id.to_string()),
        ledgers: ActiveValue::Set(encode_ledgers(ledgers)),
        location_name: ActiveValue::Set(location.map(|l| l.name.clone())),
        location_lat: ActiveValue::Set(location.map(|l| l.latitude)),
        location_lon: ActiveValue::Set(location.map(|l| l.longitude)),
    }
}

impl TryFrom<Model> for TransactionDetail {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        let location = match (model.location_name, model.location_lat, model.location_lon) {
            (Some(name), Some(latitude), Some(longitude)) => Some(Location {
                name,
                latitude,
                longitude,
            }),
            _ => None,
        };
        Ok(Self::IncomeExpense {
            kind: CategoryKind::try_from(model.kind.as_str())?,
            particulars: model.particulars,
            asset_id: Uuid::parse_str(&model.asset_id)
                .map_err(|_| EngineError::KeyNotFound("asset not exists".to_string()))?,
            category_id: Uuid::parse_str(&model.category_id)
                .map_err(|_| EngineError::KeyNotFound("category not exists".to_string()))?,
            ledgers: decode_ledgers(&model.ledgers),
            location,
        })
    }
}
