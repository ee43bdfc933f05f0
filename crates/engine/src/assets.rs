//! Asset primitives.
//!
//! An `Asset` is a container of value (bank account, cash, e-wallet). Its
//! stored state is only the starting balance; every later balance is
//! reconstructed from the transaction ledger.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::normalize_name_key};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub starting_balance: f64,
}

impl Asset {
    pub fn new(name: String, icon: String, starting_balance: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            icon,
            starting_balance,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub name_norm: String,
    pub icon: String,
    pub starting_balance: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::income_expenses::Entity")]
    IncomeExpenses,
}

impl Related<super::income_expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncomeExpenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<&Asset> for ActiveModel {
    type Error = EngineError;

    fn try_from(asset: &Asset) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ActiveValue::Set(asset.id.to_string()),
            name: ActiveValue::Set(asset.name.clone()),
            name_norm: ActiveValue::Set(normalize_name_key(&asset.name)?),
            icon: ActiveValue::Set(asset.icon.clone()),
            starting_balance: ActiveValue::Set(asset.starting_balance),
        })
    }
}

impl TryFrom<Model> for Asset {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("asset not exists".to_string()))?,
            name: model.name,
            icon: model.icon,
            starting_balance: model.starting_balance,
        })
    }
}
