//! Ledger primitives.
//!
//! Ledgers are free-form tags attached to income/expense entries (a trip,
//! a project). Deleting one only detaches it from entries.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::normalize_name_key};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub color: String,
}

impl Ledger {
    pub fn new(name: String, icon: String, color: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            icon,
            color,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ledgers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub name_norm: String,
    pub icon: String,
    pub color: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<&Ledger> for ActiveModel {
    type Error = EngineError;

    fn try_from(ledger: &Ledger) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ActiveValue::Set(ledger.id.to_string()),
            name: ActiveValue::Set(ledger.name.clone()),
            name_norm: ActiveValue::Set(normalize_name_key(&ledger.name)?),
            icon: ActiveValue::Set(ledger.icon.clone()),
            color: ActiveValue::Set(ledger.color.clone()),
        })
    }
}

impl TryFrom<Model> for Ledger {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("ledger not exists".to_string()))?,
            name: model.name,
            icon: model.icon,
            color: model.color,
        })
    }
}
