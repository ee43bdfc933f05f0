//! Savings goal primitives.
//!
//! A goal tracks progress toward a target amount, optionally tied to an
//! asset and a deadline. Contributions go through an atomic storage-side
//! increment so concurrent writers never lose updates.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: Option<NaiveDate>,
    pub asset_id: Option<Uuid>,
    pub is_active: bool,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl SavingsGoal {
    pub fn new(
        name: String,
        icon: String,
        color: String,
        target_amount: f64,
        target_date: Option<NaiveDate>,
        asset_id: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            icon,
            color,
            target_amount,
            current_amount: 0.0,
            target_date,
            asset_id,
            is_active: true,
            created: now,
            updated: now,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "savings_goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: Option<Date>,
    pub asset_id: Option<String>,
    pub is_active: bool,
    pub created: DateTimeUtc,
    pub updated: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&SavingsGoal> for ActiveModel {
    fn from(goal: &SavingsGoal) -> Self {
        Self {
            id: ActiveValue::Set(goal.id.to_string()),
            name: ActiveValue::Set(goal.name.clone()),
            icon: ActiveValue::Set(goal.icon.clone()),
            color: ActiveValue::Set(goal.color.clone()),
            target_amount: ActiveValue::Set(goal.target_amount),
            current_amount: ActiveValue::Set(goal.current_amount),
            target_date: ActiveValue::Set(goal.target_date),
            asset_id: ActiveValue::Set(goal.asset_id.map(|id| id.to_string())),
            is_active: ActiveValue::Set(goal.is_active),
            created: ActiveValue::Set(goal.created),
            updated: ActiveValue::Set(goal.updated),
        }
    }
}

impl TryFrom<Model> for SavingsGoal {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("savings goal not exists".to_string()))?,
            name: model.name,
            icon: model.icon,
            color: model.color,
            target_amount: model.target_amount,
            current_amount: model.current_amount,
            target_date: model.target_date,
            asset_id: model.asset_id.and_then(|s| Uuid::parse_str(&s).ok()),
            is_active: model.is_active,
            created: model.created,
            updated: model.updated,
        })
    }
}
