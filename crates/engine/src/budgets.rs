//! Budget primitives.
//!
//! A budget caps the spending of one expenses-kind category for one
//! calendar month. Months are 0-indexed (0 = January) everywhere in the
//! budget API. Deleting a budget only deactivates it, so the uniqueness
//! rule binds active rows alone.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Rollover configuration and alerting knobs shared by create and update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetSettings {
    pub amount: f64,
    pub rollover_enabled: bool,
    /// Percent of the previous month's amount that may carry forward.
    pub rollover_cap: f64,
    /// Spent-percentage levels at which clients raise alerts.
    pub alert_thresholds: Vec<f64>,
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            amount: 0.0,
            rollover_enabled: false,
            rollover_cap: 100.0,
            alert_thresholds: Vec::new(),
        }
    }
}

impl BudgetSettings {
    pub(crate) fn validate(&self) -> ResultEngine<()> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(EngineError::InvalidInput(
                "budget amount must be >= 0".to_string(),
            ));
        }
        if !self.rollover_cap.is_finite() || self.rollover_cap < 0.0 {
            return Err(EngineError::InvalidInput(
                "rollover cap must be >= 0".to_string(),
            ));
        }
        if self
            .alert_thresholds
            .iter()
            .any(|t| !t.is_finite() || *t < 0.0)
        {
            return Err(EngineError::InvalidInput(
                "alert thresholds must be >= 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub category_id: Uuid,
    pub year: i32,
    /// 0-indexed calendar month (0 = January).
    pub month: i32,
    pub amount: f64,
    pub rollover_enabled: bool,
    pub rollover_cap: f64,
    pub alert_thresholds: Vec<f64>,
    pub is_active: bool,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Budget {
    pub fn new(category_id: Uuid, year: i32, month: i32, settings: BudgetSettings) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            category_id,
            year,
            month,
            amount: settings.amount,
            rollover_enabled: settings.rollover_enabled,
            rollover_cap: settings.rollover_cap,
            alert_thresholds: settings.alert_thresholds,
            is_active: true,
            created: now,
            updated: now,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub category_id: String,
    pub year: i32,
    pub month: i32,
    pub amount: f64,
    pub rollover_enabled: bool,
    pub rollover_cap: f64,
    pub alert_thresholds: String,
    pub is_active: bool,
    pub created: DateTimeUtc,
    pub updated: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub(crate) fn encode_thresholds(thresholds: &[f64]) -> String {
    serde_json::to_string(thresholds).unwrap_or_else(|_| "[]".to_string())
}

pub(crate) fn decode_thresholds(raw: &str) -> Vec<f64> {
    serde_json::from_str(raw).unwrap_or_default()
}

impl From<&Budget> for ActiveModel {
    fn from(budget: &Budget) -> Self {
        Self {
            id: ActiveValue::Set(budget.id.to_string()),
            category_id: ActiveValue::Set(budget.category_id.to_string()),
            year: ActiveValue::Set(budget.year),
            month: ActiveValue::Set(budget.month),
            amount: ActiveValue::Set(budget.amount),
            rollover_enabled: ActiveValue::Set(budget.rollover_enabled),
            rollover_cap: ActiveValue::Set(budget.rollover_cap),
            alert_thresholds: ActiveValue::Set(encode_thresholds(&budget.alert_thresholds)),
            is_active: ActiveValue::Set(budget.is_active),
            created: ActiveValue::Set(budget.created),
            updated: ActiveValue::Set(budget.updated),
        }
    }
}

impl TryFrom<Model> for Budget {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("budget not exists".to_string()))?,
            category_id: Uuid::parse_str(&model.category_id)
                .map_err(|_| EngineError::KeyNotFound("category not exists".to_string()))?,
            year: model.year,
            month: model.month,
            amount: model.amount,
            rollover_enabled: model.rollover_enabled,
            rollover_cap: model.rollover_cap,
            alert_thresholds: decode_thresholds(&model.alert_thresholds),
            is_active: model.is_active,
            created: model.created,
            updated: model.updated,
        })
    }
}
