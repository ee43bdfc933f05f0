//! Savings goal management.

use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, Statement, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, SavingsGoal, assets, savings_goals, util::normalize_required_name};

use super::Engine;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalDraft {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    pub target_amount: f64,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub asset_id: Option<Uuid>,
}

impl GoalDraft {
    fn validate(&self) -> ResultEngine<String> {
        if !self.target_amount.is_finite() || self.target_amount < 0.0 {
            return Err(EngineError::InvalidInput(
                "target amount must be >= 0".to_string(),
            ));
        }
        normalize_required_name(&self.name, "savings goal")
    }
}

impl Engine {
    /// Active goals, oldest first.
    pub async fn list_goals(&self) -> ResultEngine<Vec<SavingsGoal>> {
        let models = savings_goals::Entity::find()
            .filter(savings_goals::Column::IsActive.eq(true))
            .order_by_asc(savings_goals::Column::Created)
            .all(&self.database)
            .await?;
        models.into_iter().map(SavingsGoal::try_from).collect()
    }

    pub async fn create_goal(&self, draft: GoalDraft) -> ResultEngine<SavingsGoal> {
        let name = draft.validate()?;
        if let Some(asset_id) = draft.asset_id {
            assets::Entity::find_by_id(asset_id.to_string())
                .one(&self.database)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("asset not exists".to_string()))?;
        }

        let goal = SavingsGoal::new(
            name,
            draft.icon,
            draft.color,
            draft.target_amount,
            draft.target_date,
            draft.asset_id,
        );
        savings_goals::ActiveModel::from(&goal)
            .insert(&self.database)
            .await?;
        Ok(goal)
    }

    pub async fn update_goal(&self, goal_id: Uuid, draft: GoalDraft) -> ResultEngine<SavingsGoal> {
        let name = draft.validate()?;
        if let Some(asset_id) = draft.asset_id {
            assets::Entity::find_by_id(asset_id.to_string())
                .one(&self.database)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("asset not exists".to_string()))?;
        }
        let model = savings_goals::Entity::find_by_id(goal_id.to_string())
            .one(&self.database)
            .await?
            .filter(|m| m.is_active)
            .ok_or_else(|| EngineError::KeyNotFound("savings goal not exists".to_string()))?;

        let mut active: savings_goals::ActiveModel = model.into();
        active.name = ActiveValue::Set(name);
        active.icon = ActiveValue::Set(draft.icon);
        active.color = ActiveValue::Set(draft.color);
        active.target_amount = ActiveValue::Set(draft.target_amount);
        active.target_date = ActiveValue::Set(draft.target_date);
        active.asset_id = ActiveValue::Set(draft.asset_id.map(|id| id.to_string()));
        active.updated = ActiveValue::Set(Utc::now());

        SavingsGoal::try_from(active.update(&self.database).await?)
    }

    /// Deactivate a goal.
    pub async fn delete_goal(&self, goal_id: Uuid) -> ResultEngine<()> {
        let model = savings_goals::Entity::find_by_id(goal_id.to_string())
            .one(&self.database)
            .await?
            .filter(|m| m.is_active)
            .ok_or_else(|| EngineError::KeyNotFound("savings goal not exists".to_string()))?;

        let mut active: savings_goals::ActiveModel = model.into();
        active.is_active = ActiveValue::Set(false);
        active.updated = ActiveValue::Set(Utc::now());
        active.update(&self.database).await?;
        Ok(())
    }

    /// Add to (or with a negative amount, withdraw from) a goal's saved
    /// total. The increment happens in one storage-side statement and the
    /// result is clamped at zero, so concurrent contributions can never
    /// lose updates or drive the total negative.
    pub async fn contribute_to_goal(
        &self,
        goal_id: Uuid,
        amount: f64,
    ) -> ResultEngine<SavingsGoal> {
        if !amount.is_finite() || amount == 0.0 {
            return Err(EngineError::InvalidInput(
                "contribution amount must be a non-zero finite number".to_string(),
            ));
        }

        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "UPDATE savings_goals \
             SET current_amount = MAX(0, ROUND(current_amount + ?, 2)), updated = ? \
             WHERE id = ? AND is_active = TRUE",
            [amount.into(), Utc::now().into(), goal_id.to_string().into()],
        );
        let result = self.database.execute(stmt).await?;
        if result.rows_affected() == 0 {
            return Err(EngineError::KeyNotFound(
                "savings goal not exists".to_string(),
            ));
        }

        let model = savings_goals::Entity::find_by_id(goal_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("savings goal not exists".to_string()))?;
        SavingsGoal::try_from(model)
    }
}
