//! Monthly category budgets and the rollover calculation.
//!
//! Budget months are 0-indexed (0 = January). A budget is soft-deleted:
//! the row stays for history, the uniqueness rule only binds active rows.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, Statement, prelude::*};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    Budget, BudgetSettings, CategoryKind, EngineError, ResultEngine, budgets,
    util::{
        month_end, month_start, next_month_start, previous_budget_period, round_cents, today,
        validate_budget_month,
    },
};

use super::Engine;

/// A budget enriched with the month's derived figures.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetReport {
    #[serde(flatten)]
    pub budget: Budget,
    pub spent_amount: f64,
    pub rollover_amount: f64,
}

/// Unspent carry-forward from the previous period, capped at
/// `cap_percent` of the previous amount and clamped at zero. No previous
/// active budget, rollover disabled, or an over-budget previous month
/// all carry nothing forward.
fn rollover_amount(enabled: bool, cap_percent: f64, prev: Option<(f64, f64)>) -> f64 {
    if !enabled {
        return 0.0;
    }
    let Some((prev_amount, prev_spent)) = prev else {
        return 0.0;
    };
    let unspent = prev_amount - prev_spent;
    let max_rollover = (prev_amount * cap_percent / 100.0).max(0.0);
    round_cents(unspent.clamp(0.0, max_rollover))
}

impl Engine {
    /// Expense totals per category within a date window, via one grouped
    /// query.
    async fn spent_by_category(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ResultEngine<HashMap<String, f64>> {
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "SELECT d.category_id AS category_id, COALESCE(SUM(t.amount), 0) AS spent \
             FROM income_expense_details d \
             INNER JOIN transactions t ON t.id = d.transaction_id \
             WHERE d.kind = ? AND t.date >= ? AND t.date <= ? \
             GROUP BY d.category_id",
            [
                CategoryKind::Expenses.as_str().into(),
                start.into(),
                end.into(),
            ],
        );
        let rows = self.database.query_all(stmt).await?;

        let mut out = HashMap::with_capacity(rows.len());
        for row in rows {
            let category_id: String = row.try_get("", "category_id")?;
            let spent: f64 = row.try_get("", "spent")?;
            out.insert(category_id, spent);
        }
        Ok(out)
    }

    async fn active_budgets(&self, year: i32, month0: i32) -> ResultEngine<Vec<budgets::Model>> {
        Ok(budgets::Entity::find()
            .filter(budgets::Column::Year.eq(year))
            .filter(budgets::Column::Month.eq(month0))
            .filter(budgets::Column::IsActive.eq(true))
            .all(&self.database)
            .await?)
    }

    /// Active budgets for one period with spent and rollover amounts.
    pub async fn list_budgets(&self, year: i32, month0: i32) -> ResultEngine<Vec<BudgetReport>> {
        validate_budget_month(month0)?;
        let month = month0 as u32 + 1;
        let spent = self
            .spent_by_category(month_start(year, month)?, month_end(year, month)?)
            .await?;

        let (prev_year, prev_month0) = previous_budget_period(year, month0);
        let prev_month = prev_month0 as u32 + 1;
        let prev_spent = self
            .spent_by_category(
                month_start(prev_year, prev_month)?,
                month_end(prev_year, prev_month)?,
            )
            .await?;
        let prev_amounts: HashMap<String, f64> = self
            .active_budgets(prev_year, prev_month0)
            .await?
            .into_iter()
            .map(|b| (b.category_id.clone(), b.amount))
            .collect();

        let mut out = Vec::new();
        for model in self.active_budgets(year, month0).await? {
            let category_id = model.category_id.clone();
            let budget = Budget::try_from(model)?;
            let prev = prev_amounts.get(&category_id).map(|amount| {
                (
                    *amount,
                    prev_spent.get(&category_id).copied().unwrap_or(0.0),
                )
            });
            out.push(BudgetReport {
                spent_amount: round_cents(spent.get(&category_id).copied().unwrap_or(0.0)),
                rollover_amount: rollover_amount(
                    budget.rollover_enabled,
                    budget.rollover_cap,
                    prev,
                ),
                budget,
            });
        }
        out.sort_by(|a, b| a.budget.created.cmp(&b.budget.created));
        Ok(out)
    }

    /// Create a budget for an expenses-kind category. At most one active
    /// budget may exist per (category, year, month).
    pub async fn create_budget(
        &self,
        category_id: Uuid,
        year: i32,
        month0: i32,
        settings: BudgetSettings,
    ) -> ResultEngine<Budget> {
        validate_budget_month(month0)?;
        settings.validate()?;

        let category = self.require_category(category_id).await?;
        if category.kind != CategoryKind::Expenses {
            return Err(EngineError::InvalidInput(format!(
                "category \"{}\" is not an expenses category",
                category.name
            )));
        }

        let clash = budgets::Entity::find()
            .filter(budgets::Column::CategoryId.eq(category_id.to_string()))
            .filter(budgets::Column::Year.eq(year))
            .filter(budgets::Column::Month.eq(month0))
            .filter(budgets::Column::IsActive.eq(true))
            .one(&self.database)
            .await?;
        if clash.is_some() {
            return Err(EngineError::ExistingKey(
                "a budget for this category already exists for this month".to_string(),
            ));
        }

        let budget = Budget::new(category_id, year, month0, settings);
        budgets::ActiveModel::from(&budget)
            .insert(&self.database)
            .await?;
        Ok(budget)
    }

    /// Update the settings of an existing budget.
    pub async fn update_budget(
        &self,
        budget_id: Uuid,
        settings: BudgetSettings,
    ) -> ResultEngine<Budget> {
        settings.validate()?;
        let model = budgets::Entity::find_by_id(budget_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("budget not exists".to_string()))?;

        let mut active: budgets::ActiveModel = model.into();
        active.amount = ActiveValue::Set(settings.amount);
        active.rollover_enabled = ActiveValue::Set(settings.rollover_enabled);
        active.rollover_cap = ActiveValue::Set(settings.rollover_cap);
        active.alert_thresholds =
            ActiveValue::Set(budgets::encode_thresholds(&settings.alert_thresholds));
        active.updated = ActiveValue::Set(chrono::Utc::now());

        Budget::try_from(active.update(&self.database).await?)
    }

    /// Deactivate a budget. The row is kept so the period can be
    /// re-budgeted later without losing history.
    pub async fn delete_budget(&self, budget_id: Uuid) -> ResultEngine<()> {
        let model = budgets::Entity::find_by_id(budget_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("budget not exists".to_string()))?;

        let mut active: budgets::ActiveModel = model.into();
        active.is_active = ActiveValue::Set(false);
        active.updated = ActiveValue::Set(chrono::Utc::now());
        active.update(&self.database).await?;
        Ok(())
    }

    /// Every (year, 0-indexed month) pair from the earliest active
    /// budget's creation month through the month after today, so clients
    /// can navigate to empty months. With no budgets at all, the current
    /// and next month.
    pub async fn budget_year_months(&self) -> ResultEngine<Vec<(i32, i32)>> {
        let earliest = budgets::Entity::find()
            .filter(budgets::Column::IsActive.eq(true))
            .order_by_asc(budgets::Column::Created)
            .one(&self.database)
            .await?;

        let today = today();
        let from = match &earliest {
            Some(model) => {
                let created = model.created.date_naive();
                month_start(created.year(), created.month())?
            }
            None => month_start(today.year(), today.month())?,
        };
        let until = next_month_start(today)?;

        let mut out = Vec::new();
        let mut cursor = from;
        loop {
            out.push((cursor.year(), cursor.month() as i32 - 1));
            if cursor >= until {
                break;
            }
            cursor = next_month_start(cursor)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::rollover_amount;

    #[test]
    fn rollover_caps_unspent() {
        // 100 budgeted, 40 spent, cap 50%: min(60, 50) carries forward.
        assert_eq!(rollover_amount(true, 50.0, Some((100.0, 40.0))), 50.0);
        // Under the cap: the full unspent amount carries.
        assert_eq!(rollover_amount(true, 80.0, Some((100.0, 40.0))), 60.0);
    }

    #[test]
    fn over_budget_previous_month_carries_nothing() {
        assert_eq!(rollover_amount(true, 100.0, Some((100.0, 130.0))), 0.0);
    }

    #[test]
    fn disabled_or_missing_previous_budget_carries_nothing() {
        assert_eq!(rollover_amount(false, 100.0, Some((100.0, 0.0))), 0.0);
        assert_eq!(rollover_amount(true, 100.0, None), 0.0);
    }

    #[test]
    fn zero_cap_carries_nothing() {
        assert_eq!(rollover_amount(true, 0.0, Some((100.0, 0.0))), 0.0);
    }
}
