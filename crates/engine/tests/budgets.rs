use chrono::{Datelike, NaiveDate};
use sea_orm::Database;

use engine::{BudgetSettings, CategoryKind, Engine, EngineError, IncomeExpenseDraft};
use migration::MigratorTrait;
use uuid::Uuid;

async fn test_engine() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn settings(amount: f64, rollover_enabled: bool, rollover_cap: f64) -> BudgetSettings {
    BudgetSettings {
        amount,
        rollover_enabled,
        rollover_cap,
        alert_thresholds: vec![50.0, 90.0],
    }
}

async fn spend(engine: &Engine, category_id: Uuid, asset_id: Uuid, amount: f64, date: NaiveDate) {
    engine
        .create_income_expense(IncomeExpenseDraft {
            kind: CategoryKind::Expenses,
            particulars: "spend".to_string(),
            amount,
            date,
            asset_id,
            category_id,
            ledgers: Vec::new(),
            location: None,
            receipt: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn report_includes_spent_and_capped_rollover() {
    let engine = test_engine().await;
    let asset = engine.create_asset("Cash", "💶", 0.0).await.unwrap();
    let food = engine
        .create_category("Food", "🍜", "#ff0000", CategoryKind::Expenses)
        .await
        .unwrap();

    // January: 100 budgeted, 40 spent. February: rollover capped at 50%.
    engine
        .create_budget(food.id, 2026, 0, settings(100.0, true, 50.0))
        .await
        .unwrap();
    engine
        .create_budget(food.id, 2026, 1, settings(100.0, true, 50.0))
        .await
        .unwrap();
    spend(&engine, food.id, asset.id, 40.0, date(2026, 1, 15)).await;
    spend(&engine, food.id, asset.id, 30.0, date(2026, 2, 3)).await;

    let reports = engine.list_budgets(2026, 1).await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].spent_amount, 30.0);
    assert_eq!(reports[0].rollover_amount, 50.0);
}

#[tokio::test]
async fn over_budget_previous_month_rolls_nothing_over() {
    let engine = test_engine().await;
    let asset = engine.create_asset("Cash", "💶", 0.0).await.unwrap();
    let food = engine
        .create_category("Food", "🍜", "#ff0000", CategoryKind::Expenses)
        .await
        .unwrap();

    engine
        .create_budget(food.id, 2026, 0, settings(100.0, true, 100.0))
        .await
        .unwrap();
    engine
        .create_budget(food.id, 2026, 1, settings(100.0, true, 100.0))
        .await
        .unwrap();
    spend(&engine, food.id, asset.id, 130.0, date(2026, 1, 15)).await;

    let reports = engine.list_budgets(2026, 1).await.unwrap();
    assert_eq!(reports[0].rollover_amount, 0.0);
}

#[tokio::test]
async fn rollover_disabled_or_no_previous_budget_carries_nothing() {
    let engine = test_engine().await;
    let food = engine
        .create_category("Food", "🍜", "#ff0000", CategoryKind::Expenses)
        .await
        .unwrap();

    // No January budget at all.
    engine
        .create_budget(food.id, 2026, 1, settings(100.0, true, 100.0))
        .await
        .unwrap();
    let reports = engine.list_budgets(2026, 1).await.unwrap();
    assert_eq!(reports[0].rollover_amount, 0.0);

    // Previous budget present but rollover disabled on the current one.
    engine
        .create_budget(food.id, 2026, 2, settings(100.0, false, 100.0))
        .await
        .unwrap();
    let reports = engine.list_budgets(2026, 2).await.unwrap();
    assert_eq!(reports[0].rollover_amount, 0.0);
}

#[tokio::test]
async fn one_active_budget_per_category_and_period() {
    let engine = test_engine().await;
    let food = engine
        .create_category("Food", "🍜", "#ff0000", CategoryKind::Expenses)
        .await
        .unwrap();

    let budget = engine
        .create_budget(food.id, 2026, 4, settings(100.0, false, 100.0))
        .await
        .unwrap();
    let err = engine
        .create_budget(food.id, 2026, 4, settings(200.0, false, 100.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));

    // Deactivation releases the slot.
    engine.delete_budget(budget.id).await.unwrap();
    engine
        .create_budget(food.id, 2026, 4, settings(200.0, false, 100.0))
        .await
        .unwrap();
    let reports = engine.list_budgets(2026, 4).await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].budget.amount, 200.0);
}

#[tokio::test]
async fn budget_requires_an_expenses_category() {
    let engine = test_engine().await;
    let salary = engine
        .create_category("Salary", "💰", "#00ff00", CategoryKind::Income)
        .await
        .unwrap();

    let err = engine
        .create_budget(salary.id, 2026, 0, settings(100.0, false, 100.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn month_outside_zero_to_eleven_is_rejected() {
    let engine = test_engine().await;
    let food = engine
        .create_category("Food", "🍜", "#ff0000", CategoryKind::Expenses)
        .await
        .unwrap();

    for month in [-1, 12] {
        let err = engine
            .create_budget(food.id, 2026, month, settings(100.0, false, 100.0))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
        let err = engine.list_budgets(2026, month).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }
}

#[tokio::test]
async fn update_changes_settings_in_place() {
    let engine = test_engine().await;
    let food = engine
        .create_category("Food", "🍜", "#ff0000", CategoryKind::Expenses)
        .await
        .unwrap();

    let budget = engine
        .create_budget(food.id, 2026, 6, settings(100.0, false, 100.0))
        .await
        .unwrap();
    let updated = engine
        .update_budget(budget.id, settings(250.0, true, 30.0))
        .await
        .unwrap();
    assert_eq!(updated.id, budget.id);
    assert_eq!(updated.amount, 250.0);
    assert!(updated.rollover_enabled);
    assert_eq!(updated.rollover_cap, 30.0);

    let err = engine
        .update_budget(Uuid::new_v4(), settings(1.0, false, 100.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn year_months_span_from_first_budget_to_next_month() {
    let engine = test_engine().await;
    let today = chrono::Utc::now().date_naive();

    // With no budgets: the current and the next month.
    let pairs = engine.budget_year_months().await.unwrap();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0], (today.year(), today.month() as i32 - 1));

    let food = engine
        .create_category("Food", "🍜", "#ff0000", CategoryKind::Expenses)
        .await
        .unwrap();
    engine
        .create_budget(food.id, 2026, 0, settings(100.0, false, 100.0))
        .await
        .unwrap();

    // Budget periods do not matter, only the creation month.
    let pairs = engine.budget_year_months().await.unwrap();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0], (today.year(), today.month() as i32 - 1));
}
