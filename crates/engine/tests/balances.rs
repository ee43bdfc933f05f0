use chrono::NaiveDate;
use sea_orm::Database;

use engine::{
    CategoryKind, Engine, EngineError, IncomeExpenseDraft, RangeMode, TransferDraft,
};
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

async fn seed_categories(engine: &Engine) -> (Uuid, Uuid) {
    let income = engine
        .create_category("Salary", "💰", "#00ff00", CategoryKind::Income)
        .await
        .unwrap();
    let expenses = engine
        .create_category("Food", "🍜", "#ff0000", CategoryKind::Expenses)
        .await
        .unwrap();
    (income.id, expenses.id)
}

fn entry(
    kind: CategoryKind,
    amount: f64,
    date: NaiveDate,
    asset_id: Uuid,
    category_id: Uuid,
) -> IncomeExpenseDraft {
    IncomeExpenseDraft {
        kind,
        particulars: "entry".to_string(),
        amount,
        date,
        asset_id,
        category_id,
        ledgers: Vec::new(),
        location: None,
        receipt: None,
    }
}

#[tokio::test]
async fn series_records_start_of_day_balances() {
    let engine = test_engine().await;
    let (income_cat, expenses_cat) = seed_categories(&engine).await;
    let asset = engine.create_asset("Cash", "💶", 100.0).await.unwrap();

    engine
        .create_income_expense(entry(
            CategoryKind::Income,
            50.0,
            date(2026, 3, 10),
            asset.id,
            income_cat,
        ))
        .await
        .unwrap();
    engine
        .create_income_expense(entry(
            CategoryKind::Expenses,
            20.0,
            date(2026, 3, 12),
            asset.id,
            expenses_cat,
        ))
        .await
        .unwrap();

    let series = engine
        .balance_series(asset.id, RangeMode::All, None, None)
        .await
        .unwrap();

    // Each point is the balance before that day's movements.
    assert_eq!(series.get(&date(2026, 3, 10)), Some(&100.0));
    assert_eq!(series.get(&date(2026, 3, 11)), Some(&150.0));
    assert_eq!(series.get(&date(2026, 3, 12)), Some(&150.0));
    assert_eq!(series.len(), 3);
}

#[tokio::test]
async fn windowed_series_starts_from_the_starting_balance() {
    let engine = test_engine().await;
    let (income_cat, _) = seed_categories(&engine).await;
    let asset = engine.create_asset("Cash", "💶", 0.0).await.unwrap();

    engine
        .create_income_expense(entry(
            CategoryKind::Income,
            300.0,
            date(2026, 1, 5),
            asset.id,
            income_cat,
        ))
        .await
        .unwrap();
    engine
        .create_income_expense(entry(
            CategoryKind::Income,
            100.0,
            date(2026, 4, 2),
            asset.id,
            income_cat,
        ))
        .await
        .unwrap();

    let series = engine
        .balance_series(
            asset.id,
            RangeMode::Custom,
            Some(date(2026, 4, 1)),
            Some(date(2026, 4, 3)),
        )
        .await
        .unwrap();

    // The walk begins at the window start with the starting balance;
    // the January income never enters it.
    assert_eq!(series.get(&date(2026, 4, 1)), Some(&0.0));
    assert_eq!(series.get(&date(2026, 4, 2)), Some(&0.0));
    assert_eq!(series.get(&date(2026, 4, 3)), Some(&100.0));
    assert_eq!(series.len(), 3);
}

#[tokio::test]
async fn movements_before_the_window_are_never_applied() {
    let engine = test_engine().await;
    let (_, expenses_cat) = seed_categories(&engine).await;
    let asset = engine.create_asset("Cash", "💶", 100.0).await.unwrap();

    engine
        .create_income_expense(entry(
            CategoryKind::Expenses,
            30.0,
            date(2026, 1, 5),
            asset.id,
            expenses_cat,
        ))
        .await
        .unwrap();

    let series = engine
        .balance_series(
            asset.id,
            RangeMode::Custom,
            Some(date(2026, 2, 1)),
            Some(date(2026, 2, 2)),
        )
        .await
        .unwrap();
    assert_eq!(series.get(&date(2026, 2, 1)), Some(&100.0));
    assert_eq!(series.get(&date(2026, 2, 2)), Some(&100.0));
    assert_eq!(series.len(), 2);
}

#[tokio::test]
async fn series_is_deterministic_for_identical_arguments() {
    let engine = test_engine().await;
    let (income_cat, expenses_cat) = seed_categories(&engine).await;
    let asset = engine.create_asset("Cash", "💶", 100.0).await.unwrap();

    engine
        .create_income_expense(entry(
            CategoryKind::Income,
            50.0,
            date(2026, 3, 10),
            asset.id,
            income_cat,
        ))
        .await
        .unwrap();
    engine
        .create_income_expense(entry(
            CategoryKind::Expenses,
            20.0,
            date(2026, 3, 10),
            asset.id,
            expenses_cat,
        ))
        .await
        .unwrap();

    let first = engine
        .balance_series(asset.id, RangeMode::All, None, None)
        .await
        .unwrap();
    let second = engine
        .balance_series(asset.id, RangeMode::All, None, None)
        .await
        .unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[tokio::test]
async fn asset_without_transactions_yields_empty_series() {
    let engine = test_engine().await;
    let asset = engine.create_asset("Cash", "💶", 250.0).await.unwrap();

    let series = engine
        .balance_series(asset.id, RangeMode::All, None, None)
        .await
        .unwrap();
    assert!(series.is_empty());
}

#[tokio::test]
async fn unknown_asset_series_fails() {
    let engine = test_engine().await;
    let err = engine
        .balance_series(Uuid::new_v4(), RangeMode::All, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn transfers_conserve_total_balance() {
    let engine = test_engine().await;
    let cash = engine.create_asset("Cash", "💶", 100.0).await.unwrap();
    let bank = engine.create_asset("Bank", "🏦", 500.0).await.unwrap();

    engine
        .create_transfer(TransferDraft {
            amount: 30.0,
            date: date(2026, 2, 14),
            from_asset_id: cash.id,
            to_asset_id: bank.id,
            receipt: None,
        })
        .await
        .unwrap();

    let checkpoints = engine.monthly_asset_balances(2026, 2).await.unwrap();
    assert_eq!(checkpoints[&cash.id].current, 70.0);
    assert_eq!(checkpoints[&bank.id].current, 530.0);

    let total: f64 = checkpoints.values().map(|c| c.current).sum();
    assert_eq!(total, 600.0);
}

#[tokio::test]
async fn monthly_checkpoints_split_last_and_current() {
    let engine = test_engine().await;
    let (income_cat, expenses_cat) = seed_categories(&engine).await;
    let asset = engine.create_asset("Cash", "💶", 0.0).await.unwrap();

    // January movement shows up in both checkpoints of February.
    engine
        .create_income_expense(entry(
            CategoryKind::Income,
            1000.0,
            date(2026, 1, 20),
            asset.id,
            income_cat,
        ))
        .await
        .unwrap();
    // February movement only in the current checkpoint.
    engine
        .create_income_expense(entry(
            CategoryKind::Expenses,
            200.0,
            date(2026, 2, 10),
            asset.id,
            expenses_cat,
        ))
        .await
        .unwrap();
    // March movement in neither.
    engine
        .create_income_expense(entry(
            CategoryKind::Income,
            999.0,
            date(2026, 3, 1),
            asset.id,
            income_cat,
        ))
        .await
        .unwrap();

    let checkpoints = engine.monthly_asset_balances(2026, 2).await.unwrap();
    assert_eq!(checkpoints[&asset.id].last, 1000.0);
    assert_eq!(checkpoints[&asset.id].current, 800.0);
}

#[tokio::test]
async fn asset_without_transactions_reports_starting_balance_at_both_checkpoints() {
    let engine = test_engine().await;
    let asset = engine.create_asset("Cash", "💶", 42.5).await.unwrap();

    let checkpoints = engine.monthly_asset_balances(2026, 6).await.unwrap();
    assert_eq!(checkpoints[&asset.id].last, 42.5);
    assert_eq!(checkpoints[&asset.id].current, 42.5);
}

#[tokio::test]
async fn balances_are_rounded_to_cents() {
    let engine = test_engine().await;
    let (income_cat, _) = seed_categories(&engine).await;
    let asset = engine.create_asset("Cash", "💶", 0.0).await.unwrap();

    for _ in 0..3 {
        engine
            .create_income_expense(entry(
                CategoryKind::Income,
                0.1,
                date(2026, 5, 1),
                asset.id,
                income_cat,
            ))
            .await
            .unwrap();
    }

    let checkpoints = engine.monthly_asset_balances(2026, 5).await.unwrap();
    assert_eq!(checkpoints[&asset.id].current, 0.3);

    let assets = engine.list_assets().await.unwrap();
    assert_eq!(assets[0].current_balance, 0.3);
    assert_eq!(assets[0].transaction_count, 3);
}

#[tokio::test]
async fn list_assets_orders_by_name_and_derives_balances() {
    let engine = test_engine().await;
    let (income_cat, _) = seed_categories(&engine).await;
    let zebra = engine.create_asset("Zebra", "🦓", 10.0).await.unwrap();
    let alpha = engine.create_asset("Alpha", "🅰️", 5.0).await.unwrap();

    engine
        .create_income_expense(entry(
            CategoryKind::Income,
            90.0,
            date(2026, 7, 1),
            zebra.id,
            income_cat,
        ))
        .await
        .unwrap();

    let assets = engine.list_assets().await.unwrap();
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0].asset.id, alpha.id);
    assert_eq!(assets[0].current_balance, 5.0);
    assert_eq!(assets[0].transaction_count, 0);
    assert_eq!(assets[1].asset.id, zebra.id);
    assert_eq!(assets[1].current_balance, 100.0);
    assert_eq!(assets[1].transaction_count, 1);
}
