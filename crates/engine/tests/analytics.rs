use chrono::{Datelike, NaiveDate};
use sea_orm::Database;

use engine::{
    CategoryKind, Engine, EngineError, IncomeExpenseDraft, Location, TransferDraft,
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

async fn seed(engine: &Engine) -> (Uuid, Uuid, Uuid) {
    let asset = engine.create_asset("Cash", "💶", 0.0).await.unwrap();
    let income = engine
        .create_category("Salary", "💰", "#00ff00", CategoryKind::Income)
        .await
        .unwrap();
    let expenses = engine
        .create_category("Food", "🍜", "#ff0000", CategoryKind::Expenses)
        .await
        .unwrap();
    (asset.id, income.id, expenses.id)
}

async fn entry(
    engine: &Engine,
    kind: CategoryKind,
    amount: f64,
    date: NaiveDate,
    asset_id: Uuid,
    category_id: Uuid,
    location: Option<Location>,
) {
    engine
        .create_income_expense(IncomeExpenseDraft {
            kind,
            particulars: "entry".to_string(),
            amount,
            date,
            asset_id,
            category_id,
            ledgers: Vec::new(),
            location,
            receipt: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn transfers_keep_their_own_bucket() {
    let engine = test_engine().await;
    let (asset_id, income_id, expenses_id) = seed(&engine).await;
    let bank = engine.create_asset("Bank", "🏦", 0.0).await.unwrap();

    entry(
        &engine,
        CategoryKind::Income,
        100.0,
        date(2026, 3, 1),
        asset_id,
        income_id,
        None,
    )
    .await;
    entry(
        &engine,
        CategoryKind::Expenses,
        40.0,
        date(2026, 3, 2),
        asset_id,
        expenses_id,
        None,
    )
    .await;
    engine
        .create_transfer(TransferDraft {
            amount: 30.0,
            date: date(2026, 3, 3),
            from_asset_id: asset_id,
            to_asset_id: bank.id,
            receipt: None,
        })
        .await
        .unwrap();

    let counts = engine.types_count(None, None).await.unwrap();
    assert_eq!(counts.income.transaction_count, 1);
    assert_eq!(counts.income.accumulated_amount, 100.0);
    assert_eq!(counts.expenses.transaction_count, 1);
    assert_eq!(counts.expenses.accumulated_amount, 40.0);
    assert_eq!(counts.transfer.transaction_count, 1);
    assert_eq!(counts.transfer.accumulated_amount, 30.0);
}

#[tokio::test]
async fn types_count_window_takes_year_and_month_together() {
    let engine = test_engine().await;
    let (asset_id, income_id, _) = seed(&engine).await;

    entry(
        &engine,
        CategoryKind::Income,
        100.0,
        date(2026, 3, 1),
        asset_id,
        income_id,
        None,
    )
    .await;
    entry(
        &engine,
        CategoryKind::Income,
        50.0,
        date(2026, 4, 1),
        asset_id,
        income_id,
        None,
    )
    .await;

    let counts = engine.types_count(Some(2026), Some(3)).await.unwrap();
    assert_eq!(counts.income.transaction_count, 1);
    assert_eq!(counts.income.accumulated_amount, 100.0);

    let err = engine.types_count(Some(2026), None).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
    let err = engine.types_count(None, Some(3)).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn breakdown_shares_sum_to_one_hundred_per_kind() {
    let engine = test_engine().await;
    let (asset_id, _, food_id) = seed(&engine).await;
    let rent = engine
        .create_category("Rent", "🏠", "#880000", CategoryKind::Expenses)
        .await
        .unwrap();

    entry(
        &engine,
        CategoryKind::Expenses,
        75.0,
        date(2026, 5, 2),
        asset_id,
        food_id,
        None,
    )
    .await;
    entry(
        &engine,
        CategoryKind::Expenses,
        25.0,
        date(2026, 5, 20),
        asset_id,
        rent.id,
        None,
    )
    .await;
    // Outside the month: ignored.
    entry(
        &engine,
        CategoryKind::Expenses,
        999.0,
        date(2026, 6, 1),
        asset_id,
        food_id,
        None,
    )
    .await;

    let breakdown = engine.categories_breakdown(2026, 5).await.unwrap();
    assert!(breakdown.income.is_empty());
    assert_eq!(breakdown.expenses[&food_id].amount, 75.0);
    assert_eq!(breakdown.expenses[&food_id].percentage, 75.0);
    assert_eq!(breakdown.expenses[&rent.id].amount, 25.0);
    assert_eq!(breakdown.expenses[&rent.id].percentage, 25.0);
}

#[tokio::test]
async fn summary_splits_all_time_and_monthly_totals() {
    let engine = test_engine().await;
    let (asset_id, income_id, expenses_id) = seed(&engine).await;

    entry(
        &engine,
        CategoryKind::Income,
        1000.0,
        date(2026, 1, 10),
        asset_id,
        income_id,
        None,
    )
    .await;
    entry(
        &engine,
        CategoryKind::Income,
        500.0,
        date(2026, 2, 10),
        asset_id,
        income_id,
        None,
    )
    .await;
    entry(
        &engine,
        CategoryKind::Expenses,
        200.0,
        date(2026, 2, 15),
        asset_id,
        expenses_id,
        None,
    )
    .await;

    let summary = engine.income_expenses_summary(2026, 2).await.unwrap();
    assert_eq!(summary.total_income, 1500.0);
    assert_eq!(summary.total_expenses, 200.0);
    assert_eq!(summary.monthly_income, 500.0);
    assert_eq!(summary.monthly_expenses, 200.0);
}

#[tokio::test]
async fn spending_by_location_groups_and_sorts() {
    let engine = test_engine().await;
    let (asset_id, income_id, expenses_id) = seed(&engine).await;

    let mercato = Location {
        name: "Mercato".to_string(),
        latitude: 45.07,
        longitude: 7.69,
    };
    entry(
        &engine,
        CategoryKind::Expenses,
        30.0,
        date(2026, 1, 1),
        asset_id,
        expenses_id,
        Some(mercato.clone()),
    )
    .await;
    entry(
        &engine,
        CategoryKind::Expenses,
        20.0,
        date(2026, 1, 8),
        asset_id,
        expenses_id,
        Some(mercato),
    )
    .await;
    entry(
        &engine,
        CategoryKind::Expenses,
        5.0,
        date(2026, 1, 9),
        asset_id,
        expenses_id,
        Some(Location {
            name: "Bar".to_string(),
            latitude: 45.0,
            longitude: 7.6,
        }),
    )
    .await;
    // Zero coordinates: skipped.
    entry(
        &engine,
        CategoryKind::Expenses,
        99.0,
        date(2026, 1, 10),
        asset_id,
        expenses_id,
        Some(Location {
            name: "Nowhere".to_string(),
            latitude: 0.0,
            longitude: 0.0,
        }),
    )
    .await;
    // Income never counts as spending, located or not.
    entry(
        &engine,
        CategoryKind::Income,
        1000.0,
        date(2026, 1, 11),
        asset_id,
        income_id,
        Some(Location {
            name: "Office".to_string(),
            latitude: 45.1,
            longitude: 7.7,
        }),
    )
    .await;

    let spots = engine.spending_by_location().await.unwrap();
    assert_eq!(spots.len(), 2);
    assert_eq!(spots[0].name, "Mercato");
    assert_eq!(spots[0].amount, 50.0);
    assert_eq!(spots[0].count, 2);
    assert_eq!(spots[1].name, "Bar");
    assert_eq!(spots[1].amount, 5.0);
}

#[tokio::test]
async fn count_by_day_covers_the_whole_month_and_honors_the_filter() {
    let engine = test_engine().await;
    let (asset_id, income_id, expenses_id) = seed(&engine).await;
    let bank = engine.create_asset("Bank", "🏦", 0.0).await.unwrap();

    entry(
        &engine,
        CategoryKind::Income,
        100.0,
        date(2026, 4, 5),
        asset_id,
        income_id,
        None,
    )
    .await;
    entry(
        &engine,
        CategoryKind::Expenses,
        40.0,
        date(2026, 4, 5),
        asset_id,
        expenses_id,
        None,
    )
    .await;
    engine
        .create_transfer(TransferDraft {
            amount: 30.0,
            date: date(2026, 4, 6),
            from_asset_id: asset_id,
            to_asset_id: bank.id,
            receipt: None,
        })
        .await
        .unwrap();

    let days = engine
        .transaction_count_by_day(2026, 4, &[])
        .await
        .unwrap();
    assert_eq!(days.len(), 30);

    let busy = &days[&date(2026, 4, 5)];
    assert_eq!(busy.income, 100.0);
    assert_eq!(busy.expenses, 40.0);
    assert_eq!(busy.total, 60.0);
    assert_eq!(busy.count, 2);

    // Transfers count but stay neutral in the running total.
    let moved = &days[&date(2026, 4, 6)];
    assert_eq!(moved.transfer, 30.0);
    assert_eq!(moved.total, 0.0);
    assert_eq!(moved.count, 1);

    let days = engine
        .transaction_count_by_day(2026, 4, &["income".to_string()])
        .await
        .unwrap();
    let busy = &days[&date(2026, 4, 5)];
    assert_eq!(busy.count, 1);
    assert_eq!(busy.expenses, 0.0);

    let err = engine
        .transaction_count_by_day(2026, 4, &["refund".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn year_months_are_listed_newest_first() {
    let engine = test_engine().await;
    let (asset_id, income_id, _) = seed(&engine).await;

    for (year, month) in [(2025, 11), (2026, 1), (2026, 3)] {
        entry(
            &engine,
            CategoryKind::Income,
            10.0,
            date(year, month, 1),
            asset_id,
            income_id,
            None,
        )
        .await;
    }

    let observed = engine.transaction_year_months().await.unwrap();
    assert_eq!(observed.years, vec![2026, 2025]);
    assert_eq!(observed.months[&2026], vec![3, 1]);
    assert_eq!(observed.months[&2025], vec![11]);
}

#[tokio::test]
async fn ytd_chart_has_one_point_per_elapsed_month() {
    let engine = test_engine().await;
    let (asset_id, income_id, _) = seed(&engine).await;
    let today = chrono::Utc::now().date_naive();

    entry(
        &engine,
        CategoryKind::Income,
        250.0,
        today,
        asset_id,
        income_id,
        None,
    )
    .await;

    let points = engine
        .chart_data(engine::ChartRange::Ytd)
        .await
        .unwrap();
    assert_eq!(points.len(), today.month() as usize);
    let current = points.last().unwrap();
    assert_eq!(
        current.label,
        format!("{:04}-{:02}", today.year(), today.month())
    );
    assert_eq!(current.income, 250.0);
    assert_eq!(current.expenses, 0.0);
}

#[tokio::test]
async fn week_chart_covers_the_whole_calendar_week() {
    let engine = test_engine().await;
    let (asset_id, income_id, _) = seed(&engine).await;
    let today = chrono::Utc::now().date_naive();

    entry(
        &engine,
        CategoryKind::Income,
        40.0,
        today,
        asset_id,
        income_id,
        None,
    )
    .await;

    let points = engine
        .chart_data(engine::ChartRange::Week)
        .await
        .unwrap();
    assert_eq!(points.len(), 7);

    let first_day = today.week(chrono::Weekday::Sun).first_day();
    assert_eq!(points[0].label, first_day.format("%Y-%m-%d").to_string());
    let total: f64 = points.iter().map(|p| p.income).sum();
    assert_eq!(total, 40.0);
}

#[tokio::test]
async fn month_chart_covers_the_whole_calendar_month() {
    let engine = test_engine().await;
    let today = chrono::Utc::now().date_naive();

    let points = engine
        .chart_data(engine::ChartRange::Month)
        .await
        .unwrap();

    let (next_year, next_month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    let last_day = date(next_year, next_month, 1).pred_opt().unwrap();
    assert_eq!(points.len(), last_day.day() as usize);
    assert_eq!(
        points[0].label,
        date(today.year(), today.month(), 1)
            .format("%Y-%m-%d")
            .to_string()
    );
}
