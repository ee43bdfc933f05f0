use sea_orm::Database;

use engine::{Engine, EngineError, GoalDraft};
use migration::MigratorTrait;
use uuid::Uuid;

async fn test_engine() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

fn goal(name: &str, target_amount: f64) -> GoalDraft {
    GoalDraft {
        name: name.to_string(),
        icon: "🎯".to_string(),
        color: "#123456".to_string(),
        target_amount,
        target_date: None,
        asset_id: None,
    }
}

#[tokio::test]
async fn contributions_accumulate_and_clamp_at_zero() {
    let engine = test_engine().await;
    let created = engine.create_goal(goal("Vacation", 1000.0)).await.unwrap();
    assert_eq!(created.current_amount, 0.0);

    let saved = engine.contribute_to_goal(created.id, 50.0).await.unwrap();
    assert_eq!(saved.current_amount, 50.0);
    let saved = engine.contribute_to_goal(created.id, 0.25).await.unwrap();
    assert_eq!(saved.current_amount, 50.25);

    // Withdrawing more than was saved bottoms out at zero.
    let saved = engine.contribute_to_goal(created.id, -80.0).await.unwrap();
    assert_eq!(saved.current_amount, 0.0);
}

#[tokio::test]
async fn contribution_must_be_a_non_zero_finite_amount() {
    let engine = test_engine().await;
    let created = engine.create_goal(goal("Vacation", 1000.0)).await.unwrap();

    for amount in [0.0, f64::NAN, f64::INFINITY] {
        let err = engine
            .contribute_to_goal(created.id, amount)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }
}

#[tokio::test]
async fn deactivated_goals_reject_further_changes() {
    let engine = test_engine().await;
    let created = engine.create_goal(goal("Vacation", 1000.0)).await.unwrap();
    engine.delete_goal(created.id).await.unwrap();

    let err = engine
        .contribute_to_goal(created.id, 10.0)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let err = engine
        .update_goal(created.id, goal("Vacation", 2000.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let err = engine.delete_goal(created.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn list_shows_only_active_goals_oldest_first() {
    let engine = test_engine().await;
    let first = engine.create_goal(goal("First", 100.0)).await.unwrap();
    let second = engine.create_goal(goal("Second", 200.0)).await.unwrap();
    let gone = engine.create_goal(goal("Gone", 300.0)).await.unwrap();
    engine.delete_goal(gone.id).await.unwrap();

    let goals = engine.list_goals().await.unwrap();
    assert_eq!(goals.len(), 2);
    assert_eq!(goals[0].id, first.id);
    assert_eq!(goals[1].id, second.id);
}

#[tokio::test]
async fn linked_asset_must_exist() {
    let engine = test_engine().await;
    let mut draft = goal("Vacation", 1000.0);
    draft.asset_id = Some(Uuid::new_v4());

    let err = engine.create_goal(draft).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn target_amount_must_be_non_negative() {
    let engine = test_engine().await;
    let err = engine
        .create_goal(goal("Vacation", -1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn update_replaces_every_field() {
    let engine = test_engine().await;
    let asset = engine.create_asset("Cash", "💶", 0.0).await.unwrap();
    let created = engine.create_goal(goal("Vacation", 1000.0)).await.unwrap();

    let mut draft = goal("Honeymoon", 2500.0);
    draft.asset_id = Some(asset.id);
    let updated = engine.update_goal(created.id, draft).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Honeymoon");
    assert_eq!(updated.target_amount, 2500.0);
    assert_eq!(updated.asset_id, Some(asset.id));
}
