use axum::{
    Router,
    routing::{get, patch, post},
};

use std::sync::Arc;

use crate::{analytics, assets, budgets, categories, goals, ledgers, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/assets", get(assets::list).post(assets::create))
        .route("/assets/balances", get(assets::monthly_balances))
        .route("/assets/{id}", patch(assets::update).delete(assets::remove))
        .route("/assets/{id}/balance", get(assets::balance))
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/{id}",
            patch(transactions::update).delete(transactions::remove),
        )
        .route("/budgets", get(budgets::list).post(budgets::create))
        .route("/budgets/yearMonths", get(budgets::year_months))
        .route(
            "/budgets/{id}",
            patch(budgets::update).delete(budgets::remove),
        )
        .route("/analytics/typesCount", get(analytics::types_count))
        .route(
            "/analytics/categoriesBreakdown",
            get(analytics::categories_breakdown),
        )
        .route("/analytics/summary", get(analytics::summary))
        .route("/analytics/chartData", get(analytics::chart_data))
        .route(
            "/analytics/spendingByLocation",
            get(analytics::spending_by_location),
        )
        .route("/analytics/countByDay", get(analytics::count_by_day))
        .route("/analytics/yearMonths", get(analytics::year_months))
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/categories/{id}",
            patch(categories::update).delete(categories::remove),
        )
        .route("/ledgers", get(ledgers::list).post(ledgers::create))
        .route(
            "/ledgers/{id}",
            patch(ledgers::update).delete(ledgers::remove),
        )
        .route("/savingsGoals", get(goals::list).post(goals::create))
        .route(
            "/savingsGoals/{id}",
            patch(goals::update).delete(goals::remove),
        )
        .route("/savingsGoals/{id}/contribute", post(goals::contribute))
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
