//! Analytics API endpoints.

use std::collections::BTreeMap;

use api_types::analytics::{ChartQuery, CountByDayQuery, OptionalMonthQuery};
use api_types::asset::MonthQuery;
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use engine::{
    CategoriesBreakdown, ChartPoint, ChartRange, DayActivity, IncomeExpensesSummary,
    LocationSpending, TransactionYearMonths, TypesCount,
};

use crate::{ServerError, server::ServerState};

pub async fn types_count(
    State(state): State<ServerState>,
    Query(payload): Query<OptionalMonthQuery>,
) -> Result<Json<TypesCount>, ServerError> {
    Ok(Json(
        state.engine.types_count(payload.year, payload.month).await?,
    ))
}

pub async fn categories_breakdown(
    State(state): State<ServerState>,
    Query(payload): Query<MonthQuery>,
) -> Result<Json<CategoriesBreakdown>, ServerError> {
    Ok(Json(
        state
            .engine
            .categories_breakdown(payload.year, payload.month)
            .await?,
    ))
}

pub async fn summary(
    State(state): State<ServerState>,
    Query(payload): Query<MonthQuery>,
) -> Result<Json<IncomeExpensesSummary>, ServerError> {
    Ok(Json(
        state
            .engine
            .income_expenses_summary(payload.year, payload.month)
            .await?,
    ))
}

pub async fn chart_data(
    State(state): State<ServerState>,
    Query(payload): Query<ChartQuery>,
) -> Result<Json<Vec<ChartPoint>>, ServerError> {
    let range = ChartRange::try_from(payload.range.as_str())?;
    Ok(Json(state.engine.chart_data(range).await?))
}

pub async fn spending_by_location(
    State(state): State<ServerState>,
) -> Result<Json<Vec<LocationSpending>>, ServerError> {
    Ok(Json(state.engine.spending_by_location().await?))
}

pub async fn count_by_day(
    State(state): State<ServerState>,
    Query(payload): Query<CountByDayQuery>,
) -> Result<Json<BTreeMap<NaiveDate, DayActivity>>, ServerError> {
    let types: Vec<String> = payload
        .types
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect();
    Ok(Json(
        state
            .engine
            .transaction_count_by_day(payload.year, payload.month, &types)
            .await?,
    ))
}

pub async fn year_months(
    State(state): State<ServerState>,
) -> Result<Json<TransactionYearMonths>, ServerError> {
    Ok(Json(state.engine.transaction_year_months().await?))
}
