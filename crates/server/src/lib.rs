use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{run, run_with_listener, spawn_with_listener};

mod analytics;
mod assets;
mod budgets;
mod categories;
mod goals;
mod ledgers;
mod server;
mod transactions;

pub mod types {
    pub mod asset {
        pub use api_types::asset::{AssetNew, AssetUpdate, BalanceQuery, MonthQuery};
        pub use engine::{Asset, AssetCheckpoints, AssetSummary};
    }

    pub mod category {
        pub use api_types::category::{CategoryNew, CategoryUpdate};
        pub use engine::{Category, CategoryKind};
    }

    pub mod ledger {
        pub use api_types::ledger::{LedgerNew, LedgerUpdate};
        pub use engine::Ledger;
    }

    pub mod transaction {
        pub use api_types::transaction::{LocationView, TransactionNew};
        pub use engine::{Transaction, TransactionDetail};
    }

    pub mod budget {
        pub use api_types::budget::{BudgetNew, BudgetQuery, BudgetUpdate, YearMonth};
        pub use engine::{Budget, BudgetReport};
    }

    pub mod analytics {
        pub use api_types::analytics::{ChartQuery, CountByDayQuery, OptionalMonthQuery};
        pub use engine::{
            CategoriesBreakdown, ChartPoint, DayActivity, IncomeExpensesSummary,
            LocationSpending, TransactionYearMonths, TypesCount,
        };
    }

    pub mod goal {
        pub use api_types::goal::{GoalContribution, GoalNew};
        pub use engine::SavingsGoal;
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
