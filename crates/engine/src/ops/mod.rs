use sea_orm::DatabaseConnection;

use crate::ResultEngine;

mod analytics;
mod assets;
mod balances;
mod budgets;
mod categories;
mod goals;
mod ledgers;
mod transactions;

pub use analytics::{
    CategoriesBreakdown, ChartPoint, ChartRange, DayActivity, IncomeExpensesSummary,
    KindBreakdown, LocationSpending, TransactionYearMonths, TypeCount, TypesCount,
};
pub use assets::AssetSummary;
pub use balances::AssetCheckpoints;
pub use budgets::BudgetReport;
pub use goals::GoalDraft;
pub use transactions::{IncomeExpenseDraft, TransactionDraft, TransferDraft};

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
