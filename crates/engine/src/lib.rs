//! Wallet engine: ledger-derived balances, budgets with rollover, and
//! analytics over an immutable transaction log.
//!
//! The engine owns a [`sea_orm::DatabaseConnection`] and exposes every
//! operation as a method on [`Engine`]. Balances are never stored: each
//! asset keeps only a starting balance and every later figure is replayed
//! from the transactions that touch it.

pub use assets::Asset;
pub use budgets::{Budget, BudgetSettings};
pub use categories::{Category, CategoryKind};
pub use chart_scale::{ChartScale, select_scale, select_scale_with};
pub use date_range::{DateRange, RangeMode, resolve_range};
pub use error::EngineError;
pub use ledgers::Ledger;
pub use ops::{
    AssetCheckpoints, AssetSummary, BudgetReport, CategoriesBreakdown, ChartPoint, ChartRange,
    DayActivity, Engine, EngineBuilder, GoalDraft, IncomeExpenseDraft, IncomeExpensesSummary,
    KindBreakdown, LocationSpending, TransactionDraft, TransactionYearMonths, TransferDraft,
    TypeCount, TypesCount,
};
pub use savings_goals::SavingsGoal;
pub use transactions::{Location, Transaction, TransactionDetail, TransactionKind};

mod assets;
mod budgets;
mod categories;
mod chart_scale;
mod date_range;
mod error;
mod income_expenses;
mod ledgers;
mod ops;
mod savings_goals;
mod transactions;
mod transfers;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
