use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod asset {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetNew {
        pub name: String,
        #[serde(default)]
        pub icon: String,
        #[serde(default)]
        pub starting_balance: f64,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AssetUpdate {
        pub name: Option<String>,
        pub icon: Option<String>,
        pub starting_balance: Option<f64>,
    }

    /// Query string of `GET /assets/{id}/balance`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BalanceQuery {
        /// One of week, month, quarter, year, all, custom.
        pub range_mode: Option<String>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }

    /// Query string of `GET /assets/balances`. `month` is 1-based.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthQuery {
        pub year: i32,
        pub month: u32,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
        #[serde(default)]
        pub icon: String,
        #[serde(default)]
        pub color: String,
        /// "income" or "expenses".
        pub kind: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        pub name: Option<String>,
        pub icon: Option<String>,
        pub color: Option<String>,
    }
}

pub mod ledger {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LedgerNew {
        pub name: String,
        #[serde(default)]
        pub icon: String,
        #[serde(default)]
        pub color: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct LedgerUpdate {
        pub name: Option<String>,
        pub icon: Option<String>,
        pub color: Option<String>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct LocationView {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
    }

    /// Body of `POST /transactions` and `PATCH /transactions/{id}`. The
    /// tag selects the shape; a patch may change it.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "type", rename_all = "snake_case")]
    pub enum TransactionNew {
        IncomeExpense {
            /// "income" or "expenses".
            kind: String,
            particulars: String,
            amount: f64,
            date: NaiveDate,
            asset_id: Uuid,
            category_id: Uuid,
            #[serde(default)]
            ledgers: Vec<Uuid>,
            #[serde(default)]
            location: Option<LocationView>,
            #[serde(default)]
            receipt: Option<String>,
        },
        Transfer {
            amount: f64,
            date: NaiveDate,
            from_asset_id: Uuid,
            to_asset_id: Uuid,
            #[serde(default)]
            receipt: Option<String>,
        },
    }
}

pub mod budget {
    use super::*;

    fn default_rollover_cap() -> f64 {
        100.0
    }

    /// Query string of `GET /budgets`. `month` is 0-based.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetQuery {
        pub year: i32,
        pub month: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetNew {
        pub category_id: Uuid,
        pub year: i32,
        /// 0-based calendar month (0 = January).
        pub month: i32,
        pub amount: f64,
        #[serde(default)]
        pub rollover_enabled: bool,
        #[serde(default = "default_rollover_cap")]
        pub rollover_cap: f64,
        #[serde(default)]
        pub alert_thresholds: Vec<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetUpdate {
        pub amount: f64,
        #[serde(default)]
        pub rollover_enabled: bool,
        #[serde(default = "default_rollover_cap")]
        pub rollover_cap: f64,
        #[serde(default)]
        pub alert_thresholds: Vec<f64>,
    }

    /// One navigable budget period.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct YearMonth {
        pub year: i32,
        /// 0-based calendar month (0 = January).
        pub month: i32,
    }
}

pub mod analytics {
    use super::*;

    /// Query string of `GET /analytics/typesCount`: both present or both
    /// absent. `month` is 1-based.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct OptionalMonthQuery {
        pub year: Option<i32>,
        pub month: Option<u32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChartQuery {
        /// One of week, month, ytd.
        pub range: String,
    }

    /// Query string of `GET /analytics/countByDay`. `types` is a
    /// comma-separated subset of income, expenses, transfer.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CountByDayQuery {
        pub year: i32,
        pub month: u32,
        #[serde(default)]
        pub types: Option<String>,
    }
}

pub mod goal {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalNew {
        pub name: String,
        #[serde(default)]
        pub icon: String,
        #[serde(default)]
        pub color: String,
        pub target_amount: f64,
        #[serde(default)]
        pub target_date: Option<NaiveDate>,
        #[serde(default)]
        pub asset_id: Option<Uuid>,
    }

    /// Body of `POST /savingsGoals/{id}/contribute`. A negative amount
    /// withdraws; the stored total never goes below zero.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalContribution {
        pub amount: f64,
    }
}
