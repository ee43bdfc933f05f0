//! Read-only aggregations over the transaction ledger.
//!
//! Everything here is computed from the same domain transactions the
//! write path produces; there are no denormalized counters to drift.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    CategoryKind, EngineError, ResultEngine, Transaction, TransactionDetail,
    util::{month_end, month_start, round_cents, today},
};

use super::Engine;

/// Window of the cash-flow chart: the current calendar week, the
/// current calendar month, or one point per month of the current year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartRange {
    Week,
    Month,
    Ytd,
}

impl TryFrom<&str> for ChartRange {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "ytd" => Ok(Self::Ytd),
            other => Err(EngineError::InvalidInput(format!(
                "invalid chart range: {other}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct KindBreakdown {
    pub amount: f64,
    pub count: u64,
    /// Share of the kind's total, in percent. Zero when the total is zero.
    pub percentage: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CategoriesBreakdown {
    pub income: HashMap<Uuid, KindBreakdown>,
    pub expenses: HashMap<Uuid, KindBreakdown>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TypeCount {
    pub transaction_count: u64,
    pub accumulated_amount: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TypesCount {
    pub income: TypeCount,
    pub expenses: TypeCount,
    pub transfer: TypeCount,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct IncomeExpensesSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
}

/// One bar of the cash-flow chart. Expenses are negated so income and
/// expenses diverge around zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub income: f64,
    pub expenses: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocationSpending {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub amount: f64,
    pub count: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct DayActivity {
    pub income: f64,
    pub expenses: f64,
    pub transfer: f64,
    pub total: f64,
    pub count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TransactionYearMonths {
    /// Years observed in the ledger, newest first.
    pub years: Vec<i32>,
    /// 1-based months per year, newest first.
    pub months: BTreeMap<i32, Vec<u32>>,
}

struct ViewFilter {
    income: bool,
    expenses: bool,
    transfer: bool,
}

impl ViewFilter {
    /// An empty filter means everything.
    fn parse(raw: &[String]) -> ResultEngine<Self> {
        if raw.is_empty() {
            return Ok(Self {
                income: true,
                expenses: true,
                transfer: true,
            });
        }
        let mut filter = Self {
            income: false,
            expenses: false,
            transfer: false,
        };
        for entry in raw {
            match entry.as_str() {
                "income" => filter.income = true,
                "expenses" => filter.expenses = true,
                "transfer" => filter.transfer = true,
                other => {
                    return Err(EngineError::InvalidInput(format!(
                        "invalid transaction type filter: {other}"
                    )));
                }
            }
        }
        Ok(filter)
    }
}

fn entry_kind(tx: &Transaction) -> Option<CategoryKind> {
    match &tx.detail {
        TransactionDetail::IncomeExpense { kind, .. } => Some(*kind),
        TransactionDetail::Transfer { .. } => None,
    }
}

impl Engine {
    /// Per-category totals for one calendar month (1-based), split by
    /// kind, with each category's share of the kind total.
    pub async fn categories_breakdown(
        &self,
        year: i32,
        month: u32,
    ) -> ResultEngine<CategoriesBreakdown> {
        let start = month_start(year, month)?;
        let end = month_end(year, month)?;

        let mut income: HashMap<Uuid, KindBreakdown> = HashMap::new();
        let mut expenses: HashMap<Uuid, KindBreakdown> = HashMap::new();
        for tx in self.list_transactions().await? {
            if tx.date < start || tx.date > end {
                continue;
            }
            let TransactionDetail::IncomeExpense {
                kind, category_id, ..
            } = &tx.detail
            else {
                continue;
            };
            let bucket = match kind {
                CategoryKind::Income => income.entry(*category_id).or_default(),
                CategoryKind::Expenses => expenses.entry(*category_id).or_default(),
            };
            bucket.amount += tx.amount;
            bucket.count += 1;
        }

        // Never divide by a zero total: an empty side reports 0%.
        for side in [&mut income, &mut expenses] {
            let total: f64 = side.values().map(|b| b.amount).sum();
            for bucket in side.values_mut() {
                bucket.percentage = if total > 0.0 {
                    round_cents(bucket.amount / total * 100.0)
                } else {
                    0.0
                };
                bucket.amount = round_cents(bucket.amount);
            }
        }

        Ok(CategoriesBreakdown { income, expenses })
    }

    /// Transaction counts and accumulated amounts per type, all-time or
    /// for one calendar month. Transfers are their own bucket, never
    /// split into an income and an expense half.
    pub async fn types_count(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> ResultEngine<TypesCount> {
        let window = match (year, month) {
            (Some(year), Some(month)) => Some((month_start(year, month)?, month_end(year, month)?)),
            (None, None) => None,
            _ => {
                return Err(EngineError::InvalidInput(
                    "year and month must be provided together".to_string(),
                ));
            }
        };

        let mut out = TypesCount::default();
        for tx in self.list_transactions().await? {
            if let Some((start, end)) = window {
                if tx.date < start || tx.date > end {
                    continue;
                }
            }
            let bucket = match entry_kind(&tx) {
                Some(CategoryKind::Income) => &mut out.income,
                Some(CategoryKind::Expenses) => &mut out.expenses,
                None => &mut out.transfer,
            };
            bucket.transaction_count += 1;
            bucket.accumulated_amount += tx.amount;
        }
        out.income.accumulated_amount = round_cents(out.income.accumulated_amount);
        out.expenses.accumulated_amount = round_cents(out.expenses.accumulated_amount);
        out.transfer.accumulated_amount = round_cents(out.transfer.accumulated_amount);
        Ok(out)
    }

    /// All-time and one-month income/expense totals.
    pub async fn income_expenses_summary(
        &self,
        year: i32,
        month: u32,
    ) -> ResultEngine<IncomeExpensesSummary> {
        let start = month_start(year, month)?;
        let end = month_end(year, month)?;

        let mut summary = IncomeExpensesSummary::default();
        for tx in self.list_transactions().await? {
            let in_month = tx.date >= start && tx.date <= end;
            match entry_kind(&tx) {
                Some(CategoryKind::Income) => {
                    summary.total_income += tx.amount;
                    if in_month {
                        summary.monthly_income += tx.amount;
                    }
                }
                Some(CategoryKind::Expenses) => {
                    summary.total_expenses += tx.amount;
                    if in_month {
                        summary.monthly_expenses += tx.amount;
                    }
                }
                None => {}
            }
        }
        summary.total_income = round_cents(summary.total_income);
        summary.total_expenses = round_cents(summary.total_expenses);
        summary.monthly_income = round_cents(summary.monthly_income);
        summary.monthly_expenses = round_cents(summary.monthly_expenses);
        Ok(summary)
    }

    /// Cash-flow chart points: one per day of the current calendar week
    /// or month, one per month for year-to-date. The calendar windows
    /// are emitted whole, days still ahead included, so the labels stay
    /// stable over the week or month.
    pub async fn chart_data(&self, range: ChartRange) -> ResultEngine<Vec<ChartPoint>> {
        let today = today();
        let year_start = month_start(today.year(), 1)?;
        let ytd_end = month_end(today.year(), today.month())?;

        let mut daily: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        let mut monthly: BTreeMap<u32, (f64, f64)> = BTreeMap::new();

        match range {
            ChartRange::Week | ChartRange::Month => {
                let (start, end) = if range == ChartRange::Week {
                    let week = today.week(Weekday::Sun);
                    (week.first_day(), week.last_day())
                } else {
                    (
                        month_start(today.year(), today.month())?,
                        month_end(today.year(), today.month())?,
                    )
                };
                let mut day = start;
                while day <= end {
                    daily.insert(day, (0.0, 0.0));
                    day = day.succ_opt().ok_or_else(|| {
                        EngineError::InvalidInput("date out of range".to_string())
                    })?;
                }
            }
            ChartRange::Ytd => {
                for month in 1..=today.month() {
                    monthly.insert(month, (0.0, 0.0));
                }
            }
        }

        for tx in self.list_transactions().await? {
            let Some(kind) = entry_kind(&tx) else { continue };
            let slot = match range {
                ChartRange::Week | ChartRange::Month => daily.get_mut(&tx.date),
                ChartRange::Ytd => {
                    if tx.date < year_start || tx.date > ytd_end {
                        continue;
                    }
                    monthly.get_mut(&tx.date.month())
                }
            };
            let Some((income, expenses)) = slot else {
                continue;
            };
            match kind {
                CategoryKind::Income => *income += tx.amount,
                CategoryKind::Expenses => *expenses += tx.amount,
            }
        }

        let points = match range {
            ChartRange::Week | ChartRange::Month => daily
                .into_iter()
                .map(|(date, (income, expenses))| ChartPoint {
                    label: date.format("%Y-%m-%d").to_string(),
                    income: round_cents(income),
                    expenses: round_cents(-expenses),
                })
                .collect(),
            ChartRange::Ytd => monthly
                .into_iter()
                .map(|(month, (income, expenses))| ChartPoint {
                    label: format!("{:04}-{:02}", today.year(), month),
                    income: round_cents(income),
                    expenses: round_cents(-expenses),
                })
                .collect(),
        };
        Ok(points)
    }

    /// Expense totals grouped by identical location. Entries without a
    /// location name or with missing or zero coordinates are skipped.
    pub async fn spending_by_location(&self) -> ResultEngine<Vec<LocationSpending>> {
        let mut groups: HashMap<(String, u64, u64), (f64, u64)> = HashMap::new();
        for tx in self.list_transactions().await? {
            let TransactionDetail::IncomeExpense {
                kind: CategoryKind::Expenses,
                location: Some(location),
                ..
            } = &tx.detail
            else {
                continue;
            };
            if location.name.trim().is_empty()
                || location.latitude == 0.0
                || location.longitude == 0.0
            {
                continue;
            }
            let key = (
                location.name.clone(),
                location.latitude.to_bits(),
                location.longitude.to_bits(),
            );
            let (amount, count) = groups.entry(key).or_default();
            *amount += tx.amount;
            *count += 1;
        }

        let mut out: Vec<LocationSpending> = groups
            .into_iter()
            .map(|((name, lat, lon), (amount, count))| LocationSpending {
                name,
                latitude: f64::from_bits(lat),
                longitude: f64::from_bits(lon),
                amount: round_cents(amount),
                count,
            })
            .collect();
        out.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(out)
    }

    /// Per-day activity for one calendar month (1-based), restricted to
    /// the requested transaction types. Every day of the month appears,
    /// including empty ones. An empty filter means all types.
    pub async fn transaction_count_by_day(
        &self,
        year: i32,
        month: u32,
        view_filter: &[String],
    ) -> ResultEngine<BTreeMap<NaiveDate, DayActivity>> {
        let filter = ViewFilter::parse(view_filter)?;
        let start = month_start(year, month)?;
        let end = month_end(year, month)?;

        let mut days: BTreeMap<NaiveDate, DayActivity> = BTreeMap::new();
        let mut day = start;
        while day <= end {
            days.insert(day, DayActivity::default());
            day = day
                .succ_opt()
                .ok_or_else(|| EngineError::InvalidInput("date out of range".to_string()))?;
        }

        for tx in self.list_transactions().await? {
            if tx.date < start || tx.date > end {
                continue;
            }
            let Some(activity) = days.get_mut(&tx.date) else {
                continue;
            };
            match entry_kind(&tx) {
                Some(CategoryKind::Income) if filter.income => {
                    activity.income += tx.amount;
                    activity.total += tx.amount;
                    activity.count += 1;
                }
                Some(CategoryKind::Expenses) if filter.expenses => {
                    activity.expenses += tx.amount;
                    activity.total -= tx.amount;
                    activity.count += 1;
                }
                None if filter.transfer => {
                    activity.transfer += tx.amount;
                    activity.count += 1;
                }
                _ => {}
            }
        }

        for activity in days.values_mut() {
            activity.income = round_cents(activity.income);
            activity.expenses = round_cents(activity.expenses);
            activity.transfer = round_cents(activity.transfer);
            activity.total = round_cents(activity.total);
        }
        Ok(days)
    }

    /// Years and months observed in the ledger, both newest first.
    pub async fn transaction_year_months(&self) -> ResultEngine<TransactionYearMonths> {
        let mut months_by_year: BTreeMap<i32, Vec<u32>> = BTreeMap::new();
        for tx in self.list_transactions().await? {
            let months = months_by_year.entry(tx.date.year()).or_default();
            if !months.contains(&tx.date.month()) {
                months.push(tx.date.month());
            }
        }

        let mut years: Vec<i32> = months_by_year.keys().copied().collect();
        years.reverse();
        for months in months_by_year.values_mut() {
            months.sort_unstable_by(|a, b| b.cmp(a));
        }
        Ok(TransactionYearMonths {
            years,
            months: months_by_year,
        })
    }
}
