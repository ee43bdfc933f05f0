//! Balance reconstruction by ledger replay.
//!
//! Nothing here mutates stored state. Every figure starts from the
//! asset's starting balance and folds in the signed movements of the
//! transactions touching it, in ascending `(date, created, id)` order.
//! The same normalized entries feed the day-by-day series, the monthly
//! checkpoints and the aggregated asset listing, so the three views can
//! never disagree.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{Condition, QueryFilter, prelude::*};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    CategoryKind, EngineError, RangeMode, ResultEngine, assets, date_range::resolve_range,
    income_expenses, transactions, transfers,
    util::{month_end, month_start, round_cents, today},
};

use super::Engine;

/// One signed movement against a single asset.
#[derive(Clone, Debug)]
pub(crate) struct NormalizedEntry {
    pub date: NaiveDate,
    pub created: DateTime<Utc>,
    pub id: String,
    pub delta: f64,
}

/// Running balance captured at the end of the previous month (`last`) and
/// the end of the requested month (`current`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AssetCheckpoints {
    pub last: f64,
    pub current: f64,
}

fn sort_entries(entries: &mut [NormalizedEntry]) {
    entries.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then(a.created.cmp(&b.created))
            .then(a.id.cmp(&b.id))
    });
}

fn income_expense_delta(kind: &str, amount: f64) -> ResultEngine<f64> {
    Ok(match CategoryKind::try_from(kind)? {
        CategoryKind::Income => amount,
        CategoryKind::Expenses => -amount,
    })
}

impl Engine {
    /// Movements for a single asset, sorted for replay. Transfers are
    /// normalized from the asset's point of view: outgoing behaves like
    /// an expense, incoming like an income.
    pub(crate) async fn asset_entries(&self, asset_id: &str) -> ResultEngine<Vec<NormalizedEntry>> {
        let mut entries = Vec::new();

        let detail_rows = income_expenses::Entity::find()
            .filter(income_expenses::Column::AssetId.eq(asset_id))
            .find_also_related(transactions::Entity)
            .all(&self.database)
            .await?;
        for (detail, tx) in detail_rows {
            let Some(tx) = tx else { continue };
            entries.push(NormalizedEntry {
                date: tx.date,
                created: tx.created,
                delta: income_expense_delta(&detail.kind, tx.amount)?,
                id: tx.id,
            });
        }

        let transfer_rows = transfers::Entity::find()
            .filter(
                Condition::any()
                    .add(transfers::Column::FromAssetId.eq(asset_id))
                    .add(transfers::Column::ToAssetId.eq(asset_id)),
            )
            .find_also_related(transactions::Entity)
            .all(&self.database)
            .await?;
        for (detail, tx) in transfer_rows {
            let Some(tx) = tx else { continue };
            let delta = if detail.from_asset_id == asset_id {
                -tx.amount
            } else {
                tx.amount
            };
            entries.push(NormalizedEntry {
                date: tx.date,
                created: tx.created,
                delta,
                id: tx.id,
            });
        }

        sort_entries(&mut entries);
        Ok(entries)
    }

    /// Movements for every asset in one pass, keyed by asset id.
    pub(crate) async fn entries_by_asset(
        &self,
    ) -> ResultEngine<HashMap<String, Vec<NormalizedEntry>>> {
        let mut by_asset: HashMap<String, Vec<NormalizedEntry>> = HashMap::new();

        let detail_rows = income_expenses::Entity::find()
            .find_also_related(transactions::Entity)
            .all(&self.database)
            .await?;
        for (detail, tx) in detail_rows {
            let Some(tx) = tx else { continue };
            by_asset
                .entry(detail.asset_id.clone())
                .or_default()
                .push(NormalizedEntry {
                    date: tx.date,
                    created: tx.created,
                    delta: income_expense_delta(&detail.kind, tx.amount)?,
                    id: tx.id,
                });
        }

        let transfer_rows = transfers::Entity::find()
            .find_also_related(transactions::Entity)
            .all(&self.database)
            .await?;
        for (detail, tx) in transfer_rows {
            let Some(tx) = tx else { continue };
            by_asset
                .entry(detail.from_asset_id.clone())
                .or_default()
                .push(NormalizedEntry {
                    date: tx.date,
                    created: tx.created,
                    delta: -tx.amount,
                    id: tx.id.clone(),
                });
            by_asset
                .entry(detail.to_asset_id.clone())
                .or_default()
                .push(NormalizedEntry {
                    date: tx.date,
                    created: tx.created,
                    delta: tx.amount,
                    id: tx.id,
                });
        }

        for entries in by_asset.values_mut() {
            sort_entries(entries);
        }
        Ok(by_asset)
    }

    /// Day-by-day balance series for one asset.
    ///
    /// Each recorded point is the balance at the start of that day, before
    /// applying the day's movements, rounded to cents. The walk starts at
    /// the range start (or the earliest transaction, whichever is later)
    /// seeded from the starting balance; movements before the walk are
    /// never applied. An asset with no transactions yields an empty
    /// series.
    pub async fn balance_series(
        &self,
        asset_id: Uuid,
        mode: RangeMode,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> ResultEngine<BTreeMap<NaiveDate, f64>> {
        let asset_model = assets::Entity::find_by_id(asset_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("asset not exists".to_string()))?;
        let range = resolve_range(mode, start, end, today())?;

        let entries = self.asset_entries(&asset_model.id).await?;
        let Some(first) = entries.first().map(|e| e.date) else {
            return Ok(BTreeMap::new());
        };
        let latest = entries[entries.len() - 1].date;
        let walk_start = range.start.map_or(first, |start| start.max(first));
        let walk_end = match range.end {
            Some(end) if end > latest => end,
            _ => latest,
        };

        let mut series = BTreeMap::new();
        let mut balance = asset_model.starting_balance;
        let mut idx = entries.partition_point(|e| e.date < walk_start);
        let mut day = walk_start;
        loop {
            if range.contains(day) {
                series.insert(day, round_cents(balance));
            }
            while idx < entries.len() && entries[idx].date == day {
                balance += entries[idx].delta;
                idx += 1;
            }
            if day >= walk_end {
                break;
            }
            day = day
                .succ_opt()
                .ok_or_else(|| EngineError::InvalidInput("date out of range".to_string()))?;
        }
        Ok(series)
    }

    /// End-of-month balance checkpoints for every asset. `month` is
    /// 1-based. An asset with no transactions reports its starting
    /// balance at both checkpoints.
    pub async fn monthly_asset_balances(
        &self,
        year: i32,
        month: u32,
    ) -> ResultEngine<HashMap<Uuid, AssetCheckpoints>> {
        let current_start = month_start(year, month)?;
        let last_end = current_start
            .pred_opt()
            .ok_or_else(|| EngineError::InvalidInput("date out of range".to_string()))?;
        let current_end = month_end(year, month)?;

        let asset_models = assets::Entity::find().all(&self.database).await?;
        let mut by_asset = self.entries_by_asset().await?;

        let mut out = HashMap::with_capacity(asset_models.len());
        for model in asset_models {
            let entries = by_asset.remove(&model.id).unwrap_or_default();
            let mut last = model.starting_balance;
            let mut current = model.starting_balance;
            for entry in &entries {
                if entry.date > current_end {
                    break;
                }
                current += entry.delta;
                if entry.date <= last_end {
                    last += entry.delta;
                }
            }
            let id = Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("asset not exists".to_string()))?;
            out.insert(
                id,
                AssetCheckpoints {
                    last: round_cents(last),
                    current: round_cents(current),
                },
            );
        }
        Ok(out)
    }
}
