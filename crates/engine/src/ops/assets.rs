//! Asset management and the aggregated listing.

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    Asset, EngineError, ResultEngine, assets,
    util::{normalize_name_key, normalize_required_name, round_cents},
};

use super::Engine;

/// An asset together with its replayed current balance and the number of
/// transactions touching it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssetSummary {
    #[serde(flatten)]
    pub asset: Asset,
    pub current_balance: f64,
    pub transaction_count: u64,
}

impl Engine {
    /// List all assets with derived balances, ordered by name.
    pub async fn list_assets(&self) -> ResultEngine<Vec<AssetSummary>> {
        let models = assets::Entity::find()
            .order_by_asc(assets::Column::Name)
            .all(&self.database)
            .await?;
        let mut by_asset = self.entries_by_asset().await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            let entries = by_asset.remove(&model.id).unwrap_or_default();
            let signed_sum: f64 = entries.iter().map(|e| e.delta).sum();
            let transaction_count = entries.len() as u64;
            let asset = Asset::try_from(model)?;
            let current_balance = round_cents(asset.starting_balance + signed_sum);
            out.push(AssetSummary {
                asset,
                current_balance,
                transaction_count,
            });
        }
        Ok(out)
    }

    /// Create an asset. Names are unique under the normalized key.
    pub async fn create_asset(
        &self,
        name: &str,
        icon: &str,
        starting_balance: f64,
    ) -> ResultEngine<Asset> {
        let name = normalize_required_name(name, "asset")?;
        if !starting_balance.is_finite() {
            return Err(EngineError::InvalidInput(
                "starting balance must be a finite number".to_string(),
            ));
        }

        let name_norm = normalize_name_key(&name)?;
        let existing = assets::Entity::find()
            .filter(assets::Column::NameNorm.eq(name_norm))
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Err(EngineError::ExistingKey(name));
        }

        let asset = Asset::new(name, icon.to_string(), starting_balance);
        assets::ActiveModel::try_from(&asset)?
            .insert(&self.database)
            .await?;
        Ok(asset)
    }

    /// Update an asset's name, icon or starting balance. Changing the
    /// starting balance shifts every derived figure; the ledger itself is
    /// untouched.
    pub async fn update_asset(
        &self,
        asset_id: Uuid,
        name: Option<&str>,
        icon: Option<&str>,
        starting_balance: Option<f64>,
    ) -> ResultEngine<Asset> {
        let model = assets::Entity::find_by_id(asset_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("asset not exists".to_string()))?;

        let mut active: assets::ActiveModel = model.clone().into();
        if let Some(name) = name {
            let name = normalize_required_name(name, "asset")?;
            let name_norm = normalize_name_key(&name)?;
            let clash = assets::Entity::find()
                .filter(assets::Column::NameNorm.eq(name_norm.clone()))
                .filter(assets::Column::Id.ne(model.id.clone()))
                .one(&self.database)
                .await?;
            if clash.is_some() {
                return Err(EngineError::ExistingKey(name));
            }
            active.name = ActiveValue::Set(name);
            active.name_norm = ActiveValue::Set(name_norm);
        }
        if let Some(icon) = icon {
            active.icon = ActiveValue::Set(icon.to_string());
        }
        if let Some(balance) = starting_balance {
            if !balance.is_finite() {
                return Err(EngineError::InvalidInput(
                    "starting balance must be a finite number".to_string(),
                ));
            }
            active.starting_balance = ActiveValue::Set(balance);
        }

        let updated = active.update(&self.database).await?;
        Asset::try_from(updated)
    }

    /// Delete an asset. Transactions referencing it are left in the
    /// ledger and simply stop resolving to an asset.
    pub async fn delete_asset(&self, asset_id: Uuid) -> ResultEngine<()> {
        let model = assets::Entity::find_by_id(asset_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("asset not exists".to_string()))?;
        model.delete(&self.database).await?;
        Ok(())
    }
}
