//! Ledger tag management.

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Ledger, ResultEngine, income_expenses, ledgers,
    util::{normalize_name_key, normalize_required_name},
};

use super::{Engine, with_tx};

impl Engine {
    /// List all ledgers, ordered by name.
    pub async fn list_ledgers(&self) -> ResultEngine<Vec<Ledger>> {
        let models = ledgers::Entity::find()
            .order_by_asc(ledgers::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(Ledger::try_from).collect()
    }

    /// Create a ledger. Names are unique under the normalized key.
    pub async fn create_ledger(&self, name: &str, icon: &str, color: &str) -> ResultEngine<Ledger> {
        let name = normalize_required_name(name, "ledger")?;
        let name_norm = normalize_name_key(&name)?;
        let existing = ledgers::Entity::find()
            .filter(ledgers::Column::NameNorm.eq(name_norm))
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Err(EngineError::ExistingKey(name));
        }

        let ledger = Ledger::new(name, icon.to_string(), color.to_string());
        ledgers::ActiveModel::try_from(&ledger)?
            .insert(&self.database)
            .await?;
        Ok(ledger)
    }

    /// Update a ledger's name, icon or color.
    pub async fn update_ledger(
        &self,
        ledger_id: Uuid,
        name: Option<&str>,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> ResultEngine<Ledger> {
        let model = ledgers::Entity::find_by_id(ledger_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("ledger not exists".to_string()))?;

        let mut active: ledgers::ActiveModel = model.clone().into();
        if let Some(name) = name {
            let name = normalize_required_name(name, "ledger")?;
            let name_norm = normalize_name_key(&name)?;
            let clash = ledgers::Entity::find()
                .filter(ledgers::Column::NameNorm.eq(name_norm.clone()))
                .filter(ledgers::Column::Id.ne(model.id.clone()))
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
        if let Some(color) = color {
            active.color = ActiveValue::Set(color.to_string());
        }

        let updated = active.update(&self.database).await?;
        Ledger::try_from(updated)
    }

    /// Delete a ledger and detach it from every transaction tag set.
    pub async fn delete_ledger(&self, ledger_id: Uuid) -> ResultEngine<()> {
        let id_str = ledger_id.to_string();
        let model = ledgers::Entity::find_by_id(id_str.clone())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("ledger not exists".to_string()))?;

        with_tx!(self, |db_tx| {
            let tagged = income_expenses::Entity::find()
                .filter(income_expenses::Column::Ledgers.contains(&id_str))
                .all(&db_tx)
                .await?;
            for detail in tagged {
                let remaining: Vec<Uuid> = income_expenses::decode_ledgers(&detail.ledgers)
                    .into_iter()
                    .filter(|id| *id != ledger_id)
                    .collect();
                let mut active: income_expenses::ActiveModel = detail.into();
                active.ledgers = ActiveValue::Set(income_expenses::encode_ledgers(&remaining));
                active.update(&db_tx).await?;
            }
            ledgers::Entity::delete_by_id(model.id.clone())
                .exec(&db_tx)
                .await?;
            Ok::<_, EngineError>(())
        })
    }
}
