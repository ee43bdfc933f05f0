//! Transfer detail rows.
//!
//! One row per transfer transaction. A transfer moves the base amount
//! between two distinct assets and never touches categories.

use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, transactions::TransactionDetail};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transfer_details")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub transaction_id: String,
    pub from_asset_id: String,
    pub to_asset_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::transactions::Entity",
        from = "Column::TransactionId",
        to = "super::transactions::Column::Id",
        on_delete = "Cascade"
    )]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub(crate) fn active_model(
    transaction_id: Uuid,
    from_asset_id: Uuid,
    to_asset_id: Uuid,
) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4().to_string()),
        transaction_id: ActiveValue::Set(transaction_id.to_string()),
        from_asset_id: ActiveValue::Set(from_asset_id.to_string()),
        to_asset_id: ActiveValue::Set(to_asset_id.to_string()),
    }
}

impl TryFrom<Model> for TransactionDetail {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self::Transfer {
            from_asset_id: Uuid::parse_str(&model.from_asset_id)
                .map_err(|_| EngineError::KeyNotFound("asset not exists".to_string()))?,
            to_asset_id: Uuid::parse_str(&model.to_asset_id)
                .map_err(|_| EngineError::KeyNotFound("asset not exists".to_string()))?,
        })
    }
}
