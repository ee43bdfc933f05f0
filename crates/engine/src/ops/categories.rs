//! Category management.

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    Category, CategoryKind, EngineError, ResultEngine, categories,
    util::{normalize_name_key, normalize_required_name},
};

use super::Engine;

impl Engine {
    /// List all categories, ordered by kind then name.
    pub async fn list_categories(&self) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Kind)
            .order_by_asc(categories::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(Category::try_from).collect()
    }

    /// Create a category. Names are unique per kind under the normalized
    /// key, so "Café" and "cafe" collide within the same side.
    pub async fn create_category(
        &self,
        name: &str,
        icon: &str,
        color: &str,
        kind: CategoryKind,
    ) -> ResultEngine<Category> {
        let name = normalize_required_name(name, "category")?;
        let name_norm = normalize_name_key(&name)?;
        let existing = categories::Entity::find()
            .filter(categories::Column::NameNorm.eq(name_norm))
            .filter(categories::Column::Kind.eq(kind.as_str()))
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Err(EngineError::ExistingKey(name));
        }

        let category = Category::new(name, icon.to_string(), color.to_string(), kind);
        categories::ActiveModel::try_from(&category)?
            .insert(&self.database)
            .await?;
        Ok(category)
    }

    /// Update a category's name, icon or color. The kind is immutable:
    /// transactions and budgets already depend on it.
    pub async fn update_category(
        &self,
        category_id: Uuid,
        name: Option<&str>,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> ResultEngine<Category> {
        let model = categories::Entity::find_by_id(category_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;

        let mut active: categories::ActiveModel = model.clone().into();
        if let Some(name) = name {
            let name = normalize_required_name(name, "category")?;
            let name_norm = normalize_name_key(&name)?;
            let clash = categories::Entity::find()
                .filter(categories::Column::NameNorm.eq(name_norm.clone()))
                .filter(categories::Column::Kind.eq(model.kind.clone()))
                .filter(categories::Column::Id.ne(model.id.clone()))
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
        Category::try_from(updated)
    }

    /// Delete a category.
    pub async fn delete_category(&self, category_id: Uuid) -> ResultEngine<()> {
        let model = categories::Entity::find_by_id(category_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;
        model.delete(&self.database).await?;
        Ok(())
    }

    pub(crate) async fn require_category(&self, category_id: Uuid) -> ResultEngine<Category> {
        let model = categories::Entity::find_by_id(category_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;
        Category::try_from(model)
    }
}
