//! Navigation menu repository for database operations

use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::enums::MenuLocation;
use crate::models::navigation_menu::{self, Entity as NavigationMenu};

/// Fields for creating a navigation menu.
#[derive(Debug, Clone)]
pub struct NewNavigationMenu {
    pub name: String,
    pub location: MenuLocation,
    pub items: serde_json::Value,
    pub locale: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Default, Clone)]
pub struct NavigationMenuChanges {
    pub name: Option<String>,
    pub location: Option<MenuLocation>,
    pub items: Option<serde_json::Value>,
    pub locale: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Repository for navigation menu database operations
#[derive(Debug, Clone)]
pub struct NavigationRepository {
    pub db: Arc<DatabaseConnection>,
}

impl NavigationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists active menus ordered by `sort_order`. A locale filter matches
    /// rows scoped to that locale plus locale-less (global) rows.
    pub async fn list(
        &self,
        location: Option<MenuLocation>,
        locale: Option<String>,
    ) -> Result<Vec<navigation_menu::Model>> {
        let mut query = NavigationMenu::find()
            .filter(navigation_menu::Column::DeletedAt.is_null())
            .filter(navigation_menu::Column::IsActive.eq(true));

        if let Some(location) = location {
            query = query.filter(navigation_menu::Column::Location.eq(location));
        }
        if let Some(locale) = locale {
            query = query.filter(
                Condition::any()
                    .add(navigation_menu::Column::Locale.eq(locale))
                    .add(navigation_menu::Column::Locale.is_null()),
            );
        }

        let menus = query
            .order_by_asc(navigation_menu::Column::SortOrder)
            .all(&*self.db)
            .await?;
        Ok(menus)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<navigation_menu::Model>> {
        let menu = NavigationMenu::find_by_id(id)
            .filter(navigation_menu::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        Ok(menu)
    }

    pub async fn create(&self, input: NewNavigationMenu) -> Result<navigation_menu::Model> {
        let now = Utc::now();
        let model = navigation_menu::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            location: Set(input.location),
            items: Set(input.items),
            locale: Set(input.locale),
            is_active: Set(input.is_active),
            sort_order: Set(input.sort_order),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            deleted_at: Set(None),
        }
        .insert(&*self.db)
        .await?;
        Ok(model)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: NavigationMenuChanges,
    ) -> Result<Option<navigation_menu::Model>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: navigation_menu::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(location) = changes.location {
            active.location = Set(location);
        }
        if let Some(items) = changes.items {
            active.items = Set(items);
        }
        if let Some(locale) = changes.locale {
            active.locale = Set(locale);
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(sort_order) = changes.sort_order {
            active.sort_order = Set(sort_order);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(Some(active.update(&*self.db).await?))
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<bool> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(false);
        };

        let mut active: navigation_menu::ActiveModel = existing.into();
        active.deleted_at = Set(Some(Utc::now().into()));
        active.update(&*self.db).await?;
        Ok(true)
    }
}
