//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::utils::time::now_millis;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeSet;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find menu items with optional category / availability filters,
    /// ordered by category then name
    pub async fn find_all(
        &self,
        category: Option<String>,
        available: Option<bool>,
    ) -> RepoResult<Vec<MenuItem>> {
        let mut sql = String::from("SELECT * FROM menu_item");
        let mut clauses: Vec<&str> = Vec::new();
        if category.is_some() {
            clauses.push("category = $category");
        }
        if available.is_some() {
            clauses.push("available = $available");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY category, name");

        let mut query = self.base.db().query(sql);
        if let Some(c) = category {
            query = query.bind(("category", c));
        }
        if let Some(a) = available {
            query = query.bind(("available", a));
        }

        let items: Vec<MenuItem> = query.await?.take(0)?;
        Ok(items)
    }

    /// Find available items only
    pub async fn find_available(&self) -> RepoResult<Vec<MenuItem>> {
        self.find_all(None, Some(true)).await
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let rid = parse_id(id, TABLE)?;
        let item: Option<MenuItem> = self.base.db().select(rid).await?;
        Ok(item)
    }

    /// Distinct categories actually present on the menu
    pub async fn categories(&self) -> RepoResult<Vec<MenuCategory>> {
        #[derive(Deserialize)]
        struct CategoryRow {
            category: MenuCategory,
        }

        let rows: Vec<CategoryRow> = self
            .base
            .db()
            .query("SELECT category FROM menu_item")
            .await?
            .take(0)?;
        let distinct: BTreeSet<MenuCategory> = rows.into_iter().map(|r| r.category).collect();
        Ok(distinct.into_iter().collect())
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        if data.price <= Decimal::ZERO {
            return Err(RepoError::Validation(format!(
                "Price must be positive, got {}",
                data.price
            )));
        }

        let now = now_millis();
        let item = MenuItem {
            id: None,
            name: data.name,
            category: data.category,
            price: data.price,
            description: data.description.unwrap_or_default(),
            available: data.available.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let rid = parse_id(id, TABLE)?;
        let mut existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        if let Some(price) = data.price {
            if price <= Decimal::ZERO {
                return Err(RepoError::Validation(format!(
                    "Price must be positive, got {}",
                    price
                )));
            }
            existing.price = price;
        }
        if let Some(name) = data.name {
            existing.name = name;
        }
        if let Some(category) = data.category {
            existing.category = category;
        }
        if let Some(description) = data.description {
            existing.description = description;
        }
        if let Some(available) = data.available {
            existing.available = available;
        }
        existing.updated_at = now_millis();

        // id travels as a string in content; let the record id win
        existing.id = None;
        let updated: Option<MenuItem> = self.base.db().update(rid).content(existing).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete a menu item
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = parse_id(id, TABLE)?;
        let deleted: Option<MenuItem> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}
