//! Inventory Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Inventory, InventoryCreate, InventoryUpdate};
use crate::utils::time::now_millis;
use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "inventory";

#[derive(Clone)]
pub struct InventoryRepository {
    base: BaseRepository,
}

impl InventoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all inventory rows, ordered by item name
    pub async fn find_all(&self) -> RepoResult<Vec<Inventory>> {
        let items: Vec<Inventory> = self
            .base
            .db()
            .query("SELECT * FROM inventory ORDER BY item_name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Rows at or below their reorder level (boundary included)
    pub async fn find_low_stock(&self) -> RepoResult<Vec<Inventory>> {
        let items: Vec<Inventory> = self
            .base
            .db()
            .query("SELECT * FROM inventory WHERE quantity <= reorder_level ORDER BY item_name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find inventory row by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Inventory>> {
        let rid = parse_id(id, TABLE)?;
        let item: Option<Inventory> = self.base.db().select(rid).await?;
        Ok(item)
    }

    /// Find inventory row by item name
    pub async fn find_by_name(&self, item_name: &str) -> RepoResult<Option<Inventory>> {
        let items: Vec<Inventory> = self
            .base
            .db()
            .query("SELECT * FROM inventory WHERE item_name = $name LIMIT 1")
            .bind(("name", item_name.to_string()))
            .await?
            .take(0)?;
        Ok(items.into_iter().next())
    }

    /// Create a new inventory row
    pub async fn create(&self, data: InventoryCreate) -> RepoResult<Inventory> {
        if data.quantity < 0 {
            return Err(RepoError::Validation(format!(
                "Quantity must be non-negative, got {}",
                data.quantity
            )));
        }
        if data.reorder_level < 0 {
            return Err(RepoError::Validation(format!(
                "Reorder level must be non-negative, got {}",
                data.reorder_level
            )));
        }
        // Pre-check for a friendly error; the unique index is the backstop
        if self.find_by_name(&data.item_name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Inventory item '{}' already exists",
                data.item_name
            )));
        }

        let item = Inventory {
            id: None,
            item_name: data.item_name,
            quantity: data.quantity,
            unit: data.unit.unwrap_or_else(|| "units".to_string()),
            reorder_level: data.reorder_level,
            cost_per_unit: data.cost_per_unit.unwrap_or(Decimal::ZERO),
            last_updated: now_millis(),
        };

        let created: Option<Inventory> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create inventory item".to_string()))
    }

    /// Update an inventory row
    pub async fn update(&self, id: &str, data: InventoryUpdate) -> RepoResult<Inventory> {
        let rid = parse_id(id, TABLE)?;
        let mut existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Inventory item {} not found", id)))?;

        if let Some(name) = data.item_name {
            if name != existing.item_name && self.find_by_name(&name).await?.is_some() {
                return Err(RepoError::Duplicate(format!(
                    "Inventory item '{}' already exists",
                    name
                )));
            }
            existing.item_name = name;
        }
        if let Some(quantity) = data.quantity {
            if quantity < 0 {
                return Err(RepoError::Validation(format!(
                    "Quantity must be non-negative, got {}",
                    quantity
                )));
            }
            existing.quantity = quantity;
        }
        if let Some(unit) = data.unit {
            existing.unit = unit;
        }
        if let Some(level) = data.reorder_level {
            if level < 0 {
                return Err(RepoError::Validation(format!(
                    "Reorder level must be non-negative, got {}",
                    level
                )));
            }
            existing.reorder_level = level;
        }
        if let Some(cost) = data.cost_per_unit {
            existing.cost_per_unit = cost;
        }
        existing.last_updated = now_millis();

        existing.id = None;
        let updated: Option<Inventory> = self.base.db().update(rid).content(existing).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Inventory item {} not found", id)))
    }

    /// Apply a signed quantity delta; a result below zero is rejected and
    /// the row is left unchanged
    pub async fn adjust_quantity(&self, id: &str, delta: i32) -> RepoResult<Inventory> {
        let rid = parse_id(id, TABLE)?;
        let mut existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Inventory item {} not found", id)))?;

        let new_quantity = existing.quantity + delta;
        if new_quantity < 0 {
            return Err(RepoError::Validation(format!(
                "Insufficient inventory: {} has {} {}, change of {} rejected",
                existing.item_name, existing.quantity, existing.unit, delta
            )));
        }
        existing.quantity = new_quantity;
        existing.last_updated = now_millis();

        existing.id = None;
        let updated: Option<Inventory> = self.base.db().update(rid).content(existing).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Inventory item {} not found", id)))
    }

    /// Restock by a strictly positive quantity
    pub async fn restock(&self, id: &str, quantity: i32) -> RepoResult<Inventory> {
        if quantity <= 0 {
            return Err(RepoError::Validation(format!(
                "Restock quantity must be positive, got {}",
                quantity
            )));
        }
        self.adjust_quantity(id, quantity).await
    }

    /// Hard delete an inventory row
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = parse_id(id, TABLE)?;
        let deleted: Option<Inventory> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn repo() -> InventoryRepository {
        InventoryRepository::new(DbService::memory().await.expect("in-memory db").db)
    }

    fn stock(name: &str, quantity: i32, reorder_level: i32) -> InventoryCreate {
        InventoryCreate {
            item_name: name.to_string(),
            quantity,
            unit: Some("kg".to_string()),
            reorder_level,
            cost_per_unit: None,
        }
    }

    #[tokio::test]
    async fn restock_adds_to_the_current_quantity() {
        let repo = repo().await;
        let rice = repo.create(stock("Rice", 50, 10)).await.unwrap();
        let id = rice.id.unwrap().to_string();

        let restocked = repo.restock(&id, 30).await.unwrap();
        assert_eq!(restocked.quantity, 80);

        assert!(matches!(
            repo.restock(&id, 0).await.unwrap_err(),
            RepoError::Validation(_)
        ));
        assert!(matches!(
            repo.restock(&id, -5).await.unwrap_err(),
            RepoError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn quantity_never_goes_below_zero() {
        let repo = repo().await;
        let saffron = repo.create(stock("Saffron", 10, 2)).await.unwrap();
        let id = saffron.id.unwrap().to_string();

        let err = repo.adjust_quantity(&id, -15).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        // Rejected change leaves the row untouched
        assert_eq!(repo.find_by_id(&id).await.unwrap().unwrap().quantity, 10);

        // Draining to exactly zero is fine
        assert_eq!(repo.adjust_quantity(&id, -10).await.unwrap().quantity, 0);
    }

    #[tokio::test]
    async fn low_stock_includes_the_reorder_boundary() {
        let repo = repo().await;
        repo.create(stock("Rice", 5, 10)).await.unwrap();
        repo.create(stock("Olive Oil", 10, 10)).await.unwrap();
        repo.create(stock("Tomatoes", 11, 10)).await.unwrap();

        let low: Vec<String> = repo
            .find_low_stock()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.item_name)
            .collect();
        assert_eq!(low, vec!["Olive Oil".to_string(), "Rice".to_string()]);
    }

    #[tokio::test]
    async fn item_names_are_unique() {
        let repo = repo().await;
        repo.create(stock("Rice", 5, 10)).await.unwrap();
        let err = repo.create(stock("Rice", 99, 1)).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }
}
