//! Dining Table Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all dining tables, ordered by table number
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table ORDER BY table_number")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find available tables only
    pub async fn find_available(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE is_available = true ORDER BY table_number")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Available tables that seat at least `min_capacity`
    pub async fn find_by_min_capacity(&self, min_capacity: i32) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query(
                "SELECT * FROM dining_table WHERE capacity >= $min AND is_available = true ORDER BY table_number",
            )
            .bind(("min", min_capacity))
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let rid = parse_id(id, TABLE)?;
        let table: Option<DiningTable> = self.base.db().select(rid).await?;
        Ok(table)
    }

    /// Find table by its number
    pub async fn find_by_number(&self, table_number: i32) -> RepoResult<Option<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE table_number = $number LIMIT 1")
            .bind(("number", table_number))
            .await?
            .take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a new dining table
    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        if data.table_number <= 0 {
            return Err(RepoError::Validation(format!(
                "Table number must be positive, got {}",
                data.table_number
            )));
        }
        if data.capacity <= 0 {
            return Err(RepoError::Validation(format!(
                "Capacity must be positive, got {}",
                data.capacity
            )));
        }
        // Pre-check for a friendly error; the unique index is the backstop
        if self.find_by_number(data.table_number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table {} already exists",
                data.table_number
            )));
        }

        let table = DiningTable {
            id: None,
            table_number: data.table_number,
            capacity: data.capacity,
            is_available: data.is_available.unwrap_or(true),
        };

        let created: Option<DiningTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }

    /// Update a dining table
    pub async fn update(&self, id: &str, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        let rid = parse_id(id, TABLE)?;
        let mut existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;

        if let Some(number) = data.table_number {
            if number <= 0 {
                return Err(RepoError::Validation(format!(
                    "Table number must be positive, got {}",
                    number
                )));
            }
            if number != existing.table_number
                && self.find_by_number(number).await?.is_some()
            {
                return Err(RepoError::Duplicate(format!(
                    "Table {} already exists",
                    number
                )));
            }
            existing.table_number = number;
        }
        if let Some(capacity) = data.capacity {
            if capacity <= 0 {
                return Err(RepoError::Validation(format!(
                    "Capacity must be positive, got {}",
                    capacity
                )));
            }
            existing.capacity = capacity;
        }
        if let Some(is_available) = data.is_available {
            existing.is_available = is_available;
        }

        existing.id = None;
        let updated: Option<DiningTable> = self.base.db().update(rid).content(existing).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
    }

    /// Flip the availability flag (mark_available / mark_unavailable and
    /// the order/payment workflow side effects)
    pub async fn set_availability(&self, id: &str, available: bool) -> RepoResult<DiningTable> {
        let rid = parse_id(id, TABLE)?;
        let mut existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;
        existing.is_available = available;

        existing.id = None;
        let updated: Option<DiningTable> = self.base.db().update(rid).content(existing).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
    }

    /// Hard delete a dining table
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = parse_id(id, TABLE)?;
        let deleted: Option<DiningTable> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}
