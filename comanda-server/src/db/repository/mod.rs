//! Repository Module
//!
//! Provides typed CRUD and filtered queries per entity over the embedded
//! SurrealDB instance. Repositories enforce entity-local invariants
//! (uniqueness pre-checks, value ranges); multi-entity rules live in
//! `crate::workflow`.

// Catalog
pub mod menu_item;

// Location
pub mod dining_table;

// Bookings
pub mod reservation;

// Orders and settlement
pub mod order;
pub mod payment;

// Stock
pub mod inventory;

// Re-exports
pub use dining_table::DiningTableRepository;
pub use inventory::InventoryRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use payment::PaymentRepository;
pub use reservation::ReservationRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        let lower = msg.to_lowercase();
        // Unique index violations and record-id collisions surface as plain
        // database errors from the driver; classify them as duplicates so
        // callers can map them to a conflict.
        if lower.contains("already exists") || lower.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse a "table:key" id string and verify it points at the expected table
pub(crate) fn parse_id(id: &str, table: &str) -> RepoResult<RecordId> {
    let rid: RecordId = id
        .parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
    if rid.table() != table {
        return Err(RepoError::Validation(format!(
            "Invalid {} ID: {}",
            table, id
        )));
    }
    Ok(rid)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
