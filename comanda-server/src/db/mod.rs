//! Database Module
//!
//! Handles the embedded SurrealDB instance and schema definition

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

/// Namespace / database used by the server
const NAMESPACE: &str = "comanda";
const DATABASE: &str = "main";

/// Schema definition applied at startup.
///
/// Tables are schemaless; the unique indexes are the authoritative backstop
/// for the invariants the workflow layer pre-checks (unique table numbers,
/// unique inventory names, one payment per order).
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS menu_item SCHEMALESS;
DEFINE TABLE IF NOT EXISTS dining_table SCHEMALESS;
DEFINE TABLE IF NOT EXISTS reservation SCHEMALESS;
DEFINE TABLE IF NOT EXISTS reservation_slot SCHEMALESS;
DEFINE TABLE IF NOT EXISTS restaurant_order SCHEMALESS;
DEFINE TABLE IF NOT EXISTS order_item SCHEMALESS;
DEFINE TABLE IF NOT EXISTS payment SCHEMALESS;
DEFINE TABLE IF NOT EXISTS inventory SCHEMALESS;

DEFINE INDEX IF NOT EXISTS uniq_table_number ON TABLE dining_table COLUMNS table_number UNIQUE;
DEFINE INDEX IF NOT EXISTS uniq_inventory_item ON TABLE inventory COLUMNS item_name UNIQUE;
DEFINE INDEX IF NOT EXISTS uniq_payment_order ON TABLE payment COLUMNS order_id UNIQUE;
"#;

/// Database service — owns the embedded SurrealDB connection
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path` and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::prepare(db).await
    }

    /// Open an in-memory database (tests and demos)
    pub async fn memory() -> Result<Self, AppError> {
        use surrealdb::engine::local::Mem;

        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;

        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Schema definition rejected: {e}")))?;

        tracing::info!("Database ready (namespace={NAMESPACE}, database={DATABASE})");

        Ok(Self { db })
    }
}
