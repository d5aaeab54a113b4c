//! Inventory Model
//!
//! Stock tracking for kitchen supplies, independent of menu items.

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Inventory entity (库存)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// Unique item name
    pub item_name: String,
    pub quantity: i32,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub reorder_level: i32,
    pub cost_per_unit: Decimal,
    pub last_updated: i64,
}

fn default_unit() -> String {
    "units".to_string()
}

impl Inventory {
    /// Low stock when at or below the reorder level (boundary included)
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}

/// Inventory row with the derived low-stock flag (API responses)
#[derive(Debug, Clone, Serialize)]
pub struct InventoryView {
    #[serde(flatten)]
    pub item: Inventory,
    pub is_low_stock: bool,
}

impl From<Inventory> for InventoryView {
    fn from(item: Inventory) -> Self {
        let is_low_stock = item.is_low_stock();
        Self { item, is_low_stock }
    }
}

/// Create inventory payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryCreate {
    pub item_name: String,
    pub quantity: i32,
    pub unit: Option<String>,
    pub reorder_level: i32,
    pub cost_per_unit: Option<Decimal>,
}

/// Update inventory payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryUpdate {
    pub item_name: Option<String>,
    pub quantity: Option<i32>,
    pub unit: Option<String>,
    pub reorder_level: Option<i32>,
    pub cost_per_unit: Option<Decimal>,
}

/// update_quantity payload: signed delta
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityChange {
    pub quantity_change: i32,
}

/// restock payload: positive quantity to add
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restock {
    pub quantity: i32,
}
