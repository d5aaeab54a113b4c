//! Menu Item Model

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Menu category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuCategory {
    Appetizer,
    Main,
    Dessert,
    Beverage,
    Special,
}

impl MenuCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Appetizer => "APPETIZER",
            MenuCategory::Main => "MAIN",
            MenuCategory::Dessert => "DESSERT",
            MenuCategory::Beverage => "BEVERAGE",
            MenuCategory::Special => "SPECIAL",
        }
    }
}

/// Menu item entity (菜单项)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub category: MenuCategory,
    /// Price in currency precision; must be positive
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub category: MenuCategory,
    pub price: Decimal,
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub category: Option<MenuCategory>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub available: Option<bool>,
}
