//! Workflow tests against an in-memory database

use std::str::FromStr;

use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::DbService;
use crate::db::models::{
    DiningTableCreate, MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate, OrderItemInput,
};
use crate::db::repository::{DiningTableRepository, MenuItemRepository};

mod test_orders;
mod test_payments;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn test_db() -> Surreal<Db> {
    DbService::memory().await.expect("in-memory db").db
}

/// Seed a dining table, returning its record id string
async fn seed_table(db: &Surreal<Db>, table_number: i32, capacity: i32) -> String {
    let table = DiningTableRepository::new(db.clone())
        .create(DiningTableCreate {
            table_number,
            capacity,
            is_available: Some(true),
        })
        .await
        .expect("seed table");
    table.id.expect("table id").to_string()
}

/// Seed a menu item, returning its record id string
async fn seed_menu_item(db: &Surreal<Db>, name: &str, price: &str) -> String {
    let item = MenuItemRepository::new(db.clone())
        .create(MenuItemCreate {
            name: name.to_string(),
            category: MenuCategory::Main,
            price: dec(price),
            description: None,
            available: Some(true),
        })
        .await
        .expect("seed menu item");
    item.id.expect("menu item id").to_string()
}

async fn set_menu_price(db: &Surreal<Db>, id: &str, price: &str) -> MenuItem {
    MenuItemRepository::new(db.clone())
        .update(
            id,
            MenuItemUpdate {
                name: None,
                category: None,
                price: Some(dec(price)),
                description: None,
                available: None,
            },
        )
        .await
        .expect("update menu price")
}

async fn set_menu_availability(db: &Surreal<Db>, id: &str, available: bool) -> MenuItem {
    MenuItemRepository::new(db.clone())
        .update(
            id,
            MenuItemUpdate {
                name: None,
                category: None,
                price: None,
                description: None,
                available: Some(available),
            },
        )
        .await
        .expect("update menu availability")
}

fn line(menu_item_id: &str, quantity: i32) -> OrderItemInput {
    OrderItemInput {
        menu_item_id: menu_item_id.to_string(),
        quantity,
        special_instructions: None,
    }
}

async fn table_is_available(db: &Surreal<Db>, table_id: &str) -> bool {
    DiningTableRepository::new(db.clone())
        .find_by_id(table_id)
        .await
        .expect("find table")
        .expect("table exists")
        .is_available
}
