//! Order lifecycle workflow
//!
//! Owns the multi-entity rules around an order: item snapshots, total
//! recomputation, the status machine and the table-availability side
//! effects. Handlers never mutate orders or items directly.

use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{
    MenuItem, Order, OrderCreate, OrderItem, OrderItemInput, OrderStatus, OrderUpdate,
    OrderWithItems,
};
use crate::db::repository::{DiningTableRepository, MenuItemRepository, OrderRepository};
use crate::utils::time::now_millis;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text,
};
use crate::utils::{AppError, AppResult};
use crate::workflow::money;

pub struct OrderWorkflow {
    orders: OrderRepository,
    menu: MenuItemRepository,
    tables: DiningTableRepository,
}

impl OrderWorkflow {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            menu: MenuItemRepository::new(db.clone()),
            tables: DiningTableRepository::new(db),
        }
    }

    /// Create an order with its initial items and occupy the table.
    ///
    /// All input lines are validated before anything is written, so a bad
    /// line leaves no records behind.
    pub async fn create_order(&self, data: OrderCreate) -> AppResult<OrderWithItems> {
        validate_optional_text(&data.customer_name, "customer_name", MAX_NAME_LEN)?;
        validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
        if data.items.is_empty() {
            return Err(AppError::validation("Order must contain at least one item"));
        }

        let table = self
            .tables
            .find_by_id(&data.table)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Table {} not found", data.table)))?;
        let table_id = record_id_string(&table.id, "dining table")?;

        let mut resolved: Vec<(OrderItemInput, MenuItem)> = Vec::with_capacity(data.items.len());
        for line in data.items {
            let menu_item = self.resolve_menu_item(&line).await?;
            if !menu_item.available {
                return Err(AppError::validation(format!(
                    "{} is currently unavailable",
                    menu_item.name
                )));
            }
            resolved.push((line, menu_item));
        }

        let now = now_millis();
        let order = self
            .orders
            .create(Order {
                id: None,
                table_id: table_id.clone(),
                table_number: table.table_number,
                customer_name: data.customer_name,
                total_price: Decimal::ZERO,
                status: OrderStatus::Pending,
                notes: data.notes.unwrap_or_default(),
                created_at: now,
                updated_at: now,
            })
            .await?;
        let order_id = record_id_string(&order.id, "order")?;

        let mut items = Vec::with_capacity(resolved.len());
        for (line, menu_item) in resolved {
            items.push(self.snapshot_item(&order_id, line, menu_item).await?);
        }

        let order = self.persist_total(order, &items).await?;

        // Side effect: the table is now occupied
        self.tables.set_availability(&table_id, false).await?;

        Ok(OrderWithItems { order, items })
    }

    /// Add one item to an open order, snapshotting the current menu price
    pub async fn add_item(&self, order_id: &str, line: OrderItemInput) -> AppResult<OrderWithItems> {
        let order = self.require_order(order_id).await?;
        if order.status.is_terminal() {
            return Err(AppError::invalid_state(
                "Cannot add items to served or cancelled orders",
            ));
        }

        let menu_item = self.resolve_menu_item(&line).await?;
        if !menu_item.available {
            // The item may be on the menu but currently off sale; either way
            // it is not orderable
            return Err(AppError::not_found(format!(
                "Menu item {} not found or unavailable",
                line.menu_item_id
            )));
        }

        let order_id = record_id_string(&order.id, "order")?;
        self.snapshot_item(&order_id, line, menu_item).await?;
        self.recompute(order).await
    }

    /// Remove one item from an open order
    pub async fn remove_item(&self, order_id: &str, item_id: &str) -> AppResult<OrderWithItems> {
        let order = self.require_order(order_id).await?;
        if order.status.is_terminal() {
            return Err(AppError::invalid_state(
                "Cannot remove items from served or cancelled orders",
            ));
        }

        let oid = record_id_string(&order.id, "order")?;
        let item = self
            .orders
            .find_item(item_id)
            .await?
            .filter(|item| item.order_id == oid)
            .ok_or_else(|| AppError::not_found(format!("Order item {} not found", item_id)))?;
        self.orders
            .delete_item(&record_id_string(&item.id, "order item")?)
            .await?;

        self.recompute(order).await
    }

    /// Client-driven status update.
    ///
    /// Transitions follow the lifecycle machine (see
    /// [`OrderStatus::can_transition_to`]); reaching SERVED or CANCELLED
    /// frees the table.
    pub async fn update_status(&self, order_id: &str, new_status: OrderStatus) -> AppResult<Order> {
        let mut order = self.require_order(order_id).await?;

        if !order.status.can_transition_to(new_status) {
            return Err(AppError::invalid_state(format!(
                "Cannot transition order from {} to {}",
                order.status.as_str(),
                new_status.as_str()
            )));
        }

        order.status = new_status;
        order.updated_at = now_millis();
        let order = self
            .orders
            .update(&record_id_string(&order.id, "order")?, order)
            .await?;

        if new_status.is_terminal() {
            self.tables.set_availability(&order.table_id, true).await?;
        }

        Ok(order)
    }

    /// Update order metadata (customer name, notes)
    pub async fn update_metadata(&self, order_id: &str, data: OrderUpdate) -> AppResult<Order> {
        validate_optional_text(&data.customer_name, "customer_name", MAX_NAME_LEN)?;
        validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;

        let mut order = self.require_order(order_id).await?;
        if let Some(name) = data.customer_name {
            order.customer_name = Some(name);
        }
        if let Some(notes) = data.notes {
            order.notes = notes;
        }
        order.updated_at = now_millis();
        let id = record_id_string(&order.id, "order")?;
        Ok(self.orders.update(&id, order).await?)
    }

    /// Fetch an order with its items
    pub async fn get_with_items(&self, order_id: &str) -> AppResult<OrderWithItems> {
        let order = self.require_order(order_id).await?;
        let id = record_id_string(&order.id, "order")?;
        let items = self.orders.items_for(&id).await?;
        Ok(OrderWithItems { order, items })
    }

    /// Delete an order and everything hanging off it
    pub async fn delete_order(&self, order_id: &str) -> AppResult<bool> {
        self.require_order(order_id).await?;
        Ok(self.orders.delete(order_id).await?)
    }

    // ── internals ───────────────────────────────────────────────────

    async fn require_order(&self, order_id: &str) -> AppResult<Order> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))
    }

    async fn resolve_menu_item(&self, line: &OrderItemInput) -> AppResult<MenuItem> {
        if line.quantity <= 0 {
            return Err(AppError::validation(format!(
                "Quantity must be positive, got {}",
                line.quantity
            )));
        }
        validate_optional_text(
            &line.special_instructions,
            "special_instructions",
            MAX_NOTE_LEN,
        )?;
        self.menu
            .find_by_id(&line.menu_item_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Menu item {} not found", line.menu_item_id))
            })
    }

    async fn snapshot_item(
        &self,
        order_id: &str,
        line: OrderItemInput,
        menu_item: MenuItem,
    ) -> AppResult<OrderItem> {
        let price = menu_item.price;
        let item = self
            .orders
            .create_item(OrderItem {
                id: None,
                order_id: order_id.to_string(),
                menu_item_id: record_id_string(&menu_item.id, "menu item")?,
                menu_item_name: menu_item.name,
                quantity: line.quantity,
                price,
                line_total: money::line_total(price, line.quantity),
                special_instructions: line.special_instructions,
                created_at: now_millis(),
            })
            .await?;
        Ok(item)
    }

    /// Recompute and persist the order total from its current items
    async fn recompute(&self, order: Order) -> AppResult<OrderWithItems> {
        let id = record_id_string(&order.id, "order")?;
        let items = self.orders.items_for(&id).await?;
        let order = self.persist_total(order, &items).await?;
        Ok(OrderWithItems { order, items })
    }

    async fn persist_total(&self, mut order: Order, items: &[OrderItem]) -> AppResult<Order> {
        order.total_price = money::order_total(items);
        order.updated_at = now_millis();
        let id = record_id_string(&order.id, "order")?;
        Ok(self.orders.update(&id, order).await?)
    }
}

/// Extract the record id string of a persisted entity
pub(crate) fn record_id_string(
    id: &Option<surrealdb::RecordId>,
    entity: &str,
) -> AppResult<String> {
    id.as_ref()
        .map(|rid| rid.to_string())
        .ok_or_else(|| AppError::internal(format!("persisted {entity} has no record id")))
}
