//! Order Repository
//!
//! Orders live in `restaurant_order`; their lines live in `order_item` and
//! reference the order by id string. Deleting an order cascades to its items
//! and payment.

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Order, OrderItem, Payment};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "restaurant_order";
const ITEM_TABLE: &str = "order_item";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find orders with optional status / table / creation-range filters,
    /// newest first
    pub async fn find_filtered(
        &self,
        status: Option<String>,
        table_id: Option<String>,
        created_range: Option<(i64, i64)>,
    ) -> RepoResult<Vec<Order>> {
        let mut sql = String::from("SELECT * FROM restaurant_order");
        let mut clauses: Vec<&str> = Vec::new();
        if status.is_some() {
            clauses.push("status = $status");
        }
        if table_id.is_some() {
            clauses.push("table_id = $table");
        }
        if created_range.is_some() {
            clauses.push("created_at >= $from AND created_at < $to");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = self.base.db().query(sql);
        if let Some(s) = status {
            query = query.bind(("status", s));
        }
        if let Some(t) = table_id {
            query = query.bind(("table", t));
        }
        if let Some((from, to)) = created_range {
            query = query.bind(("from", from)).bind(("to", to));
        }

        let orders: Vec<Order> = query.await?.take(0)?;
        Ok(orders)
    }

    /// Orders still being worked (PENDING or IN_PROGRESS), newest first
    pub async fn find_active(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM restaurant_order WHERE status IN ['PENDING', 'IN_PROGRESS'] ORDER BY created_at DESC",
            )
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let rid = parse_id(id, TABLE)?;
        let order: Option<Order> = self.base.db().select(rid).await?;
        Ok(order)
    }

    /// Insert an order row
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Replace an order row (total/status/metadata writes)
    pub async fn update(&self, id: &str, mut order: Order) -> RepoResult<Order> {
        let rid = parse_id(id, TABLE)?;
        order.id = None;
        let updated: Option<Order> = self.base.db().update(rid).content(order).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Delete an order together with its items and payment
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = parse_id(id, TABLE)?;

        let _: Vec<OrderItem> = self
            .base
            .db()
            .query("DELETE order_item WHERE order_id = $order RETURN BEFORE")
            .bind(("order", id.to_string()))
            .await?
            .take(0)?;
        let _: Vec<Payment> = self
            .base
            .db()
            .query("DELETE payment WHERE order_id = $order RETURN BEFORE")
            .bind(("order", id.to_string()))
            .await?
            .take(0)?;

        let deleted: Option<Order> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }

    // ── Order items ─────────────────────────────────────────────────

    /// Insert an order item row
    pub async fn create_item(&self, item: OrderItem) -> RepoResult<OrderItem> {
        let created: Option<OrderItem> = self.base.db().create(ITEM_TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order item".to_string()))
    }

    /// Items of one order, oldest first
    pub async fn items_for(&self, order_id: &str) -> RepoResult<Vec<OrderItem>> {
        let items: Vec<OrderItem> = self
            .base
            .db()
            .query("SELECT * FROM order_item WHERE order_id = $order ORDER BY created_at")
            .bind(("order", order_id.to_string()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Items belonging to any of the given orders (reporting)
    pub async fn items_for_orders(&self, order_ids: Vec<String>) -> RepoResult<Vec<OrderItem>> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }
        let items: Vec<OrderItem> = self
            .base
            .db()
            .query("SELECT * FROM order_item WHERE order_id IN $orders")
            .bind(("orders", order_ids))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find one order item by id
    pub async fn find_item(&self, item_id: &str) -> RepoResult<Option<OrderItem>> {
        let rid = parse_id(item_id, ITEM_TABLE)?;
        let item: Option<OrderItem> = self.base.db().select(rid).await?;
        Ok(item)
    }

    /// Delete one order item by id
    pub async fn delete_item(&self, item_id: &str) -> RepoResult<bool> {
        let rid = parse_id(item_id, ITEM_TABLE)?;
        let deleted: Option<OrderItem> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}
