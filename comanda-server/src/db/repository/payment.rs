//! Payment Repository
//!
//! One payment per order; the unique index on `order_id` is the backstop
//! for the workflow-level pre-check.

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::Payment;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "payment";

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find payments with optional status / method / date-range filters,
    /// newest first
    pub async fn find_filtered(
        &self,
        payment_status: Option<String>,
        payment_method: Option<String>,
        date_range: Option<(i64, i64)>,
    ) -> RepoResult<Vec<Payment>> {
        let mut sql = String::from("SELECT * FROM payment");
        let mut clauses: Vec<&str> = Vec::new();
        if payment_status.is_some() {
            clauses.push("payment_status = $status");
        }
        if payment_method.is_some() {
            clauses.push("payment_method = $method");
        }
        if date_range.is_some() {
            clauses.push("payment_date >= $from AND payment_date < $to");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY payment_date DESC");

        let mut query = self.base.db().query(sql);
        if let Some(s) = payment_status {
            query = query.bind(("status", s));
        }
        if let Some(m) = payment_method {
            query = query.bind(("method", m));
        }
        if let Some((from, to)) = date_range {
            query = query.bind(("from", from)).bind(("to", to));
        }

        let payments: Vec<Payment> = query.await?.take(0)?;
        Ok(payments)
    }

    /// Find payment by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Payment>> {
        let rid = parse_id(id, TABLE)?;
        let payment: Option<Payment> = self.base.db().select(rid).await?;
        Ok(payment)
    }

    /// Find the payment of an order, if any
    pub async fn find_by_order(&self, order_id: &str) -> RepoResult<Option<Payment>> {
        let payments: Vec<Payment> = self
            .base
            .db()
            .query("SELECT * FROM payment WHERE order_id = $order LIMIT 1")
            .bind(("order", order_id.to_string()))
            .await?
            .take(0)?;
        Ok(payments.into_iter().next())
    }

    /// Insert a payment row; a second payment for the same order is rejected
    /// by the unique index and surfaces as [`RepoError::Duplicate`]
    pub async fn create(&self, payment: Payment) -> RepoResult<Payment> {
        let created: Option<Payment> = self.base.db().create(TABLE).content(payment).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create payment".to_string()))
    }

    /// Replace a payment row
    pub async fn update(&self, id: &str, mut payment: Payment) -> RepoResult<Payment> {
        let rid = parse_id(id, TABLE)?;
        payment.id = None;
        let updated: Option<Payment> = self.base.db().update(rid).content(payment).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Payment {} not found", id)))
    }

    /// Hard delete a payment
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = parse_id(id, TABLE)?;
        let deleted: Option<Payment> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}
