//! Payment workflow
//!
//! Settlement of exactly one payment per order, and the coupling between a
//! payment's completion, the order lifecycle and table availability. The
//! tax rate comes from [`crate::core::Config`]; it is injected here, never
//! read from a hidden constant.

use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{
    Order, OrderStatus, Payment, PaymentCreate, PaymentStatus, PaymentUpdate,
};
use crate::db::repository::{DiningTableRepository, OrderRepository, PaymentRepository};
use crate::utils::time::now_millis;
use crate::utils::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};
use crate::workflow::money;
use crate::workflow::orders::record_id_string;

pub struct PaymentWorkflow {
    payments: PaymentRepository,
    orders: OrderRepository,
    tables: DiningTableRepository,
    tax_rate: Decimal,
}

impl PaymentWorkflow {
    pub fn new(db: Surreal<Db>, tax_rate: Decimal) -> Self {
        Self {
            payments: PaymentRepository::new(db.clone()),
            orders: OrderRepository::new(db.clone()),
            tables: DiningTableRepository::new(db),
            tax_rate,
        }
    }

    /// Create the payment of an order.
    ///
    /// amount is pinned to the order total; a client-supplied amount must
    /// match it exactly. Tax is derived from the configured rate and the
    /// final amount is computed immediately.
    pub async fn create(&self, data: PaymentCreate) -> AppResult<Payment> {
        validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;

        let order = self.require_order(&data.order).await?;
        let order_id = record_id_string(&order.id, "order")?;

        if order.status == OrderStatus::Cancelled {
            return Err(AppError::invalid_state(
                "Cannot create payment for cancelled order",
            ));
        }
        if self.payments.find_by_order(&order_id).await?.is_some() {
            return Err(AppError::conflict("This order already has a payment"));
        }

        let tip_amount = non_negative(data.tip_amount, "tip_amount")?;
        let discount_amount = non_negative(data.discount_amount, "discount_amount")?;

        if let Some(amount) = data.amount
            && amount != order.total_price
        {
            return Err(AppError::validation(format!(
                "Payment amount ({}) must match order total ({})",
                amount, order.total_price
            )));
        }

        let amount = order.total_price;
        let tax_amount = money::tax_amount(amount, self.tax_rate);
        let now = now_millis();

        let payment = self
            .payments
            .create(Payment {
                id: None,
                order_id,
                amount,
                payment_method: data.payment_method,
                payment_status: PaymentStatus::Pending,
                transaction_id: None,
                tip_amount,
                tax_amount,
                discount_amount,
                final_amount: money::final_amount(amount, tip_amount, tax_amount, discount_amount),
                notes: data.notes,
                payment_date: now,
                updated_at: now,
            })
            .await?;
        Ok(payment)
    }

    /// Mark a payment completed.
    ///
    /// Side effects as one set: the order becomes SERVED and its table is
    /// freed, never only one of the two.
    pub async fn complete(
        &self,
        payment_id: &str,
        transaction_id: Option<String>,
    ) -> AppResult<Payment> {
        validate_optional_text(&transaction_id, "transaction_id", MAX_SHORT_TEXT_LEN)?;

        let mut payment = self.require_payment(payment_id).await?;
        if payment.payment_status == PaymentStatus::Completed {
            return Err(AppError::invalid_state("Payment already completed"));
        }

        payment.payment_status = PaymentStatus::Completed;
        if transaction_id.is_some() {
            payment.transaction_id = transaction_id;
        }
        payment.updated_at = now_millis();
        let payment = self.payments.update(payment_id, payment).await?;

        self.settle_order(&payment.order_id, OrderStatus::Served)
            .await?;

        Ok(payment)
    }

    /// Refund a completed payment; the order is cancelled and its table
    /// freed (release on refund mirrors every other cancellation path).
    pub async fn refund(&self, payment_id: &str) -> AppResult<Payment> {
        let mut payment = self.require_payment(payment_id).await?;
        if payment.payment_status != PaymentStatus::Completed {
            return Err(AppError::invalid_state(
                "Can only refund completed payments",
            ));
        }

        payment.payment_status = PaymentStatus::Refunded;
        payment.updated_at = now_millis();
        let payment = self.payments.update(payment_id, payment).await?;

        self.settle_order(&payment.order_id, OrderStatus::Cancelled)
            .await?;

        Ok(payment)
    }

    /// Update payment inputs while still pending; the final amount is
    /// recomputed whenever any of its inputs changes.
    pub async fn update(&self, payment_id: &str, data: PaymentUpdate) -> AppResult<Payment> {
        validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
        validate_optional_text(&data.transaction_id, "transaction_id", MAX_SHORT_TEXT_LEN)?;

        let mut payment = self.require_payment(payment_id).await?;
        if matches!(
            payment.payment_status,
            PaymentStatus::Completed | PaymentStatus::Refunded
        ) {
            return Err(AppError::invalid_state(
                "Cannot modify a completed or refunded payment",
            ));
        }

        if let Some(amount) = data.amount {
            let order = self.require_order(&payment.order_id).await?;
            if amount != order.total_price {
                return Err(AppError::validation(format!(
                    "Payment amount ({}) must match order total ({})",
                    amount, order.total_price
                )));
            }
            payment.amount = amount;
        }
        if let Some(tip) = data.tip_amount {
            payment.tip_amount = non_negative(Some(tip), "tip_amount")?;
        }
        if let Some(discount) = data.discount_amount {
            payment.discount_amount = non_negative(Some(discount), "discount_amount")?;
        }
        if let Some(method) = data.payment_method {
            payment.payment_method = method;
        }
        if data.transaction_id.is_some() {
            payment.transaction_id = data.transaction_id;
        }
        if data.notes.is_some() {
            payment.notes = data.notes;
        }

        payment.final_amount = money::final_amount(
            payment.amount,
            payment.tip_amount,
            payment.tax_amount,
            payment.discount_amount,
        );
        payment.updated_at = now_millis();

        Ok(self.payments.update(payment_id, payment).await?)
    }

    // ── internals ───────────────────────────────────────────────────

    async fn require_order(&self, order_id: &str) -> AppResult<Order> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))
    }

    async fn require_payment(&self, payment_id: &str) -> AppResult<Payment> {
        self.payments
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Payment {} not found", payment_id)))
    }

    /// Move the paid order to its terminal status and free its table
    async fn settle_order(&self, order_id: &str, status: OrderStatus) -> AppResult<()> {
        let mut order = self.require_order(order_id).await?;
        order.status = status;
        order.updated_at = now_millis();
        let order = self.orders.update(order_id, order).await?;
        self.tables.set_availability(&order.table_id, true).await?;
        Ok(())
    }
}

fn non_negative(value: Option<Decimal>, field: &str) -> AppResult<Decimal> {
    let value = value.unwrap_or(Decimal::ZERO);
    if value < Decimal::ZERO {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(value)
}
