//! Payment Model
//!
//! Exactly one payment per order (unique index on `order_id`).
//! `final_amount` is a cached projection: amount + tip + tax − discount,
//! recomputed whenever any of the four inputs changes.

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Payment method enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    Digital,
    Upi,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Card => "CARD",
            PaymentMethod::Digital => "DIGITAL",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
        }
    }
}

/// Payment status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Refunded => "REFUNDED",
        }
    }
}

/// Payment entity (支付)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub order_id: String,
    /// Equals the order total at creation time
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub tip_amount: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    /// Derived: amount + tip + tax − discount
    pub final_amount: Decimal,
    pub notes: Option<String>,
    pub payment_date: i64,
    pub updated_at: i64,
}

/// Create payment payload
///
/// `amount` is optional; when the client supplies it, it must equal the
/// order total exactly. Tax is always computed server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    /// Order record id ("restaurant_order:xxx")
    pub order: String,
    pub payment_method: PaymentMethod,
    pub amount: Option<Decimal>,
    pub tip_amount: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub notes: Option<String>,
}

/// Update payment payload (status changes go through the actions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub payment_method: Option<PaymentMethod>,
    pub amount: Option<Decimal>,
    pub tip_amount: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
}

/// complete_payment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentComplete {
    pub transaction_id: Option<String>,
}

/// One row of the payment summary report (grouped by method)
#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethodSummary {
    pub payment_method: PaymentMethod,
    pub count: i64,
    pub total: Decimal,
}
