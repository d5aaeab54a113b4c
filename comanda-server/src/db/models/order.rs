//! Order Model
//!
//! An order is an active tab at a table. Items live in their own table and
//! reference the order; `total_price` is a cached projection of the items,
//! recomputed on every item mutation.

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Served,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Served => "SERVED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Parse an enum value from its wire form ("PENDING", "IN_PROGRESS", ...)
    pub fn parse_str(value: &str) -> Option<OrderStatus> {
        match value {
            "PENDING" => Some(OrderStatus::Pending),
            "IN_PROGRESS" => Some(OrderStatus::InProgress),
            "SERVED" => Some(OrderStatus::Served),
            "CANCELLED" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// SERVED and CANCELLED are terminal; no further mutation allowed
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Served | OrderStatus::Cancelled)
    }

    /// Lifecycle machine for client-driven status updates:
    /// PENDING → IN_PROGRESS → SERVED, CANCELLED from PENDING or IN_PROGRESS.
    ///
    /// Workflow-internal transitions (payment completion, refund) bypass this.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::InProgress)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::InProgress, OrderStatus::Served)
                | (OrderStatus::InProgress, OrderStatus::Cancelled)
        )
    }
}

/// Order entity (订单)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub table_id: String,
    /// Display snapshot of the table number at creation time
    pub table_number: i32,
    pub customer_name: Option<String>,
    /// Derived: sum of item price × quantity; never set by clients
    pub total_price: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order item entity: one line of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub order_id: String,
    pub menu_item_id: String,
    /// Name snapshot for display; survives later menu edits
    pub menu_item_name: String,
    pub quantity: i32,
    /// Price snapshot taken from the menu item at add time; immutable
    pub price: Decimal,
    /// Derived: price × quantity
    pub line_total: Decimal,
    pub special_instructions: Option<String>,
    pub created_at: i64,
}

// =============================================================================
// API Request / Response Types
// =============================================================================

/// One input line of a new order / add_item call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    /// Menu item record id ("menu_item:xxx")
    pub menu_item_id: String,
    pub quantity: i32,
    pub special_instructions: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    /// Dining table record id ("dining_table:xxx")
    pub table: String,
    pub customer_name: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<OrderItemInput>,
}

/// Update order payload (metadata only; status/items go through the actions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub customer_name: Option<String>,
    pub notes: Option<String>,
}

/// update_status payload; kept as a string so an unknown value surfaces as
/// a validation error instead of a deserialization failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: String,
}

/// remove_item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRemoveItem {
    pub item_id: String,
}

/// Order with its items (detail / creation response)
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}
