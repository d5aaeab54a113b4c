//! Workflow Engine
//!
//! The multi-entity consistency rules of the system:
//!
//! - [`orders`] - 订单生命周期 (item snapshots, totals, status machine,
//!   table side effects)
//! - [`reservations`] - 预订冲突检查 (capacity + double-booking)
//! - [`payments`] - 支付/订单/桌台联动 (one payment per order, completion
//!   and refund side effects)
//! - [`money`] - decimal arithmetic for every derived monetary value
//!
//! Handlers call in here for every mutation; entities are never written
//! without passing through these checks.

pub mod money;
pub mod orders;
pub mod payments;
pub mod reservations;

pub use orders::OrderWorkflow;
pub use payments::PaymentWorkflow;
pub use reservations::ReservationWorkflow;

#[cfg(test)]
mod tests;
