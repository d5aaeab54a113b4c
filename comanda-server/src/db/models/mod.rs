//! Database Models

// Serde helpers
pub mod serde_helpers;

// Catalog
pub mod menu_item;

// Location
pub mod dining_table;

// Bookings
pub mod reservation;

// Orders and settlement
pub mod order;
pub mod payment;

// Stock
pub mod inventory;

// Re-exports
pub use menu_item::{MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate};
pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate};
pub use reservation::{
    Reservation, ReservationCreate, ReservationSlot, ReservationStatus, ReservationUpdate,
};
pub use order::{
    Order, OrderCreate, OrderItem, OrderItemInput, OrderRemoveItem, OrderStatus,
    OrderStatusUpdate, OrderUpdate, OrderWithItems,
};
pub use payment::{
    Payment, PaymentComplete, PaymentCreate, PaymentMethod, PaymentMethodSummary, PaymentStatus,
    PaymentUpdate,
};
pub use inventory::{
    Inventory, InventoryCreate, InventoryUpdate, InventoryView, QuantityChange, Restock,
};
