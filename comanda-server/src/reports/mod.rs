//! Reporting Engine
//!
//! Read-side aggregations over orders, payments, reservations and
//! inventory. Repositories fetch the rows; the aggregation itself is pure
//! (`compute_*`) so it can be exercised without a database.

use std::collections::HashMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{
    Inventory, InventoryView, MenuCategory, Order, OrderItem, OrderStatus, Payment,
    PaymentMethodSummary, PaymentStatus, Reservation, ReservationStatus,
};
use crate::db::repository::{
    InventoryRepository, MenuItemRepository, OrderRepository, PaymentRepository,
    ReservationRepository,
};
use crate::utils::AppResult;
use crate::utils::time::{day_end_millis, day_start_millis};
use crate::workflow::money;

/// How many rows the popularity ranking returns
const POPULAR_ITEMS_LIMIT: usize = 10;

// ============================================================================
// Report types
// ============================================================================

/// Daily sales report
#[derive(Debug, Clone, Serialize)]
pub struct DailySalesReport {
    pub date: String,
    pub total_orders: i64,
    pub total_revenue: Decimal,
    pub total_payments: i64,
    pub total_paid: Decimal,
    pub average_order_value: Decimal,
    pub cancelled_orders: i64,
    pub pending_orders: i64,
}

/// Reservation summary over an inclusive date range
#[derive(Debug, Clone, Serialize)]
pub struct ReservationSummary {
    pub start_date: String,
    pub end_date: String,
    pub total_reservations: i64,
    pub booked: i64,
    pub completed: i64,
    pub cancelled: i64,
}

/// One row of the popularity ranking
#[derive(Debug, Clone, Serialize)]
pub struct PopularItem {
    pub menu_item_id: String,
    pub menu_item_name: String,
    pub category: Option<MenuCategory>,
    pub total_quantity: i64,
    pub total_revenue: Decimal,
}

// ============================================================================
// Pure aggregation
// ============================================================================

/// Aggregate one day of orders and payments.
///
/// `payments` may contain any status; only COMPLETED ones count towards
/// total_payments / total_paid.
pub fn compute_daily_sales(date: &str, orders: &[Order], payments: &[Payment]) -> DailySalesReport {
    let total_orders = orders.len();
    let total_revenue = money::round_money(orders.iter().map(|o| o.total_price).sum());

    let completed: Vec<&Payment> = payments
        .iter()
        .filter(|p| p.payment_status == PaymentStatus::Completed)
        .collect();
    let total_paid = money::round_money(completed.iter().map(|p| p.final_amount).sum());

    let cancelled_orders = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Cancelled)
        .count() as i64;
    let pending_orders = orders
        .iter()
        .filter(|o| matches!(o.status, OrderStatus::Pending | OrderStatus::InProgress))
        .count() as i64;

    DailySalesReport {
        date: date.to_string(),
        total_orders: total_orders as i64,
        total_revenue,
        total_payments: completed.len() as i64,
        total_paid,
        average_order_value: money::average(total_revenue, total_orders),
        cancelled_orders,
        pending_orders,
    }
}

/// Count reservations in a range, broken down by status
pub fn compute_reservation_summary(
    start_date: &str,
    end_date: &str,
    reservations: &[Reservation],
) -> ReservationSummary {
    let count_status = |status: ReservationStatus| {
        reservations.iter().filter(|r| r.status == status).count() as i64
    };

    ReservationSummary {
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        total_reservations: reservations.len() as i64,
        booked: count_status(ReservationStatus::Booked),
        completed: count_status(ReservationStatus::Completed),
        cancelled: count_status(ReservationStatus::Cancelled),
    }
}

/// Group order items by menu item, descending by quantity sold, top 10.
///
/// `categories` maps menu item ids to their category for display; items
/// whose menu entry has since been deleted keep their name snapshot.
pub fn compute_popular_items(
    items: &[OrderItem],
    categories: &HashMap<String, MenuCategory>,
) -> Vec<PopularItem> {
    let mut grouped: HashMap<&str, PopularItem> = HashMap::new();
    for item in items {
        let entry = grouped
            .entry(item.menu_item_id.as_str())
            .or_insert_with(|| PopularItem {
                menu_item_id: item.menu_item_id.clone(),
                menu_item_name: item.menu_item_name.clone(),
                category: categories.get(&item.menu_item_id).copied(),
                total_quantity: 0,
                total_revenue: Decimal::ZERO,
            });
        entry.total_quantity += item.quantity as i64;
        entry.total_revenue += item.price * Decimal::from(item.quantity);
    }

    let mut ranked: Vec<PopularItem> = grouped
        .into_values()
        .map(|mut p| {
            p.total_revenue = money::round_money(p.total_revenue);
            p
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.total_quantity
            .cmp(&a.total_quantity)
            .then(b.total_revenue.cmp(&a.total_revenue))
            .then(a.menu_item_name.cmp(&b.menu_item_name))
    });
    ranked.truncate(POPULAR_ITEMS_LIMIT);
    ranked
}

/// Group completed payments by method
pub fn compute_payment_summary(payments: &[Payment]) -> Vec<PaymentMethodSummary> {
    let mut grouped: std::collections::BTreeMap<_, (i64, Decimal)> = Default::default();
    for payment in payments
        .iter()
        .filter(|p| p.payment_status == PaymentStatus::Completed)
    {
        let entry = grouped
            .entry(payment.payment_method)
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += payment.final_amount;
    }
    grouped
        .into_iter()
        .map(|(payment_method, (count, total))| PaymentMethodSummary {
            payment_method,
            count,
            total: money::round_money(total),
        })
        .collect()
}

// ============================================================================
// Service
// ============================================================================

/// Fetches the rows each report needs and runs the pure aggregation
pub struct ReportService {
    orders: OrderRepository,
    payments: PaymentRepository,
    reservations: ReservationRepository,
    inventory: InventoryRepository,
    menu: MenuItemRepository,
    tz: Tz,
}

impl ReportService {
    pub fn new(db: Surreal<Db>, tz: Tz) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            payments: PaymentRepository::new(db.clone()),
            reservations: ReservationRepository::new(db.clone()),
            inventory: InventoryRepository::new(db.clone()),
            menu: MenuItemRepository::new(db),
            tz,
        }
    }

    fn day_range(&self, date: NaiveDate) -> (i64, i64) {
        (
            day_start_millis(date, self.tz),
            day_end_millis(date, self.tz),
        )
    }

    /// Sales figures for one business day
    pub async fn daily_sales(&self, date: NaiveDate) -> AppResult<DailySalesReport> {
        let range = self.day_range(date);
        let orders = self.orders.find_filtered(None, None, Some(range)).await?;
        let payments = self.payments.find_filtered(None, None, Some(range)).await?;
        Ok(compute_daily_sales(
            &date.format("%Y-%m-%d").to_string(),
            &orders,
            &payments,
        ))
    }

    /// Inventory rows at or below their reorder level
    pub async fn inventory_alerts(&self) -> AppResult<Vec<InventoryView>> {
        let rows: Vec<Inventory> = self.inventory.find_low_stock().await?;
        Ok(rows.into_iter().map(InventoryView::from).collect())
    }

    /// Reservation counts over an inclusive date range
    pub async fn reservation_summary(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<ReservationSummary> {
        let start = start_date.format("%Y-%m-%d").to_string();
        let end = end_date.format("%Y-%m-%d").to_string();
        let reservations = self
            .reservations
            .find_in_date_range(start.clone(), end.clone())
            .await?;
        Ok(compute_reservation_summary(&start, &end, &reservations))
    }

    /// Most-ordered menu items for one business day
    pub async fn popular_items(&self, date: NaiveDate) -> AppResult<Vec<PopularItem>> {
        let range = self.day_range(date);
        let orders = self.orders.find_filtered(None, None, Some(range)).await?;
        let order_ids: Vec<String> = orders
            .iter()
            .filter_map(|o| o.id.as_ref().map(|id| id.to_string()))
            .collect();
        let items = self.orders.items_for_orders(order_ids).await?;

        let categories: HashMap<String, MenuCategory> = self
            .menu
            .find_all(None, None)
            .await?
            .into_iter()
            .filter_map(|m| m.id.as_ref().map(|id| (id.to_string(), m.category)))
            .collect();

        Ok(compute_popular_items(&items, &categories))
    }

    /// Completed payments of one day grouped by method
    pub async fn payment_summary(&self, date: NaiveDate) -> AppResult<Vec<PaymentMethodSummary>> {
        let range = self.day_range(date);
        let payments = self.payments.find_filtered(None, None, Some(range)).await?;
        Ok(compute_payment_summary(&payments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::PaymentMethod;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn order(total: &str, status: OrderStatus) -> Order {
        Order {
            id: None,
            table_id: "dining_table:t1".to_string(),
            table_number: 1,
            customer_name: None,
            total_price: dec(total),
            status,
            notes: String::new(),
            created_at: 0,
            updated_at: 0,
        }
    }

    fn payment(final_amount: &str, status: PaymentStatus, method: PaymentMethod) -> Payment {
        Payment {
            id: None,
            order_id: "restaurant_order:o1".to_string(),
            amount: dec(final_amount),
            payment_method: method,
            payment_status: status,
            transaction_id: None,
            tip_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            final_amount: dec(final_amount),
            notes: None,
            payment_date: 0,
            updated_at: 0,
        }
    }

    fn reservation(status: ReservationStatus) -> Reservation {
        Reservation {
            id: None,
            customer_name: "Ana".to_string(),
            customer_phone: "600000000".to_string(),
            customer_email: None,
            table_id: "dining_table:t1".to_string(),
            table_number: 1,
            date: "2026-08-07".to_string(),
            time: "20:00".to_string(),
            party_size: 2,
            status,
            special_requests: String::new(),
            created_at: 0,
            updated_at: 0,
        }
    }

    fn order_item(menu_id: &str, name: &str, price: &str, quantity: i32) -> OrderItem {
        OrderItem {
            id: None,
            order_id: "restaurant_order:o1".to_string(),
            menu_item_id: menu_id.to_string(),
            menu_item_name: name.to_string(),
            quantity,
            price: dec(price),
            line_total: dec(price) * Decimal::from(quantity),
            special_instructions: None,
            created_at: 0,
        }
    }

    #[test]
    fn daily_sales_with_no_orders_has_zero_average() {
        let report = compute_daily_sales("2026-08-07", &[], &[]);
        assert_eq!(report.total_orders, 0);
        assert_eq!(report.total_revenue, Decimal::ZERO);
        assert_eq!(report.average_order_value, Decimal::ZERO);
    }

    #[test]
    fn daily_sales_counts_statuses_and_completed_payments() {
        let orders = vec![
            order("20.00", OrderStatus::Served),
            order("10.00", OrderStatus::Pending),
            order("15.00", OrderStatus::InProgress),
            order("5.00", OrderStatus::Cancelled),
        ];
        let payments = vec![
            payment("21.60", PaymentStatus::Completed, PaymentMethod::Cash),
            payment("10.00", PaymentStatus::Pending, PaymentMethod::Card),
        ];
        let report = compute_daily_sales("2026-08-07", &orders, &payments);
        assert_eq!(report.total_orders, 4);
        assert_eq!(report.total_revenue, dec("50.00"));
        assert_eq!(report.total_payments, 1);
        assert_eq!(report.total_paid, dec("21.60"));
        assert_eq!(report.average_order_value, dec("12.50"));
        assert_eq!(report.cancelled_orders, 1);
        assert_eq!(report.pending_orders, 2);
    }

    #[test]
    fn reservation_summary_breaks_down_by_status() {
        let reservations = vec![
            reservation(ReservationStatus::Booked),
            reservation(ReservationStatus::Booked),
            reservation(ReservationStatus::Completed),
            reservation(ReservationStatus::Cancelled),
        ];
        let summary = compute_reservation_summary("2026-08-01", "2026-08-07", &reservations);
        assert_eq!(summary.total_reservations, 4);
        assert_eq!(summary.booked, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.cancelled, 1);
    }

    #[test]
    fn popular_items_ranks_by_quantity_and_truncates() {
        let mut items = Vec::new();
        for i in 0..12 {
            let id = format!("menu_item:m{i}");
            // item i sold i+1 times
            for _ in 0..=i {
                items.push(order_item(&id, &format!("Dish {i}"), "10.00", 1));
            }
        }
        let ranking = compute_popular_items(&items, &HashMap::new());
        assert_eq!(ranking.len(), 10);
        assert_eq!(ranking[0].menu_item_name, "Dish 11");
        assert_eq!(ranking[0].total_quantity, 12);
        assert_eq!(ranking[0].total_revenue, dec("120.00"));
        assert!(ranking.iter().all(|p| p.total_quantity >= 3));
    }

    #[test]
    fn popular_items_aggregates_quantity_and_revenue() {
        let items = vec![
            order_item("menu_item:a", "Paella", "14.50", 2),
            order_item("menu_item:a", "Paella", "14.50", 1),
            order_item("menu_item:b", "Flan", "4.00", 2),
        ];
        let categories = HashMap::from([
            ("menu_item:a".to_string(), MenuCategory::Main),
            ("menu_item:b".to_string(), MenuCategory::Dessert),
        ]);
        let ranking = compute_popular_items(&items, &categories);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].total_quantity, 3);
        assert_eq!(ranking[0].total_revenue, dec("43.50"));
        assert_eq!(ranking[0].category, Some(MenuCategory::Main));
        assert_eq!(ranking[1].total_quantity, 2);
    }

    #[test]
    fn payment_summary_groups_completed_by_method() {
        let payments = vec![
            payment("20.00", PaymentStatus::Completed, PaymentMethod::Cash),
            payment("15.00", PaymentStatus::Completed, PaymentMethod::Cash),
            payment("30.00", PaymentStatus::Completed, PaymentMethod::Card),
            payment("99.00", PaymentStatus::Refunded, PaymentMethod::Card),
        ];
        let summary = compute_payment_summary(&payments);
        assert_eq!(summary.len(), 2);
        let cash = summary
            .iter()
            .find(|s| s.payment_method == PaymentMethod::Cash)
            .unwrap();
        assert_eq!(cash.count, 2);
        assert_eq!(cash.total, dec("35.00"));
        let card = summary
            .iter()
            .find(|s| s.payment_method == PaymentMethod::Card)
            .unwrap();
        assert_eq!(card.count, 1);
        assert_eq!(card.total, dec("30.00"));
    }
}
