//! Money calculation utilities using rust_decimal for precision
//!
//! All derived monetary values (line totals, order totals, tax, final
//! amounts) are computed here and nowhere else, so the cached projections
//! on orders and payments cannot drift from their inputs.

use rust_decimal::prelude::*;

use crate::db::models::OrderItem;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to currency precision
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Line total of one order item: price × quantity
pub fn line_total(price: Decimal, quantity: i32) -> Decimal {
    round_money(price * Decimal::from(quantity))
}

/// Order total: sum of price × quantity over the current items
pub fn order_total(items: &[OrderItem]) -> Decimal {
    round_money(
        items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum::<Decimal>(),
    )
}

/// Tax on an order total at the configured rate
pub fn tax_amount(total: Decimal, rate: Decimal) -> Decimal {
    round_money(total * rate)
}

/// Final payment amount: amount + tip + tax − discount
pub fn final_amount(amount: Decimal, tip: Decimal, tax: Decimal, discount: Decimal) -> Decimal {
    round_money(amount + tip + tax - discount)
}

/// Average of a total over a count; zero when the count is zero
pub fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        round_money(total / Decimal::from(count as u64))
    }
}
