//! Price formatting and change tracking.

use crate::gateway::{ListPrice, PricePerUnit};

/// Shown in place of a price when the backend returned none
pub const UNKNOWN_PRICE: &str = "unknown";

/// `"<currency> <value>"` with exactly two decimals.
pub fn format_money(price: &PricePerUnit) -> String {
    format!("{} {:.2}", price.currency, price.value)
}

/// Formatted list price, or [`UNKNOWN_PRICE`].
pub fn format_list_price(price: Option<&ListPrice>) -> String {
    price
        .map(|p| format_money(&p.price_per_unit))
        .unwrap_or_else(|| UNKNOWN_PRICE.to_string())
}

/// Percentage change from `previous` to `current`.
///
/// `None` when there is no previous price. A previous price of zero also
/// counts as absent.
pub fn price_change_percent(previous: Option<f64>, current: f64) -> Option<f64> {
    match previous {
        Some(old) if old != 0.0 => Some((current - old) / old * 100.0),
        _ => None,
    }
}

/// Signed percentage with two decimals, e.g. `+20.00%`
pub fn format_change(percent: f64) -> String {
    format!("{:+.2}%", percent)
}
