//! Receipt summary rendering.

use promo_core::{Order, Quote};

/// Renders the plain-text summary printed after pricing.
///
/// ```text
/// Order ID: 123
/// Total: 14000.00
/// Discount: 7000.00
/// Applied: 50% Off (HOFF)
/// Total Payable: 7000.00
/// ```
pub fn render(order: &Order, quote: &Quote) -> String {
    let applied = match &quote.applied {
        Some(applied) => format!("{} ({})", applied.name, applied.rule),
        None => "none".to_string(),
    };

    format!(
        "Order ID: {}\nTotal: {}\nDiscount: {}\nApplied: {}\nTotal Payable: {}\n",
        order.id, quote.total, quote.discount, applied, quote.payable
    )
}
