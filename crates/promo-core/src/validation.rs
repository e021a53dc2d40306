//! # Validation Module
//!
//! Input validation for orders built by the catalog.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog / order builder                                      │
//! │  ├── Sets eligibility flags                                            │
//! │  └── THIS MODULE: rejects malformed SKUs, prices, quantities           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine                                                       │
//! │  ├── Trusts its input                                                  │
//! │  └── Unknown promotion codes are inert, not errors                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use promo_core::validation::{validate_sku, validate_quantity};
//!
//! assert!(validate_sku("COKE-330").is_ok());
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_quantity(-1).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::{Money, Percentage};
use crate::types::{LineItem, Order, Promotion, RuleId};
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_ITEMS, MAX_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a promotion display name.
pub fn validate_promotion_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "promotion name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "promotion name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Checks that a promotion code belongs to the known rule set.
///
/// The engine never calls this: it skips unknown codes. Front ends use it
/// to warn about promotions that will never apply.
pub fn validate_rule_id(code: &str) -> ValidationResult<RuleId> {
    code.parse().map_err(|_| ValidationError::NotAllowed {
        field: "rule_id".to_string(),
        allowed: RuleId::accepted_codes(),
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Zero is allowed (a line kept for display, it adds nothing)
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Zero is allowed (free items)
/// - Must not exceed MAX_UNIT_PRICE, so order totals cannot overflow
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    if price.minor() > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE,
        });
    }

    Ok(())
}

/// Validates a discount rate: 0% to 100%.
pub fn validate_percentage(field: &str, rate: Percentage) -> ValidationResult<()> {
    if rate > Percentage::HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: Percentage::HUNDRED.bps() as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates every field of a line item.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_sku(&item.sku)?;
    validate_price(item.price)?;
    validate_quantity(item.quantity)?;
    Ok(())
}

/// Validates a promotion's display name.
///
/// The code is deliberately not checked here; see [`validate_rule_id`].
pub fn validate_promotion(promotion: &Promotion) -> ValidationResult<()> {
    validate_promotion_name(&promotion.name)
}

/// Validates an order: size limit, then each line and promotion.
pub fn validate_order(order: &Order) -> ValidationResult<()> {
    if order.items.len() > MAX_ORDER_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "order items".to_string(),
            min: 0,
            max: MAX_ORDER_ITEMS as i64,
        });
    }

    for item in &order.items {
        validate_line_item(item)?;
    }
    for promotion in &order.promotions {
        validate_promotion(promotion)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("COKE-330").is_ok());
        assert!(validate_sku("A").is_ok());
        assert!(validate_sku("product_1").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(50).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_major(5000)).is_ok());
        assert!(validate_price(Money::from_minor(-1)).is_err());
        assert!(validate_price(Money::from_minor(MAX_UNIT_PRICE)).is_ok());
        assert!(matches!(
            validate_price(Money::from_minor(MAX_UNIT_PRICE + 1)),
            Err(ValidationError::OutOfRange { field, .. }) if field == "price"
        ));
    }

    #[test]
    fn test_validate_order_rejects_price_that_would_overflow_total() {
        let order = Order::with_id(
            "huge",
            vec![LineItem::new("A", Money::from_major(100_000_000_000_000), MAX_ITEM_QUANTITY)],
            vec![Promotion::new("Half off", "HOFF")],
        );
        assert!(matches!(
            validate_order(&order),
            Err(ValidationError::OutOfRange { field, .. }) if field == "price"
        ));
    }

    #[test]
    fn test_largest_valid_order_totals_without_overflow() {
        let items: Vec<LineItem> = (0..MAX_ORDER_ITEMS)
            .map(|i| {
                LineItem::new(
                    format!("SKU-{}", i),
                    Money::from_minor(MAX_UNIT_PRICE),
                    MAX_ITEM_QUANTITY,
                )
            })
            .collect();
        let mut order = Order::with_id("max", items, vec![]);
        assert!(validate_order(&order).is_ok());

        let expected = MAX_UNIT_PRICE * MAX_ITEM_QUANTITY * MAX_ORDER_ITEMS as i64;
        assert_eq!(order.compute_total(), Money::from_minor(expected));
    }

    #[test]
    fn test_validate_rule_id() {
        assert_eq!(validate_rule_id("INCD").unwrap(), RuleId::TieredPercentage);
        assert_eq!(validate_rule_id("B1G1").unwrap(), RuleId::SecondHalfPrice);

        match validate_rule_id("FREE") {
            Err(ValidationError::NotAllowed { allowed, .. }) => {
                assert!(allowed.contains(&"HOFF".to_string()));
                assert!(allowed.contains(&"B1G1".to_string()));
            }
            other => panic!("expected NotAllowed, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage("rate", Percentage::from_bps(0)).is_ok());
        assert!(validate_percentage("rate", Percentage::HUNDRED).is_ok());
        assert!(validate_percentage("rate", Percentage::from_bps(10_001)).is_err());
    }

    #[test]
    fn test_validate_order() {
        let order = Order::with_id(
            "1",
            vec![LineItem::new("A", Money::from_major(10), 1)],
            vec![Promotion::new("Unknown but harmless", "ZZZZ")],
        );
        assert!(validate_order(&order).is_ok());

        let bad = Order::with_id(
            "2",
            vec![LineItem::new("A", Money::from_major(10), -2)],
            vec![],
        );
        assert!(matches!(
            validate_order(&bad),
            Err(ValidationError::MustBeNonNegative { field }) if field == "quantity"
        ));

        let unnamed = Order::with_id("3", vec![], vec![Promotion::new(" ", "HOFF")]);
        assert!(validate_order(&unnamed).is_err());
    }

    #[test]
    fn test_validate_order_size_limit() {
        let items = (0..=MAX_ORDER_ITEMS)
            .map(|i| LineItem::new(format!("SKU-{}", i), Money::from_major(1), 1))
            .collect();
        let order = Order::with_id("big", items, vec![]);
        assert!(matches!(
            validate_order(&order),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
