//! Order file loading.

use std::path::Path;

use promo_core::validation::validate_rule_id;
use promo_core::Order;
use tracing::{debug, warn};

use crate::error::CliResult;
use crate::files::read_to_string;

/// Reads, parses and validates an order JSON file.
///
/// Promotions with unknown codes are kept (the engine ignores them) but
/// reported, since they usually mean a typo in the catalog.
pub fn load_order(path: &Path) -> CliResult<Order> {
    let order = parse_order(&read_to_string(path)?)?;
    debug!(
        order_id = %order.id,
        items = order.items.len(),
        promotions = order.promotions.len(),
        "Order loaded"
    );
    Ok(order)
}

/// Parses and validates an order JSON document.
pub fn parse_order(contents: &str) -> CliResult<Order> {
    let order: Order = serde_json::from_str(contents)?;
    order.validate()?;

    for promotion in &order.promotions {
        if let Err(e) = validate_rule_id(&promotion.rule_id) {
            warn!(
                order_id = %order.id,
                promotion = %promotion.name,
                error = %e,
                "Promotion will never apply"
            );
        }
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use promo_core::{Engine, Money, RuleId};

    #[test]
    fn test_parse_order() {
        let order = parse_order(
            r#"{
                "id": "123",
                "items": [ { "sku": "A", "price": 500, "quantity": 1 } ],
                "promotions": [
                    { "name": "Tiered", "rule_id": "INCD" },
                    { "name": "Typo", "rule_id": "INKD" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(order.id, "123");
        assert_eq!(order.items[0].price, Money::from_major(500));
        assert_eq!(order.promotions.len(), 2);
    }

    #[test]
    fn test_parse_order_rejects_negative_quantity() {
        let result = parse_order(
            r#"{ "items": [ { "sku": "A", "price": 5, "quantity": -1 } ], "promotions": [] }"#,
        );
        assert!(matches!(result, Err(CliError::InvalidOrder(_))));
    }

    #[test]
    fn test_unknown_code_is_kept_and_never_applies() {
        let mut order = parse_order(
            r#"{
                "id": "7",
                "items": [ { "sku": "A", "price": 100, "quantity": 1 } ],
                "promotions": [
                    { "name": "Typo of half off", "rule_id": "HOF" },
                    { "name": "Flat 100", "rule_id": "D100" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(order.promotions[0].rule_id, "HOF");
        assert_eq!(order.promotions[0].rule(), None);

        // 100.00 is below the D100 threshold, so nothing applies.
        let quote = Engine::default().price(&mut order);
        assert_eq!(quote.discount, Money::zero());
        assert_eq!(quote.applied, None);
        assert_eq!(order.payable(), Some(Money::from_major(100)));
    }

    #[test]
    fn test_unknown_code_does_not_block_known_one() {
        let mut order = parse_order(
            r#"{
                "items": [ { "sku": "A", "price": 100, "quantity": 1 } ],
                "promotions": [
                    { "name": "Typo", "rule_id": "XMAS" },
                    { "name": "Half off", "rule_id": "HOFF" }
                ]
            }"#,
        )
        .unwrap();

        let quote = Engine::default().price(&mut order);
        let applied = quote.applied.unwrap();
        assert_eq!(applied.index, 1);
        assert_eq!(applied.rule, RuleId::HalfOff);
        assert_eq!(quote.discount, Money::from_major(50));
    }

    #[test]
    fn test_parse_order_rejects_price_beyond_limit() {
        let result = parse_order(
            r#"{
                "items": [ { "sku": "A", "price": 100000000000000, "quantity": 9999 } ],
                "promotions": [ { "name": "Half off", "rule_id": "HOFF" } ]
            }"#,
        );
        assert!(matches!(result, Err(CliError::InvalidOrder(_))));
    }

    #[test]
    fn test_load_order_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "id": "f1", "items": [ {{ "sku": "A", "price": 10, "quantity": 2 }} ], "promotions": [] }}"#
        )
        .unwrap();

        let order = load_order(file.path()).unwrap();
        assert_eq!(order.id, "f1");
        assert_eq!(order.items[0].quantity, 2);
    }

    #[test]
    fn test_parse_order_rejects_bad_json() {
        assert!(matches!(
            parse_order("{ not json"),
            Err(CliError::OrderParse(_))
        ));
    }
}
