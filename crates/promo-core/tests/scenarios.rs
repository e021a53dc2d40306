//! End-to-end pricing scenarios for the standard promotion catalog.

use promo_core::{CoreError, Engine, LineItem, Money, Order, Promotion, RuleId};

fn baht(major: i64) -> Money {
    Money::from_major(major)
}

/// Builds an order, then runs total and discount the way a till does.
fn priced(items: Vec<LineItem>, promotions: Vec<Promotion>) -> Order {
    let engine = Engine::default();
    let mut order = Order::with_id("1", items, promotions);
    engine.compute_total(&mut order);
    engine
        .compute_discount(&mut order)
        .expect("total was computed");
    order
}

fn promo(code: &str) -> Promotion {
    Promotion::new(format!("{} promotion", code), code)
}

fn every_rule() -> Vec<Promotion> {
    RuleId::ALL
        .iter()
        .map(|r| Promotion::for_rule(format!("{} promotion", r), *r))
        .collect()
}

#[test]
fn test_buy_two_get_one_free() {
    let order = priced(
        vec![
            LineItem::new("A", baht(5000), 1),
            LineItem::new("B", baht(30), 2),
            LineItem::new("C", baht(20), 2),
            LineItem::new("D", baht(15), 1).half_off(),
        ],
        vec![promo("B2G1")],
    );
    assert_eq!(order.discount, Some(baht(30)));
}

#[test]
fn test_half_off() {
    let order = priced(
        vec![
            LineItem::new("A", baht(5000), 1),
            LineItem::new("B", baht(3000), 3),
        ],
        vec![promo("HOFF")],
    );
    assert_eq!(order.total, Some(baht(14000)));
    assert_eq!(order.discount, Some(baht(7000)));
}

#[test]
fn test_buy_one_next_one_baht() {
    let order = priced(
        vec![
            LineItem::new("A", baht(5000), 1),
            LineItem::new("B", baht(1000), 2),
        ],
        vec![promo("B1N1")],
    );
    assert_eq!(order.discount, Some(baht(999)));
}

#[test]
fn test_hundred_baht_discount() {
    let order = priced(
        vec![
            LineItem::new("A", baht(1000), 1),
            LineItem::new("B", baht(1000), 2),
            LineItem::new("C", baht(2000), 1),
        ],
        vec![promo("D100")],
    );
    assert_eq!(order.total, Some(baht(5000)));
    assert_eq!(order.discount, Some(baht(100)));
}

#[test]
fn test_buy_two_selected_get_free_item() {
    let order = priced(
        vec![
            LineItem::new("A", baht(5000), 1).selected(),
            LineItem::new("B", baht(3000), 3).free_item(),
            LineItem::new("C", baht(2000), 2).selected(),
        ],
        vec![promo("B2I1")],
    );
    assert_eq!(order.discount, Some(baht(3000)));

    let order = priced(
        vec![
            LineItem::new("A", baht(5000), 1).selected(),
            LineItem::new("B", baht(3000), 3).free_item(),
        ],
        vec![promo("B2I1")],
    );
    assert_eq!(order.discount, Some(Money::zero()));
}

#[test]
fn test_buy_one_get_one_half_price() {
    let items = vec![
        LineItem::new("A", baht(5000), 1),
        LineItem::new("B", baht(3000), 3).half_off(),
    ];
    let order = priced(items.clone(), vec![promo("B1NH")]);
    assert_eq!(order.discount, Some(baht(1500)));

    let order = priced(items, vec![promo("B1G1")]);
    assert_eq!(order.discount, Some(baht(1500)));
}

#[test]
fn test_increasing_discount_is_capped() {
    let order = priced(vec![LineItem::new("A", baht(5000), 50)], vec![promo("INCD")]);
    assert_eq!(order.total, Some(baht(250_000)));
    assert_eq!(order.discount, Some(baht(1000)));
}

#[test]
fn test_increasing_discount_single_unit() {
    let order = priced(vec![LineItem::new("A", baht(500), 1)], vec![promo("INCD")]);
    assert_eq!(order.discount, Some(baht(75)));
}

#[test]
fn test_best_of_several_promotions() {
    let order = priced(
        vec![LineItem::new("A", baht(600), 2)],
        vec![promo("B2G1"), promo("HOFF"), promo("INCD")],
    );
    assert_eq!(order.total, Some(baht(1200)));
    assert_eq!(order.discount, Some(baht(600)));
    assert_eq!(order.payable(), Some(baht(600)));
}

#[test]
fn test_empty_order_gets_no_discount() {
    let order = priced(vec![], every_rule());
    assert_eq!(order.total, Some(Money::zero()));
    assert_eq!(order.discount, Some(Money::zero()));
}

#[test]
fn test_no_promotions_gets_no_discount() {
    let order = priced(vec![LineItem::new("A", baht(5000), 3)], vec![]);
    assert_eq!(order.total, Some(baht(15000)));
    assert_eq!(order.discount, Some(Money::zero()));
}

#[test]
fn test_unknown_promotions_are_inert() {
    let order = priced(
        vec![LineItem::new("A", baht(5000), 3)],
        vec![promo("XMAS"), promo("hoff"), promo("")],
    );
    assert_eq!(order.discount, Some(Money::zero()));

    let order = priced(
        vec![LineItem::new("A", baht(5000), 3)],
        vec![promo("XMAS"), promo("D100")],
    );
    assert_eq!(order.discount, Some(baht(100)));
}

#[test]
fn test_discount_is_max_of_candidates() {
    let items = vec![
        LineItem::new("A", baht(1200), 1).selected(),
        LineItem::new("B", baht(800), 2).selected().half_off(),
        LineItem::new("C", baht(450), 1).free_item(),
    ];
    let engine = Engine::default();

    let singles: Vec<Money> = RuleId::ALL
        .iter()
        .map(|r| {
            let promotion = Promotion::for_rule(format!("{} promotion", r), *r);
            engine.quote(&Order::with_id("x", items.clone(), vec![promotion])).discount
        })
        .collect();
    let expected = singles.iter().copied().max().unwrap();

    let all = Order::with_id(
        "x",
        items,
        every_rule(),
    );
    assert_eq!(engine.quote(&all).discount, expected);
}

#[test]
fn test_equal_later_promotion_does_not_change_value() {
    let items = vec![LineItem::new("A", baht(600), 2)];
    let engine = Engine::default();

    let first = engine.quote(&Order::with_id("x", items.clone(), vec![promo("B2G1")]));
    let both = engine.quote(&Order::with_id(
        "x",
        items,
        vec![promo("B2G1"), promo("HOFF")],
    ));
    assert_eq!(first.discount, both.discount);
    assert_eq!(both.applied.unwrap().rule, RuleId::BuyTwoGetOne);
}

#[test]
fn test_total_is_sum_of_lines() {
    let items = vec![
        LineItem::new("A", Money::from_minor(1999), 3),
        LineItem::new("B", Money::from_minor(5), 7),
        LineItem::new("C", Money::zero(), 4),
        LineItem::new("D", baht(100), 0),
    ];
    let expected: i64 = items.iter().map(|i| i.price.minor() * i.quantity).sum();
    let order = priced(items, vec![]);
    assert_eq!(order.total, Some(Money::from_minor(expected)));
}

#[test]
fn test_discount_requires_total() {
    let engine = Engine::default();
    let mut order = Order::with_id("42", vec![LineItem::new("A", baht(1), 1)], vec![promo("HOFF")]);
    assert!(matches!(
        engine.compute_discount(&mut order),
        Err(CoreError::TotalNotComputed { .. })
    ));
}

#[test]
fn test_order_from_json() {
    let json = r#"{
        "id": "123",
        "items": [
            { "sku": "A", "price": 5000, "quantity": 1, "selected": true },
            { "sku": "B", "price": "3000.00", "quantity": 3, "free_item": true },
            { "sku": "C", "price": 2000, "quantity": 2, "selected": true }
        ],
        "promotions": [
            { "name": "Buy A, B Get C Free", "rule_id": "B2I1" },
            { "name": "Hundred off", "rule_id": "D100" }
        ]
    }"#;
    let mut order: Order = serde_json::from_str(json).unwrap();
    let quote = Engine::default().price(&mut order);

    assert_eq!(quote.total, baht(18000));
    assert_eq!(quote.discount, baht(3000));
    assert_eq!(quote.payable, baht(15000));
    assert_eq!(quote.applied.unwrap().name, "Buy A, B Get C Free");
}
