//! # Domain Types
//!
//! Core domain types for promotion selection.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │    LineItem     │   │   Promotion     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  sku            │   │  name           │       │
//! │  │  items    ──────┼──►│  price          │   │  rule_id ───────┼──┐    │
//! │  │  promotions ────┼───┼─────────────────┼──►│                 │  │    │
//! │  │  total (derived)│   │  quantity       │   └─────────────────┘  │    │
//! │  │  discount (der.)│   │  selected       │                        │    │
//! │  └─────────────────┘   │  free_item      │   ┌─────────────────┐  │    │
//! │                        │  half_off       │   │     RuleId      │◄─┘    │
//! │                        └─────────────────┘   │  B2G1 HOFF B1N1 │       │
//! │                                              │  D100 B2I1 B1NH │       │
//! │  ┌─────────────────┐                         │  INCD           │       │
//! │  │     Quote       │  total, discount,       └─────────────────┘       │
//! │  │                 │  payable, applied                                 │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Eligibility Flags
//! `selected`, `free_item` and `half_off` are set by the catalog before an
//! order reaches the engine. Rules read them as-is and never derive them
//! from the SKU or the price.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation;

// =============================================================================
// Rule Id
// =============================================================================

/// The closed set of promotion rules the engine knows how to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleId {
    /// `B2G1`: most expensive item bought at least twice is free.
    #[serde(rename = "B2G1")]
    BuyTwoGetOne,
    /// `HOFF`: half off the whole order.
    #[serde(rename = "HOFF")]
    HalfOff,
    /// `B1N1`: buy one, the next unit costs one baht.
    #[serde(rename = "B1N1")]
    NextItemOneBaht,
    /// `D100`: fixed amount off above a spend threshold.
    #[serde(rename = "D100")]
    ThresholdDiscount,
    /// `B2I1`: buy two selected items, get a free item.
    #[serde(rename = "B2I1")]
    BundleFreeItem,
    /// `B1NH` (alias `B1G1`): second item at half price.
    #[serde(rename = "B1NH", alias = "B1G1")]
    SecondHalfPrice,
    /// `INCD`: percentage that grows with the number of units.
    #[serde(rename = "INCD")]
    TieredPercentage,
}

impl RuleId {
    /// Every rule, in registry order.
    pub const ALL: [RuleId; 7] = [
        RuleId::BuyTwoGetOne,
        RuleId::HalfOff,
        RuleId::NextItemOneBaht,
        RuleId::ThresholdDiscount,
        RuleId::BundleFreeItem,
        RuleId::SecondHalfPrice,
        RuleId::TieredPercentage,
    ];

    /// Returns the canonical promotion code.
    pub const fn code(&self) -> &'static str {
        match self {
            RuleId::BuyTwoGetOne => "B2G1",
            RuleId::HalfOff => "HOFF",
            RuleId::NextItemOneBaht => "B1N1",
            RuleId::ThresholdDiscount => "D100",
            RuleId::BundleFreeItem => "B2I1",
            RuleId::SecondHalfPrice => "B1NH",
            RuleId::TieredPercentage => "INCD",
        }
    }

    /// Returns every code that parses, aliases included.
    pub fn accepted_codes() -> Vec<String> {
        let mut codes: Vec<String> = Self::ALL.iter().map(|r| r.code().to_string()).collect();
        codes.push("B1G1".to_string());
        codes
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for RuleId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B2G1" => Ok(RuleId::BuyTwoGetOne),
            "HOFF" => Ok(RuleId::HalfOff),
            "B1N1" => Ok(RuleId::NextItemOneBaht),
            "D100" => Ok(RuleId::ThresholdDiscount),
            "B2I1" => Ok(RuleId::BundleFreeItem),
            "B1NH" | "B1G1" => Ok(RuleId::SecondHalfPrice),
            "INCD" => Ok(RuleId::TieredPercentage),
            other => Err(CoreError::UnknownRule(other.to_string())),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A priced line in an order.
///
/// SKUs are not required to be unique: the same product may appear on
/// several lines, and every rule looks at lines, not products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stock Keeping Unit.
    pub sku: String,

    /// Unit price.
    pub price: Money,

    /// Number of units on this line.
    pub quantity: i64,

    /// Counts towards the "buy two selected items" condition of `B2I1`.
    #[serde(default)]
    pub selected: bool,

    /// May be given away by `B2I1`.
    #[serde(default)]
    pub free_item: bool,

    /// May be sold at half price by `B1NH`.
    #[serde(default)]
    pub half_off: bool,
}

impl LineItem {
    /// Creates an unflagged line item.
    pub fn new(sku: impl Into<String>, price: Money, quantity: i64) -> Self {
        LineItem {
            sku: sku.into(),
            price,
            quantity,
            selected: false,
            free_item: false,
            half_off: false,
        }
    }

    /// Marks the item as a selected bundle item.
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Marks the item as eligible to be given away.
    pub fn free_item(mut self) -> Self {
        self.free_item = true;
        self
    }

    /// Marks the item as eligible for half price.
    pub fn half_off(mut self) -> Self {
        self.half_off = true;
        self
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Promotion
// =============================================================================

/// A promotion attached to an order.
///
/// `rule_id` is kept as the raw code: an order may carry promotions this
/// engine does not know, and those are inert rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    /// Display name. Has no effect on the discount.
    pub name: String,

    /// Promotion code, e.g. `"HOFF"`.
    pub rule_id: String,
}

impl Promotion {
    pub fn new(name: impl Into<String>, rule_id: impl Into<String>) -> Self {
        Promotion {
            name: name.into(),
            rule_id: rule_id.into(),
        }
    }

    /// Creates a promotion for a known rule.
    pub fn for_rule(name: impl Into<String>, rule: RuleId) -> Self {
        Promotion::new(name, rule.code())
    }

    /// The rule this promotion selects, or `None` for an unknown code.
    pub fn rule(&self) -> Option<RuleId> {
        self.rule_id.parse().ok()
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order with its attached promotions.
///
/// ## Lifecycle
/// ```text
/// Order::new(items, promotions)      total: None, discount: None
///      │
///      ▼
/// compute_total()                    total: Some(Σ price × quantity)
///      │
///      ▼
/// Engine::compute_discount()         discount: Some(best candidate)
/// ```
/// Recomputing simply overwrites both fields. An order carries no
/// synchronization; one thread computes it at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier. Generated when not supplied.
    #[serde(default = "new_order_id")]
    pub id: String,

    /// Line items, in entry order.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Attached promotions, in priority order for tie-breaks.
    #[serde(default)]
    pub promotions: Vec<Promotion>,

    /// Pre-discount total. `None` until computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Money>,

    /// Best single-promotion discount. `None` until computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Money>,
}

fn new_order_id() -> String {
    Uuid::new_v4().to_string()
}

impl Order {
    /// Creates an order with a generated id.
    pub fn new(items: Vec<LineItem>, promotions: Vec<Promotion>) -> Self {
        Order::with_id(new_order_id(), items, promotions)
    }

    /// Creates an order with a caller-supplied id.
    pub fn with_id(id: impl Into<String>, items: Vec<LineItem>, promotions: Vec<Promotion>) -> Self {
        Order {
            id: id.into(),
            items,
            promotions,
            total: None,
            discount: None,
        }
    }

    /// Sums `price × quantity` over every line without storing it.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Computes and stores the pre-discount total.
    pub fn compute_total(&mut self) -> Money {
        let total = self.subtotal();
        self.total = Some(total);
        total
    }

    /// Total units across all lines.
    pub fn unit_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Amount owed after the discount, once both are computed.
    pub fn payable(&self) -> Option<Money> {
        match (self.total, self.discount) {
            (Some(total), Some(discount)) => Some(total - discount),
            _ => None,
        }
    }

    /// Checks the order against the catalog input rules.
    pub fn validate(&self) -> CoreResult<()> {
        validation::validate_order(self)?;
        Ok(())
    }
}

// =============================================================================
// Quote
// =============================================================================

/// The promotion that produced the discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedPromotion {
    /// Position in `Order::promotions`.
    pub index: usize,
    pub name: String,
    pub rule: RuleId,
}

/// Result of pricing an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub total: Money,
    pub discount: Money,
    /// `total - discount`; not clamped at zero.
    pub payable: Money,
    /// `None` when no promotion produced a positive discount.
    pub applied: Option<AppliedPromotion>,
}

impl Quote {
    pub fn new(total: Money, discount: Money, applied: Option<AppliedPromotion>) -> Self {
        Quote {
            total,
            discount,
            payable: total - discount,
            applied,
        }
    }

    /// A quote with no discount.
    pub fn undiscounted(total: Money) -> Self {
        Quote::new(total, Money::zero(), None)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
