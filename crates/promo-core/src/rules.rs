//! # Rules Module
//!
//! The seven discount rules and the registry that maps promotion codes to
//! them.
//!
//! ## Rule Catalog
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Code   Rule                 Reads                Candidate             │
//! │  ────   ──────────────────   ──────────────────   ───────────────────   │
//! │  B2G1   BuyTwoGetOne         price, quantity      max price, qty ≥ 2    │
//! │  HOFF   HalfOff              total                total × 50%           │
//! │  B1N1   NextItemOneBaht      price, quantity      max price − 1, qty > 1│
//! │  D100   ThresholdDiscount    total                100 if total ≥ 1000   │
//! │  B2I1   BundleFreeItem       selected, free_item  max free-item price   │
//! │  B1NH   SecondHalfPrice      half_off             max price × 50%       │
//! │  INCD   TieredPercentage     quantity, total      15/20/30%, cap 1000   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule is a pure function of a [`RuleContext`]. A rule that finds
//! nothing eligible returns zero; rules never fail.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::money::{Money, Percentage};
use crate::settings::{RuleSettings, TierSettings};
use crate::types::{LineItem, RuleId};

// =============================================================================
// Rule Trait
// =============================================================================

/// What a rule sees: the lines of an order and its computed total.
///
/// Building a context requires a total, so a rule can never run against
/// an order whose total is missing.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub items: &'a [LineItem],
    pub total: Money,
}

impl<'a> RuleContext<'a> {
    pub fn new(items: &'a [LineItem], total: Money) -> Self {
        RuleContext { items, total }
    }

    /// Total units across all lines.
    pub fn unit_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// A single promotion rule.
pub trait Rule: fmt::Debug + Send + Sync {
    /// The code this rule answers to.
    fn id(&self) -> RuleId;

    /// Candidate discount for the order. Zero when nothing qualifies.
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Money;
}

/// Highest price among `items`, or zero.
fn max_price<'a>(items: impl Iterator<Item = &'a LineItem>) -> Money {
    items.map(|i| i.price).fold(Money::zero(), std::cmp::max)
}

// =============================================================================
// Rules
// =============================================================================

/// `B2G1`: the most expensive item bought at least twice is free.
#[derive(Debug, Clone, Default)]
pub struct BuyTwoGetOne;

impl Rule for BuyTwoGetOne {
    fn id(&self) -> RuleId {
        RuleId::BuyTwoGetOne
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Money {
        max_price(ctx.items.iter().filter(|i| i.quantity >= 2))
    }
}

/// `HOFF`: a flat share of the order total.
#[derive(Debug, Clone)]
pub struct HalfOff {
    pub rate: Percentage,
}

impl Rule for HalfOff {
    fn id(&self) -> RuleId {
        RuleId::HalfOff
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Money {
        ctx.total.percent_of(self.rate)
    }
}

/// `B1N1`: buy one, the next unit costs `next_price`.
///
/// Only lines with more than one unit qualify. The saving on a line is
/// `price - next_price`; lines priced at or below `next_price` save nothing.
#[derive(Debug, Clone)]
pub struct NextItemOneBaht {
    pub next_price: Money,
}

impl Rule for NextItemOneBaht {
    fn id(&self) -> RuleId {
        RuleId::NextItemOneBaht
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Money {
        ctx.items
            .iter()
            .filter(|i| i.quantity > 1)
            .map(|i| i.price - self.next_price)
            .fold(Money::zero(), |best, saving| {
                if saving > best {
                    saving
                } else {
                    best
                }
            })
    }
}

/// `D100`: a fixed amount off orders at or above `min_total`.
#[derive(Debug, Clone)]
pub struct ThresholdDiscount {
    pub min_total: Money,
    pub discount: Money,
}

impl Rule for ThresholdDiscount {
    fn id(&self) -> RuleId {
        RuleId::ThresholdDiscount
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Money {
        if ctx.total >= self.min_total {
            self.discount
        } else {
            Money::zero()
        }
    }
}

/// `B2I1`: buy two selected items, get the dearest free-item line free.
///
/// Counts selected *lines*: two lines of the same SKU count twice, a single
/// line with quantity 2 counts once. The free item only has to be present
/// with its flag set.
#[derive(Debug, Clone, Default)]
pub struct BundleFreeItem;

/// Selected lines needed before the free item unlocks.
const BUNDLE_SIZE: usize = 2;

impl Rule for BundleFreeItem {
    fn id(&self) -> RuleId {
        RuleId::BundleFreeItem
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Money {
        let selected = ctx.items.iter().filter(|i| i.selected).count();
        if selected < BUNDLE_SIZE {
            return Money::zero();
        }
        max_price(ctx.items.iter().filter(|i| i.free_item))
    }
}

/// `B1NH` / `B1G1`: the dearest half-off-flagged item at a reduced price.
#[derive(Debug, Clone)]
pub struct SecondHalfPrice {
    pub rate: Percentage,
}

impl Rule for SecondHalfPrice {
    fn id(&self) -> RuleId {
        RuleId::SecondHalfPrice
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Money {
        max_price(ctx.items.iter().filter(|i| i.half_off)).percent_of(self.rate)
    }
}

/// `INCD`: a percentage of the total chosen by unit count, capped.
#[derive(Debug, Clone)]
pub struct TieredPercentage {
    pub tiers: TierSettings,
}

impl Rule for TieredPercentage {
    fn id(&self) -> RuleId {
        RuleId::TieredPercentage
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Money {
        match self.tiers.rate_for(ctx.unit_count()) {
            Some(rate) => ctx.total.percent_of(rate).cap_at(self.tiers.cap),
            None => Money::zero(),
        }
    }
}

// =============================================================================
// Rule Set
// =============================================================================

/// Registry of rules keyed by [`RuleId`].
///
/// ## Dispatch
/// ```text
/// Promotion { rule_id: "HOFF" }
///      │  parse
///      ▼
/// RuleId::HalfOff ──► rules[HalfOff] ──► HalfOff::evaluate(ctx)
///
/// Promotion { rule_id: "ZZZZ" } ──► parse fails ──► skipped
/// ```
#[derive(Debug)]
pub struct RuleSet {
    rules: HashMap<RuleId, Box<dyn Rule>>,
}

impl RuleSet {
    /// An empty registry. Every promotion evaluated against it is inert.
    pub fn empty() -> Self {
        RuleSet {
            rules: HashMap::new(),
        }
    }

    /// The seven standard rules, parameterized by `settings`.
    pub fn standard(settings: &RuleSettings) -> Self {
        let mut set = RuleSet::empty();
        set.register(BuyTwoGetOne);
        set.register(HalfOff {
            rate: settings.half_off,
        });
        set.register(NextItemOneBaht {
            next_price: settings.next_item_price,
        });
        set.register(ThresholdDiscount {
            min_total: settings.threshold.min_total,
            discount: settings.threshold.discount,
        });
        set.register(BundleFreeItem);
        set.register(SecondHalfPrice {
            rate: settings.second_item,
        });
        set.register(TieredPercentage {
            tiers: settings.tiers.clone(),
        });
        set
    }

    /// Adds a rule, replacing any rule already registered under its id.
    pub fn register<R: Rule + 'static>(&mut self, rule: R) {
        self.rules.insert(rule.id(), Box::new(rule));
    }

    /// Looks up the rule for an id.
    pub fn get(&self, id: RuleId) -> Option<&dyn Rule> {
        self.rules.get(&id).map(|r| r.as_ref())
    }

    /// Evaluates the rule for `id`, or `None` when none is registered.
    pub fn evaluate(&self, id: RuleId, ctx: &RuleContext<'_>) -> Option<Money> {
        let rule = self.get(id)?;
        let candidate = rule.evaluate(ctx);
        trace!(rule = %id, candidate = %candidate, "Rule evaluated");
        Some(candidate)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet::standard(&RuleSettings::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
