//! # Engine Module
//!
//! Total calculation and best-promotion selection.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Order ──► compute_total ──► total = Σ price × quantity                │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │           compute_discount                                              │
//! │                 │                                                       │
//! │   no items? ────┼──► discount = 0                                      │
//! │   no promos? ───┤                                                       │
//! │                 ▼                                                       │
//! │   for promotion in order.promotions (left to right):                   │
//! │       unknown code ──► skip                                            │
//! │       candidate = rule.evaluate(items, total)                          │
//! │       candidate > best ──► best = candidate   (ties keep the earlier)  │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │           discount = best                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two entry points:
//! - [`Engine::compute_total`] then [`Engine::compute_discount`] store the
//!   results on the order.
//! - [`Engine::quote`] prices a borrowed order in one step and leaves it
//!   untouched.
//!
//! The discount is never clamped to the total.

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::rules::{RuleContext, RuleSet};
use crate::settings::RuleSettings;
use crate::types::{AppliedPromotion, Order, Quote};

/// Prices orders against a [`RuleSet`].
///
/// Holds no per-order state, so one engine can price any number of orders
/// and can be shared between threads.
#[derive(Debug, Default)]
pub struct Engine {
    rules: RuleSet,
}

impl Engine {
    /// Creates an engine with the standard rules built from `settings`.
    pub fn new(settings: &RuleSettings) -> Self {
        Engine::with_rules(RuleSet::standard(settings))
    }

    /// Creates an engine over a custom rule set.
    pub fn with_rules(rules: RuleSet) -> Self {
        Engine { rules }
    }

    /// The rules this engine evaluates.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Computes and stores the order total.
    pub fn compute_total(&self, order: &mut Order) -> Money {
        let total = order.compute_total();
        debug!(order_id = %order.id, total = %total, "Order total computed");
        total
    }

    /// Selects the best promotion and stores its discount on the order.
    ///
    /// ## Errors
    /// [`CoreError::TotalNotComputed`] when called before
    /// [`Engine::compute_total`]. The order is left unchanged.
    pub fn compute_discount(&self, order: &mut Order) -> CoreResult<Quote> {
        let total = order.total.ok_or_else(|| CoreError::TotalNotComputed {
            order_id: order.id.clone(),
        })?;

        let quote = self.select(order, total);
        order.discount = Some(quote.discount);
        Ok(quote)
    }

    /// Computes total and discount, storing both on the order.
    pub fn price(&self, order: &mut Order) -> Quote {
        let total = self.compute_total(order);
        let quote = self.select(order, total);
        order.discount = Some(quote.discount);
        quote
    }

    /// Prices an order without mutating it.
    pub fn quote(&self, order: &Order) -> Quote {
        self.select(order, order.subtotal())
    }

    /// Folds the order's promotions into the single best discount.
    fn select(&self, order: &Order, total: Money) -> Quote {
        if order.items.is_empty() || order.promotions.is_empty() {
            debug!(
                order_id = %order.id,
                items = order.items.len(),
                promotions = order.promotions.len(),
                "Nothing to discount"
            );
            return Quote::undiscounted(total);
        }

        let ctx = RuleContext::new(&order.items, total);
        let mut best = Money::zero();
        let mut applied = None;

        for (index, promotion) in order.promotions.iter().enumerate() {
            let Some(rule) = promotion.rule() else {
                debug!(
                    order_id = %order.id,
                    rule_id = %promotion.rule_id,
                    "Skipping promotion with unknown rule"
                );
                continue;
            };

            let Some(candidate) = self.rules.evaluate(rule, &ctx) else {
                debug!(order_id = %order.id, rule = %rule, "No rule registered");
                continue;
            };

            // Strictly greater: an equal later candidate never displaces the earlier one.
            if candidate > best {
                best = candidate;
                applied = Some(AppliedPromotion {
                    index,
                    name: promotion.name.clone(),
                    rule,
                });
            }
        }

        debug!(
            order_id = %order.id,
            total = %total,
            discount = %best,
            applied = ?applied.as_ref().map(|a| a.rule),
            "Promotion selected"
        );

        Quote::new(total, best, applied)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
