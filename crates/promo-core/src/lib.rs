//! # promo-core: Promotion Discount Selection
//!
//! Given an order and the promotions attached to it, this crate computes the
//! order total and the single largest discount any one promotion yields.
//! Promotions never stack.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Catalog / order builder (external)                     │   │
//! │  │   prices items, sets selected / free_item / half_off flags      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Order                                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ promo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   rules   │  │  engine   │  │   │
//! │  │   │   Order   │  │   Money   │  │ Rule trait│  │  total +  │  │   │
//! │  │   │ LineItem  │  │Percentage │  │  RuleSet  │  │ selection │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Quote                                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              promo-cli (printing, config files)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Order, LineItem, Promotion, RuleId, Quote
//! - [`money`] - Integer money and basis-point percentages
//! - [`rules`] - The seven discount rules and their registry
//! - [`engine`] - Total calculation and best-promotion selection
//! - [`settings`] - Tunable rule constants
//! - [`validation`] - Upstream input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use promo_core::{Engine, LineItem, Money, Order, Promotion};
//!
//! let mut order = Order::new(
//!     vec![LineItem::new("A", Money::from_major(600), 2)],
//!     vec![
//!         Promotion::new("Buy 2 get 1 free", "B2G1"),
//!         Promotion::new("Half off", "HOFF"),
//!     ],
//! );
//!
//! let engine = Engine::default();
//! engine.compute_total(&mut order);
//! let quote = engine.compute_discount(&mut order).unwrap();
//!
//! assert_eq!(quote.total, Money::from_major(1200));
//! assert_eq!(quote.discount, Money::from_major(600));
//! assert_eq!(order.payable(), Some(Money::from_major(600)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod money;
pub mod rules;
pub mod settings;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use engine::Engine;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Percentage};
pub use rules::{Rule, RuleContext, RuleSet};
pub use settings::RuleSettings;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items accepted by [`validation::validate_order`].
pub const MAX_ORDER_ITEMS: usize = 100;

/// Maximum quantity on a single line.
pub const MAX_ITEM_QUANTITY: i64 = 9_999;

/// Maximum unit price, in minor units (10,000,000.00).
///
/// A validated order holds at most `MAX_ORDER_ITEMS × MAX_ITEM_QUANTITY`
/// units at this price, about 1e15 minor units, well inside i64. Orders
/// that skip validation get no such guarantee.
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000;
