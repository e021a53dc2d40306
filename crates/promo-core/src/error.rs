//! # Error Types
//!
//! Domain-specific error types for promo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  promo-core errors (this file)                                         │
//! │  ├── CoreError        - Engine contract violations, parse failures     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  promo-cli errors (separate crate)                                     │
//! │  └── CliError         - Config / file loading failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → exit code              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT An Error
//! Discount rules never fail. An order with no items, no promotions, no
//! eligible items, or an unrecognized rule id simply yields a zero discount.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The discount was requested before the order total was computed.
    ///
    /// ## When This Occurs
    /// ```text
    /// Order::new(items, promotions)
    ///      │
    ///      ▼
    /// engine.compute_discount(&mut order)   ← total is still None
    ///      │
    ///      ▼
    /// TotalNotComputed { order_id: "123" }
    /// ```
    #[error("Total for order {order_id} has not been computed")]
    TotalNotComputed { order_id: String },

    /// A rule id outside the closed set was parsed.
    ///
    /// The selector never surfaces this: unknown ids on a promotion are
    /// skipped. It is only returned by explicit `RuleId` parsing.
    #[error("Unknown promotion rule: {0}")]
    UnknownRule(String),

    /// A monetary amount could not be parsed.
    #[error("Invalid money amount '{input}': {reason}")]
    InvalidMoney { input: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used by upstream order builders before the engine runs. The engine
/// itself treats every order as valid by construction.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., SKU with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
