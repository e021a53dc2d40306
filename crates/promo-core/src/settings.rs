//! # Rule Settings
//!
//! The tunable constants behind the seven promotion rules.
//!
//! Defaults reproduce the standard promotion catalog. Every field has a
//! serde default, so a settings file only needs the values it changes:
//!
//! ```toml
//! half_off = 5000              # basis points
//! next_item_price = "1.00"
//!
//! [threshold]
//! min_total = "1000.00"
//! discount = "100.00"
//!
//! [tiers]
//! one_item = 1500
//! two_items = 2000
//! three_or_more = 3000
//! cap = "1000.00"
//! ```
//!
//! Loading the file is the caller's job; this crate does no I/O.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::{Money, Percentage};
use crate::validation::{self, ValidationResult};

/// Fixed-amount discount above a spend threshold (`D100`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdSettings {
    /// Smallest order total that qualifies (inclusive).
    #[serde(default = "default_min_total")]
    pub min_total: Money,

    /// Amount taken off a qualifying order.
    #[serde(default = "default_threshold_discount")]
    pub discount: Money,
}

fn default_min_total() -> Money {
    Money::from_major(1000)
}

fn default_threshold_discount() -> Money {
    Money::from_major(100)
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        ThresholdSettings {
            min_total: default_min_total(),
            discount: default_threshold_discount(),
        }
    }
}

/// Quantity-tiered percentage (`INCD`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSettings {
    /// Rate when the order holds exactly one unit.
    #[serde(default = "default_one_item")]
    pub one_item: Percentage,

    /// Rate when the order holds exactly two units.
    #[serde(default = "default_two_items")]
    pub two_items: Percentage,

    /// Rate for three units or more.
    #[serde(default = "default_three_or_more")]
    pub three_or_more: Percentage,

    /// Upper bound on the tiered discount.
    #[serde(default = "default_tier_cap")]
    pub cap: Money,
}

fn default_one_item() -> Percentage {
    Percentage::from_percent(15)
}

fn default_two_items() -> Percentage {
    Percentage::from_percent(20)
}

fn default_three_or_more() -> Percentage {
    Percentage::from_percent(30)
}

fn default_tier_cap() -> Money {
    Money::from_major(1000)
}

impl Default for TierSettings {
    fn default() -> Self {
        TierSettings {
            one_item: default_one_item(),
            two_items: default_two_items(),
            three_or_more: default_three_or_more(),
            cap: default_tier_cap(),
        }
    }
}

impl TierSettings {
    /// Rate for a given unit count; `None` for an empty order.
    pub fn rate_for(&self, units: i64) -> Option<Percentage> {
        match units {
            n if n <= 0 => None,
            1 => Some(self.one_item),
            2 => Some(self.two_items),
            _ => Some(self.three_or_more),
        }
    }
}

/// Constants for every rule in the standard rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSettings {
    /// Share of the order total taken off by `HOFF`.
    #[serde(default = "default_half")]
    pub half_off: Percentage,

    /// What the next unit costs under `B1N1`.
    #[serde(default = "default_next_item_price")]
    pub next_item_price: Money,

    /// Share of the flagged item's price taken off by `B1NH`.
    #[serde(default = "default_half")]
    pub second_item: Percentage,

    #[serde(default)]
    pub threshold: ThresholdSettings,

    #[serde(default)]
    pub tiers: TierSettings,
}

fn default_half() -> Percentage {
    Percentage::from_percent(50)
}

fn default_next_item_price() -> Money {
    Money::from_major(1)
}

impl Default for RuleSettings {
    fn default() -> Self {
        RuleSettings {
            half_off: default_half(),
            next_item_price: default_next_item_price(),
            second_item: default_half(),
            threshold: ThresholdSettings::default(),
            tiers: TierSettings::default(),
        }
    }
}

impl RuleSettings {
    /// Rejects rates above 100% and negative amounts.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_percentage("half_off", self.half_off)?;
        validation::validate_percentage("second_item", self.second_item)?;
        validation::validate_percentage("tiers.one_item", self.tiers.one_item)?;
        validation::validate_percentage("tiers.two_items", self.tiers.two_items)?;
        validation::validate_percentage("tiers.three_or_more", self.tiers.three_or_more)?;

        for (field, amount) in [
            ("next_item_price", self.next_item_price),
            ("threshold.min_total", self.threshold.min_total),
            ("threshold.discount", self.threshold.discount),
            ("tiers.cap", self.tiers.cap),
        ] {
            if amount.is_negative() {
                return Err(ValidationError::MustBeNonNegative {
                    field: field.to_string(),
                });
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
