//! # Rule Settings Loading
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PROMO_HALF_OFF_BPS=4000                                            │
//! │     PROMO_THRESHOLD_MIN_TOTAL=1500.00                                  │
//! │     PROMO_THRESHOLD_DISCOUNT=150                                       │
//! │     PROMO_TIER_CAP=800                                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --settings <path>, else                                            │
//! │     ~/.config/promo-engine/rules.toml (Linux)                          │
//! │     ~/Library/Application Support/com.promo.promo-engine/rules.toml    │
//! │     (macOS)                                                            │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     RuleSettings::default()                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use promo_core::{Money, Percentage, RuleSettings};
use tracing::{debug, info, warn};

use crate::error::CliResult;
use crate::files::read_to_string;

/// Loads rule settings from file and environment, then validates them.
///
/// An explicit `path` must exist. The default path is optional.
pub fn load_settings(path: Option<PathBuf>) -> CliResult<RuleSettings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

/// [`load_settings`] with an explicit environment lookup.
pub fn load_settings_with<F>(path: Option<PathBuf>, lookup: F) -> CliResult<RuleSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = match path {
        Some(path) => {
            info!(?path, "Loading rule settings from file");
            parse_settings(&read_to_string(&path)?)?
        }
        None => match default_settings_path() {
            Some(path) if path.exists() => {
                info!(?path, "Loading rule settings from file");
                parse_settings(&read_to_string(&path)?)?
            }
            path => {
                debug!(?path, "Settings file not found, using defaults");
                RuleSettings::default()
            }
        },
    };

    apply_env_overrides(&mut settings, lookup);
    settings.validate()?;

    Ok(settings)
}

/// Parses a TOML settings document. Missing fields take their defaults.
pub fn parse_settings(contents: &str) -> CliResult<RuleSettings> {
    Ok(toml::from_str(contents)?)
}

/// Applies `PROMO_*` overrides. Unparseable values are logged and ignored.
pub fn apply_env_overrides<F>(settings: &mut RuleSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup("PROMO_HALF_OFF_BPS") {
        match raw.trim().parse::<u32>() {
            Ok(bps) => {
                debug!(bps, "Overriding half-off rate from environment");
                settings.half_off = Percentage::from_bps(bps);
            }
            Err(_) => warn!(value = %raw, "Ignoring invalid PROMO_HALF_OFF_BPS"),
        }
    }

    override_money(&lookup, "PROMO_THRESHOLD_MIN_TOTAL", &mut settings.threshold.min_total);
    override_money(&lookup, "PROMO_THRESHOLD_DISCOUNT", &mut settings.threshold.discount);
    override_money(&lookup, "PROMO_TIER_CAP", &mut settings.tiers.cap);
}

fn override_money<F>(lookup: &F, key: &str, target: &mut Money)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(key) {
        match Money::parse(&raw) {
            Ok(amount) => {
                debug!(key, amount = %amount, "Overriding setting from environment");
                *target = amount;
            }
            Err(e) => warn!(key, value = %raw, error = %e, "Ignoring invalid setting"),
        }
    }
}

/// Returns the default settings file path.
fn default_settings_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "promo", "promo-engine")
        .map(|dirs| dirs.config_dir().join("rules.toml"))
}
