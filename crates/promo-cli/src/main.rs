//! # promo
//!
//! Prices an order file against its attached promotions.
//!
//! ## Usage
//! ```bash
//! # Print the receipt summary
//! promo order.json
//!
//! # Use a specific rule settings file, emit JSON
//! promo order.json --settings rules.toml --json
//!
//! # Trace every rule candidate
//! RUST_LOG=promo=trace promo order.json
//! ```

mod config;
mod error;
mod files;
mod order;
mod report;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use promo_core::Engine;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Select the best single promotion for an order.
#[derive(Debug, Parser)]
#[command(name = "promo", version, about)]
struct Args {
    /// Order JSON file.
    order: PathBuf,

    /// Rule settings TOML file (defaults to the user config directory).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print the quote as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let settings = config::load_settings(args.settings.clone())
        .context("Failed to load rule settings")?;
    let mut order = order::load_order(&args.order)
        .with_context(|| format!("Failed to load order from {}", args.order.display()))?;

    let engine = Engine::new(&settings);
    let quote = engine.price(&mut order);
    info!(
        order_id = %order.id,
        total = %quote.total,
        discount = %quote.discount,
        "Order priced"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        print!("{}", report::render(&order, &quote));
    }

    Ok(())
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=promo=trace` - Show every rule candidate
/// - Default: warnings, plus info for promo crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,promo=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
