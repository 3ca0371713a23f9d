//! Relicworth - interactive void-relic expected-value checker.
//!
//! Estimates what a void relic is worth in platinum by pulling live
//! sell orders from warframe.market for each possible reward,
//! filtering to realistically achievable trades, and weighting the
//! per-reward floor price by drop probability.
//!
//! # Modules
//!
//! - [`catalog`] - Static relic catalog with closed quality/rarity tiers
//! - [`cache`] - Durable per-reward cache with a one-hour freshness window
//! - [`fetcher`] - Rate-limited market API client behind the [`fetcher::OrderSource`] seam
//! - [`orders`] - Sell-order model and the actionability filter
//! - [`valuation`] - Probability-weighted expected value
//! - [`repl`] - Interactive query loop
//! - [`config`] - TOML configuration and logging setup
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use relicworth::app::App;
//! use relicworth::config::Config;
//!
//! # async fn demo() -> relicworth::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! App::run(config).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod orders;
pub mod repl;
pub mod valuation;
