//! Probability-weighted expected value of a relic.

use tracing::{info, warn};

use crate::cache::{cache_key, CacheStore, FRESHNESS_WINDOW};
use crate::catalog::{Catalog, QualityTier, Relic};
use crate::error::Result;
use crate::fetcher::OrderSource;
use crate::orders::{filter_orders, OrdersResponse};

/// Price signal for a single reward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RewardPrice {
    /// Mean of the cheapest actionable sell orders, in platinum.
    Average(f64),
    /// No payload, or no actionable orders. Distinct from a price of
    /// zero; contributes nothing to the weighted sum.
    NoData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub expected_value: f64,
    /// Rewards that produced no usable price data.
    pub no_data: Vec<String>,
}

/// Walk the relic's drops sequentially: resolve each reward's orders
/// through the cache (or force a fetch when `refresh` is set), filter
/// to the market floor, average, and accumulate `mean * weight`.
pub async fn expected_value(
    relic: &Relic,
    quality: QualityTier,
    catalog: &Catalog,
    refresh: bool,
    cache: &mut CacheStore,
    source: &mut impl OrderSource,
) -> Result<Valuation> {
    let mut total = 0.0;
    let mut no_data = Vec::new();

    for drop in &relic.drops {
        let key = cache_key(&drop.name);
        let response = load_orders(&key, &drop.name, refresh, cache, source).await?;

        match reward_price(&response) {
            RewardPrice::Average(mean) => {
                let weight = catalog.weight(quality, drop.rarity);
                total += mean * weight;
            }
            RewardPrice::NoData => {
                warn!(reward = %drop.name, "no usable price data, contributes 0");
                no_data.push(drop.name.clone());
            }
        }
    }

    Ok(Valuation {
        expected_value: total,
        no_data,
    })
}

async fn load_orders(
    key: &str,
    name: &str,
    refresh: bool,
    cache: &mut CacheStore,
    source: &mut impl OrderSource,
) -> Result<OrdersResponse> {
    if !refresh {
        if let Some(body) = cache.get(key, FRESHNESS_WINDOW)? {
            info!(reward = %name, "loading orders from cache");
            return Ok(serde_json::from_str(&body)?);
        }
    }

    info!(reward = %name, "fetching orders from market");
    let fetched = source.fetch_orders(key).await?;
    cache.put(key, &fetched.raw)?;
    Ok(fetched.parsed)
}

fn reward_price(response: &OrdersResponse) -> RewardPrice {
    let Some(payload) = &response.payload else {
        return RewardPrice::NoData;
    };

    let filtered = filter_orders(payload.orders.clone());
    if filtered.is_empty() {
        return RewardPrice::NoData;
    }

    let sum: u64 = filtered.iter().map(|o| o.platinum).sum();
    RewardPrice::Average(sum as f64 / filtered.len() as f64)
}
