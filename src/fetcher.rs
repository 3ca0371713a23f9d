//! Rate-limited client for the remote price endpoint.
//!
//! warframe.market asks clients to stay under 3 requests per second.
//! Instead of sleeping a flat interval after every call, the limiter
//! spaces requests out before they are sent, sleeping only the
//! remainder of the minimum interval. Transient failures are retried
//! with exponential backoff; anything else propagates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::orders::OrdersResponse;

/// Minimum spacing between requests (3 req/s ceiling).
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(334);

const MAX_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// One successful orders lookup: the verbatim body for the cache and
/// the parsed form for immediate use, both from a single request.
#[derive(Debug, Clone)]
pub struct FetchedOrders {
    pub raw: String,
    pub parsed: OrdersResponse,
}

/// Source of current sell orders for a normalized reward key.
#[async_trait]
pub trait OrderSource {
    async fn fetch_orders(&mut self, key: &str) -> Result<FetchedOrders>;
}

/// Spaces calls at least `min_interval` apart.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// Sleep for whatever remains of the minimum interval since the
    /// previous acquire, then mark this request.
    pub async fn acquire(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

pub struct MarketApi {
    client: Client,
    base_url: String,
    limiter: RateLimiter,
}

impl MarketApi {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            limiter: RateLimiter::new(MIN_REQUEST_INTERVAL),
        }
    }

    async fn get_orders_once(&self, url: &str) -> Result<FetchedOrders> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let raw = response.text().await?;

        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(Error::Upstream {
                status,
                url: url.to_string(),
            });
        }

        // Error bodies (e.g. unknown item) parse to a payload-less
        // response; the valuation layer treats those as no-data.
        let parsed: OrdersResponse = serde_json::from_str(&raw)?;
        Ok(FetchedOrders { raw, parsed })
    }
}

#[async_trait]
impl OrderSource for MarketApi {
    async fn fetch_orders(&mut self, key: &str) -> Result<FetchedOrders> {
        let url = format!("{}/items/{}/orders", self.base_url, key);
        let mut backoff = INITIAL_BACKOFF;
        let mut attempt = 1;

        loop {
            self.limiter.acquire().await;
            debug!(url = %url, attempt, "requesting sell orders");

            match self.get_orders_once(&url).await {
                Ok(fetched) => return Ok(fetched),
                Err(err) if attempt < MAX_ATTEMPTS && is_transient(&err) => {
                    warn!(error = %err, attempt, "transient fetch failure, backing off");
                    sleep(backoff).await;
                    backoff *= 2;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn is_transient(err: &Error) -> bool {
    match err {
        Error::Http(e) => e.is_connect() || e.is_timeout(),
        // Only constructed for 429 and 5xx.
        Error::Upstream { .. } => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn limiter_spaces_requests_by_min_interval() {
        let interval = Duration::from_millis(200);
        let mut limiter = RateLimiter::new(interval);

        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;

        assert!(start.elapsed() >= interval * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn limiter_first_acquire_is_immediate() {
        let mut limiter = RateLimiter::new(Duration::from_secs(10));
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
