use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use itertools::Itertools;
use reqwest::Method;
use tokio::sync::oneshot;

use crate::utils::fetch::{send_http_request, RequestParams};

use super::schemas::{PriceResponse, TokenPriceMap};

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

struct CacheEntry {
    prices: TokenPriceMap,
    fetched_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() <= ttl
    }
}

#[derive(Default)]
pub struct FetchPricesOptions {
    pub cache_ttl: Option<Duration>,
    pub force_refresh: bool,
    /// Cancels the underlying network call when signalled. Cached results
    /// are still served.
    pub cancel: Option<oneshot::Receiver<()>>,
}

/// Price-quote client with a short-TTL in-memory cache and per-key
/// de-duplication of concurrent requests: callers racing on the same mint
/// set share one underlying network call.
pub struct PriceClient {
    base_url: String,
    cache: Mutex<HashMap<String, CacheEntry>>,
    in_flight: tokio::sync::Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl PriceClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            cache: Mutex::new(HashMap::new()),
            in_flight: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    pub async fn fetch_prices(
        &self,
        mints: &[String],
        options: FetchPricesOptions,
    ) -> eyre::Result<TokenPriceMap> {
        let normalized = normalize_mint_list(mints);

        if normalized.is_empty() {
            return Ok(TokenPriceMap::new());
        }

        let ttl = options.cache_ttl.unwrap_or(DEFAULT_CACHE_TTL);
        let key = normalized.join(",");

        if !options.force_refresh {
            if let Some(prices) = self.cached_prices(&key, ttl) {
                return Ok(prices);
            }
        }

        // One fetch per key at a time. A caller that loses the race waits
        // here, then finds the cache freshly populated.
        let key_lock = {
            let mut in_flight = self.in_flight.lock().await;
            in_flight.entry(key.clone()).or_default().clone()
        };
        let _guard = key_lock.lock().await;

        if !options.force_refresh {
            if let Some(prices) = self.cached_prices(&key, ttl) {
                return Ok(prices);
            }
        }

        let prices = match options.cancel {
            Some(mut cancel) => {
                tokio::select! {
                    result = self.fetch_from_api(&key, &normalized) => result?,
                    _ = &mut cancel => {
                        tracing::warn!("Price request for `{}` cancelled", key);
                        return Ok(TokenPriceMap::new());
                    }
                }
            }
            None => self.fetch_from_api(&key, &normalized).await?,
        };

        Ok(prices)
    }

    #[cfg(test)]
    fn seed_cache(&self, key: &str, prices: TokenPriceMap) {
        self.cache.lock().unwrap().insert(
            key.to_string(),
            CacheEntry {
                prices,
                fetched_at: Instant::now(),
            },
        );
    }

    fn cached_prices(&self, key: &str, ttl: Duration) -> Option<TokenPriceMap> {
        let cache = self.cache.lock().unwrap();
        cache
            .get(key)
            .filter(|entry| entry.is_fresh(ttl))
            .map(|entry| entry.prices.clone())
    }

    async fn fetch_from_api(&self, key: &str, mints: &[String]) -> eyre::Result<TokenPriceMap> {
        let ids = mints.join(",");
        let query_args = [("ids", ids.as_str())].into_iter().collect();

        let request_params = RequestParams {
            url: &self.base_url,
            method: Method::GET,
            body: None::<serde_json::Value>,
            query_args: Some(query_args),
            headers: None,
        };

        let response = send_http_request::<PriceResponse>(request_params).await?;
        let prices = response.extract_prices(mints);

        let mut cache = self.cache.lock().unwrap();
        cache.insert(
            key.to_string(),
            CacheEntry {
                prices: prices.clone(),
                fetched_at: Instant::now(),
            },
        );

        Ok(prices)
    }
}

fn normalize_mint_list(mints: &[String]) -> Vec<String> {
    mints
        .iter()
        .filter(|m| !m.is_empty())
        .unique()
        .sorted()
        .cloned()
        .collect()
}

/// USD value for a display amount, `None` when the price is unknown or the
/// amount is non-positive.
pub fn usd_value_for_amount(amount: &str, mint: &str, prices: &TokenPriceMap) -> Option<f64> {
    let numeric = crate::utils::format::parse_display_amount(amount);
    let price = prices.get(mint)?;

    (numeric > 0.0 && *price > 0.0).then(|| numeric * price)
}

pub fn format_usd(usd_value: Option<f64>) -> String {
    match usd_value {
        Some(v) if v.is_finite() && v > 0.0 => format!("${:.2}", v),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_dedupes_and_sorts_mints() {
        let mints = vec![
            "B".to_string(),
            "".to_string(),
            "A".to_string(),
            "B".to_string(),
        ];
        assert_eq!(normalize_mint_list(&mints), vec!["A", "B"]);
    }

    #[test]
    fn cache_entry_freshness_follows_ttl() {
        let entry = CacheEntry {
            prices: TokenPriceMap::new(),
            fetched_at: Instant::now(),
        };
        assert!(entry.is_fresh(Duration::from_secs(30)));
        assert!(!entry.is_fresh(Duration::ZERO));
    }

    #[tokio::test]
    async fn fresh_cache_entry_skips_the_network() {
        // Unroutable base URL: any attempted fetch would error out.
        let client = PriceClient::new("http://127.0.0.1:0");

        let mut prices = TokenPriceMap::new();
        prices.insert("Mint".to_string(), 1.5);
        client.seed_cache("Mint", prices.clone());

        let fetched = client
            .fetch_prices(&["Mint".to_string()], FetchPricesOptions::default())
            .await
            .unwrap();

        assert_eq!(fetched, prices);
    }

    #[test]
    fn usd_value_requires_known_positive_price() {
        let mut prices = TokenPriceMap::new();
        prices.insert("Mint".to_string(), 2.0);

        assert_eq!(usd_value_for_amount("1,234.5", "Mint", &prices), Some(2469.0));
        assert_eq!(usd_value_for_amount("0", "Mint", &prices), None);
        assert_eq!(usd_value_for_amount("10", "Other", &prices), None);
    }

    #[test]
    fn formats_usd_or_dash() {
        assert_eq!(format_usd(Some(1234.5)), "$1234.50");
        assert_eq!(format_usd(Some(0.0)), "-");
        assert_eq!(format_usd(None), "-");
    }
}
