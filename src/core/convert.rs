//! Currency conversion over a cached rate source.

use crate::core::cache::Cache;
use crate::core::error::RateError;
use crate::core::rates::{RateSnapshot, RateSource};
use chrono::{Local, Timelike};
use tracing::{debug, warn};

/// Rounds to two decimal places, half away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts amounts between currencies using snapshots from a [`RateSource`].
///
/// Snapshots are cached per `(base currency, local hour)` bucket, so a given
/// base is fetched at most once per clock hour. Entries from past hours stay
/// in the map unreachably until the process exits; there is no eviction and
/// no rolling TTL.
pub struct RateConverter<S> {
    source: S,
    cache: Cache<String, RateSnapshot>,
    default_base: String,
}

impl<S: RateSource> RateConverter<S> {
    pub fn new(source: S, default_base: &str) -> Self {
        RateConverter {
            source,
            cache: Cache::new(),
            default_base: default_base.to_string(),
        }
    }

    fn bucket_key(base: &str) -> String {
        format!("{}_{}", base, Local::now().hour())
    }

    /// Fetches the rate snapshot for `base`, reusing the cached copy within
    /// the current clock hour. `Network` and `Parse` failures are propagated
    /// unchanged and leave the cache untouched.
    pub async fn fetch_rates(&self, base: &str) -> Result<RateSnapshot, RateError> {
        let key = Self::bucket_key(base);
        debug!("Fetching rates for {} (bucket {})", base, key);
        self.cache
            .get_or_try_insert_with(key, || self.source.fetch_latest(base))
            .await
    }

    /// Converts `amount` from one currency to another, rounded to two decimal
    /// places. Fails with [`RateError::UnsupportedCurrency`] when the target
    /// code is absent from the snapshot, including self-conversion when the
    /// provider supplies no identity rate.
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, RateError> {
        let snapshot = self.fetch_rates(from).await?;
        let rate = snapshot
            .rates
            .get(to)
            .ok_or_else(|| RateError::UnsupportedCurrency(to.to_string()))?;

        let converted = round_to_cents(amount * rate);
        debug!("Converted {} {} to {:.2} {}", amount, from, converted, to);
        Ok(converted)
    }

    /// Lists the currency codes the provider quotes against the default base.
    ///
    /// Best effort: any failure degrades to an empty list instead of
    /// propagating. Order is unspecified.
    pub async fn supported_currencies(&self) -> Vec<String> {
        match self.fetch_rates(&self.default_base).await {
            Ok(snapshot) => snapshot.rates.keys().cloned().collect(),
            Err(e) => {
                warn!("Could not fetch supported currencies: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct MockSource {
        call_count: AtomicUsize,
        rates: HashMap<String, f64>,
        fail: bool,
        delay: Option<Duration>,
    }

    impl MockSource {
        fn new(rates: &[(&str, f64)]) -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                rates: rates
                    .iter()
                    .map(|(code, rate)| (code.to_string(), *rate))
                    .collect(),
                fail: false,
                delay: None,
            }
        }

        fn failing() -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                rates: HashMap::new(),
                fail: true,
                delay: None,
            }
        }

        fn slow(mut self) -> Self {
            self.delay = Some(Duration::from_millis(50));
            self
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl<'a> RateSource for &'a MockSource {
        async fn fetch_latest(&self, base: &str) -> Result<RateSnapshot, RateError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(RateError::Network {
                    base: base.to_string(),
                    reason: "connection refused".to_string(),
                });
            }
            Ok(RateSnapshot {
                base: base.to_string(),
                date: "2024-01-01".to_string(),
                rates: self.rates.clone(),
            })
        }
    }

    fn standard_rates() -> Vec<(&'static str, f64)> {
        vec![
            ("EUR", 0.85),
            ("GBP", 0.73),
            ("JPY", 110.0),
            ("CAD", 1.25),
            ("AUD", 1.35),
            ("CHF", 0.92),
            ("CNY", 6.37),
            ("INR", 74.5),
        ]
    }

    #[tokio::test]
    async fn test_convert_basic() {
        let source = MockSource::new(&standard_rates());
        let converter = RateConverter::new(&source, "USD");

        let result = converter.convert(100.0, "USD", "EUR").await.unwrap();
        assert_eq!(result, 85.0);
    }

    #[tokio::test]
    async fn test_convert_rounds_to_two_decimals() {
        let source = MockSource::new(&standard_rates());
        let converter = RateConverter::new(&source, "USD");

        // 99.99 * 0.73 = 72.9927, rounds down to 72.99
        let result = converter.convert(99.99, "USD", "GBP").await.unwrap();
        assert_eq!(result, 72.99);
    }

    #[tokio::test]
    async fn test_convert_zero_and_large_amounts() {
        let source = MockSource::new(&standard_rates());
        let converter = RateConverter::new(&source, "USD");

        assert_eq!(converter.convert(0.0, "USD", "EUR").await.unwrap(), 0.0);
        assert_eq!(
            converter.convert(1_000_000.0, "USD", "EUR").await.unwrap(),
            850_000.0
        );
    }

    #[tokio::test]
    async fn test_convert_unsupported_currency() {
        let source = MockSource::new(&standard_rates());
        let converter = RateConverter::new(&source, "USD");

        let err = converter.convert(100.0, "USD", "INVALID").await.unwrap_err();
        assert!(matches!(err, RateError::UnsupportedCurrency(_)));
        assert!(err.to_string().contains("INVALID"));
    }

    #[tokio::test]
    async fn test_fetch_rates_cached_within_hour() {
        let source = MockSource::new(&standard_rates());
        let converter = RateConverter::new(&source, "USD");

        let first = converter.fetch_rates("USD").await.unwrap();
        assert_eq!(source.calls(), 1);

        let second = converter.fetch_rates("USD").await.unwrap();
        assert_eq!(source.calls(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_concurrent_fetches_share_one_call() {
        let source = MockSource::new(&standard_rates()).slow();
        let converter = RateConverter::new(&source, "USD");

        // All four race on the same bucket while the first fetch sleeps
        let (a, b, c, d) = tokio::join!(
            converter.fetch_rates("USD"),
            converter.fetch_rates("USD"),
            converter.fetch_rates("USD"),
            converter.convert(100.0, "USD", "EUR"),
        );

        let first = a.unwrap();
        assert_eq!(first, b.unwrap());
        assert_eq!(first, c.unwrap());
        assert_eq!(d.unwrap(), 85.0);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_rates_separate_entries_per_base() {
        let source = MockSource::new(&standard_rates());
        let converter = RateConverter::new(&source, "USD");

        converter.fetch_rates("USD").await.unwrap();
        converter.fetch_rates("EUR").await.unwrap();
        assert_eq!(source.calls(), 2);

        // Repeats stay cached
        converter.fetch_rates("USD").await.unwrap();
        converter.fetch_rates("EUR").await.unwrap();
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_fetch_rates_failure_is_not_cached() {
        let source = MockSource::failing();
        let converter = RateConverter::new(&source, "USD");

        assert!(converter.fetch_rates("USD").await.is_err());
        assert!(converter.fetch_rates("USD").await.is_err());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_convert_propagates_fetch_failure() {
        let source = MockSource::failing();
        let converter = RateConverter::new(&source, "USD");

        let err = converter.convert(100.0, "USD", "EUR").await.unwrap_err();
        assert!(matches!(err, RateError::Network { .. }));
    }

    #[tokio::test]
    async fn test_supported_currencies_lists_rate_keys() {
        let source = MockSource::new(&standard_rates());
        let converter = RateConverter::new(&source, "USD");

        let mut currencies = converter.supported_currencies().await;
        currencies.sort();
        assert_eq!(
            currencies,
            vec!["AUD", "CAD", "CHF", "CNY", "EUR", "GBP", "INR", "JPY"]
        );
    }

    #[tokio::test]
    async fn test_supported_currencies_empty_on_failure() {
        let source = MockSource::failing();
        let converter = RateConverter::new(&source, "USD");

        assert!(converter.supported_currencies().await.is_empty());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_same_currency_requires_identity_rate() {
        let source = MockSource::new(&[("USD", 1.0), ("EUR", 0.85)]);
        let converter = RateConverter::new(&source, "USD");

        // Provider quotes an identity rate, so self-conversion works
        assert_eq!(converter.convert(100.0, "USD", "USD").await.unwrap(), 100.0);

        // Without an identity entry the same call fails
        let bare = MockSource::new(&[("EUR", 0.85)]);
        let converter = RateConverter::new(&bare, "USD");
        let err = converter.convert(100.0, "USD", "USD").await.unwrap_err();
        assert!(matches!(err, RateError::UnsupportedCurrency(_)));
    }

    #[test]
    fn test_round_to_cents_half_away_from_zero() {
        assert_eq!(round_to_cents(72.9927), 72.99);
        // 0.125 is exact in binary, so the half-way case is genuine
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(-0.125), -0.13);
        assert_eq!(round_to_cents(0.0), 0.0);
    }
}
