//! Pricing module for Zakat calculations.
//!
//! This module provides abstractions for obtaining current market prices of gold
//! and staple foods. The `PriceProvider` trait is async so that callers can plug
//! in any source; the crate itself ships only offline providers.

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::PriceTable;
use crate::types::ZakatError;

/// Trait for fetching current market prices.
///
/// Implementors can fetch prices from various sources:
/// - Static values for testing
/// - User-provided prices
/// - Databases or remote services supplied by the caller
#[async_trait::async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetches current prices.
    ///
    /// Returns `Err(ZakatError)` if prices cannot be fetched.
    async fn get_prices(&self) -> Result<PriceTable, ZakatError>;
}

/// A static price provider for testing and development.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceProvider {
    prices: PriceTable,
}

impl StaticPriceProvider {
    /// Creates a provider that always returns `prices`.
    pub fn new(prices: PriceTable) -> Self {
        Self { prices }
    }
}

#[async_trait::async_trait]
impl PriceProvider for StaticPriceProvider {
    async fn get_prices(&self) -> Result<PriceTable, ZakatError> {
        Ok(self.prices)
    }
}

/// A decorator that never fails: when the inner provider errors, its whole
/// table is replaced by `fallback`; when it returns a non-positive price, only
/// that price is replaced.
#[derive(Debug, Clone)]
pub struct FallbackPriceProvider<P> {
    inner: P,
    fallback: PriceTable,
}

impl<P> FallbackPriceProvider<P> {
    pub fn new(inner: P, fallback: PriceTable) -> Self {
        Self { inner, fallback }
    }
}

fn or_fallback(price: Decimal, fallback: Decimal, name: &str) -> Decimal {
    if price > Decimal::ZERO {
        price
    } else {
        warn!(%price, %fallback, "{} from provider is not positive, using fallback", name);
        fallback
    }
}

#[async_trait::async_trait]
impl<P: PriceProvider> PriceProvider for FallbackPriceProvider<P> {
    async fn get_prices(&self) -> Result<PriceTable, ZakatError> {
        match self.inner.get_prices().await {
            Ok(prices) => Ok(PriceTable {
                gold_per_gram: or_fallback(prices.gold_per_gram, self.fallback.gold_per_gram, "gold price"),
                rice_per_kg: or_fallback(prices.rice_per_kg, self.fallback.rice_per_kg, "rice price"),
                wheat_per_kg: or_fallback(prices.wheat_per_kg, self.fallback.wheat_per_kg, "wheat price"),
            }),
            Err(e) => {
                warn!("Price provider failed: {}; using fallback prices", e);
                Ok(self.fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct FailingProvider;

    #[async_trait::async_trait]
    impl PriceProvider for FailingProvider {
        async fn get_prices(&self) -> Result<PriceTable, ZakatError> {
            Err(ZakatError::PriceProvider("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_static_provider() {
        let prices = PriceTable::new(1_000_000, 13_000, 16_000).unwrap();
        let provider = StaticPriceProvider::new(prices);
        assert_eq!(provider.get_prices().await.unwrap().rice_per_kg, dec!(13000));
    }

    #[tokio::test]
    async fn test_fallback_on_error() {
        let provider = FallbackPriceProvider::new(FailingProvider, PriceTable::default());
        assert_eq!(provider.get_prices().await.unwrap(), PriceTable::default());
    }

    #[tokio::test]
    async fn test_fallback_per_field() {
        let partial = PriceTable {
            gold_per_gram: dec!(1200000),
            rice_per_kg: Decimal::ZERO,
            wheat_per_kg: dec!(-1),
        };
        let provider = FallbackPriceProvider::new(StaticPriceProvider::new(partial), PriceTable::default());
        let prices = provider.get_prices().await.unwrap();

        assert_eq!(prices.gold_per_gram, dec!(1200000));
        assert_eq!(prices.rice_per_kg, dec!(12000));
        assert_eq!(prices.wheat_per_kg, dec!(15000));
    }
}
