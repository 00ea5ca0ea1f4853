//! Nisab thresholds.
//!
//! The income nisab is the monetary value of the gold nisab weight at the gold
//! price supplied with each call. It is never cached: a new price always yields
//! a new threshold.

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ZakatConfig;
use crate::inputs::IntoZakatDecimal;
use crate::types::ZakatError;

/// Thresholds derived from a config and a gold price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NisabThresholds {
    pub gold_grams: Decimal,
    /// Exposed for completeness; no calculator compares against it.
    pub silver_grams: Decimal,
    /// `gold_grams × gold_price_per_gram`.
    pub income_value: Decimal,
    /// The gold price actually used, after fallback.
    pub gold_price_per_gram: Decimal,
}

impl NisabThresholds {
    /// Computes all thresholds for the given gold price.
    ///
    /// An unusable price (unparsable, non-finite or not positive) is replaced
    /// by the configured default gold price.
    pub fn compute(config: &ZakatConfig, gold_price: impl IntoZakatDecimal) -> Result<Self, ZakatError> {
        let price = effective_gold_price(config, gold_price);
        let income_value = config
            .nisab_gold_grams
            .checked_mul(price)
            .ok_or_else(|| ZakatError::overflow("income nisab"))?;

        Ok(NisabThresholds {
            gold_grams: config.nisab_gold_grams,
            silver_grams: config.nisab_silver_grams,
            income_value,
            gold_price_per_gram: price,
        })
    }
}

/// Returns the income nisab, `nisab_gold_grams × gold_price`, falling back to
/// the configured default price when `gold_price` is unusable.
pub fn compute_income_nisab(config: &ZakatConfig, gold_price: impl IntoZakatDecimal) -> Result<Decimal, ZakatError> {
    NisabThresholds::compute(config, gold_price).map(|t| t.income_value)
}

/// Resolves the gold price used for the income nisab.
pub fn effective_gold_price(config: &ZakatConfig, gold_price: impl IntoZakatDecimal) -> Decimal {
    match gold_price.into_zakat_decimal() {
        Ok(price) if price > Decimal::ZERO => price,
        Ok(price) => {
            warn!(%price, fallback = %config.prices.gold_per_gram, "non-positive gold price, using default");
            config.prices.gold_per_gram
        }
        Err(raw) => {
            warn!(input = %raw, fallback = %config.prices.gold_per_gram, "unusable gold price, using default");
            config.prices.gold_per_gram
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_income_nisab_from_price() {
        let config = ZakatConfig::default();
        assert_eq!(compute_income_nisab(&config, dec!(1000000)).unwrap(), dec!(85000000));
        assert_eq!(compute_income_nisab(&config, 1_100_000).unwrap(), dec!(93500000));
    }

    #[test]
    fn test_invalid_price_falls_back_to_default() {
        let config = ZakatConfig::default();
        let expected = dec!(85) * config.prices.gold_per_gram;

        assert_eq!(compute_income_nisab(&config, 0).unwrap(), expected);
        assert_eq!(compute_income_nisab(&config, -10).unwrap(), expected);
        assert_eq!(compute_income_nisab(&config, "harga").unwrap(), expected);
        assert_eq!(compute_income_nisab(&config, f64::NAN).unwrap(), expected);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn test_fallback_is_logged() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let config = ZakatConfig::default();

        tracing::subscriber::with_default(subscriber, || {
            compute_income_nisab(&config, dec!(1000000)).unwrap();
        });
        assert!(!logs.contents().contains("using default"));

        let subscriber = tracing_subscriber::fmt()
            .with_writer({
                let writer = logs.clone();
                move || writer.clone()
            })
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            compute_income_nisab(&config, 0).unwrap();
            compute_income_nisab(&config, "harga").unwrap();
        });

        let out = logs.contents();
        assert!(out.contains("WARN"));
        assert!(out.contains("non-positive gold price, using default"));
        assert!(out.contains("unusable gold price, using default"));
    }

    #[test]
    fn test_thresholds_follow_config() {
        let config = ZakatConfig::builder().gold_price(500).nisab_gold(dec!(87.48)).build().unwrap();
        let thresholds = NisabThresholds::compute(&config, "").unwrap();

        assert_eq!(thresholds.gold_grams, dec!(87.48));
        assert_eq!(thresholds.silver_grams, dec!(595));
        assert_eq!(thresholds.gold_price_per_gram, dec!(500));
        assert_eq!(thresholds.income_value, dec!(43740));
    }

    #[test]
    fn test_overflow_is_reported() {
        let config = ZakatConfig::default();
        let res = compute_income_nisab(&config, Decimal::MAX);
        assert!(matches!(res, Err(ZakatError::Overflow { .. })));
    }
}
