//! # Professional Income (Zakat Penghasilan)
//!
//! Income is zakatable when it reaches the monetary value of 85 grams of gold.
//! The threshold is derived from the gold price given with the calculation;
//! an unusable price falls back to the configured default.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ZakatConfig;
use crate::inputs::{IntoZakatDecimal, positive_decimal};
use crate::nisab::NisabThresholds;
use crate::traits::CalculateZakat;
use crate::types::{Breakdown, CalculationStep, InputField, WealthType, ZakatDetails, ZakatError, ZakatStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeZakat {
    pub income_amount: Decimal,
    /// Gold price used for the nisab. `None` uses the configured price.
    pub gold_price_per_gram: Option<Decimal>,
}

impl IncomeZakat {
    /// Validates the income amount, which must be a finite number above zero.
    pub fn new(income_amount: impl IntoZakatDecimal) -> Result<Self, ZakatError> {
        Ok(Self {
            income_amount: positive_decimal(income_amount, InputField::IncomeAmount)?,
            gold_price_per_gram: None,
        })
    }

    /// Sets the gold price for the nisab. Unusable prices are ignored here and
    /// replaced with the configured default when calculating.
    pub fn gold_price(mut self, price: impl IntoZakatDecimal) -> Self {
        self.gold_price_per_gram = match price.into_zakat_decimal() {
            Ok(p) => Some(p),
            Err(raw) => {
                warn!(input = %raw, "unusable gold price, nisab will use the configured price");
                None
            }
        };
        self
    }
}

impl CalculateZakat for IncomeZakat {
    fn calculate_zakat(&self, config: &ZakatConfig) -> Result<ZakatDetails, ZakatError> {
        let gold_price = self.gold_price_per_gram.unwrap_or(config.prices.gold_per_gram);
        let nisab = NisabThresholds::compute(config, gold_price)?;
        let rate = config.rates.income;

        let mut trace = vec![
            CalculationStep::initial("Income", self.income_amount),
            CalculationStep::initial("Gold Price per gram", nisab.gold_price_per_gram),
            CalculationStep::multiply("Gold Nisab (grams)", nisab.gold_grams),
            CalculationStep::compare("Nisab Threshold", nisab.income_value),
        ];

        let is_obligated = self.income_amount >= nisab.income_value;
        let zakat_due = if is_obligated {
            trace.push(CalculationStep::rate("Applied Rate", rate));
            self.income_amount
                .checked_mul(rate)
                .ok_or_else(|| ZakatError::overflow("income zakat"))?
        } else {
            trace.push(CalculationStep::info("Income below Nisab - No Zakat Due"));
            Decimal::ZERO
        };
        trace.push(CalculationStep::result("Zakat Due", zakat_due));

        debug!(income = %self.income_amount, nisab = %nisab.income_value, is_obligated, %zakat_due, "income zakat calculated");

        Ok(ZakatDetails {
            wealth_type: WealthType::Income,
            is_obligated,
            zakat_due,
            status: ZakatStatus::from_obligation(is_obligated),
            nisab_threshold: Some(nisab.income_value),
            rate,
            breakdown: Breakdown::Income {
                income_amount: self.income_amount,
                gold_price_per_gram: nisab.gold_price_per_gram,
            },
            calculation_trace: trace,
        })
    }

    fn wealth_type(&self) -> WealthType {
        WealthType::Income
    }
}

/// Calculates Zakat on income against the nisab at `gold_price_per_gram`.
///
/// Fails with an "invalid income amount" validation error when the income is
/// not a finite number above zero. The gold price never fails: an unusable
/// price is replaced by `config.prices.gold_per_gram`.
pub fn calculate_income_zakat(
    income_amount: impl IntoZakatDecimal,
    gold_price_per_gram: impl IntoZakatDecimal,
    config: &ZakatConfig,
) -> Result<ZakatDetails, ZakatError> {
    IncomeZakat::new(income_amount)?
        .gold_price(gold_price_per_gram)
        .calculate_zakat(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_income_above_nisab() {
        let config = ZakatConfig::default();
        // Nisab 85 * 1,000,000 = 85,000,000.
        let res = calculate_income_zakat(dec!(100000000), dec!(1000000), &config).unwrap();

        assert!(res.is_obligated);
        assert_eq!(res.zakat_due, dec!(2500000));
        assert_eq!(res.nisab_threshold, Some(dec!(85000000)));
        assert_eq!(res.status_label(), "Wajib Zakat");
    }

    #[test]
    fn test_income_exactly_at_nisab() {
        let config = ZakatConfig::default();
        let res = calculate_income_zakat(dec!(85000000), dec!(1000000), &config).unwrap();

        assert!(res.is_obligated);
        assert_eq!(res.zakat_due, dec!(2125000));
    }

    #[test]
    fn test_income_below_nisab() {
        let config = ZakatConfig::default();
        let res = calculate_income_zakat(dec!(84999999.99), dec!(1000000), &config).unwrap();

        assert!(!res.is_obligated);
        assert_eq!(res.zakat_due, Decimal::ZERO);
        assert_eq!(res.status, ZakatStatus::NotObligated);
    }

    #[test]
    fn test_income_rejects_non_positive() {
        let config = ZakatConfig::default();
        for income in ["-5", "0", "", "gaji"] {
            let err = calculate_income_zakat(income, 1_100_000, &config).unwrap_err();
            assert_eq!(err.invalid_field(), Some(InputField::IncomeAmount));
        }
        let err = calculate_income_zakat(f64::INFINITY, 1_100_000, &config).unwrap_err();
        assert_eq!(err.invalid_field(), Some(InputField::IncomeAmount));
    }

    #[test]
    fn test_invalid_gold_price_uses_default() {
        let config = ZakatConfig::default();
        // Default nisab 85 * 1,100,000 = 93,500,000.
        let res = calculate_income_zakat(dec!(90000000), "", &config).unwrap();
        assert!(!res.is_obligated);
        assert_eq!(res.nisab_threshold, Some(dec!(93500000)));

        let res = calculate_income_zakat(dec!(90000000), -1, &config).unwrap();
        assert_eq!(res.nisab_threshold, Some(dec!(93500000)));
    }

    #[test]
    fn test_nisab_tracks_price_per_call() {
        let config = ZakatConfig::default();
        let income = IncomeZakat::new(dec!(90000000)).unwrap();

        let cheap = income.clone().gold_price(1_000_000).calculate_zakat(&config).unwrap();
        let dear = income.gold_price(1_200_000).calculate_zakat(&config).unwrap();

        assert!(cheap.is_obligated);
        assert!(!dear.is_obligated);
    }

    #[test]
    fn test_alternate_rate_table() {
        let config = ZakatConfig::builder()
            .rates(crate::config::RateTable { income: dec!(0.05), ..Default::default() })
            .build()
            .unwrap();
        let res = calculate_income_zakat(dec!(100000000), dec!(1000000), &config).unwrap();
        assert_eq!(res.zakat_due, dec!(5000000));
    }
}
