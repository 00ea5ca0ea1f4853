//! # Gold (Zakat Emas)
//!
//! Gold is zakatable when its weight reaches 85 grams. The test is on weight,
//! not value, so the price only affects the amount due.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ZakatConfig;
use crate::inputs::{IntoZakatDecimal, positive_decimal};
use crate::traits::CalculateZakat;
use crate::types::{Breakdown, CalculationStep, InputField, WealthType, ZakatDetails, ZakatError, ZakatStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldZakat {
    pub weight_grams: Decimal,
    pub price_per_gram: Decimal,
}

impl GoldZakat {
    /// Validates weight, then price. Each failure names its own field.
    pub fn new(weight_grams: impl IntoZakatDecimal, price_per_gram: impl IntoZakatDecimal) -> Result<Self, ZakatError> {
        let weight_grams = positive_decimal(weight_grams, InputField::GoldWeight)?;
        let price_per_gram = positive_decimal(price_per_gram, InputField::GoldPrice)?;
        Ok(Self { weight_grams, price_per_gram })
    }
}

impl CalculateZakat for GoldZakat {
    fn calculate_zakat(&self, config: &ZakatConfig) -> Result<ZakatDetails, ZakatError> {
        let rate = config.rates.gold;
        let nisab_grams = config.nisab_gold_grams;

        let total_value = self
            .weight_grams
            .checked_mul(self.price_per_gram)
            .ok_or_else(|| ZakatError::overflow("gold total value"))?;

        let mut trace = vec![
            CalculationStep::initial("Weight (grams)", self.weight_grams),
            CalculationStep::multiply("Price per gram", self.price_per_gram),
            CalculationStep::result("Total Value", total_value),
            CalculationStep::compare("Nisab (grams)", nisab_grams),
        ];

        let is_obligated = self.weight_grams >= nisab_grams;
        let zakat_due = if is_obligated {
            trace.push(CalculationStep::rate("Applied Rate", rate));
            total_value
                .checked_mul(rate)
                .ok_or_else(|| ZakatError::overflow("gold zakat"))?
        } else {
            trace.push(CalculationStep::info("Weight below Nisab - No Zakat Due"));
            Decimal::ZERO
        };
        trace.push(CalculationStep::result("Zakat Due", zakat_due));

        debug!(weight = %self.weight_grams, %total_value, is_obligated, %zakat_due, "gold zakat calculated");

        Ok(ZakatDetails {
            wealth_type: WealthType::Gold,
            is_obligated,
            zakat_due,
            status: ZakatStatus::from_obligation(is_obligated),
            nisab_threshold: Some(nisab_grams),
            rate,
            breakdown: Breakdown::Gold {
                weight_grams: self.weight_grams,
                price_per_gram: self.price_per_gram,
                total_value,
            },
            calculation_trace: trace,
        })
    }

    fn wealth_type(&self) -> WealthType {
        WealthType::Gold
    }
}

/// Calculates Zakat on a gold holding.
///
/// Unlike the income nisab, an invalid price here is an error ("invalid gold
/// price"), since it determines the amount owed.
pub fn calculate_gold_zakat(
    weight_grams: impl IntoZakatDecimal,
    price_per_gram: impl IntoZakatDecimal,
    config: &ZakatConfig,
) -> Result<ZakatDetails, ZakatError> {
    GoldZakat::new(weight_grams, price_per_gram)?.calculate_zakat(config)
}
