//! # Zakat Fitrah
//!
//! Due from every person at the end of Ramadan, independent of wealth. Each
//! person owes a fixed weight of the local staple food, paid here as its
//! market value.

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ZakatConfig;
use crate::inputs::{IntoPersonCount, IntoZakatDecimal, positive_decimal};
use crate::traits::CalculateZakat;
use crate::types::{Breakdown, CalculationStep, InputField, WealthType, ZakatDetails, ZakatError, ZakatStatus};

/// Staple foods with a reference price in [`crate::config::PriceTable`].
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum StapleFood {
    #[default]
    #[strum(to_string = "rice", serialize = "beras")]
    Rice,
    #[strum(to_string = "wheat", serialize = "gandum")]
    Wheat,
}

impl StapleFood {
    /// The configured price per kilogram.
    pub fn default_price(&self, config: &ZakatConfig) -> Decimal {
        match self {
            StapleFood::Rice => config.prices.rice_per_kg,
            StapleFood::Wheat => config.prices.wheat_per_kg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitrahZakat {
    pub person_count: u64,
    pub price_per_kg: Decimal,
}

impl FitrahZakat {
    /// Validates the food price first, then the head count.
    ///
    /// A head count that is not a whole number counts as one person; zero or
    /// negative counts are rejected.
    pub fn new(person_count: impl IntoPersonCount, price_per_kg: impl IntoZakatDecimal) -> Result<Self, ZakatError> {
        let price_per_kg = positive_decimal(price_per_kg, InputField::FoodPrice)?;
        let count = person_count.into_person_count();
        let person_count = u64::try_from(count)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ZakatError::invalid(InputField::PersonCount, count))?;
        Ok(Self { person_count, price_per_kg })
    }

    /// Uses the configured price of the chosen staple food.
    pub fn for_staple(person_count: impl IntoPersonCount, food: StapleFood, config: &ZakatConfig) -> Result<Self, ZakatError> {
        Self::new(person_count, food.default_price(config))
    }
}

impl CalculateZakat for FitrahZakat {
    fn calculate_zakat(&self, config: &ZakatConfig) -> Result<ZakatDetails, ZakatError> {
        let kg_per_person = config.rates.fitrah_kg_per_person;
        let people = Decimal::from(self.person_count);

        let total_weight_kg = kg_per_person
            .checked_mul(people)
            .ok_or_else(|| ZakatError::overflow("fitrah total weight"))?;
        let zakat_due = total_weight_kg
            .checked_mul(self.price_per_kg)
            .ok_or_else(|| ZakatError::overflow("fitrah amount"))?;

        let trace = vec![
            CalculationStep::initial("People", people),
            CalculationStep::rate("Staple per person (kg)", kg_per_person),
            CalculationStep::result("Total Weight (kg)", total_weight_kg),
            CalculationStep::multiply("Price per kg", self.price_per_kg),
            CalculationStep::info("Fitrah has no Nisab - always due"),
            CalculationStep::result("Zakat Due", zakat_due),
        ];

        debug!(people = self.person_count, %total_weight_kg, %zakat_due, "fitrah zakat calculated");

        Ok(ZakatDetails {
            wealth_type: WealthType::Fitrah,
            is_obligated: true,
            zakat_due,
            status: ZakatStatus::Obligated,
            nisab_threshold: None,
            rate: kg_per_person,
            breakdown: Breakdown::Fitrah {
                person_count: self.person_count,
                total_weight_kg,
                price_per_kg: self.price_per_kg,
            },
            calculation_trace: trace,
        })
    }

    fn wealth_type(&self) -> WealthType {
        WealthType::Fitrah
    }
}

/// Calculates Zakat Fitrah for a household.
///
/// # Arguments
///
/// * `person_count` - Number of people to pay for. Non-integers count as one.
/// * `price_per_kg` - Price of the staple food per kilogram.
///
/// # Returns
///
/// `ZakatDetails` where `zakat_due` is the total monetary value.
pub fn calculate_fitrah_zakat(
    person_count: impl IntoPersonCount,
    price_per_kg: impl IntoZakatDecimal,
    config: &ZakatConfig,
) -> Result<ZakatDetails, ZakatError> {
    FitrahZakat::new(person_count, price_per_kg)?.calculate_zakat(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fitrah_basic() {
        let config = ZakatConfig::default();
        // 2.5kg * 4 people * 12,000 = 120,000
        let result = calculate_fitrah_zakat(4, 12000, &config).unwrap();

        assert!(result.is_obligated);
        assert_eq!(result.total_weight_kg(), Some(dec!(10)));
        assert_eq!(result.person_count(), Some(4));
        assert_eq!(result.zakat_due, dec!(120000));
        assert_eq!(result.nisab_threshold, None);
    }

    #[test]
    fn test_fitrah_person_count_fallback() {
        let config = ZakatConfig::default();
        let result = calculate_fitrah_zakat("banyak", 12000, &config).unwrap();
        assert_eq!(result.person_count(), Some(1));
        assert_eq!(result.zakat_due, dec!(30000));

        let result = calculate_fitrah_zakat(2.5, 12000, &config).unwrap();
        assert_eq!(result.person_count(), Some(1));
    }

    #[test]
    fn test_fitrah_rejects_invalid() {
        let config = ZakatConfig::default();

        let err = calculate_fitrah_zakat(0, 12000, &config).unwrap_err();
        assert_eq!(err.invalid_field(), Some(InputField::PersonCount));

        let err = calculate_fitrah_zakat("-3", 12000, &config).unwrap_err();
        assert_eq!(err.invalid_field(), Some(InputField::PersonCount));

        let err = calculate_fitrah_zakat(4, 0, &config).unwrap_err();
        assert_eq!(err.invalid_field(), Some(InputField::FoodPrice));

        // Price is checked before the head count.
        let err = calculate_fitrah_zakat(0, -1, &config).unwrap_err();
        assert_eq!(err.invalid_field(), Some(InputField::FoodPrice));
    }

    #[test]
    fn test_fitrah_staple_prices() {
        let config = ZakatConfig::default();
        let wheat = FitrahZakat::for_staple(2, "gandum".parse().unwrap(), &config)
            .unwrap()
            .calculate_zakat(&config)
            .unwrap();
        // 5kg * 15,000
        assert_eq!(wheat.zakat_due, dec!(75000));
        assert_eq!(StapleFood::default(), StapleFood::Rice);
        assert_eq!(StapleFood::Rice.to_string(), "rice");
    }

    #[test]
    fn test_fitrah_custom_weight() {
        let config = ZakatConfig::builder()
            .rates(crate::config::RateTable { fitrah_kg_per_person: dec!(3.5), ..Default::default() })
            .build()
            .unwrap();
        let result = calculate_fitrah_zakat(1, dec!(2), &config).unwrap();
        assert_eq!(result.zakat_due, dec!(7.0));
    }
}
