use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

use crate::inputs::IntoZakatDecimal;
use crate::types::ZakatError;

/// Rate for professional income (2.5%).
pub const INCOME_RATE: Decimal = dec!(0.025);
/// Rate for gold holdings (2.5%).
pub const GOLD_RATE: Decimal = dec!(0.025);
/// Staple food owed per person for Zakat Fitrah, in kilograms.
pub const FITRAH_KG_PER_PERSON: Decimal = dec!(2.5);

/// Nisab for gold, in grams.
pub const GOLD_NISAB_GRAMS: Decimal = dec!(85);
/// Nisab for silver, in grams. No calculator uses it yet.
pub const SILVER_NISAB_GRAMS: Decimal = dec!(595);

/// Reference market prices in Rupiah.
pub const DEFAULT_GOLD_PRICE_PER_GRAM: Decimal = dec!(1100000);
pub const DEFAULT_RICE_PRICE_PER_KG: Decimal = dec!(12000);
pub const DEFAULT_WHEAT_PRICE_PER_KG: Decimal = dec!(15000);

/// Rates applied by each calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RateTable {
    pub income: Decimal,
    pub gold: Decimal,
    /// Kilograms of staple food per person.
    pub fitrah_kg_per_person: Decimal,
}

impl Default for RateTable {
    fn default() -> Self {
        RateTable {
            income: INCOME_RATE,
            gold: GOLD_RATE,
            fitrah_kg_per_person: FITRAH_KG_PER_PERSON,
        }
    }
}

/// Current market prices, per gram of gold and per kilogram of staple food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PriceTable {
    pub gold_per_gram: Decimal,
    pub rice_per_kg: Decimal,
    pub wheat_per_kg: Decimal,
}

impl Default for PriceTable {
    fn default() -> Self {
        PriceTable {
            gold_per_gram: DEFAULT_GOLD_PRICE_PER_GRAM,
            rice_per_kg: DEFAULT_RICE_PRICE_PER_KG,
            wheat_per_kg: DEFAULT_WHEAT_PRICE_PER_KG,
        }
    }
}

impl PriceTable {
    /// Creates a price table, rejecting non-positive prices.
    pub fn new(
        gold_per_gram: impl IntoZakatDecimal,
        rice_per_kg: impl IntoZakatDecimal,
        wheat_per_kg: impl IntoZakatDecimal,
    ) -> Result<Self, ZakatError> {
        let prices = PriceTable {
            gold_per_gram: config_decimal(gold_per_gram, "gold price")?,
            rice_per_kg: config_decimal(rice_per_kg, "rice price")?,
            wheat_per_kg: config_decimal(wheat_per_kg, "wheat price")?,
        };
        prices.validate()?;
        Ok(prices)
    }

    pub fn validate(&self) -> Result<(), ZakatError> {
        require_positive(self.gold_per_gram, "Gold price")?;
        require_positive(self.rice_per_kg, "Rice price")?;
        require_positive(self.wheat_per_kg, "Wheat price")?;
        Ok(())
    }
}

/// Configuration passed explicitly to every calculation.
///
/// `ZakatConfig::default()` carries the conventional rates and nisab weights
/// together with the reference prices. Nothing in the engine reads global
/// state; tests and callers substitute alternate tables by building their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ZakatConfig {
    pub rates: RateTable,
    pub prices: PriceTable,
    /// Default 85g
    pub nisab_gold_grams: Decimal,
    /// Default 595g
    pub nisab_silver_grams: Decimal,
}

impl Default for ZakatConfig {
    fn default() -> Self {
        ZakatConfig {
            rates: RateTable::default(),
            prices: PriceTable::default(),
            nisab_gold_grams: GOLD_NISAB_GRAMS,
            nisab_silver_grams: SILVER_NISAB_GRAMS,
        }
    }
}

// Ensure the caller can easily create a config
impl std::str::FromStr for ZakatConfig {
    type Err = ZakatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: ZakatConfig = serde_json::from_str(s)
            .map_err(|e| ZakatError::Configuration(format!("Failed to parse config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

impl ZakatConfig {
    pub fn builder() -> ZakatConfigBuilder {
        ZakatConfigBuilder::default()
    }

    /// Validates the configuration for logical consistency and safety.
    pub fn validate(&self) -> Result<(), ZakatError> {
        let one = Decimal::ONE;
        if self.rates.income <= Decimal::ZERO || self.rates.income > one {
            return Err(ZakatError::Configuration("Income rate must be within (0, 1]".to_string()));
        }
        if self.rates.gold <= Decimal::ZERO || self.rates.gold > one {
            return Err(ZakatError::Configuration("Gold rate must be within (0, 1]".to_string()));
        }
        require_positive(self.rates.fitrah_kg_per_person, "Fitrah weight per person")?;
        require_positive(self.nisab_gold_grams, "Gold nisab")?;
        require_positive(self.nisab_silver_grams, "Silver nisab")?;
        self.prices.validate()
    }

    /// Builds a configuration from the defaults, overriding prices with the
    /// `ZAKAT_GOLD_PRICE`, `ZAKAT_RICE_PRICE` and `ZAKAT_WHEAT_PRICE`
    /// environment variables when they are set.
    pub fn from_env() -> Result<Self, ZakatError> {
        Self::builder().env_prices().build()
    }

    /// Attempts to load configuration from a JSON file. Missing fields keep
    /// their defaults.
    pub fn try_from_json(path: &str) -> Result<Self, ZakatError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ZakatError::Configuration(format!("Failed to read config file: {}", e)))?;
        content.parse()
    }

    /// Returns a copy with its price table replaced.
    pub fn with_prices(mut self, prices: PriceTable) -> Self {
        self.prices = prices;
        self
    }

    /// Creates a config from a price provider, keeping default rates.
    #[cfg(feature = "async")]
    pub async fn from_provider<P: crate::pricing::PriceProvider + ?Sized>(
        provider: &P,
    ) -> Result<Self, ZakatError> {
        let mut config = Self::default();
        config.refresh_prices(provider).await?;
        Ok(config)
    }

    /// Refreshes the prices in this configuration using the given provider.
    #[cfg(feature = "async")]
    pub async fn refresh_prices<P: crate::pricing::PriceProvider + ?Sized>(
        &mut self,
        provider: &P,
    ) -> Result<(), ZakatError> {
        let prices = provider.get_prices().await?;
        prices.validate()?;
        tracing::debug!(gold = %prices.gold_per_gram, rice = %prices.rice_per_kg, wheat = %prices.wheat_per_kg, "refreshed prices");
        self.prices = prices;
        Ok(())
    }
}

fn require_positive(value: Decimal, what: &str) -> Result<(), ZakatError> {
    if value <= Decimal::ZERO {
        return Err(ZakatError::Configuration(format!("{} must be > 0", what)));
    }
    Ok(())
}

fn config_decimal(value: impl IntoZakatDecimal, what: &str) -> Result<Decimal, ZakatError> {
    value
        .into_zakat_decimal()
        .map_err(|raw| ZakatError::Configuration(format!("Invalid {} format: {}", what, raw)))
}

fn env_decimal(name: &str) -> Result<Option<Decimal>, ZakatError> {
    match env::var(name) {
        Ok(raw) => config_decimal(raw, name).map(Some),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ZakatError::Configuration(format!("{} is not readable: {}", name, e))),
    }
}

// ========== ZakatConfigBuilder ==========

#[derive(Debug, Default)]
pub struct ZakatConfigBuilder {
    gold_price: Option<Decimal>,
    rice_price: Option<Decimal>,
    wheat_price: Option<Decimal>,
    rates: Option<RateTable>,
    nisab_gold: Option<Decimal>,
    nisab_silver: Option<Decimal>,
    // First conversion failure, reported by build().
    error: Option<ZakatError>,
}

impl ZakatConfigBuilder {
    fn set(&mut self, value: impl IntoZakatDecimal, what: &str) -> Option<Decimal> {
        match config_decimal(value, what) {
            Ok(v) => Some(v),
            Err(e) => {
                self.error.get_or_insert(e);
                None
            }
        }
    }

    pub fn gold_price(mut self, price: impl IntoZakatDecimal) -> Self {
        self.gold_price = self.set(price, "gold price");
        self
    }

    pub fn rice_price(mut self, price: impl IntoZakatDecimal) -> Self {
        self.rice_price = self.set(price, "rice price");
        self
    }

    pub fn wheat_price(mut self, price: impl IntoZakatDecimal) -> Self {
        self.wheat_price = self.set(price, "wheat price");
        self
    }

    pub fn prices(mut self, prices: PriceTable) -> Self {
        self.gold_price = Some(prices.gold_per_gram);
        self.rice_price = Some(prices.rice_per_kg);
        self.wheat_price = Some(prices.wheat_per_kg);
        self
    }

    /// Overrides any prices set so far with the `ZAKAT_*_PRICE` environment
    /// variables that are present.
    pub fn env_prices(mut self) -> Self {
        for (name, slot) in [
            ("ZAKAT_GOLD_PRICE", &mut self.gold_price),
            ("ZAKAT_RICE_PRICE", &mut self.rice_price),
            ("ZAKAT_WHEAT_PRICE", &mut self.wheat_price),
        ] {
            match env_decimal(name) {
                Ok(Some(price)) => *slot = Some(price),
                Ok(None) => {}
                Err(e) => {
                    self.error.get_or_insert(e);
                }
            }
        }
        self
    }

    pub fn rates(mut self, rates: RateTable) -> Self {
        self.rates = Some(rates);
        self
    }

    pub fn nisab_gold(mut self, grams: impl IntoZakatDecimal) -> Self {
        self.nisab_gold = self.set(grams, "gold nisab");
        self
    }

    pub fn nisab_silver(mut self, grams: impl IntoZakatDecimal) -> Self {
        self.nisab_silver = self.set(grams, "silver nisab");
        self
    }

    pub fn build(self) -> Result<ZakatConfig, ZakatError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let defaults = PriceTable::default();
        let config = ZakatConfig {
            rates: self.rates.unwrap_or_default(),
            prices: PriceTable {
                gold_per_gram: self.gold_price.unwrap_or(defaults.gold_per_gram),
                rice_per_kg: self.rice_price.unwrap_or(defaults.rice_per_kg),
                wheat_per_kg: self.wheat_price.unwrap_or(defaults.wheat_per_kg),
            },
            nisab_gold_grams: self.nisab_gold.unwrap_or(GOLD_NISAB_GRAMS),
            nisab_silver_grams: self.nisab_silver.unwrap_or(SILVER_NISAB_GRAMS),
        };

        config.validate()?;
        Ok(config)
    }
}
