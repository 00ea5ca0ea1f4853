use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::format::{format_grams, format_kg, format_rupiah};

/// The kind of operation a [`CalculationStep`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Initial,
    Multiply,
    Compare,
    Rate,
    Result,
    Info,
}

/// Represents a single step in the Zakat calculation process.
///
/// The trace makes every figure in a [`ZakatDetails`] reproducible by hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct CalculationStep {
    /// Human-readable description of what this step does.
    pub description: String,
    /// The value at this step (if applicable).
    pub amount: Option<Decimal>,
    pub operation: Operation,
}

impl CalculationStep {
    fn with_amount(description: impl Into<String>, amount: Decimal, operation: Operation) -> Self {
        Self {
            description: description.into(),
            amount: Some(amount),
            operation,
        }
    }

    pub fn initial(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with_amount(description, amount, Operation::Initial)
    }

    pub fn multiply(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with_amount(description, amount, Operation::Multiply)
    }

    pub fn compare(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with_amount(description, amount, Operation::Compare)
    }

    pub fn rate(description: impl Into<String>, rate: Decimal) -> Self {
        Self::with_amount(description, rate, Operation::Rate)
    }

    pub fn result(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with_amount(description, amount, Operation::Result)
    }

    pub fn info(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            amount: None,
            operation: Operation::Info,
        }
    }
}

/// Helper enum to categorize wealth types
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum WealthType {
    /// Professional income (Zakat Penghasilan).
    #[strum(to_string = "income", serialize = "penghasilan")]
    Income,
    /// Gold holdings (Zakat Emas).
    #[strum(to_string = "gold", serialize = "emas")]
    Gold,
    /// End-of-fast food alms (Zakat Fitrah).
    #[strum(to_string = "fitrah")]
    Fitrah,
}

/// Whether the payment is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ZakatStatus {
    Obligated,
    NotObligated,
}

impl ZakatStatus {
    pub fn from_obligation(is_obligated: bool) -> Self {
        if is_obligated {
            ZakatStatus::Obligated
        } else {
            ZakatStatus::NotObligated
        }
    }

    /// Label shown to the payer.
    pub fn label(&self) -> &'static str {
        match self {
            ZakatStatus::Obligated => "Wajib Zakat",
            ZakatStatus::NotObligated => "Tidak Wajib Zakat",
        }
    }

    /// Short machine-friendly code, usable as a CSS class by front ends.
    pub fn code(&self) -> &'static str {
        match self {
            ZakatStatus::Obligated => "wajib",
            ZakatStatus::NotObligated => "tidak-wajib",
        }
    }
}

impl std::fmt::Display for ZakatStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Category-specific figures that accompany a result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Breakdown {
    Income {
        income_amount: Decimal,
        /// Gold price the income nisab was derived from (after fallback).
        gold_price_per_gram: Decimal,
    },
    Gold {
        weight_grams: Decimal,
        price_per_gram: Decimal,
        /// Reported even when the holding is below nisab.
        total_value: Decimal,
    },
    Fitrah {
        person_count: u64,
        total_weight_kg: Decimal,
        price_per_kg: Decimal,
    },
}

/// The outcome of a single Zakat calculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ZakatDetails {
    /// The type of wealth this calculation is for.
    pub wealth_type: WealthType,
    /// Whether Zakat is due for the given input.
    pub is_obligated: bool,
    /// The final Zakat amount due, in currency units. Never rounded.
    pub zakat_due: Decimal,
    pub status: ZakatStatus,
    /// Threshold the base quantity was compared against. Money for income,
    /// grams for gold, absent for fitrah.
    pub nisab_threshold: Option<Decimal>,
    /// Rate applied to the base. Kilograms per person for fitrah.
    pub rate: Decimal,
    pub breakdown: Breakdown,
    /// Step-by-step trace of how this calculation was derived.
    pub calculation_trace: Vec<CalculationStep>,
}

impl ZakatDetails {
    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    /// Total value of the holding, for gold results.
    pub fn total_value(&self) -> Option<Decimal> {
        match self.breakdown {
            Breakdown::Gold { total_value, .. } => Some(total_value),
            _ => None,
        }
    }

    /// Total staple food weight, for fitrah results.
    pub fn total_weight_kg(&self) -> Option<Decimal> {
        match self.breakdown {
            Breakdown::Fitrah { total_weight_kg, .. } => Some(total_weight_kg),
            _ => None,
        }
    }

    /// Person count, for fitrah results.
    pub fn person_count(&self) -> Option<u64> {
        match self.breakdown {
            Breakdown::Fitrah { person_count, .. } => Some(person_count),
            _ => None,
        }
    }

    /// Returns the Zakat due formatted as Rupiah.
    pub fn format_amount(&self) -> String {
        format_rupiah(self.zakat_due)
    }

    /// Returns a concise status string.
    /// Format: "{Type}: {Status} - Due: {Amount}"
    pub fn summary(&self) -> String {
        format!("{}: {} - Due: {}", self.wealth_type, self.status_label(), self.format_amount())
    }

    /// Generates a human-readable explanation of the calculation, one line per
    /// trace step.
    pub fn explain(&self) -> String {
        use std::fmt::Write;
        let mut output = String::new();

        let _ = writeln!(output, "Explanation for {} zakat:", self.wealth_type);
        let _ = writeln!(output, "{:-<50}", "");

        let width = self
            .calculation_trace
            .iter()
            .map(|step| step.description.len())
            .max()
            .unwrap_or(20)
            .max(20);

        for step in &self.calculation_trace {
            let symbol = match step.operation {
                Operation::Initial | Operation::Info => " ",
                Operation::Multiply | Operation::Rate => "x",
                Operation::Compare => "?",
                Operation::Result => "=",
            };

            match (step.operation, step.amount) {
                (Operation::Info, _) | (_, None) => {
                    let _ = writeln!(output, "  INFO: {}", step.description);
                }
                (_, Some(amount)) => {
                    let _ = writeln!(
                        output,
                        "  {:<width$} : {} {:>16}",
                        step.description,
                        symbol,
                        amount.normalize(),
                        width = width
                    );
                }
            }
        }

        let _ = writeln!(output, "{:-<50}", "");
        let _ = writeln!(output, "Status: {}", self.status_label());
        match &self.breakdown {
            Breakdown::Gold { total_value, .. } => {
                let _ = writeln!(output, "Total Value: {}", format_rupiah(*total_value));
            }
            Breakdown::Fitrah { person_count, total_weight_kg, .. } => {
                let _ = writeln!(output, "People: {} jiwa", person_count);
                let _ = writeln!(output, "Total Weight: {}", format_kg(*total_weight_kg));
            }
            Breakdown::Income { .. } => {}
        }
        let _ = writeln!(output, "Amount Due: {}", self.format_amount());

        output
    }
}

impl std::fmt::Display for ZakatDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Zakat {}", self.wealth_type)?;
        match (self.wealth_type, self.nisab_threshold) {
            (WealthType::Gold, Some(grams)) => writeln!(f, "Nisab: {}", format_grams(grams))?,
            (_, Some(value)) => writeln!(f, "Nisab: {}", format_rupiah(value))?,
            (_, None) => {}
        }
        write!(f, "Status: {} ({} due)", self.status_label(), self.format_amount())
    }
}

/// Identifies the input field a [`ValidationError`] refers to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    #[strum(to_string = "income amount")]
    IncomeAmount,
    #[strum(to_string = "gold weight")]
    GoldWeight,
    #[strum(to_string = "gold price")]
    GoldPrice,
    #[strum(to_string = "food price")]
    FoodPrice,
    #[strum(to_string = "person count")]
    PersonCount,
}

/// A rejected user input. The field tells the caller which control to focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("invalid {field}: {value}")]
pub struct ValidationError {
    pub field: InputField,
    /// The offending input, rendered for diagnostics.
    pub value: String,
}

impl ValidationError {
    pub fn new(field: InputField, value: impl ToString) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }

    /// The kind string, e.g. "invalid income amount".
    pub fn kind(&self) -> String {
        format!("invalid {}", self.field)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum ZakatError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Configuration Error: {0}")]
    Configuration(String),
    #[error("Arithmetic Overflow: operation '{operation}' failed")]
    Overflow { operation: String },
    #[error("Price Provider Error: {0}")]
    PriceProvider(String),
}

impl ZakatError {
    pub(crate) fn invalid(field: InputField, value: impl ToString) -> Self {
        ZakatError::Validation(ValidationError::new(field, value))
    }

    pub(crate) fn overflow(operation: impl Into<String>) -> Self {
        ZakatError::Overflow {
            operation: operation.into(),
        }
    }

    /// The field that failed validation, if this is a validation error.
    pub fn invalid_field(&self) -> Option<InputField> {
        match self {
            ZakatError::Validation(err) => Some(err.field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validation_error_kind() {
        let err = ZakatError::invalid(InputField::IncomeAmount, "-5");
        assert_eq!(err.invalid_field(), Some(InputField::IncomeAmount));
        assert_eq!(err.to_string(), "invalid income amount: -5");

        if let ZakatError::Validation(inner) = err {
            assert_eq!(inner.kind(), "invalid income amount");
        } else {
            panic!("Expected validation error");
        }
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ZakatStatus::from_obligation(true).label(), "Wajib Zakat");
        assert_eq!(ZakatStatus::from_obligation(false).code(), "tidak-wajib");
    }

    #[test]
    fn test_wealth_type_parsing() {
        assert_eq!("emas".parse::<WealthType>().unwrap(), WealthType::Gold);
        assert_eq!("Income".parse::<WealthType>().unwrap(), WealthType::Income);
        assert!("silver".parse::<WealthType>().is_err());
    }

    #[test]
    fn test_trace_serialization() {
        let trace = vec![
            CalculationStep::initial("Gold Weight", dec!(100)),
            CalculationStep::rate("Applied Rate", dec!(0.025)),
        ];
        let json = serde_json::to_string(&trace).unwrap();
        assert!(json.contains(r#""operation":"initial""#));
        assert!(json.contains(r#""operation":"rate""#));
        assert!(json.contains(r#""amount":"100""#));
    }
}
