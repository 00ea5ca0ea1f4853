//! Rupiah and weight formatting for display.
//!
//! Amounts are rounded to two decimal places with trailing zeros dropped, and
//! grouped the Indonesian way (`1.100.000,5`).

use fixed_decimal::FixedDecimal;
use icu::decimal::{FixedDecimalFormatter, options::FixedDecimalFormatterOptions};
use icu::locid::Locale;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use writeable::Writeable;

const LOCALE: &str = "id-ID";

/// Formats a number with `id-ID` grouping, falling back to plain digits if the
/// locale data is unavailable.
fn format_number(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let plain = rounded.to_string();

    let Ok(locale) = Locale::from_str(LOCALE) else {
        return plain;
    };
    let Ok(formatter) = FixedDecimalFormatter::try_new(&locale.into(), FixedDecimalFormatterOptions::default()) else {
        return plain;
    };
    let Ok(fixed) = FixedDecimal::from_str(&plain) else {
        return plain;
    };

    formatter.format(&fixed).write_to_string().into_owned()
}

/// Formats an amount as Rupiah, e.g. `Rp 2.500.000`.
pub fn format_rupiah(amount: Decimal) -> String {
    format!("Rp {}", format_number(amount))
}

/// Formats a weight in grams, e.g. `85 gram`.
pub fn format_grams(grams: Decimal) -> String {
    format!("{} gram", format_number(grams))
}

/// Formats a weight in kilograms, e.g. `2,5 kg`.
pub fn format_kg(kg: Decimal) -> String {
    format!("{} kg", format_number(kg))
}
