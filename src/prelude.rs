//! Prelude module for zakat-engine
//!
//! This module re-exports commonly used structs, traits, and types to allow
//! for easier usage of the library.
//!
//! # Usage
//!
//! ```rust
//! use zakat_engine::prelude::*;
//! ```

// Core exports
pub use crate::config::{PriceTable, RateTable, ZakatConfig};
pub use crate::inputs::{IntoPersonCount, IntoZakatDecimal};
pub use crate::nisab::{NisabThresholds, compute_income_nisab};
pub use crate::traits::CalculateZakat;
pub use crate::types::{Breakdown, InputField, ValidationError, WealthType, ZakatDetails, ZakatError, ZakatStatus};

// Re-export specific calculators
pub use crate::fitrah::{FitrahZakat, StapleFood, calculate_fitrah_zakat};
pub use crate::maal::gold::{GoldZakat, calculate_gold_zakat};
pub use crate::maal::income::{IncomeZakat, calculate_income_zakat};

#[cfg(feature = "async")]
pub use crate::pricing::{FallbackPriceProvider, PriceProvider, StaticPriceProvider};
