//! # zakat-engine
//!
//! Zakat calculations for professional income, gold holdings and Zakat Fitrah.
//!
//! Every calculation takes an explicit [`ZakatConfig`] and returns a
//! [`ZakatDetails`], or a [`ZakatError`] naming the rejected input.
//!
//! ```rust
//! use zakat_engine::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let config = ZakatConfig::default();
//! let gold = calculate_gold_zakat(100, 1_000_000, &config).unwrap();
//! assert!(gold.is_obligated);
//! assert_eq!(gold.zakat_due, dec!(2500000));
//! ```

pub mod config;
pub mod fitrah;
pub mod format;
pub mod inputs;
pub mod maal;
pub mod nisab;
pub mod prelude;
#[cfg(feature = "async")]
pub mod pricing;
pub mod traits;
pub mod types;

pub use config::{PriceTable, RateTable, ZakatConfig};
pub use traits::CalculateZakat;
pub use types::{InputField, ValidationError, WealthType, ZakatDetails, ZakatError};
