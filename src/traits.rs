use crate::config::ZakatConfig;
use crate::types::{WealthType, ZakatDetails, ZakatError};

/// Trait to be implemented by all Zakat calculators.
///
/// Implementors hold already-validated inputs; `calculate_zakat` is pure and
/// returns the same result for the same input and config.
pub trait CalculateZakat {
    /// Calculate Zakat details.
    fn calculate_zakat(&self, config: &ZakatConfig) -> Result<ZakatDetails, ZakatError>;

    /// The category this calculator covers.
    fn wealth_type(&self) -> WealthType;
}
