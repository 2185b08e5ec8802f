use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{LedgerError, Result};
use crate::types::Frequency;

/// engine configuration.
///
/// shared across every client computation and never mutated after the
/// engine is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// monthly rate applied when a disbursement carries none; its use is
    /// always recorded on the output so callers can surface a warning
    pub default_monthly_rate: Rate,
    /// cadence assumed when no disbursement names one
    pub default_frequency: Frequency,
    /// term assumed when suggesting an installment for daily collections
    pub daily_term_days: u32,
    /// term assumed when suggesting an installment for weekly collections
    pub weekly_term_weeks: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_monthly_rate: Rate::from_decimal(dec!(0.20)),
            default_frequency: Frequency::Monthly,
            daily_term_days: 30,
            weekly_term_weeks: 12,
        }
    }
}

impl EngineConfig {
    /// check the configuration is usable as a fallback source
    pub fn validate(&self) -> Result<()> {
        if self.default_monthly_rate.as_decimal().is_sign_negative() {
            return Err(LedgerError::InvalidInterestRate {
                rate: self.default_monthly_rate,
            });
        }
        Ok(())
    }
}
