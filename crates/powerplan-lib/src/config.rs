//! Dispatch configuration recognised by the core.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default CO2 emission intensity of gas-fired generation, in tons per MWh.
pub const DEFAULT_CO2_TONS_PER_MWH: f64 = 0.3;

/// Settings that change how merit costs are computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Include the CO2 allowance cost in the merit of gas-fired units.
    pub account_for_co2: bool,
    /// Tons of CO2 emitted per MWh generated by a gas-fired unit.
    pub co2_tons_per_mwh: f64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            account_for_co2: true,
            co2_tons_per_mwh: DEFAULT_CO2_TONS_PER_MWH,
        }
    }
}

impl DispatchConfig {
    /// Create configuration from environment variables.
    ///
    /// - `POWERPLAN_ACCOUNT_FOR_CO2`: "false" or "0" disables CO2 costs (default: true)
    /// - `POWERPLAN_CO2_TONS_PER_MWH`: emission intensity (default: 0.3)
    ///
    /// Unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let account_for_co2 = std::env::var("POWERPLAN_ACCOUNT_FOR_CO2")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        let co2_tons_per_mwh = std::env::var("POWERPLAN_CO2_TONS_PER_MWH")
            .ok()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(DEFAULT_CO2_TONS_PER_MWH);

        Self {
            account_for_co2,
            co2_tons_per_mwh,
        }
    }

    /// Return a copy with CO2 accounting switched on or off.
    pub fn with_co2(mut self, account_for_co2: bool) -> Self {
        self.account_for_co2 = account_for_co2;
        self
    }

    /// Return a copy with a different emission intensity.
    pub fn with_co2_intensity(mut self, tons_per_mwh: f64) -> Self {
        self.co2_tons_per_mwh = tons_per_mwh;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.co2_tons_per_mwh.is_finite() || self.co2_tons_per_mwh <= 0.0 {
            return Err(Error::InvalidInput {
                message: format!(
                    "co2_tons_per_mwh must be finite and positive, got {}",
                    self.co2_tons_per_mwh
                ),
            });
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}
