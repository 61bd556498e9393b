//! Turning command-line inputs into a validated [`PlanRequest`].
//!
//! A request comes either from a JSON payload file (the same document the
//! HTTP endpoint accepts) or from a CSV unit catalog plus the load and
//! prices given as flags.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Args;

use powerplan_lib::{FuelPrices, PlanRequest, UnitCatalog};

/// Input flags shared by `plan` and `merit`.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// JSON payload with load, fuels and powerplants.
    #[arg(long, conflicts_with = "units", required_unless_present = "units")]
    pub payload: Option<PathBuf>,

    /// CSV unit catalog (name,type,efficiency,pmin,pmax).
    #[arg(long, requires_all = ["load", "gas", "kerosine", "co2", "wind"])]
    pub units: Option<PathBuf>,

    /// Load to cover, in MW.
    #[arg(long)]
    pub load: Option<f64>,

    /// Gas price in EUR/MWh.
    #[arg(long)]
    pub gas: Option<f64>,

    /// Kerosine price in EUR/MWh.
    #[arg(long)]
    pub kerosine: Option<f64>,

    /// CO2 allowance price in EUR/ton.
    #[arg(long)]
    pub co2: Option<f64>,

    /// Wind availability in percent.
    #[arg(long)]
    pub wind: Option<f64>,
}

impl InputArgs {
    /// Build and validate the request described by these flags.
    pub fn load_request(&self) -> Result<PlanRequest> {
        let request = match (&self.payload, &self.units) {
            (Some(path), _) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read payload {}", path.display()))?;
                PlanRequest::from_json(&text)
                    .with_context(|| format!("failed to parse payload {}", path.display()))?
            }
            (None, Some(path)) => {
                let catalog = UnitCatalog::from_path(path)
                    .with_context(|| format!("failed to load unit catalog {}", path.display()))?;
                tracing::debug!(units = catalog.len(), path = %path.display(), "loaded unit catalog");
                PlanRequest {
                    load: required(self.load, "--load")?,
                    fuels: FuelPrices {
                        gas: required(self.gas, "--gas")?,
                        kerosine: required(self.kerosine, "--kerosine")?,
                        co2: required(self.co2, "--co2")?,
                        wind_percent: required(self.wind, "--wind")?,
                    },
                    units: catalog.into_units(),
                }
            }
            (None, None) => return Err(anyhow!("either --payload or --units is required")),
        };

        request.validate().context("invalid plan request")?;
        Ok(request)
    }
}

fn required(value: Option<f64>, flag: &str) -> Result<f64> {
    value.ok_or_else(|| anyhow!("{flag} is required together with --units"))
}
