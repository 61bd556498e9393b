//! Per-technology cost models implementing the Strategy pattern.
//!
//! Each [`UnitKind`] has a [`CostModel`] that knows how to price one MWh of
//! output and which output range the unit can actually deliver under the
//! current conditions. Adding a technology means adding a model here and a
//! branch in [`select_cost_model`]; the ranking code does not change.

use crate::config::DispatchConfig;
use crate::unit::{FuelPrices, Unit, UnitKind};

/// Output range a unit can deliver, in MW.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Trait for unit cost strategies.
pub trait CostModel: Send + Sync {
    /// The unit kind this model prices.
    fn kind(&self) -> UnitKind;

    /// Marginal cost of one MWh from `unit`, in euro.
    fn merit_cost(&self, unit: &Unit, fuels: &FuelPrices, config: &DispatchConfig) -> f64;

    /// Effective output range of `unit` under current conditions.
    fn effective_bounds(&self, unit: &Unit, _fuels: &FuelPrices) -> Bounds {
        Bounds::new(unit.pmin, unit.pmax)
    }
}

/// Wind farms: free to run, capacity scaled by wind availability.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindModel;

impl CostModel for WindModel {
    fn kind(&self) -> UnitKind {
        UnitKind::Wind
    }

    fn merit_cost(&self, _unit: &Unit, _fuels: &FuelPrices, _config: &DispatchConfig) -> f64 {
        0.0
    }

    /// Scale both limits by the wind percentage, rounded inward to 0.1 MW.
    ///
    /// Rounding can cross the limits of a unit with `pmin == pmax`; the
    /// minimum is then pulled down to the maximum.
    fn effective_bounds(&self, unit: &Unit, fuels: &FuelPrices) -> Bounds {
        let wind = fuels.wind_percent;
        let max = (unit.pmax * wind / 100.0 * 10.0).floor() / 10.0;
        let min = (unit.pmin * wind / 100.0 * 10.0).ceil() / 10.0;
        Bounds::new(min.min(max), max)
    }
}

/// Kerosine turbojets.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurbojetModel;

impl CostModel for TurbojetModel {
    fn kind(&self) -> UnitKind {
        UnitKind::Turbojet
    }

    fn merit_cost(&self, unit: &Unit, fuels: &FuelPrices, _config: &DispatchConfig) -> f64 {
        fuels.kerosine / unit.efficiency
    }
}

/// Gas-fired plants, optionally charged for CO2 allowances.
#[derive(Debug, Clone, Copy, Default)]
pub struct GasFiredModel;

impl CostModel for GasFiredModel {
    fn kind(&self) -> UnitKind {
        UnitKind::GasFired
    }

    fn merit_cost(&self, unit: &Unit, fuels: &FuelPrices, config: &DispatchConfig) -> f64 {
        let fuel = fuels.gas / unit.efficiency;
        if config.account_for_co2 {
            fuel + config.co2_tons_per_mwh * fuels.co2
        } else {
            fuel
        }
    }
}

/// Select the cost model for a unit kind.
pub fn select_cost_model(kind: UnitKind) -> Box<dyn CostModel> {
    match kind {
        UnitKind::Wind => Box::new(WindModel),
        UnitKind::Turbojet => Box::new(TurbojetModel),
        UnitKind::GasFired => Box::new(GasFiredModel),
    }
}
