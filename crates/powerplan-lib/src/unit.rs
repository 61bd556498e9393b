//! Generating units, fuel prices, and the production plan request.
//!
//! Field names on the wire follow the canonical payload format, e.g.
//! `"gas(euro/MWh)"` for the gas price and `"type": "windturbine"` for the
//! unit kind.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Closed set of supported unit technologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Wind farm; free to run, capacity scaled by wind availability.
    #[serde(rename = "windturbine")]
    Wind,
    /// Kerosine-fired turbojet.
    #[serde(rename = "turbojet")]
    Turbojet,
    /// Gas-fired plant, optionally charged for CO2 emissions.
    #[serde(rename = "gasfired")]
    GasFired,
}

impl UnitKind {
    /// Wire tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            UnitKind::Wind => "windturbine",
            UnitKind::Turbojet => "turbojet",
            UnitKind::GasFired => "gasfired",
        }
    }

    /// Whether this kind burns fuel (and therefore divides a price by efficiency).
    pub fn burns_fuel(self) -> bool {
        !matches!(self, UnitKind::Wind)
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windturbine" | "wind" => Ok(UnitKind::Wind),
            "turbojet" => Ok(UnitKind::Turbojet),
            "gasfired" | "gas" => Ok(UnitKind::GasFired),
            other => Err(Error::invalid(format!(
                "unknown unit type '{other}'; expected one of windturbine, turbojet, gasfired"
            ))),
        }
    }
}

/// A single generating unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: UnitKind,
    pub efficiency: f64,
    pub pmin: f64,
    pub pmax: f64,
}

impl Unit {
    pub fn new(
        name: impl Into<String>,
        kind: UnitKind,
        efficiency: f64,
        pmin: f64,
        pmax: f64,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            efficiency,
            pmin,
            pmax,
        }
    }

    /// Validate the unit's own fields.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid("unit name must not be empty"));
        }

        if !self.efficiency.is_finite() || !(0.0..=1.0).contains(&self.efficiency) {
            return Err(Error::invalid(format!(
                "efficiency of unit '{}' must be between 0 and 1, got {}",
                self.name, self.efficiency
            )));
        }

        if self.kind.burns_fuel() && self.efficiency == 0.0 {
            return Err(Error::invalid(format!(
                "efficiency of {} unit '{}' must be greater than 0",
                self.kind, self.name
            )));
        }

        if !self.pmin.is_finite() || self.pmin < 0.0 {
            return Err(Error::invalid(format!(
                "pmin of unit '{}' must be finite and non-negative, got {}",
                self.name, self.pmin
            )));
        }

        if !self.pmax.is_finite() || self.pmax < self.pmin {
            return Err(Error::invalid(format!(
                "pmax of unit '{}' must be greater than or equal to pmin, got {} < {}",
                self.name, self.pmax, self.pmin
            )));
        }

        for (value, field) in [(self.pmin, "pmin"), (self.pmax, "pmax")] {
            if value.fract() != 0.0 {
                return Err(Error::invalid(format!(
                    "{field} of unit '{}' must be a whole number of MW, got {value}",
                    self.name
                )));
            }
        }

        Ok(())
    }
}

/// Fuel prices and wind availability for one request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelPrices {
    #[serde(rename = "gas(euro/MWh)")]
    pub gas: f64,
    #[serde(rename = "kerosine(euro/MWh)")]
    pub kerosine: f64,
    #[serde(rename = "co2(euro/ton)")]
    pub co2: f64,
    /// Wind availability as a percentage (0-100).
    #[serde(rename = "wind(%)")]
    pub wind_percent: f64,
}

impl FuelPrices {
    /// Validate that prices are non-negative and wind lies in 0-100.
    pub fn validate(&self) -> Result<()> {
        let prices = [
            (self.gas, "gas(euro/MWh)"),
            (self.kerosine, "kerosine(euro/MWh)"),
            (self.co2, "co2(euro/ton)"),
        ];

        for (value, field) in prices {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid(format!(
                    "{field} must be a finite non-negative number, got {value}"
                )));
            }
        }

        if !self.wind_percent.is_finite() || !(0.0..=100.0).contains(&self.wind_percent) {
            return Err(Error::invalid(format!(
                "wind(%) must be between 0 and 100, got {}",
                self.wind_percent
            )));
        }

        Ok(())
    }
}

/// A complete production plan request: load, prices, and units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub load: f64,
    pub fuels: FuelPrices,
    #[serde(rename = "powerplants")]
    pub units: Vec<Unit>,
}

impl PlanRequest {
    /// Parse a request from its JSON payload representation.
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Validate every field and the uniqueness of unit names, ignoring case.
    pub fn validate(&self) -> Result<()> {
        if !self.load.is_finite() || self.load < 0.0 {
            return Err(Error::invalid(format!(
                "load must be a finite non-negative number, got {}",
                self.load
            )));
        }

        if self.load.fract() != 0.0 {
            return Err(Error::invalid(format!(
                "load must be a whole number of MW, got {}",
                self.load
            )));
        }

        self.fuels.validate()?;

        if self.units.is_empty() {
            return Err(Error::invalid(
                "the 'powerplants' list must contain at least one element",
            ));
        }

        let mut seen = HashSet::with_capacity(self.units.len());
        for unit in &self.units {
            unit.validate()?;
            if !seen.insert(normalize_name(&unit.name)) {
                return Err(Error::DuplicateUnitName {
                    name: unit.name.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Key under which unit names must be unique.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fuels() -> FuelPrices {
        FuelPrices {
            gas: 13.4,
            kerosine: 50.8,
            co2: 20.0,
            wind_percent: 60.0,
        }
    }

    #[test]
    fn unit_kind_parses_wire_tags() {
        assert_eq!("windturbine".parse::<UnitKind>().unwrap(), UnitKind::Wind);
        assert_eq!("TurboJet".parse::<UnitKind>().unwrap(), UnitKind::Turbojet);
        assert_eq!("gasfired".parse::<UnitKind>().unwrap(), UnitKind::GasFired);
        assert!("nuclear".parse::<UnitKind>().is_err());
    }

    #[test]
    fn unit_deserializes_type_field() {
        let json = r#"{"name":"tj1","type":"turbojet","efficiency":0.3,"pmin":0,"pmax":16}"#;
        let unit: Unit = serde_json::from_str(json).unwrap();
        assert_eq!(unit.kind, UnitKind::Turbojet);
        assert_eq!(unit.pmax, 16.0);
    }

    #[test]
    fn rejects_pmax_below_pmin() {
        let unit = Unit::new("g", UnitKind::GasFired, 0.5, 100.0, 50.0);
        let err = unit.validate().unwrap_err();
        assert!(err.to_string().contains("pmax"));
    }

    #[test]
    fn rejects_zero_efficiency_for_fuel_burners_only() {
        assert!(Unit::new("g", UnitKind::GasFired, 0.0, 0.0, 10.0)
            .validate()
            .is_err());
        assert!(Unit::new("w", UnitKind::Wind, 0.0, 0.0, 10.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn rejects_wind_out_of_range() {
        let mut prices = fuels();
        prices.wind_percent = 101.0;
        assert!(prices.validate().is_err());
    }

    #[test]
    fn rejects_empty_unit_list() {
        let request = PlanRequest {
            load: 10.0,
            fuels: fuels(),
            units: vec![],
        };
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn rejects_duplicate_names() {
        let request = PlanRequest {
            load: 10.0,
            fuels: fuels(),
            units: vec![
                Unit::new("a", UnitKind::Wind, 1.0, 0.0, 10.0),
                Unit::new("a", UnitKind::GasFired, 0.5, 0.0, 10.0),
            ],
        };
        match request.validate().unwrap_err() {
            Error::DuplicateUnitName { name } => assert_eq!(name, "a"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn rejects_duplicate_names_differing_in_case() {
        let request = PlanRequest {
            load: 10.0,
            fuels: fuels(),
            units: vec![
                Unit::new("Gas1", UnitKind::GasFired, 0.5, 0.0, 10.0),
                Unit::new("gas1", UnitKind::GasFired, 0.5, 0.0, 10.0),
            ],
        };
        match request.validate().unwrap_err() {
            Error::DuplicateUnitName { name } => assert_eq!(name, "gas1"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn rejects_fractional_load() {
        let request = PlanRequest {
            load: 10.5,
            fuels: fuels(),
            units: vec![Unit::new("g", UnitKind::GasFired, 0.5, 0.0, 20.0)],
        };
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("load must be a whole number"));
    }

    #[test]
    fn rejects_fractional_pmin() {
        let err = Unit::new("g", UnitKind::GasFired, 0.5, 2.5, 20.0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("pmin of unit 'g' must be a whole number"));
    }

    #[test]
    fn rejects_fractional_pmax() {
        let err = Unit::new("g", UnitKind::GasFired, 0.5, 2.0, 20.7)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("pmax of unit 'g' must be a whole number"));
    }

    #[test]
    fn parses_canonical_payload() {
        let json = r#"{
            "load": 480,
            "fuels": {"gas(euro/MWh)": 13.4, "kerosine(euro/MWh)": 50.8, "co2(euro/ton)": 20, "wind(%)": 60},
            "powerplants": [{"name":"windpark1","type":"windturbine","efficiency":1,"pmin":0,"pmax":150}]
        }"#;
        let request = PlanRequest::from_json(json).unwrap();
        assert_eq!(request.load, 480.0);
        assert_eq!(request.fuels, fuels());
        assert_eq!(request.units.len(), 1);
        assert!(request.validate().is_ok());
    }
}
