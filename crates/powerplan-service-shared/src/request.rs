//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use powerplan_lib::{FuelPrices, PlanRequest, Unit, UnitKind};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Body of `POST /productionplan` and `POST /api/v1/merit-order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionPlanRequest {
    /// Load to cover, in MW.
    pub load: f64,

    /// Fuel prices and wind availability.
    pub fuels: FuelsPayload,

    /// Units available for dispatch.
    pub powerplants: Vec<PowerplantPayload>,
}

/// Fuel section of the payload, keyed by the canonical field names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FuelsPayload {
    #[serde(rename = "gas(euro/MWh)")]
    pub gas: f64,
    #[serde(rename = "kerosine(euro/MWh)")]
    pub kerosine: f64,
    #[serde(rename = "co2(euro/ton)")]
    pub co2: f64,
    #[serde(rename = "wind(%)")]
    pub wind: f64,
}

/// A single unit in the payload.
///
/// `type` stays a string on the wire; an unknown technology is reported as
/// a validation problem rather than a body decoding failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerplantPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub efficiency: f64,
    pub pmin: f64,
    pub pmax: f64,
}

impl ProductionPlanRequest {
    /// Convert into the library request, resolving unit types.
    pub fn to_plan_request(&self) -> Result<PlanRequest, powerplan_lib::Error> {
        let units = self
            .powerplants
            .iter()
            .map(|plant| -> Result<Unit, powerplan_lib::Error> {
                let kind = plant.kind.parse::<UnitKind>()?;
                Ok(Unit::new(
                    plant.name.clone(),
                    kind,
                    plant.efficiency,
                    plant.pmin,
                    plant.pmax,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PlanRequest {
            load: self.load,
            fuels: FuelPrices {
                gas: self.fuels.gas,
                kerosine: self.fuels.kerosine,
                co2: self.fuels.co2,
                wind_percent: self.fuels.wind,
            },
            units,
        })
    }
}

impl ProductionPlanRequest {
    /// Convert and validate in one pass, yielding the library request.
    pub fn validated(&self, request_id: &str) -> Result<PlanRequest, Box<ProblemDetails>> {
        self.to_plan_request()
            .and_then(|request| request.validate().map(|()| request))
            .map_err(|e| Box::new(ProblemDetails::bad_request(e.to_string(), request_id)))
    }
}

impl Validate for ProductionPlanRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        self.validated(request_id).map(|_| ())
    }
}
