use serde::Serialize;
use tracing::{debug, trace};

use crate::config::DispatchConfig;
use crate::unit::{FuelPrices, Unit, UnitKind};

use super::cost::select_cost_model;

/// A unit annotated with its merit cost and effective output range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchEntry {
    pub name: String,
    pub kind: UnitKind,
    /// Cost of one MWh, in euro.
    pub merit_cost: f64,
    /// Effective minimum output, in MW.
    pub min: f64,
    /// Effective maximum output, in MW.
    pub max: f64,
}

/// Price every unit and sort the result into merit order.
///
/// Order is ascending merit cost, then ascending minimum, then descending
/// maximum. Remaining ties keep input order.
pub fn rank_units(
    units: &[Unit],
    fuels: &FuelPrices,
    config: &DispatchConfig,
) -> Vec<DispatchEntry> {
    let mut entries: Vec<DispatchEntry> = units
        .iter()
        .map(|unit| {
            let model = select_cost_model(unit.kind);
            let bounds = model.effective_bounds(unit, fuels);
            let entry = DispatchEntry {
                name: unit.name.clone(),
                kind: unit.kind,
                merit_cost: model.merit_cost(unit, fuels, config),
                min: bounds.min,
                max: bounds.max,
            };
            trace!(
                unit = %entry.name,
                merit = entry.merit_cost,
                min = entry.min,
                max = entry.max,
                "priced unit"
            );
            entry
        })
        .collect();

    // sort_by is stable, so equal keys fall back to input order
    entries.sort_by(|a, b| {
        a.merit_cost
            .total_cmp(&b.merit_cost)
            .then(a.min.total_cmp(&b.min))
            .then(b.max.total_cmp(&a.max))
    });

    debug!(
        order = %entries
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(" > "),
        "merit order"
    );

    entries
}
