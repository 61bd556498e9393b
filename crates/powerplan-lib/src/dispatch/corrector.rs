use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::plan::ProductionPlan;

use super::merit::DispatchEntry;
use super::LOAD_TOLERANCE_MW;

/// Remove `excess` MW of overproduction from `plan`.
///
/// Walks `entries` from the most expensive unit backwards. Units that are
/// off, or sitting exactly at their minimum, are left alone. A unit producing
/// less than the outstanding excess is switched off; otherwise it is trimmed,
/// and if trimming would take it below its minimum it is held at the minimum
/// and the shortfall carries on to cheaper units.
///
/// Fails with [`Error::InfeasibleHighMinimum`] when the walk runs out of units
/// before the excess is absorbed. The plan is left in its partially corrected
/// state in that case.
pub fn correct_overshoot(
    plan: &mut ProductionPlan,
    entries: &[DispatchEntry],
    excess: f64,
) -> Result<()> {
    let mut excess = excess;
    if excess <= LOAD_TOLERANCE_MW {
        return Ok(());
    }

    for entry in entries.iter().rev() {
        let Some(position) = plan.position(&entry.name) else {
            continue;
        };
        let output = plan.output_at(position);

        if output <= LOAD_TOLERANCE_MW || (output - entry.min).abs() <= LOAD_TOLERANCE_MW {
            trace!(unit = %entry.name, p = output, "unit cannot be trimmed");
            continue;
        }

        if output < excess - LOAD_TOLERANCE_MW {
            plan.set_at(position, 0.0);
            excess -= output;
            trace!(unit = %entry.name, excess, "switched unit off");
            if excess <= LOAD_TOLERANCE_MW {
                return Ok(());
            }
            continue;
        }

        // Residue within tolerance must not push output below the minimum.
        let trimmed = output - excess;
        if trimmed >= entry.min - LOAD_TOLERANCE_MW {
            plan.set_at(position, trimmed.max(entry.min));
            trace!(unit = %entry.name, p = trimmed, "trimmed unit, overshoot absorbed");
            return Ok(());
        }

        plan.set_at(position, entry.min);
        excess = entry.min - trimmed;
        trace!(unit = %entry.name, p = entry.min, excess, "clamped unit to minimum");
    }

    let load = plan.total() - excess;
    warn!(load, excess, "overshoot could not be absorbed");
    Err(Error::InfeasibleHighMinimum { load, excess })
}
