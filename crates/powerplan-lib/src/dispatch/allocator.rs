use tracing::{debug, trace};

use crate::plan::ProductionPlan;

use super::merit::DispatchEntry;
use super::LOAD_TOLERANCE_MW;

/// How the greedy walk ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AllocationOutcome {
    /// Assigned output matches the load.
    Exact,
    /// Every unit runs at its maximum and `unserved` MW are still missing.
    Shortfall { unserved: f64 },
    /// A unit was forced to its minimum, overshooting the load by `excess` MW.
    Overshoot { excess: f64 },
}

/// Provisional plan produced by [`allocate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub plan: ProductionPlan,
    pub outcome: AllocationOutcome,
}

/// Walk `entries` in merit order, assigning output until `load` is covered.
///
/// Units run at maximum while the remaining load exceeds it. The first unit
/// that can absorb the rest takes exactly that amount; if the rest is below
/// its minimum it runs at the minimum and the walk reports an overshoot.
/// Units after the stopping point stay at zero.
pub fn allocate(entries: &[DispatchEntry], load: f64) -> Allocation {
    let mut plan = ProductionPlan::zeroed(entries.iter().map(|e| e.name.as_str()));
    let mut remaining = load;
    let mut outcome = None;

    for (position, entry) in entries.iter().enumerate() {
        if remaining > entry.max {
            plan.set_at(position, entry.max);
            remaining -= entry.max;
            trace!(unit = %entry.name, p = entry.max, remaining, "unit at maximum");
            if remaining <= LOAD_TOLERANCE_MW {
                outcome = Some(AllocationOutcome::Exact);
                break;
            }
        } else if entry.min <= remaining {
            plan.set_at(position, remaining);
            trace!(unit = %entry.name, p = remaining, "unit absorbs remaining load");
            outcome = Some(AllocationOutcome::Exact);
            break;
        } else {
            let excess = entry.min - remaining;
            plan.set_at(position, entry.min);
            debug!(
                unit = %entry.name,
                p = entry.min,
                excess,
                "unit forced to minimum, load overshot"
            );
            outcome = Some(AllocationOutcome::Overshoot { excess });
            break;
        }
    }

    let outcome = outcome.unwrap_or(if remaining > LOAD_TOLERANCE_MW {
        AllocationOutcome::Shortfall {
            unserved: remaining,
        }
    } else {
        AllocationOutcome::Exact
    });

    Allocation { plan, outcome }
}
