//! Merit-order economic dispatch.
//!
//! This module provides:
//! - [`rank_units`] - Price units and sort them into merit order
//! - [`allocate`] - Greedy walk that fills the load cheapest-first
//! - [`correct_overshoot`] - Reverse walk removing overproduction forced by minimums
//! - [`run_dispatch`] / [`plan_production`] - Main entry points chaining the three stages
//!
//! # Strategy Pattern
//!
//! Unit pricing goes through the [`CostModel`] trait. Each technology has its
//! own model, selected by [`select_cost_model`], so the stages above never
//! branch on unit kind.
//!
//! # Example
//!
//! ```ignore
//! use powerplan_lib::{plan_production, DispatchConfig, PlanRequest};
//!
//! let request = PlanRequest::from_json(&payload)?;
//! request.validate()?;
//! let plan = plan_production(&request, &DispatchConfig::default())?;
//! println!("{} MW dispatched", plan.total());
//! ```

mod allocator;
mod corrector;
mod cost;
mod merit;

pub use allocator::{allocate, Allocation, AllocationOutcome};
pub use corrector::correct_overshoot;
pub use cost::{select_cost_model, Bounds, CostModel, GasFiredModel, TurbojetModel, WindModel};
pub use merit::{rank_units, DispatchEntry};

use tracing::{debug, warn};

use crate::config::DispatchConfig;
use crate::error::{Error, Result};
use crate::plan::ProductionPlan;
use crate::unit::PlanRequest;

/// Residual load or excess below this many MW counts as zero.
pub const LOAD_TOLERANCE_MW: f64 = 1e-9;

/// Full result of a dispatch run.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult {
    /// Target load in MW.
    pub load: f64,
    /// Units in merit order with their effective bounds.
    pub entries: Vec<DispatchEntry>,
    /// Final per-unit output, in merit order.
    pub plan: ProductionPlan,
    /// Overshoot removed by the correction pass, if one ran.
    pub corrected_overshoot: Option<f64>,
}

/// Run all three dispatch stages and keep the intermediate detail.
///
/// The request is assumed to be validated.
pub fn run_dispatch(request: &PlanRequest, config: &DispatchConfig) -> Result<DispatchResult> {
    let load = request.load;
    debug_assert!(
        load.is_finite() && load >= 0.0,
        "load must be validated before dispatch"
    );

    // Step 1: Rank units by merit cost
    let entries = rank_units(&request.units, &request.fuels, config);
    debug!(units = entries.len(), load, "ranked units");

    // Step 2: Greedy allocation
    let Allocation { mut plan, outcome } = allocate(&entries, load);

    // Step 3: Resolve the allocation outcome
    let corrected_overshoot = match outcome {
        AllocationOutcome::Exact => None,
        AllocationOutcome::Shortfall { unserved } => {
            let capacity = entries.iter().map(|e| e.max).sum();
            warn!(load, capacity, unserved, "load exceeds available capacity");
            return Err(Error::InfeasibleLowCapacity { load, capacity });
        }
        AllocationOutcome::Overshoot { excess } => {
            correct_overshoot(&mut plan, &entries, excess)?;
            Some(excess)
        }
    };

    debug!(
        total = plan.total(),
        dispatched = plan.dispatched_count(),
        "production plan ready"
    );

    Ok(DispatchResult {
        load,
        entries,
        plan,
        corrected_overshoot,
    })
}

/// Compute the production plan for a validated request.
pub fn plan_production(request: &PlanRequest, config: &DispatchConfig) -> Result<ProductionPlan> {
    run_dispatch(request, config).map(|result| result.plan)
}
