//! Powerplan library entry points.
//!
//! This crate ranks generating units by marginal cost, dispatches them
//! greedily against a target load, and corrects any overproduction forced by
//! minimum-output constraints. Higher-level consumers (CLI, HTTP service)
//! should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod output;
pub mod plan;
pub mod unit;

#[cfg(test)]
mod test_helpers;

pub use catalog::UnitCatalog;
pub use config::DispatchConfig;
pub use dispatch::{
    allocate, correct_overshoot, plan_production, rank_units, run_dispatch, select_cost_model,
    Allocation, AllocationOutcome, Bounds, CostModel, DispatchEntry, DispatchResult,
    LOAD_TOLERANCE_MW,
};
pub use error::{Error, ErrorKind, Result};
pub use output::{PlanSummary, SummaryLine};
pub use plan::{PlanEntry, ProductionPlan};
pub use unit::{FuelPrices, PlanRequest, Unit, UnitKind};
