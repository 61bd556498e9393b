//! Human-readable summaries of a dispatch run.

use std::fmt::Write;

use serde::Serialize;

use crate::dispatch::DispatchResult;
use crate::unit::UnitKind;

/// One row of a [`PlanSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub name: String,
    pub kind: UnitKind,
    pub merit_cost: f64,
    pub p: f64,
    /// `p * merit_cost`, in euro per hour.
    pub cost: f64,
}

/// Plan annotated with merit costs and totals, in merit order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub load: f64,
    pub lines: Vec<SummaryLine>,
    pub total_output: f64,
    pub total_cost: f64,
    /// Overshoot removed by the correction pass, if one ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_overshoot: Option<f64>,
}

impl PlanSummary {
    pub fn from_dispatch(result: &DispatchResult) -> Self {
        let lines: Vec<SummaryLine> = result
            .entries
            .iter()
            .map(|entry| {
                let p = result.plan.get(&entry.name).unwrap_or(0.0);
                SummaryLine {
                    name: entry.name.clone(),
                    kind: entry.kind,
                    merit_cost: entry.merit_cost,
                    p,
                    cost: p * entry.merit_cost,
                }
            })
            .collect();

        Self {
            load: result.load,
            total_output: lines.iter().map(|l| l.p).sum(),
            total_cost: lines.iter().map(|l| l.cost).sum(),
            corrected_overshoot: result.corrected_overshoot,
            lines,
        }
    }

    /// Render the summary as a plain-text table.
    pub fn render_plain(&self) -> String {
        let width = self
            .lines
            .iter()
            .map(|l| l.name.len())
            .max()
            .unwrap_or(0)
            .max(4);

        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "{:<width$}  {:<11}  {:>10}  {:>9}",
            "unit", "type", "merit", "p (MW)"
        );
        for line in &self.lines {
            let _ = writeln!(
                buffer,
                "{:<width$}  {:<11}  {:>10.3}  {:>9.1}",
                line.name,
                line.kind.as_str(),
                line.merit_cost,
                line.p
            );
        }
        let _ = writeln!(
            buffer,
            "total {:.1} MW for load {:.1} MW, cost {:.2} EUR/h",
            self.total_output, self.load, self.total_cost
        );
        if let Some(excess) = self.corrected_overshoot {
            let _ = writeln!(buffer, "corrected overshoot of {excess:.1} MW");
        }
        buffer
    }
}
