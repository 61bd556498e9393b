//! Rendering of plans and merit orders for the terminal.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use powerplan_lib::{DispatchEntry, PlanSummary};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Text,
    /// JSON document, identical to the HTTP response body.
    Json,
}

/// Pretty-printed JSON for any serializable output.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}

/// Render a plan summary as a table, highlighting dispatched units.
pub fn render_plan(summary: &PlanSummary, palette: &ColorPalette) -> String {
    let plain = summary.render_plain();
    let mut buffer = String::new();

    for (index, line) in plain.lines().enumerate() {
        let color = if index == 0 {
            palette.bold
        } else if let Some(unit) = summary.lines.get(index - 1) {
            if unit.p > 0.0 {
                palette.green
            } else {
                palette.gray
            }
        } else if index == summary.lines.len() + 1 {
            palette.cyan
        } else {
            palette.yellow
        };
        let _ = writeln!(buffer, "{color}{line}{}", palette.reset);
    }
    buffer
}

/// Render ranked entries as a table with their effective bounds.
pub fn render_merit(entries: &[DispatchEntry], palette: &ColorPalette) -> String {
    let width = entries
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "{}{:>4}  {:<width$}  {:<11}  {:>10}  {:>8}  {:>8}{}",
        palette.bold,
        "rank",
        "unit",
        "type",
        "merit",
        "min",
        "max",
        palette.reset
    );
    for (rank, entry) in entries.iter().enumerate() {
        let color = if entry.max > 0.0 {
            palette.green
        } else {
            palette.gray
        };
        let _ = writeln!(
            buffer,
            "{color}{:>4}  {:<width$}  {:<11}  {:>10.3}  {:>8.1}  {:>8.1}{}",
            rank + 1,
            entry.name,
            entry.kind.as_str(),
            entry.merit_cost,
            entry.min,
            entry.max,
            palette.reset
        );
    }

    let capacity: f64 = entries.iter().map(|e| e.max).sum();
    let _ = writeln!(
        buffer,
        "{}available capacity {:.1} MW{}",
        palette.cyan, capacity, palette.reset
    );
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerplan_lib::{
        rank_units, run_dispatch, DispatchConfig, FuelPrices, PlanRequest, Unit, UnitKind,
    };

    fn request(load: f64) -> PlanRequest {
        PlanRequest {
            load,
            fuels: FuelPrices {
                gas: 10.0,
                kerosine: 50.0,
                co2: 20.0,
                wind_percent: 50.0,
            },
            units: vec![
                Unit::new("wind", UnitKind::Wind, 1.0, 0.0, 100.0),
                Unit::new("gas", UnitKind::GasFired, 0.5, 20.0, 200.0),
                Unit::new("tj", UnitKind::Turbojet, 0.3, 0.0, 50.0),
            ],
        }
    }

    #[test]
    fn test_plain_plan_matches_summary() {
        let config = DispatchConfig::default().with_co2(false);
        let result = run_dispatch(&request(120.0), &config).unwrap();
        let summary = PlanSummary::from_dispatch(&result);
        assert_eq!(render_plan(&summary, &ColorPalette::plain()), summary.render_plain());
    }

    #[test]
    fn test_colored_plan_marks_idle_units() {
        let config = DispatchConfig::default().with_co2(false);
        let result = run_dispatch(&request(120.0), &config).unwrap();
        let summary = PlanSummary::from_dispatch(&result);
        let text = render_plan(&summary, &ColorPalette::colored());

        let tj_line = text.lines().find(|l| l.contains("tj")).unwrap();
        assert!(tj_line.starts_with(crate::terminal::colors::GRAY));
        let gas_line = text.lines().find(|l| l.contains("gasfired")).unwrap();
        assert!(gas_line.starts_with(crate::terminal::colors::GREEN));
    }

    #[test]
    fn test_merit_table_lists_ranks_and_capacity() {
        let request = request(0.0);
        let entries = rank_units(&request.units, &request.fuels, &DispatchConfig::default());
        let text = render_merit(&entries, &ColorPalette::plain());

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].trim_start().starts_with("1  wind"));
        assert!(lines[4].contains("available capacity 300.0 MW"));
    }

    #[test]
    fn test_render_json_array() {
        let result = run_dispatch(&request(120.0), &DispatchConfig::default()).unwrap();
        let json = render_json(result.plan.entries()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(3));
        assert_eq!(value[0]["name"], "wind");
    }
}
