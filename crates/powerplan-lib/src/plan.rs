//! Production plan: per-unit output in merit order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Output assigned to a single unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub name: String,
    /// Assigned output in MW.
    pub p: f64,
}

/// Ordered unit → output mapping.
///
/// Entries keep the merit order they were created in; a name index gives
/// constant-time access for the correction pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductionPlan {
    entries: Vec<PlanEntry>,
    index: HashMap<String, usize>,
}

impl ProductionPlan {
    /// Create a plan with every named unit switched off.
    pub fn zeroed<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut plan = Self::default();
        for name in names {
            plan.index.insert(name.to_string(), plan.entries.len());
            plan.entries.push(PlanEntry {
                name: name.to_string(),
                p: 0.0,
            });
        }
        plan
    }

    /// Output of the named unit, if it is part of the plan.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.index.get(name).map(|&i| self.entries[i].p)
    }

    /// Output at merit position `position`.
    pub fn output_at(&self, position: usize) -> f64 {
        self.entries[position].p
    }

    /// Set the output of the unit at merit position `position`.
    pub fn set_at(&mut self, position: usize, p: f64) {
        self.entries[position].p = p;
    }

    /// Merit position of the named unit.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Sum of all assigned outputs.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.p).sum()
    }

    /// Number of units with non-zero output.
    pub fn dispatched_count(&self) -> usize {
        self.entries.iter().filter(|e| e.p > 0.0).count()
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<PlanEntry> {
        self.entries
    }
}
