use super::ids::{DesignId, ScenarioId, ScenarioPair};
use crate::engine::error::VwfoError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;
use tracing::debug;

/// One row of the design table: the surplus value of a design in a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurplusRecord {
    pub design: DesignId,
    pub scenario: ScenarioId,
    pub sv: f64,
}

impl SurplusRecord {
    pub fn new(design: impl Into<DesignId>, scenario: impl Into<ScenarioId>, sv: f64) -> Self {
        Self {
            design: design.into(),
            scenario: scenario.into(),
            sv,
        }
    }
}

/// Surplus values for every (design, scenario) pair.
///
/// Designs and scenarios keep the order in which they were first seen. That
/// order is the canonical reporting order for designs and the adjacency order
/// for scenarios. The table is immutable once built.
#[derive(Debug, Clone)]
pub struct DesignValueTable {
    designs: Vec<DesignId>,
    scenarios: Vec<ScenarioId>,
    design_index: HashMap<DesignId, usize>,
    scenario_index: HashMap<ScenarioId, usize>,
    // Row-major: one row per design, one column per scenario.
    values: Vec<f64>,
}

impl DesignValueTable {
    /// Builds a table from row-oriented records.
    ///
    /// # Errors
    ///
    /// Returns [`VwfoError::EmptyTable`] when there are no records,
    /// [`VwfoError::InvalidSurplusValue`] for a non-finite value,
    /// [`VwfoError::DuplicateEntry`] when a pair occurs twice, and
    /// [`VwfoError::IncompleteData`] when a design lacks a value for one of
    /// the declared scenarios.
    pub fn from_records<I>(records: I) -> Result<Self, VwfoError>
    where
        I: IntoIterator<Item = SurplusRecord>,
    {
        let mut designs = Vec::new();
        let mut scenarios = Vec::new();
        let mut design_index = HashMap::new();
        let mut scenario_index = HashMap::new();
        let mut cells: HashMap<(usize, usize), f64> = HashMap::new();

        for record in records {
            if !record.sv.is_finite() {
                return Err(VwfoError::InvalidSurplusValue {
                    design: record.design,
                    scenario: record.scenario,
                    value: record.sv,
                });
            }
            let d = intern(&mut designs, &mut design_index, record.design);
            let s = intern(&mut scenarios, &mut scenario_index, record.scenario);
            match cells.entry((d, s)) {
                Entry::Occupied(_) => {
                    return Err(VwfoError::DuplicateEntry {
                        design: designs[d].clone(),
                        scenario: scenarios[s].clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(record.sv);
                }
            }
        }

        if designs.is_empty() {
            return Err(VwfoError::EmptyTable);
        }

        let mut values = Vec::with_capacity(designs.len() * scenarios.len());
        for (d, design) in designs.iter().enumerate() {
            for (s, scenario) in scenarios.iter().enumerate() {
                let sv = cells
                    .get(&(d, s))
                    .ok_or_else(|| VwfoError::IncompleteData {
                        design: design.clone(),
                        scenario: scenario.clone(),
                    })?;
                values.push(*sv);
            }
        }

        debug!(
            designs = designs.len(),
            scenarios = scenarios.len(),
            "Built design value table."
        );

        Ok(Self {
            designs,
            scenarios,
            design_index,
            scenario_index,
            values,
        })
    }

    /// Surplus value of `design` in `scenario`.
    ///
    /// # Errors
    ///
    /// Returns [`VwfoError::NotFound`] if either identifier is not in the table.
    pub fn surplus_value(&self, design: &str, scenario: &str) -> Result<f64, VwfoError> {
        let not_found = || VwfoError::NotFound {
            design: design.into(),
            scenario: scenario.into(),
        };
        let d = *self.design_index.get(design).ok_or_else(not_found)?;
        let s = *self.scenario_index.get(scenario).ok_or_else(not_found)?;
        self.values
            .get(d * self.scenarios.len() + s)
            .copied()
            .ok_or_else(not_found)
    }

    /// All designs in canonical (first-seen) order.
    pub fn designs(&self) -> &[DesignId] {
        &self.designs
    }

    pub fn scenarios(&self) -> &[ScenarioId] {
        &self.scenarios
    }

    pub fn design_count(&self) -> usize {
        self.designs.len()
    }

    pub fn contains_design(&self, design: &str) -> bool {
        self.design_index.contains_key(design)
    }

    pub fn contains_scenario(&self, scenario: &str) -> bool {
        self.scenario_index.contains_key(scenario)
    }

    pub fn scenario_position(&self, scenario: &str) -> Option<usize> {
        self.scenario_index.get(scenario).copied()
    }

    /// The (scenario[k], scenario[k+1]) pairs in scenario order.
    pub fn adjacent_pairs(&self) -> Vec<ScenarioPair> {
        self.scenarios
            .windows(2)
            .map(|w| ScenarioPair::new(w[0].clone(), w[1].clone()))
            .collect()
    }

    /// Keys of the transition matrices needed to cover every adjacent pair.
    pub fn expected_transition_keys(&self) -> Vec<String> {
        self.adjacent_pairs().iter().map(ScenarioPair::key).collect()
    }
}

fn intern<K: Clone + Eq + Hash>(order: &mut Vec<K>, index: &mut HashMap<K, usize>, key: K) -> usize {
    if let Some(&i) = index.get(&key) {
        return i;
    }
    let i = order.len();
    order.push(key.clone());
    index.insert(key, i);
    i
}
