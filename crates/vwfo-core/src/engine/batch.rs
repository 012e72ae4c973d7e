use super::error::VwfoError;
use crate::core::models::ids::{DesignId, ScenarioPair};
use std::collections::HashSet;

/// The VWFO outcome of a single design within a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignOutcome {
    pub design: DesignId,
    pub value: Result<f64, VwfoError>,
}

/// VWFO values for every design of one scenario pair, in canonical design
/// order. A failed design keeps its error in place of a value.
#[derive(Debug, Clone, PartialEq)]
pub struct VwfoBatch {
    pair: ScenarioPair,
    entries: Vec<DesignOutcome>,
}

impl VwfoBatch {
    pub(crate) fn new(pair: ScenarioPair, entries: Vec<DesignOutcome>) -> Self {
        Self { pair, entries }
    }

    pub fn pair(&self) -> &ScenarioPair {
        &self.pair
    }

    pub fn entries(&self) -> &[DesignOutcome] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, design: &str) -> Option<&Result<f64, VwfoError>> {
        self.entries
            .iter()
            .find(|entry| entry.design.as_str() == design)
            .map(|entry| &entry.value)
    }

    /// Successfully computed (design, value) pairs.
    pub fn values(&self) -> impl Iterator<Item = (&DesignId, f64)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.value.as_ref().ok().map(|v| (&entry.design, *v)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&DesignId, &VwfoError)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.value.as_ref().err().map(|e| (&entry.design, e)))
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|entry| entry.value.is_ok())
    }

    /// Keeps only the listed designs, preserving canonical order.
    pub fn retain_designs(&mut self, keep: &HashSet<DesignId>) {
        self.entries.retain(|entry| keep.contains(&entry.design));
    }
}
