use crate::core::models::ids::{DesignId, ScenarioId, ScenarioPair};
use std::fmt;
use thiserror::Error;

/// Which side of a transition matrix a label list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixAxis {
    Rows,
    Columns,
}

impl fmt::Display for MatrixAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows => f.write_str("row"),
            Self::Columns => f.write_str("column"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum VwfoError {
    #[error("Surplus value not found for design '{design}' in scenario '{scenario}'")]
    NotFound {
        design: DesignId,
        scenario: ScenarioId,
    },

    #[error("Incomplete data: design '{design}' has no surplus value for scenario '{scenario}'")]
    IncompleteData {
        design: DesignId,
        scenario: ScenarioId,
    },

    #[error(
        "Invalid adjacency value {value} for transition '{source_design}' -> '{target_design}' (expected 0 or 1)"
    )]
    InvalidAdjacencyValue {
        source_design: DesignId,
        target_design: DesignId,
        value: f64,
    },

    #[error(
        "Transition matrix {axis} designs do not match the design table (missing: {missing:?}, extra: {extra:?}, duplicated: {duplicated:?})"
    )]
    DesignMismatch {
        axis: MatrixAxis,
        missing: Vec<DesignId>,
        extra: Vec<DesignId>,
        duplicated: Vec<DesignId>,
    },

    #[error("Degenerate input: VWFO needs at least 2 designs, found {designs}")]
    DegenerateInput { designs: usize },

    #[error("Duplicate surplus value for design '{design}' in scenario '{scenario}'")]
    DuplicateEntry {
        design: DesignId,
        scenario: ScenarioId,
    },

    #[error("Surplus value {value} for design '{design}' in scenario '{scenario}' is not finite")]
    InvalidSurplusValue {
        design: DesignId,
        scenario: ScenarioId,
        value: f64,
    },

    #[error("Design value table contains no rows")]
    EmptyTable,

    #[error("Transition matrix row '{row}' has {found} entries, expected {expected}")]
    RaggedMatrix {
        row: DesignId,
        expected: usize,
        found: usize,
    },

    #[error("Transition matrix has {rows} row(s) but {labels} row label(s)")]
    MatrixShape { labels: usize, rows: usize },

    #[error("Transitions for scenario pair '{key}' were supplied more than once")]
    DuplicateTransitions { key: String },

    #[error("No transition graph supplied for scenario pair '{key}'")]
    MissingTransitions { key: String },

    #[error("Scenario '{scenario}' does not exist in the design value table")]
    UnknownScenario { scenario: ScenarioId },

    #[error("Design '{design}' does not exist in the design value table")]
    UnknownDesign { design: DesignId },

    #[error("Invalid scenario pair '{current}' -> '{following}': {reason}")]
    InvalidPair {
        current: ScenarioId,
        following: ScenarioId,
        reason: &'static str,
    },

    #[error("No scenario pairs to analyze: the table has {scenarios} scenario(s)")]
    NoScenarioPairs { scenarios: usize },

    #[error("Scenario pairs '{first}' and '{second}' share the transition key '{key}'")]
    AmbiguousTransitionKey {
        key: String,
        first: ScenarioPair,
        second: ScenarioPair,
    },
}

impl VwfoError {
    /// Structural errors make the inputs unusable as a whole, so a batch
    /// stops instead of recording them against a single design.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::DesignMismatch { .. }
                | Self::DegenerateInput { .. }
                | Self::RaggedMatrix { .. }
                | Self::MatrixShape { .. }
                | Self::EmptyTable
        )
    }
}
