use super::ids::{DesignId, ScenarioPair};
use crate::engine::error::{MatrixAxis, VwfoError};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A labelled square matrix as supplied by a collaborator, before validation.
///
/// Row labels are source designs, column labels are target designs, and
/// `cells[r][c]` is the raw entry for `row_labels[r] -> column_labels[c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    row_labels: Vec<DesignId>,
    column_labels: Vec<DesignId>,
    cells: Vec<Vec<f64>>,
}

impl AdjacencyMatrix {
    /// # Errors
    ///
    /// Returns [`VwfoError::MatrixShape`] if the number of rows differs from
    /// the number of row labels, and [`VwfoError::RaggedMatrix`] if a row's
    /// width differs from the number of column labels.
    pub fn new(
        row_labels: Vec<DesignId>,
        column_labels: Vec<DesignId>,
        cells: Vec<Vec<f64>>,
    ) -> Result<Self, VwfoError> {
        if cells.len() != row_labels.len() {
            return Err(VwfoError::MatrixShape {
                labels: row_labels.len(),
                rows: cells.len(),
            });
        }
        for (label, row) in row_labels.iter().zip(&cells) {
            if row.len() != column_labels.len() {
                return Err(VwfoError::RaggedMatrix {
                    row: label.clone(),
                    expected: column_labels.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Self {
            row_labels,
            column_labels,
            cells,
        })
    }

    pub fn row_labels(&self) -> &[DesignId] {
        &self.row_labels
    }

    pub fn column_labels(&self) -> &[DesignId] {
        &self.column_labels
    }

    pub fn cells(&self) -> &[Vec<f64>] {
        &self.cells
    }
}

/// Directed transitions between designs for one scenario pair.
///
/// Stored as a mapping from each source design to the set of designs it may
/// move to in the following scenario. Self-loops are kept as given.
#[derive(Debug, Clone)]
pub struct TransitionGraph {
    pair: ScenarioPair,
    designs: Vec<DesignId>,
    adjacency: HashMap<DesignId, HashSet<DesignId>>,
}

impl TransitionGraph {
    /// Validates `matrix` against the canonical design set and builds the graph.
    ///
    /// Both axes must contain exactly `designs`, each label once. Every entry
    /// must be 0 or 1.
    pub fn from_matrix(
        pair: ScenarioPair,
        matrix: &AdjacencyMatrix,
        designs: &[DesignId],
    ) -> Result<Self, VwfoError> {
        compare_labels(MatrixAxis::Rows, matrix.row_labels(), designs)?;
        compare_labels(MatrixAxis::Columns, matrix.column_labels(), designs)?;

        let mut adjacency = HashMap::with_capacity(designs.len());
        for (source, row) in matrix.row_labels().iter().zip(matrix.cells()) {
            let mut targets = HashSet::new();
            for (target, &value) in matrix.column_labels().iter().zip(row) {
                if value == 1.0 {
                    targets.insert(target.clone());
                } else if value != 0.0 {
                    return Err(VwfoError::InvalidAdjacencyValue {
                        source_design: source.clone(),
                        target_design: target.clone(),
                        value,
                    });
                }
            }
            adjacency.insert(source.clone(), targets);
        }

        debug!(
            pair = %pair,
            designs = designs.len(),
            edges = adjacency.values().map(HashSet::len).sum::<usize>(),
            "Built transition graph."
        );

        Ok(Self {
            pair,
            designs: designs.to_vec(),
            adjacency,
        })
    }

    /// Builds a graph from an explicit edge list. Designs without edges have
    /// no following designs.
    pub fn from_edges<I, S, T>(
        pair: ScenarioPair,
        designs: &[DesignId],
        edges: I,
    ) -> Result<Self, VwfoError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<DesignId>,
        T: Into<DesignId>,
    {
        let mut adjacency: HashMap<DesignId, HashSet<DesignId>> = designs
            .iter()
            .map(|d| (d.clone(), HashSet::new()))
            .collect();
        let mut unknown = Vec::new();

        for (source, target) in edges {
            let (source, target) = (source.into(), target.into());
            if !adjacency.contains_key(target.as_str()) {
                unknown.push(target.clone());
            }
            match adjacency.get_mut(source.as_str()) {
                Some(targets) => {
                    targets.insert(target);
                }
                None => unknown.push(source),
            }
        }

        if !unknown.is_empty() {
            unknown.sort();
            unknown.dedup();
            return Err(VwfoError::DesignMismatch {
                axis: MatrixAxis::Rows,
                missing: Vec::new(),
                extra: unknown,
                duplicated: Vec::new(),
            });
        }

        Ok(Self {
            pair,
            designs: designs.to_vec(),
            adjacency,
        })
    }

    /// Designs reachable from `source` in the following scenario, or `None`
    /// if `source` is not part of the graph.
    pub fn following_designs(&self, source: &str) -> Option<&HashSet<DesignId>> {
        self.adjacency.get(source)
    }

    pub fn out_degree(&self, source: &str) -> Option<usize> {
        self.following_designs(source).map(HashSet::len)
    }

    pub fn pair(&self) -> &ScenarioPair {
        &self.pair
    }

    pub fn designs(&self) -> &[DesignId] {
        &self.designs
    }

    /// Checks that this graph covers exactly `designs`.
    pub fn check_designs(&self, designs: &[DesignId]) -> Result<(), VwfoError> {
        compare_labels(MatrixAxis::Rows, &self.designs, designs)
    }
}

/// Compares one axis of labels with the canonical design set.
pub(crate) fn compare_labels(
    axis: MatrixAxis,
    labels: &[DesignId],
    designs: &[DesignId],
) -> Result<(), VwfoError> {
    let expected: HashSet<&str> = designs.iter().map(DesignId::as_str).collect();
    let mut seen = HashSet::with_capacity(labels.len());
    let mut extra = Vec::new();
    let mut duplicated = Vec::new();

    for label in labels {
        if !seen.insert(label.as_str()) {
            duplicated.push(label.clone());
        } else if !expected.contains(label.as_str()) {
            extra.push(label.clone());
        }
    }
    let missing: Vec<DesignId> = designs
        .iter()
        .filter(|d| !seen.contains(d.as_str()))
        .cloned()
        .collect();

    if missing.is_empty() && extra.is_empty() && duplicated.is_empty() {
        return Ok(());
    }
    Err(VwfoError::DesignMismatch {
        axis,
        missing,
        extra,
        duplicated,
    })
}

/// Transition graphs for several scenario pairs, keyed by pair.
///
/// Every pair in the set has its own key, so a lookup by key is unambiguous.
#[derive(Debug, Clone, Default)]
pub struct TransitionSet {
    graphs: HashMap<ScenarioPair, TransitionGraph>,
}

impl TransitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a graph under its own scenario pair.
    ///
    /// # Errors
    ///
    /// Returns [`VwfoError::DuplicateTransitions`] if a graph for the same
    /// pair is already present, and [`VwfoError::AmbiguousTransitionKey`] if a
    /// different pair with the same key is.
    pub fn insert(&mut self, graph: TransitionGraph) -> Result<(), VwfoError> {
        let pair = graph.pair().clone();
        if self.graphs.contains_key(&pair) {
            return Err(VwfoError::DuplicateTransitions { key: pair.key() });
        }
        let key = pair.key();
        if let Some(first) = self.graphs.keys().find(|existing| existing.key() == key) {
            return Err(VwfoError::AmbiguousTransitionKey {
                key,
                first: first.clone(),
                second: pair,
            });
        }
        self.graphs.insert(pair, graph);
        Ok(())
    }

    pub fn get(&self, pair: &ScenarioPair) -> Option<&TransitionGraph> {
        self.graphs.get(pair)
    }

    pub fn get_by_key(&self, key: &str) -> Option<&TransitionGraph> {
        self.graphs.values().find(|graph| graph.pair().key() == key)
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}
