use crate::core::models::ids::{DesignId, ScenarioPair, ensure_distinct_keys};
use crate::core::models::table::DesignValueTable;
use crate::core::models::transition::{TransitionGraph, TransitionSet};
use crate::engine::batch::VwfoBatch;
use crate::engine::config::{AnalysisConfig, DesignSelection, PairSelection};
use crate::engine::error::VwfoError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::vwfo::VwfoEngine;
use std::collections::HashSet;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct PairReport {
    pub pair: ScenarioPair,
    pub batch: VwfoBatch,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisResult {
    pub pairs: Vec<PairReport>,
}

impl AnalysisResult {
    pub fn pair(&self, key: &str) -> Option<&PairReport> {
        self.pairs.iter().find(|report| report.pair.key() == key)
    }

    pub fn batches(&self) -> impl Iterator<Item = &VwfoBatch> {
        self.pairs.iter().map(|report| &report.batch)
    }

    pub fn failure_count(&self) -> usize {
        self.batches().map(VwfoBatch::failure_count).sum()
    }
}

#[instrument(skip_all, name = "vwfo_analysis")]
pub fn run(
    table: &DesignValueTable,
    transitions: &TransitionSet,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<AnalysisResult, VwfoError> {
    // === Phase 1: Resolve what to compute ===
    reporter.report(Progress::PhaseStart {
        name: "Resolving scenario pairs",
    });
    let pairs = resolve_pairs(table, &config.pairs)?;
    let selected_designs = resolve_designs(table, &config.designs)?;
    let graphs = pairs
        .iter()
        .map(|pair| {
            transitions
                .get(pair)
                .ok_or_else(|| VwfoError::MissingTransitions { key: pair.key() })
        })
        .collect::<Result<Vec<&TransitionGraph>, _>>()?;
    info!(
        "Analyzing {} scenario pair(s) over {} design(s).",
        pairs.len(),
        table.design_count()
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: One independent batch per pair ===
    let engine = VwfoEngine::new(table);
    reporter.report(Progress::PairsStart {
        total_pairs: pairs.len() as u64,
    });

    let mut reports = Vec::with_capacity(pairs.len());
    for (pair, graph) in pairs.into_iter().zip(graphs) {
        let mut batch = engine.compute_all(&pair.current, &pair.following, graph)?;
        if let Some(keep) = &selected_designs {
            batch.retain_designs(keep);
        }

        let failures = batch.failure_count();
        if failures > 0 {
            warn!(
                "{} design(s) could not be computed for pair {}.",
                failures, pair
            );
            reporter.report(Progress::Message(format!(
                "{} design(s) failed for {}",
                failures,
                pair.key()
            )));
        }
        reporter.report(Progress::PairComputed {
            key: pair.key(),
            designs: batch.len(),
            failures,
        });
        reports.push(PairReport { pair, batch });
    }

    reporter.report(Progress::PairsFinish);
    Ok(AnalysisResult { pairs: reports })
}

fn resolve_pairs(
    table: &DesignValueTable,
    selection: &PairSelection,
) -> Result<Vec<ScenarioPair>, VwfoError> {
    let pairs = match selection {
        PairSelection::AllAdjacent => table.adjacent_pairs(),
        PairSelection::Explicit(pairs) => {
            for pair in pairs {
                for scenario in [&pair.current, &pair.following] {
                    if !table.contains_scenario(scenario) {
                        return Err(VwfoError::UnknownScenario {
                            scenario: scenario.clone(),
                        });
                    }
                }
                if pair.current == pair.following {
                    return Err(VwfoError::InvalidPair {
                        current: pair.current.clone(),
                        following: pair.following.clone(),
                        reason: "current and following scenario must differ",
                    });
                }
            }
            pairs.clone()
        }
    };

    if pairs.is_empty() {
        return Err(VwfoError::NoScenarioPairs {
            scenarios: table.scenarios().len(),
        });
    }
    ensure_distinct_keys(&pairs)?;
    Ok(pairs)
}

fn resolve_designs(
    table: &DesignValueTable,
    selection: &DesignSelection,
) -> Result<Option<HashSet<DesignId>>, VwfoError> {
    match selection {
        DesignSelection::All => Ok(None),
        DesignSelection::List(designs) => {
            if let Some(unknown) = designs.iter().find(|d| !table.contains_design(d)) {
                return Err(VwfoError::UnknownDesign {
                    design: unknown.clone(),
                });
            }
            Ok(Some(designs.iter().cloned().collect()))
        }
    }
}
