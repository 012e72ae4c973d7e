use super::batch::{DesignOutcome, VwfoBatch};
use super::error::VwfoError;
use crate::core::models::ids::ScenarioPair;
use crate::core::models::table::DesignValueTable;
use crate::core::models::transition::TransitionGraph;
use tracing::{debug, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Sign of a value difference: +1, -1, or 0 for an exact tie.
#[inline]
pub fn sign(delta: f64) -> i64 {
    if delta > 0.0 {
        1
    } else if delta < 0.0 {
        -1
    } else {
        0
    }
}

/// Computes VWFO values from an immutable design value table.
///
/// For design `i` and a pair `(current, following)`:
///
/// ```text
/// VWFO(i) = 1 / (N - 1) * sum over j in following_designs(i) of
///           sign(SV(j, following) - SV(i, current))
/// ```
///
/// The sum only covers the designs the transition graph allows, but the
/// denominator is always the full design count minus one.
#[derive(Debug, Clone, Copy)]
pub struct VwfoEngine<'a> {
    table: &'a DesignValueTable,
}

impl<'a> VwfoEngine<'a> {
    pub fn new(table: &'a DesignValueTable) -> Self {
        Self { table }
    }

    /// VWFO of a single design.
    #[instrument(skip(self, graph), level = "debug")]
    pub fn compute(
        &self,
        design: &str,
        current: &str,
        following: &str,
        graph: &TransitionGraph,
    ) -> Result<f64, VwfoError> {
        let denominator = self.denominator()?;
        graph.check_designs(self.table.designs())?;
        let sum = self.filtered_outdegree(design, current, following, graph)?;
        Ok(sum as f64 / denominator)
    }

    /// VWFO of every design, in the table's canonical design order.
    ///
    /// Structural problems (fewer than two designs, a graph over a different
    /// design set) abort the batch. Anything else is recorded against the
    /// design it occurred for and the remaining designs are still computed.
    #[instrument(skip(self, graph), name = "vwfo_batch")]
    pub fn compute_all(
        &self,
        current: &str,
        following: &str,
        graph: &TransitionGraph,
    ) -> Result<VwfoBatch, VwfoError> {
        let denominator = self.denominator()?;
        graph.check_designs(self.table.designs())?;

        let designs = self.table.designs();

        #[cfg(not(feature = "parallel"))]
        let iterator = designs.iter();

        #[cfg(feature = "parallel")]
        let iterator = designs.par_iter();

        let entries: Vec<DesignOutcome> = iterator
            .map(|design| DesignOutcome {
                design: design.clone(),
                value: self
                    .filtered_outdegree(design, current, following, graph)
                    .map(|sum| sum as f64 / denominator),
            })
            .collect();

        let batch = VwfoBatch::new(ScenarioPair::new(current, following), entries);
        for (design, error) in batch.failures() {
            warn!(design = %design, "VWFO could not be computed: {}", error);
        }
        debug!(
            designs = batch.len(),
            failures = batch.failure_count(),
            "VWFO batch computed."
        );
        Ok(batch)
    }

    fn denominator(&self) -> Result<f64, VwfoError> {
        let n = self.table.design_count();
        if n < 2 {
            return Err(VwfoError::DegenerateInput { designs: n });
        }
        Ok((n - 1) as f64)
    }

    /// Unnormalized sign sum over the filtered target set of `design`.
    fn filtered_outdegree(
        &self,
        design: &str,
        current: &str,
        following: &str,
        graph: &TransitionGraph,
    ) -> Result<i64, VwfoError> {
        let sv_current = self.table.surplus_value(design, current)?;
        let targets = graph
            .following_designs(design)
            .ok_or_else(|| VwfoError::UnknownDesign {
                design: design.into(),
            })?;

        targets.iter().try_fold(0_i64, |acc, target| {
            let sv_target = self.table.surplus_value(target, following)?;
            Ok(acc + sign(sv_target - sv_current))
        })
    }
}
