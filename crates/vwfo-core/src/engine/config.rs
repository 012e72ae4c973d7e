use crate::core::models::ids::{DesignId, ScenarioPair};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Which scenario pairs an analysis covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairSelection {
    /// Every (scenario[k], scenario[k+1]) pair of the design table.
    AllAdjacent,
    Explicit(Vec<ScenarioPair>),
}

/// Which designs appear in the reported results.
///
/// This never changes the population size used for normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesignSelection {
    All,
    List(Vec<DesignId>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub pairs: PairSelection,
    pub designs: DesignSelection,
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    pairs: Option<PairSelection>,
    designs: Option<DesignSelection>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pairs(mut self, selection: PairSelection) -> Self {
        self.pairs = Some(selection);
        self
    }
    pub fn pair(mut self, pair: ScenarioPair) -> Self {
        self.pairs = Some(PairSelection::Explicit(vec![pair]));
        self
    }
    pub fn designs(mut self, selection: DesignSelection) -> Self {
        self.designs = Some(selection);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        Ok(AnalysisConfig {
            pairs: self.pairs.ok_or(ConfigError::MissingParameter("pairs"))?,
            designs: self.designs.unwrap_or(DesignSelection::All),
        })
    }
}
