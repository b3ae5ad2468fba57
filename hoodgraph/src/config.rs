use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::tolerance::{is_valid_margin, DEFAULT_BLOAT_MARGIN, DEFAULT_INDEX_EPSILON};

/// How candidate pairs are generated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Every pair `(i, j)` with `i < j`.
    Exhaustive,
    /// Bounding-box queries against an R-tree built once per run.
    #[default]
    Indexed,
}

/// Detector settings. Both distances are in input coordinate units; the
/// defaults suit longitude/latitude degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdjacencyConfig {
    pub bloat_margin: f64,
    pub index_epsilon: f64,
    pub strategy: Strategy,
}

impl Default for AdjacencyConfig {
    fn default() -> Self {
        AdjacencyConfig {
            bloat_margin: DEFAULT_BLOAT_MARGIN,
            index_epsilon: DEFAULT_INDEX_EPSILON,
            strategy: Strategy::default(),
        }
    }
}

impl AdjacencyConfig {
    pub fn with_bloat_margin(mut self, margin: f64) -> Self {
        self.bloat_margin = margin;
        self
    }

    pub fn with_index_epsilon(mut self, epsilon: f64) -> Self {
        self.index_epsilon = epsilon;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_margin(self.bloat_margin) {
            return Err(ConfigError::InvalidBloatMargin(self.bloat_margin));
        }
        if !is_valid_margin(self.index_epsilon) {
            return Err(ConfigError::InvalidIndexEpsilon(self.index_epsilon));
        }
        Ok(())
    }
}
