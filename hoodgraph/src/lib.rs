pub mod model;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod geometry {
    pub mod bbox;
    pub mod limits;
    pub mod simplify;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod adjacency;
    pub mod robustify;
    pub mod spatial_index;
    pub mod unify;
}
pub mod json;

pub use algorithms::adjacency::{
    AdjacencyDetector, AdjacencyReport, NoProgress, ProgressObserver, RegionProgress,
};
pub use algorithms::robustify::bloat_and_simplify;
pub use algorithms::unify::unify_multi_part;
pub use config::{AdjacencyConfig, Strategy};
pub use engine::{GeoEngine, GeometryEngine};
pub use error::{AdjacencyError, ConfigError, IngestError, RegionError, SimplifyError};
pub use geometry::bbox::BBox;
pub use graph::{AdjacencyGraph, InvariantViolation};
pub use model::{Region, RegionCollection, RegionGeometry};

/// Compute adjacency in place with default settings and the `geo` engine.
pub fn make_indexed_collection(
    collection: &mut RegionCollection,
) -> Result<AdjacencyReport, AdjacencyError> {
    AdjacencyDetector::new(AdjacencyConfig::default())?.detect(collection)
}
