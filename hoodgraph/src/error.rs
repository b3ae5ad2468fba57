//! Error types for adjacency detection and GeoJSON ingestion.

use thiserror::Error;

/// Ring simplification failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SimplifyError {
    /// The ring is shorter than the target or than a valid closed ring.
    #[error("insufficient ring: {points} points, at least {required} required")]
    InsufficientRing { points: usize, required: usize },
}

/// Failure while preparing or testing a single region.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegionError {
    #[error("insufficient ring: {points} points, at least {required} required")]
    InsufficientRing { points: usize, required: usize },

    /// Bloated parts of a multi-part region could not be merged.
    #[error("geometry union failure over {parts} parts")]
    GeometryUnionFailure { parts: usize },

    /// Buffering produced no polygon (zero-area or malformed ring).
    #[error("buffering produced an empty geometry")]
    DegenerateBuffer,

    /// Geometry has no coordinates to bound.
    #[error("geometry has no bounding box")]
    MissingBoundingBox,
}

impl RegionError {
    pub fn code(&self) -> &'static str {
        match self {
            RegionError::InsufficientRing { .. } => "insufficient_ring",
            RegionError::GeometryUnionFailure { .. } => "geometry_union_failure",
            RegionError::DegenerateBuffer => "degenerate_buffer",
            RegionError::MissingBoundingBox => "missing_bbox",
        }
    }
}

impl From<SimplifyError> for RegionError {
    fn from(e: SimplifyError) -> Self {
        match e {
            SimplifyError::InsufficientRing { points, required } => {
                RegionError::InsufficientRing { points, required }
            }
        }
    }
}

/// Invalid detector configuration.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("bloat margin must be finite and non-negative, got {0}")]
    InvalidBloatMargin(f64),

    #[error("index epsilon must be finite and non-negative, got {0}")]
    InvalidIndexEpsilon(f64),
}

/// Run-fatal adjacency failure.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AdjacencyError {
    /// A region could not be processed; the whole run is aborted.
    #[error("region {index} ({label:?}): {source}")]
    Region {
        index: usize,
        label: String,
        #[source]
        source: RegionError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AdjacencyError {
    pub fn code(&self) -> &'static str {
        match self {
            AdjacencyError::Region { source, .. } => source.code(),
            AdjacencyError::Config(_) => "invalid_config",
        }
    }
}

/// GeoJSON ingestion failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("json parse error: {0}")]
    Parse(String),

    #[error("feature {feature}: unsupported geometry type {kind:?}")]
    UnsupportedGeometry { feature: usize, kind: String },

    #[error("feature {feature}: malformed position")]
    MalformedPosition { feature: usize },

    #[error("feature {feature}: coordinate out of bounds")]
    OutOfBounds { feature: usize },

    #[error("caps exceeded: {0}")]
    CapsExceeded(String),
}

impl IngestError {
    pub fn code(&self) -> &'static str {
        match self {
            IngestError::Parse(_) => "json_parse",
            IngestError::UnsupportedGeometry { .. } => "unsupported_geometry",
            IngestError::MalformedPosition { .. } => "invalid_structure",
            IngestError::OutOfBounds { .. } => "out_of_bounds",
            IngestError::CapsExceeded(_) => "caps_exceeded",
        }
    }
}
