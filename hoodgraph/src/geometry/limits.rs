// Centralized ingestion limits to harden against untrusted GeoJSON input

// Collection size caps
pub const MAX_REGIONS: usize = 200_000;
pub const MAX_PARTS_PER_REGION: usize = 10_000;

// Rings
pub const MAX_RING_POINTS: usize = 500_000;
pub const MAX_POINTS_TOTAL: usize = 20_000_000;

// Numeric bounds
pub const COORD_MIN: f64 = -1.0e9;
pub const COORD_MAX: f64 = 1.0e9;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }
