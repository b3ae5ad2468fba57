// Centralized tolerances and defaults for adjacency detection

// Outward buffer applied to the tested region (degrees lon/lat by default)
pub const DEFAULT_BLOAT_MARGIN: f64 = 0.0003;
// Bounding-box growth guarding float compares at the index query edge
pub const DEFAULT_INDEX_EPSILON: f64 = 1e-7;

// A closed ring needs three distinct points plus the closing point
pub const MIN_RING_POINTS: usize = 4;

#[inline] pub fn is_valid_margin(x: f64) -> bool { x.is_finite() && x >= 0.0 }

#[inline]
pub fn triangle_area(ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64) -> f64 {
    ((bx - ax) * (cy - ay) - (by - ay) * (cx - ax)).abs() * 0.5
}
