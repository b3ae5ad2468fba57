use geo::Rect;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in input coordinate units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BBox { min_x, min_y, max_x, max_y }
    }

    /// Grow every side by `d`.
    #[inline]
    pub fn grow(self, d: f64) -> BBox {
        BBox::new(self.min_x - d, self.min_y - d, self.max_x + d, self.max_y + d)
    }

    /// Closed-interval overlap: boxes sharing only an edge or corner intersect.
    #[inline]
    pub fn intersects(&self, other: &BBox) -> bool {
        !(self.max_x < other.min_x
            || other.max_x < self.min_x
            || self.max_y < other.min_y
            || other.max_y < self.min_y)
    }

    #[inline] pub fn min(&self) -> [f64; 2] { [self.min_x, self.min_y] }
    #[inline] pub fn max(&self) -> [f64; 2] { [self.max_x, self.max_y] }
}

impl From<Rect<f64>> for BBox {
    fn from(r: Rect<f64>) -> Self {
        BBox::new(r.min().x, r.min().y, r.max().x, r.max().y)
    }
}
