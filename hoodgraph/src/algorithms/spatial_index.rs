//! R-tree over region bounding boxes.
//!
//! Boxes are grown by a tiny epsilon on insert so that float noise at a
//! shared edge cannot drop a candidate. Results are a superset of the real
//! neighbours; exact tests decide.

use rstar::{RTree, RTreeObject, AABB};

use crate::geometry::bbox::BBox;

#[derive(Clone, Debug)]
pub struct IndexedBox {
    index: usize, // position of the region in its collection
    bbox: BBox,
}

impl IndexedBox {
    #[inline] pub fn index(&self) -> usize { self.index }
}

impl RTreeObject for IndexedBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min(), self.bbox.max())
    }
}

#[derive(Clone, Debug)]
pub struct SpatialIndex {
    tree: RTree<IndexedBox>,
}

impl SpatialIndex {
    /// Bulk-load `(index, bbox)` pairs; every box is grown by `epsilon`.
    pub fn from_boxes<I>(boxes: I, epsilon: f64) -> Self
    where
        I: IntoIterator<Item = (usize, BBox)>,
    {
        let items = boxes
            .into_iter()
            .map(|(index, bbox)| IndexedBox { index, bbox: bbox.grow(epsilon) })
            .collect();
        SpatialIndex { tree: RTree::bulk_load(items) }
    }

    #[inline] pub fn len(&self) -> usize { self.tree.size() }
    #[inline] pub fn is_empty(&self) -> bool { self.tree.size() == 0 }

    /// Indices whose stored box intersects `query` (edges inclusive), in no
    /// particular order.
    pub fn query(&self, query: &BBox) -> Vec<usize> {
        let envelope = AABB::from_corners(query.min(), query.max());
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(IndexedBox::index)
            .collect()
    }
}
