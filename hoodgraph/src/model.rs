use geo::{BoundingRect, MultiPolygon, Polygon};
use serde_json::{Map, Value};

use crate::geometry::bbox::BBox;
use crate::graph::AdjacencyGraph;

/// Polygonal area of a region: one ring set or several.
#[derive(Clone, Debug, PartialEq)]
pub enum RegionGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl RegionGeometry {
    /// Sub-polygons; a single polygon is its own only part.
    pub fn parts(&self) -> &[Polygon<f64>] {
        match self {
            RegionGeometry::Polygon(p) => std::slice::from_ref(p),
            RegionGeometry::MultiPolygon(mp) => &mp.0,
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, RegionGeometry::MultiPolygon(_))
    }

    pub fn bbox(&self) -> Option<BBox> {
        let rect = match self {
            RegionGeometry::Polygon(p) => p.bounding_rect(),
            RegionGeometry::MultiPolygon(mp) => mp.bounding_rect(),
        };
        rect.map(BBox::from)
    }

    /// Point count of each part's exterior ring, in part order.
    pub fn exterior_point_counts(&self) -> Vec<usize> {
        self.parts().iter().map(|p| p.exterior().0.len()).collect()
    }
}

impl From<Polygon<f64>> for RegionGeometry {
    fn from(p: Polygon<f64>) -> Self {
        RegionGeometry::Polygon(p)
    }
}

impl From<MultiPolygon<f64>> for RegionGeometry {
    fn from(mp: MultiPolygon<f64>) -> Self {
        RegionGeometry::MultiPolygon(mp)
    }
}

/// One polygonal area of a collection.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    /// Position in the collection, assigned when adjacency is computed.
    pub index: usize,
    pub label: String,
    /// Opaque feature properties carried through unchanged.
    pub properties: Map<String, Value>,
    pub geometry: RegionGeometry,
    /// Indices of adjacent regions, filled by the detector.
    pub adjacents: Vec<usize>,
}

impl Region {
    pub fn new(label: impl Into<String>, geometry: impl Into<RegionGeometry>) -> Self {
        Region {
            index: 0,
            label: label.into(),
            properties: Map::new(),
            geometry: geometry.into(),
            adjacents: Vec::new(),
        }
    }

    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = properties;
        self
    }

    /// Derived from the current geometry on every call.
    pub fn bbox(&self) -> Option<BBox> {
        self.geometry.bbox()
    }
}

/// Ordered regions; positions are the adjacency identifiers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionCollection {
    pub regions: Vec<Region>,
}

impl RegionCollection {
    pub fn new(regions: Vec<Region>) -> Self {
        RegionCollection { regions }
    }

    #[inline] pub fn len(&self) -> usize { self.regions.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.regions.is_empty() }
    #[inline] pub fn get(&self, index: usize) -> Option<&Region> { self.regions.get(index) }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn push(&mut self, region: Region) {
        self.regions.push(region);
    }

    /// Assign indices 0..N-1 and clear any previous adjacency.
    pub fn reset_adjacency(&mut self) {
        for (i, r) in self.regions.iter_mut().enumerate() {
            r.index = i;
            r.adjacents.clear();
        }
    }

    /// Rebuild the symmetric graph from the regions' adjacency lists.
    pub fn adjacency_graph(&self) -> AdjacencyGraph {
        AdjacencyGraph::from_lists(self.regions.iter().map(|r| r.adjacents.clone()).collect())
    }

    /// Copy the graph's lists into the regions, replacing existing ones.
    pub fn apply_graph(&mut self, graph: &AdjacencyGraph) {
        for (i, r) in self.regions.iter_mut().enumerate() {
            r.adjacents = graph.neighbors(i).to_vec();
        }
    }
}

impl FromIterator<Region> for RegionCollection {
    fn from_iter<T: IntoIterator<Item = Region>>(iter: T) -> Self {
        RegionCollection { regions: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a RegionCollection {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
