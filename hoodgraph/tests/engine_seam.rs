//! Detector control flow against a bbox-only engine.

use std::sync::atomic::{AtomicUsize, Ordering};

use geo::{polygon, LineString, MultiPolygon, Polygon};
use hoodgraph::{
    AdjacencyConfig, AdjacencyDetector, AdjacencyError, BBox, GeometryEngine, Region,
    RegionCollection, RegionGeometry, Strategy,
};

/// Regions overlap when their boxes share positive area; buffering is a no-op.
#[derive(Default)]
struct BoxEngine {
    overlap_calls: AtomicUsize,
    refuse_buffer: bool,
}

impl GeometryEngine for BoxEngine {
    fn bounding_box(&self, geometry: &RegionGeometry) -> Option<BBox> {
        geometry.bbox()
    }

    fn buffer_exterior(&self, exterior: &LineString<f64>, _margin: f64) -> Option<LineString<f64>> {
        if self.refuse_buffer {
            None
        } else {
            Some(exterior.clone())
        }
    }

    fn union(&self, parts: &[Polygon<f64>]) -> MultiPolygon<f64> {
        MultiPolygon::new(parts.to_vec())
    }

    fn overlaps(&self, a: &RegionGeometry, b: &RegionGeometry) -> bool {
        self.overlap_calls.fetch_add(1, Ordering::Relaxed);
        match (a.bbox(), b.bbox()) {
            (Some(a), Some(b)) => {
                a.min_x < b.max_x && b.min_x < a.max_x && a.min_y < b.max_y && b.min_y < a.max_y
            }
            _ => false,
        }
    }
}

fn wide_square(label: &str, x0: f64) -> Region {
    Region::new(label, polygon![(x: x0, y: 0.0), (x: x0 + 2.0, y: 0.0), (x: x0 + 2.0, y: 2.0), (x: x0, y: 2.0)])
}

fn strip() -> RegionCollection {
    RegionCollection::new(vec![
        wide_square("a", 0.0),
        wide_square("b", 1.0),
        wide_square("c", 2.0),
        wide_square("far", 10.0),
    ])
}

fn run(strategy: Strategy) -> (RegionCollection, usize, usize) {
    let d = AdjacencyDetector::with_engine(
        BoxEngine::default(),
        AdjacencyConfig::default().with_strategy(strategy),
    )
    .unwrap();
    let mut coll = strip();
    let report = d.detect(&mut coll).unwrap();
    let calls = d.engine().overlap_calls.load(Ordering::Relaxed);
    (coll, report.intersection_tests, calls)
}

#[test]
fn each_pair_is_tested_at_most_once() {
    let (coll, tests, calls) = run(Strategy::Exhaustive);
    assert_eq!(tests, 6);
    assert_eq!(calls, 6);
    assert_eq!(coll.regions[0].adjacents, vec![1]);
    assert_eq!(coll.regions[1].adjacents, vec![0, 2]);
    assert_eq!(coll.regions[2].adjacents, vec![1]);
    assert!(coll.regions[3].adjacents.is_empty());
}

#[test]
fn index_prunes_but_agrees() {
    let (exhaustive, _, _) = run(Strategy::Exhaustive);
    let (indexed, tests, calls) = run(Strategy::Indexed);
    assert_eq!(exhaustive, indexed);
    // a: {b, c}, b: {c}, c and far: nothing in reach
    assert_eq!(tests, 3);
    assert_eq!(calls, 3);
}

#[test]
fn degenerate_buffer_names_the_region() {
    let engine = BoxEngine { refuse_buffer: true, ..BoxEngine::default() };
    let d = AdjacencyDetector::with_engine(engine, AdjacencyConfig::default()).unwrap();
    let mut coll = strip();
    let err = d.detect(&mut coll).unwrap_err();
    assert_eq!(err.code(), "degenerate_buffer");
    assert!(matches!(err, AdjacencyError::Region { index: 0, .. }));
    assert_eq!(d.engine().overlap_calls.load(Ordering::Relaxed), 0);
}
