use geo::{Coord, LineString, Polygon};
use hoodgraph::geometry::simplify::simplify_to_count;
use hoodgraph::{
    bloat_and_simplify, AdjacencyConfig, AdjacencyDetector, GeoEngine, Region, RegionCollection,
    RegionError, Strategy as Candidates,
};
use proptest::prelude::*;

// Grid unit well below the bloat margin so sub-margin gaps are common.
const UNIT: f64 = 0.005;
const MARGIN: f64 = 0.01;

#[derive(Clone, Debug)]
struct Rect {
    x: u8,
    y: u8,
    w: u8,
    h: u8,
}

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (0u8..40, 0u8..40, 4u8..24, 4u8..24).prop_map(|(x, y, w, h)| Rect { x, y, w, h })
}

fn to_region(i: usize, r: &Rect) -> Region {
    let (x0, y0) = (r.x as f64 * UNIT, r.y as f64 * UNIT);
    let (x1, y1) = ((r.x + r.w) as f64 * UNIT, (r.y + r.h) as f64 * UNIT);
    let ring = LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]);
    Region::new(format!("r{i}"), Polygon::new(ring, vec![]))
}

fn collection(rects: &[Rect]) -> RegionCollection {
    rects.iter().enumerate().map(|(i, r)| to_region(i, r)).collect()
}

fn detect(coll: &mut RegionCollection, strategy: Candidates) -> usize {
    let cfg = AdjacencyConfig::default().with_bloat_margin(MARGIN).with_strategy(strategy);
    let d = AdjacencyDetector::new(cfg).unwrap();
    d.detect(coll).unwrap().adjacent_pairs
}

fn ring_strategy() -> impl Strategy<Value = Vec<Coord<f64>>> {
    prop::collection::vec((-50i16..50, -50i16..50), 3..40).prop_map(|pts| {
        let mut ring: Vec<Coord<f64>> =
            pts.into_iter().map(|(x, y)| Coord { x: x as f64, y: y as f64 }).collect();
        ring.push(ring[0]);
        ring
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 24, .. ProptestConfig::default() })]

    #[test]
    fn strategies_agree(rects in prop::collection::vec(rect_strategy(), 0..7)) {
        let mut exhaustive = collection(&rects);
        let mut indexed = exhaustive.clone();
        let a = detect(&mut exhaustive, Candidates::Exhaustive);
        let b = detect(&mut indexed, Candidates::Indexed);
        prop_assert_eq!(a, b);
        prop_assert_eq!(exhaustive, indexed);
    }

    #[test]
    fn adjacency_is_a_simple_symmetric_graph(rects in prop::collection::vec(rect_strategy(), 0..7)) {
        let mut coll = collection(&rects);
        detect(&mut coll, Candidates::Indexed);
        prop_assert!(coll.adjacency_graph().check_invariants().is_ok());
        for (i, r) in coll.iter().enumerate() {
            prop_assert_eq!(r.index, i);
            prop_assert!(r.adjacents.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[derive(Clone, Debug)]
struct Outline {
    w: u8,
    h: u8,
    repeats: [u8; 4],
    midpoints: u8,
}

fn outline_strategy() -> impl Strategy<Value = Outline> {
    (1u8..10, 1u8..10, prop::array::uniform4(1u8..6), 0u8..4)
        .prop_map(|(w, h, repeats, midpoints)| Outline { w, h, repeats, midpoints })
}

/// Rectangle with each corner repeated and extra points along the bottom edge.
fn outline_region(o: &Outline) -> Region {
    let (w, h) = (o.w as f64, o.h as f64);
    let corners = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)];
    let mut coords = Vec::new();
    for (k, &(x, y)) in corners.iter().enumerate() {
        coords.extend(std::iter::repeat((x, y)).take(o.repeats[k] as usize));
        if k == 0 {
            let steps = o.midpoints as f64 + 1.0;
            coords.extend((1..=o.midpoints).map(|m| (w * m as f64 / steps, 0.0)));
        }
    }
    coords.push((0.0, 0.0));
    Region::new("outline", Polygon::new(LineString::from(coords), vec![]))
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn bloat_keeps_point_count_or_rejects(outline in outline_strategy(), wide in any::<bool>()) {
        let region = outline_region(&outline);
        let p = region.geometry.exterior_point_counts()[0];
        let margin = if wide { 0.01 } else { 0.0003 };
        match bloat_and_simplify(&GeoEngine, &region, margin) {
            Ok(bloated) => {
                prop_assert_eq!(bloated.geometry.exterior_point_counts(), vec![p]);
            }
            Err(e) => {
                let rejected = matches!(e, RegionError::InsufficientRing { required, .. } if required == p);
                prop_assert!(rejected, "unexpected {:?}", e);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 512, .. ProptestConfig::default() })]

    #[test]
    fn simplify_keeps_exactly_k_original_points(ring in ring_strategy(), seed in any::<u16>()) {
        let n = ring.len();
        let k = 4 + (seed as usize) % (n - 3);
        let out = simplify_to_count(&ring, k).unwrap();
        prop_assert_eq!(out.len(), k);
        prop_assert_eq!(out[0], ring[0]);
        prop_assert_eq!(out[k - 1], ring[n - 1]);
        // Survivors appear in their original order.
        let mut cursor = 0usize;
        for c in &out {
            let pos = ring[cursor..].iter().position(|p| p == c);
            prop_assert!(pos.is_some());
            cursor += pos.unwrap_or(0) + 1;
        }
    }
}
