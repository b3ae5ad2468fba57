//! Area-based (Visvalingam) ring simplification.
//!
//! Points are removed one at a time, always the one whose triangle with its
//! current neighbours has the smallest effective area. The first and last
//! points of the ring are never removed, so a closed ring stays closed. Equal
//! areas resolve to the earliest point index, which keeps the output
//! deterministic.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use geo::{Coord, LineString, Polygon};

use crate::error::SimplifyError;
use crate::geometry::tolerance::{triangle_area, MIN_RING_POINTS};

#[derive(Clone, Copy, Debug)]
struct Candidate {
    area: f64,
    index: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    // Reversed so the max-heap pops the smallest area, then the lowest index.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .area
            .total_cmp(&self.area)
            .then_with(|| other.index.cmp(&self.index))
    }
}

#[inline]
fn area_at(ring: &[Coord<f64>], a: usize, b: usize, c: usize) -> f64 {
    triangle_area(ring[a].x, ring[a].y, ring[b].x, ring[b].y, ring[c].x, ring[c].y)
}

/// Reduce `ring` to exactly `target` points, all taken from the input.
pub fn simplify_to_count(
    ring: &[Coord<f64>],
    target: usize,
) -> Result<Vec<Coord<f64>>, SimplifyError> {
    let n = ring.len();
    if n < MIN_RING_POINTS || target < MIN_RING_POINTS || target > n {
        return Err(SimplifyError::InsufficientRing {
            points: n,
            required: target.max(MIN_RING_POINTS),
        });
    }
    if target == n {
        return Ok(ring.to_vec());
    }

    let last = n - 1;
    // Doubly linked list over surviving points; ends are fixed.
    let mut prev: Vec<usize> = (0..n).map(|i| i.saturating_sub(1)).collect();
    let mut next: Vec<usize> = (0..n).map(|i| (i + 1).min(last)).collect();
    let mut area = vec![f64::INFINITY; n];
    let mut removed = vec![false; n];
    let mut heap = BinaryHeap::with_capacity(n);
    for i in 1..last {
        area[i] = area_at(ring, i - 1, i, i + 1);
        heap.push(Candidate { area: area[i], index: i });
    }

    let mut remaining = n;
    let mut floor = 0.0f64;
    while remaining > target {
        let Some(c) = heap.pop() else { break };
        let i = c.index;
        if removed[i] || c.area.to_bits() != area[i].to_bits() {
            continue; // stale entry
        }
        removed[i] = true;
        remaining -= 1;
        if c.area > floor {
            floor = c.area;
        }
        let (p, q) = (prev[i], next[i]);
        next[p] = q;
        prev[q] = p;
        for k in [p, q] {
            if k == 0 || k == last {
                continue;
            }
            // Effective area never drops below what was already removed.
            let a = area_at(ring, prev[k], k, next[k]).max(floor);
            area[k] = a;
            heap.push(Candidate { area: a, index: k });
        }
    }

    Ok(ring
        .iter()
        .zip(removed.iter())
        .filter(|(_, gone)| !**gone)
        .map(|(c, _)| *c)
        .collect())
}

/// Keep `round(len * fraction)` points, clamped to a valid ring size.
pub fn simplify_percent(
    ring: &[Coord<f64>],
    fraction: f64,
) -> Result<Vec<Coord<f64>>, SimplifyError> {
    let n = ring.len();
    let wanted = if fraction.is_finite() {
        (n as f64 * fraction).round().max(0.0) as usize
    } else {
        n
    };
    let target = wanted.clamp(MIN_RING_POINTS, n.max(MIN_RING_POINTS));
    simplify_to_count(ring, target)
}

/// Drop holes and simplify the exterior ring in relative mode.
pub fn simplify_exterior(
    polygon: &Polygon<f64>,
    fraction: f64,
) -> Result<Polygon<f64>, SimplifyError> {
    let coords = simplify_percent(&polygon.exterior().0, fraction)?;
    Ok(Polygon::new(LineString::from(coords), vec![]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f64, f64)]) -> Vec<Coord<f64>> {
        points.iter().map(|&(x, y)| Coord { x, y }).collect()
    }

    #[test]
    fn removes_collinear_point_first() {
        // (1,0) sits on the bottom edge and has zero area.
        let r = ring(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]);
        let out = simplify_to_count(&r, 5).unwrap();
        assert_eq!(out, ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]));
    }

    #[test]
    fn ties_resolve_to_earliest_index() {
        // Both midpoints are collinear (area 0); the bottom one comes first.
        let r = ring(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (1.0, 2.0),
            (0.0, 2.0),
            (0.0, 0.0),
        ]);
        let out = simplify_to_count(&r, 6).unwrap();
        assert_eq!(out.len(), 6);
        assert!(!out.contains(&Coord { x: 1.0, y: 0.0 }));
        assert!(out.contains(&Coord { x: 1.0, y: 2.0 }));
    }

    #[test]
    fn keeps_ring_closed() {
        let r: Vec<Coord<f64>> = (0..=32)
            .map(|i| {
                let t = (i % 32) as f64 / 32.0 * std::f64::consts::TAU;
                Coord { x: t.cos(), y: t.sin() }
            })
            .collect();
        let out = simplify_to_count(&r, 9).unwrap();
        assert_eq!(out.len(), 9);
        assert_eq!(out.first(), out.last());
    }

    #[test]
    fn target_equal_to_length_is_identity() {
        let r = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert_eq!(simplify_to_count(&r, 4).unwrap(), r);
    }

    #[test]
    fn short_ring_is_rejected() {
        let r = ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
        assert_eq!(
            simplify_to_count(&r, 3),
            Err(SimplifyError::InsufficientRing { points: 3, required: 4 })
        );
    }

    #[test]
    fn target_above_length_is_rejected() {
        let r = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert_eq!(
            simplify_to_count(&r, 6),
            Err(SimplifyError::InsufficientRing { points: 4, required: 6 })
        );
    }

    #[test]
    fn percent_mode_clamps_to_minimum() {
        let r = ring(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]);
        assert_eq!(simplify_percent(&r, 0.1).unwrap().len(), 4);
        assert_eq!(simplify_percent(&r, 1.0).unwrap().len(), 6);
    }
}
