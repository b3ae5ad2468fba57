//! Collection-wide adjacency detection.
//!
//! One algorithm, two candidate sources. Each unordered pair `{i, j}` with
//! `i < j` is decided exactly once, at center `i`, by testing the bloated
//! form of region `i` against the unmodified region `j`:
//!
//! - [`Strategy::Exhaustive`] offers every `j > i`.
//! - [`Strategy::Indexed`] offers the `j > i` whose stored (epsilon-grown)
//!   bounding box meets the bloated center's bounding box.
//!
//! A pair can only overlap if those boxes meet, so both sources confirm the
//! same pairs; the indexed one just skips hopeless tests.

use std::borrow::Cow;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::algorithms::robustify::{bloat_and_simplify, bloat_geometry};
use crate::algorithms::spatial_index::SpatialIndex;
use crate::config::{AdjacencyConfig, Strategy};
use crate::engine::{GeoEngine, GeometryEngine};
use crate::error::{AdjacencyError, ConfigError, RegionError};
use crate::graph::AdjacencyGraph;
use crate::model::{Region, RegionCollection, RegionGeometry};

/// Emitted once per finished center region.
#[derive(Clone, Copy, Debug)]
pub struct RegionProgress<'a> {
    pub completed: usize,
    pub total: usize,
    pub index: usize,
    pub label: &'a str,
    pub adjacents: &'a [usize],
}

pub trait ProgressObserver {
    fn on_region(&mut self, progress: &RegionProgress<'_>);
}

impl<F: FnMut(&RegionProgress<'_>)> ProgressObserver for F {
    fn on_region(&mut self, progress: &RegionProgress<'_>) {
        self(progress)
    }
}

/// Observer that ignores progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_region(&mut self, _progress: &RegionProgress<'_>) {}
}

/// Summary of one detector run.
#[derive(Clone, Debug, PartialEq)]
pub struct AdjacencyReport {
    pub strategy: Strategy,
    pub regions: usize,
    /// Exact overlap tests performed.
    pub intersection_tests: usize,
    pub adjacent_pairs: usize,
    /// `None` where no monotonic clock is available (wasm32).
    pub elapsed: Option<Duration>,
}

enum Candidates {
    Scan,
    Index(SpatialIndex),
}

struct Row {
    adjacent: Vec<usize>,
    tests: usize,
}

#[cfg(not(target_arch = "wasm32"))]
fn clock() -> Option<Instant> {
    Some(Instant::now())
}

#[cfg(target_arch = "wasm32")]
fn clock() -> Option<Instant> {
    None
}

fn region_error(region: &Region, source: RegionError) -> AdjacencyError {
    AdjacencyError::Region { index: region.index, label: region.label.clone(), source }
}

pub struct AdjacencyDetector<E = GeoEngine> {
    engine: E,
    config: AdjacencyConfig,
}

impl AdjacencyDetector<GeoEngine> {
    pub fn new(config: AdjacencyConfig) -> Result<Self, ConfigError> {
        Self::with_engine(GeoEngine, config)
    }
}

impl<E: GeometryEngine> AdjacencyDetector<E> {
    pub fn with_engine(engine: E, config: AdjacencyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(AdjacencyDetector { engine, config })
    }

    #[inline] pub fn config(&self) -> &AdjacencyConfig { &self.config }
    #[inline] pub fn engine(&self) -> &E { &self.engine }

    /// Bloated stand-in for `region` using the configured margin.
    pub fn bloat(&self, region: &Region) -> Result<Region, AdjacencyError> {
        bloat_and_simplify(&self.engine, region, self.config.bloat_margin)
            .map_err(|e| region_error(region, e))
    }

    /// Positions in `others` whose geometry the bloated `center` overlaps.
    /// `center` itself is not excluded if it appears in `others`.
    pub fn find_adjacent(
        &self,
        center: &Region,
        others: &[Region],
    ) -> Result<Vec<usize>, AdjacencyError> {
        let bloated = bloat_geometry(&self.engine, &center.geometry, self.config.bloat_margin)
            .map_err(|e| region_error(center, e))?;
        Ok(others
            .iter()
            .enumerate()
            .filter(|(_, r)| self.engine.overlaps(&bloated, &r.geometry))
            .map(|(i, _)| i)
            .collect())
    }

    /// Fill `index` and `adjacents` in place; always starts from scratch.
    pub fn detect(&self, collection: &mut RegionCollection) -> Result<AdjacencyReport, AdjacencyError> {
        self.detect_with_progress(collection, &mut NoProgress)
    }

    /// Run on a deep copy and leave `collection` untouched.
    pub fn detect_cloned(
        &self,
        collection: &RegionCollection,
    ) -> Result<(RegionCollection, AdjacencyReport), AdjacencyError> {
        let mut copy = collection.clone();
        let report = self.detect(&mut copy)?;
        Ok((copy, report))
    }

    /// `pure` runs on a copy and returns it; otherwise `collection` is
    /// updated and handed back.
    pub fn make_indexed_collection<'a>(
        &self,
        collection: &'a mut RegionCollection,
        pure: bool,
    ) -> Result<Cow<'a, RegionCollection>, AdjacencyError> {
        if pure {
            let (copy, _) = self.detect_cloned(collection)?;
            Ok(Cow::Owned(copy))
        } else {
            self.detect(collection)?;
            Ok(Cow::Borrowed(collection))
        }
    }

    /// On error the collection is left partially updated; rerun from a fresh
    /// copy.
    pub fn detect_with_progress(
        &self,
        collection: &mut RegionCollection,
        observer: &mut dyn ProgressObserver,
    ) -> Result<AdjacencyReport, AdjacencyError> {
        let start = clock();
        collection.reset_adjacency();
        let n = collection.len();
        info!(regions = n, strategy = ?self.config.strategy, "initializing adjacency");

        let candidates = self.candidates(&collection.regions);
        let mut graph = AdjacencyGraph::new(n);
        let mut tests = 0usize;
        for center in 0..n {
            let row = self.evaluate_row(&collection.regions, center, &candidates, |j| {
                graph.contains(center, j)
            })?;
            tests += row.tests;
            self.record(&collection.regions, &mut graph, center, row, observer);
        }

        collection.apply_graph(&graph);
        Ok(self.finish(n, tests, &graph, start))
    }

    fn candidates(&self, regions: &[Region]) -> Candidates {
        match self.config.strategy {
            Strategy::Exhaustive => Candidates::Scan,
            Strategy::Indexed => {
                // Empty geometries have no box; they fail when bloated as center.
                let boxes = regions
                    .iter()
                    .enumerate()
                    .filter_map(|(i, r)| self.engine.bounding_box(&r.geometry).map(|b| (i, b)));
                Candidates::Index(SpatialIndex::from_boxes(boxes, self.config.index_epsilon))
            }
        }
    }

    fn candidate_ids(
        &self,
        regions: &[Region],
        center: usize,
        bloated: &RegionGeometry,
        candidates: &Candidates,
    ) -> Result<Vec<usize>, AdjacencyError> {
        match candidates {
            Candidates::Scan => Ok((center + 1..regions.len()).collect()),
            Candidates::Index(index) => {
                let query = self
                    .engine
                    .bounding_box(bloated)
                    .ok_or_else(|| region_error(&regions[center], RegionError::MissingBoundingBox))?
                    .grow(self.config.index_epsilon);
                let mut ids: Vec<usize> =
                    index.query(&query).into_iter().filter(|&j| j > center).collect();
                ids.sort_unstable();
                Ok(ids)
            }
        }
    }

    fn evaluate_row(
        &self,
        regions: &[Region],
        center: usize,
        candidates: &Candidates,
        known: impl Fn(usize) -> bool,
    ) -> Result<Row, AdjacencyError> {
        let region = &regions[center];
        // Reused for every candidate of this row, then dropped.
        let bloated = bloat_geometry(&self.engine, &region.geometry, self.config.bloat_margin)
            .map_err(|e| region_error(region, e))?;
        let mut row = Row { adjacent: Vec::new(), tests: 0 };
        for j in self.candidate_ids(regions, center, &bloated, candidates)? {
            if j == center || known(j) {
                continue;
            }
            row.tests += 1;
            if self.engine.overlaps(&bloated, &regions[j].geometry) {
                row.adjacent.push(j);
            }
        }
        Ok(row)
    }

    fn record(
        &self,
        regions: &[Region],
        graph: &mut AdjacencyGraph,
        center: usize,
        row: Row,
        observer: &mut dyn ProgressObserver,
    ) {
        for j in row.adjacent {
            graph.link(center, j);
        }
        let region = &regions[center];
        debug!(
            index = center,
            total = regions.len(),
            label = %region.label,
            adjacents = ?graph.neighbors(center),
            "finished region"
        );
        observer.on_region(&RegionProgress {
            completed: center + 1,
            total: regions.len(),
            index: center,
            label: &region.label,
            adjacents: graph.neighbors(center),
        });
    }

    fn finish(
        &self,
        regions: usize,
        intersection_tests: usize,
        graph: &AdjacencyGraph,
        start: Option<Instant>,
    ) -> AdjacencyReport {
        let elapsed = start.map(|s| s.elapsed());
        let report = AdjacencyReport {
            strategy: self.config.strategy,
            regions,
            intersection_tests,
            adjacent_pairs: graph.pair_count(),
            elapsed,
        };
        info!(
            regions,
            intersection_tests,
            adjacent_pairs = report.adjacent_pairs,
            elapsed_ms = elapsed.map_or(0, |d| d.as_millis() as u64),
            "adjacency complete"
        );
        report
    }
}

#[cfg(feature = "threads")]
impl<E: GeometryEngine + Sync> AdjacencyDetector<E> {
    /// Rows evaluated on the rayon pool, merged in center order. Output is
    /// identical to [`detect_with_progress`](Self::detect_with_progress); the
    /// reported error is the one of the lowest failing center.
    pub fn detect_parallel(
        &self,
        collection: &mut RegionCollection,
        observer: &mut dyn ProgressObserver,
    ) -> Result<AdjacencyReport, AdjacencyError> {
        use rayon::prelude::*;

        let start = clock();
        collection.reset_adjacency();
        let n = collection.len();
        info!(regions = n, strategy = ?self.config.strategy, "initializing adjacency (parallel)");

        let candidates = self.candidates(&collection.regions);
        let regions = &collection.regions;
        // Only j > center is ever offered, so no row depends on another.
        let rows: Vec<Result<Row, AdjacencyError>> = (0..n)
            .into_par_iter()
            .map(|center| self.evaluate_row(regions, center, &candidates, |_| false))
            .collect();

        let mut graph = AdjacencyGraph::new(n);
        let mut tests = 0usize;
        for (center, row) in rows.into_iter().enumerate() {
            let row = row?;
            tests += row.tests;
            self.record(regions, &mut graph, center, row, observer);
        }

        collection.apply_graph(&graph);
        Ok(self.finish(n, tests, &graph, start))
    }
}
