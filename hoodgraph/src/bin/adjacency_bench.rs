#[cfg(feature = "bench_adjacency")]
use hoodgraph::{AdjacencyConfig, AdjacencyDetector, Region, RegionCollection, Strategy};
#[cfg(feature = "bench_adjacency")]
use std::time::Instant;

#[cfg(not(feature = "bench_adjacency"))]
fn main() {
    panic!("adjacency_bench requires --features bench_adjacency");
}

#[cfg(feature = "bench_adjacency")]
fn build_grid(w: usize, h: usize) -> RegionCollection {
    // Unit cells with a little jitter on the shared edges.
    let mut regions = Vec::with_capacity(w * h);
    for j in 0..h {
        for i in 0..w {
            let (x, y) = (i as f64, j as f64);
            let jitter = ((i * 7 + j * 13) % 5) as f64 * 1e-6;
            let cell = geo::polygon![
                (x: x + jitter, y: y),
                (x: x + 1.0, y: y + jitter),
                (x: x + 1.0 - jitter, y: y + 1.0),
                (x: x, y: y + 1.0 - jitter)
            ];
            regions.push(Region::new(format!("cell-{i}-{j}"), cell));
        }
    }
    RegionCollection::new(regions)
}

#[cfg(feature = "bench_adjacency")]
fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut w = 30usize;
    let mut h = 30usize;
    let mut strategies = vec![Strategy::Indexed, Strategy::Exhaustive];
    for a in &args[1..] {
        if let Some(val) = a.strip_prefix("--w=") {
            if let Ok(v) = val.parse() {
                w = v;
            }
        } else if let Some(val) = a.strip_prefix("--h=") {
            if let Ok(v) = val.parse() {
                h = v;
            }
        } else if let Some(val) = a.strip_prefix("--strategy=") {
            strategies = match val {
                "indexed" => vec![Strategy::Indexed],
                "exhaustive" => vec![Strategy::Exhaustive],
                _ => strategies,
            };
        }
    }

    let grid = build_grid(w, h);
    for strategy in strategies {
        let config = AdjacencyConfig::default().with_bloat_margin(0.01).with_strategy(strategy);
        let detector = match AdjacencyDetector::new(config) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("invalid config: {e}");
                std::process::exit(2);
            }
        };
        let mut coll = grid.clone();
        let t0 = Instant::now();
        match detector.detect(&mut coll) {
            Ok(report) => println!(
                "grid={}x{} strategy={:?} tests={} pairs={} total_ms={:.3}",
                w,
                h,
                strategy,
                report.intersection_tests,
                report.adjacent_pairs,
                t0.elapsed().as_secs_f64() * 1000.0
            ),
            Err(e) => {
                eprintln!("FAIL: {e}");
                std::process::exit(1);
            }
        }
    }
}
