//! Timing harness for the sparse generation step.
//!
//! Runs pattern and random-soup scenarios and reports time per generation.
//! Use with `--release` for meaningful results.

use rand::RngCore;
use rand::SeedableRng;
use std::time::Instant;
use sparse_life::sparselife::patterns::{ACORN, R_PENTOMINO};
use sparse_life::{SparseLife, SparseLifeConfig};

struct Scenario {
    name: &'static str,
    cells: Vec<(i64, i64)>,
    iters: u64,
}

fn soup(size: i64, density: f64, seed: u64) -> Vec<(i64, i64)> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let threshold = (u64::MAX as f64 * density) as u64;
    let mut cells = Vec::new();
    for y in 0..size {
        for x in 0..size {
            if rng.next_u64() <= threshold {
                cells.push((x, y));
            }
        }
    }
    cells
}

fn run_scenario(s: &Scenario) -> (f64, u64, usize) {
    let config = SparseLifeConfig::default().seed(s.cells.iter().copied());
    let Ok(mut sim) = SparseLife::with_config(config) else {
        panic!("scenario {} has unaddressable cells", s.name);
    };

    let start = Instant::now();
    sim.step_n(s.iters);
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;
    (total_ms, sim.population(), sim.last_stats().candidates)
}

fn main() {
    let scenarios = [
        Scenario {
            name: "r-pentomino",
            cells: R_PENTOMINO.cells.to_vec(),
            iters: 1103,
        },
        Scenario {
            name: "acorn",
            cells: ACORN.cells.to_vec(),
            iters: 2000,
        },
        Scenario {
            name: "soup-128",
            cells: soup(128, 0.35, 0xA1),
            iters: 200,
        },
        Scenario {
            name: "soup-512",
            cells: soup(512, 0.35, 0xB2),
            iters: 50,
        },
    ];

    println!(
        "{:<14} {:>8} {:>12} {:>12} {:>12} {:>10}",
        "Scenario", "Iters", "Population", "Candidates", "Total(ms)", "Avg(ms)"
    );
    println!("{}", "-".repeat(73));

    for s in &scenarios {
        let (total_ms, pop, candidates) = run_scenario(s);
        let avg_ms = total_ms / s.iters as f64;
        println!(
            "{:<14} {:>8} {:>12} {:>12} {:>12.1} {:>10.4}",
            s.name, s.iters, pop, candidates, total_ms, avg_ms
        );
    }
}
