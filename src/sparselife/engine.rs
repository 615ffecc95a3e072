//! Generation step over a sparse live set.
//!
//! Only live cells and the dead cells touching them are examined, so the cost
//! of a step is O(live + candidates) regardless of how far the pattern has
//! spread. The input set is never mutated; every step returns a fresh set.

use tracing::trace;

use super::codec::{self, CellKey};
use super::key_set::KeySet;
use super::live_set::LiveSet;
use super::rules::{NEIGHBOR_OFFSETS, next_state};

/// Counters describing the last computed generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub survivors: usize,
    pub births: usize,
    /// Distinct dead cells examined for birth.
    pub candidates: usize,
}

/// Owns the scratch buffers reused between steps. The scratch never leaks
/// into results: a reused engine and a fresh one produce identical sets.
#[derive(Default)]
pub struct GenerationEngine {
    seen: KeySet,
    candidates: Vec<CellKey>,
    last_stats: StepStats,
}

/// Compute the next generation with a fresh engine.
pub fn step(current: &LiveSet) -> LiveSet {
    GenerationEngine::new().step(current)
}

/// Keys of the neighbours of `(x, y)` that lie on the addressable lattice.
#[inline]
fn neighbor_keys(x: i64, y: i64) -> impl Iterator<Item = CellKey> {
    NEIGHBOR_OFFSETS.into_iter().filter_map(move |(dx, dy)| {
        let nx = x.checked_add(dx)?;
        let ny = y.checked_add(dy)?;
        codec::encode(nx, ny).ok()
    })
}

impl GenerationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_stats(&self) -> StepStats {
        self.last_stats
    }

    pub fn step(&mut self, current: &LiveSet) -> LiveSet {
        let mut next = LiveSet::with_capacity(current.len());
        let mut stats = StepStats::default();

        self.seen.begin_step();
        self.seen.reserve_for(current.len().saturating_mul(3));
        self.candidates.clear();

        // Live phase: survivors, and nominate dead neighbours for birth.
        for key in current {
            let (x, y) = key.coords();
            let mut live_neighbors = 0u8;
            for neighbor in neighbor_keys(x, y) {
                if current.contains(neighbor) {
                    live_neighbors += 1;
                } else if self.seen.insert(neighbor) {
                    self.candidates.push(neighbor);
                }
            }
            if next_state(true, live_neighbors) {
                next.insert(key);
                stats.survivors += 1;
            }
        }

        // Candidate phase: each dead cell is visited once.
        for &candidate in &self.candidates {
            let (x, y) = candidate.coords();
            let live_neighbors = neighbor_keys(x, y)
                .filter(|&neighbor| current.contains(neighbor))
                .count() as u8;
            if next_state(false, live_neighbors) {
                next.insert(candidate);
                stats.births += 1;
            }
        }

        stats.candidates = self.seen.len();
        trace!(
            population = current.len(),
            survivors = stats.survivors,
            births = stats.births,
            candidates = stats.candidates,
            "computed generation"
        );
        self.last_stats = stats;
        next
    }
}
