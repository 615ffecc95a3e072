//! Simulation state: current generation, seed and config.

use std::sync::Arc;

use tracing::debug;

use super::codec::{self, CodecError};
use super::engine::{GenerationEngine, StepStats};
use super::live_set::LiveSet;
use super::patterns::{Pattern, R_PENTOMINO};

const DEFAULT_CELL_SIZE: u32 = 16;

/// Configuration for a SparseLife simulation.
///
/// `SparseLifeConfig::default()` seeds the R-pentomino with 16-pixel cells;
/// customise individual fields via the builder methods.
#[derive(Clone, Debug)]
pub struct SparseLifeConfig {
    /// Edge length of one cell in render-layer units. The engine never reads
    /// it; it travels with the seed so a host has one aggregate to pass around.
    pub cell_size: u32,
    /// Cells alive at generation 0 and after every reset.
    pub seed: Vec<(i64, i64)>,
}

impl Default for SparseLifeConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            seed: R_PENTOMINO.cells.to_vec(),
        }
    }
}

impl SparseLifeConfig {
    pub fn cell_size(mut self, size: u32) -> Self {
        self.cell_size = size.max(1);
        self
    }

    pub fn seed<I>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        self.seed = cells.into_iter().collect();
        self
    }

    pub fn pattern(self, pattern: &Pattern) -> Self {
        self.seed(pattern.cells.iter().copied())
    }
}

/// Simulation state: the current generation plus the seed it restarts from.
///
/// Each step builds the next generation from the current snapshot and
/// installs it by replacing the `Arc` handle, so a reader holding an earlier
/// [`snapshot`](Self::snapshot) keeps a stable view.
pub struct SparseLife {
    config: SparseLifeConfig,
    seed: LiveSet,
    current: Arc<LiveSet>,
    engine: GenerationEngine,
    generation: u64,
}

impl Default for SparseLife {
    fn default() -> Self {
        Self::new()
    }
}

impl SparseLife {
    /// An empty universe.
    pub fn new() -> Self {
        Self {
            config: SparseLifeConfig {
                seed: Vec::new(),
                ..SparseLifeConfig::default()
            },
            seed: LiveSet::new(),
            current: Arc::new(LiveSet::new()),
            engine: GenerationEngine::new(),
            generation: 0,
        }
    }

    pub fn with_config(config: SparseLifeConfig) -> Result<Self, CodecError> {
        let seed = LiveSet::from_coords(config.seed.iter().copied())?;
        debug!(population = seed.len(), cell_size = config.cell_size, "seeded simulation");
        Ok(Self {
            current: Arc::new(seed.clone()),
            seed,
            config,
            engine: GenerationEngine::new(),
            generation: 0,
        })
    }

    pub fn config(&self) -> &SparseLifeConfig {
        &self.config
    }

    /// Reinstall the seed pattern and restart the generation count.
    pub fn reset(&mut self) {
        self.current = Arc::new(self.seed.clone());
        self.generation = 0;
        debug!(population = self.seed.len(), "reset simulation");
    }

    pub fn set_cell(&mut self, x: i64, y: i64, alive: bool) -> Result<(), CodecError> {
        let key = codec::encode(x, y)?;
        if self.current.contains(key) == alive {
            return Ok(());
        }
        let cells = Arc::make_mut(&mut self.current);
        if alive {
            cells.insert(key);
        } else {
            cells.remove(key);
        }
        Ok(())
    }

    pub fn get_cell(&self, x: i64, y: i64) -> bool {
        self.current.contains_coord(x, y)
    }

    pub fn step(&mut self) {
        let next = self.engine.step(&self.current);
        self.current = Arc::new(next);
        self.generation += 1;
    }

    pub fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Counters from the most recent step.
    pub fn last_stats(&self) -> StepStats {
        self.engine.last_stats()
    }

    /// A handle to the current generation that later steps will not change.
    pub fn snapshot(&self) -> Arc<LiveSet> {
        Arc::clone(&self.current)
    }

    pub fn live_set(&self) -> &LiveSet {
        &self.current
    }

    pub fn population(&self) -> u64 {
        self.current.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn bounds(&self) -> Option<(i64, i64, i64, i64)> {
        self.current.bounds()
    }

    pub fn for_each_live<F: FnMut(i64, i64)>(&self, mut f: F) {
        for (x, y) in self.current.coords() {
            f(x, y);
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
