//! Sparse, unbounded Conway's Game of Life engine (B3/S23).
//!
//! Live cells are stored as single integer keys produced by a pairing
//! function over the integer lattice, and each generation only examines live
//! cells and their immediate neighbours.

pub mod sparselife;
pub use sparselife::{
    CellKey, CodecError, GenerationEngine, LiveSet, SimulationClock, SparseLife, SparseLifeConfig,
    step,
};
