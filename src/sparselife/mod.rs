//! SparseLife engine internals and public API.

pub mod clock;
pub mod codec;
mod engine;
mod key_set;
mod live_set;
pub mod patterns;
mod rules;
mod simulation;

pub use clock::SimulationClock;
pub use codec::{CellKey, CodecError, MAX_COORD, MIN_COORD, decode, encode};
pub use engine::{GenerationEngine, StepStats, step};
pub use live_set::LiveSet;
pub use patterns::Pattern;
pub use simulation::{SparseLife, SparseLifeConfig};
