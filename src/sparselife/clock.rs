//! Headless tick driver: pause, single-step and frame counting.
//!
//! A host render loop calls [`SimulationClock::tick`] once per frame. The
//! clock decides whether the simulation advances; drawing is left to the host.

use tracing::debug;

use super::simulation::SparseLife;

#[derive(Clone, Debug, Default)]
pub struct SimulationClock {
    paused: bool,
    advance_frame: bool,
    frames: u64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Number of ticks that advanced the simulation since the last reset.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        debug!(paused = self.paused, "toggled pause");
    }

    /// Queue exactly one step for the next tick. Ignored while running.
    pub fn request_step(&mut self) {
        if self.paused {
            self.advance_frame = true;
        }
    }

    /// Returns `true` if the simulation advanced one generation.
    pub fn tick(&mut self, sim: &mut SparseLife) -> bool {
        if self.paused && !self.advance_frame {
            return false;
        }
        self.advance_frame = false;
        sim.step();
        self.frames += 1;
        true
    }

    pub fn reset(&mut self, sim: &mut SparseLife) {
        *self = Self::default();
        sim.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::SimulationClock;
    use crate::sparselife::patterns::BLINKER;
    use crate::sparselife::simulation::{SparseLife, SparseLifeConfig};

    fn blinker() -> SparseLife {
        SparseLife::with_config(SparseLifeConfig::default().pattern(&BLINKER)).unwrap()
    }

    #[test]
    fn running_clock_steps_every_tick() {
        let mut sim = blinker();
        let mut clock = SimulationClock::new();
        for _ in 0..4 {
            assert!(clock.tick(&mut sim));
        }
        assert_eq!(clock.frames(), 4);
        assert_eq!(sim.generation(), 4);
    }

    #[test]
    fn paused_clock_only_honours_requested_steps() {
        let mut sim = blinker();
        let mut clock = SimulationClock::new();
        clock.toggle_pause();
        assert!(clock.is_paused());

        assert!(!clock.tick(&mut sim));
        clock.request_step();
        assert!(clock.tick(&mut sim));
        assert!(!clock.tick(&mut sim));
        assert_eq!(sim.generation(), 1);
        assert!(sim.get_cell(1, 1));
        assert!(!sim.get_cell(0, 0));

        clock.toggle_pause();
        clock.request_step();
        assert!(clock.tick(&mut sim));
        assert_eq!(sim.generation(), 2);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn reset_unpauses_and_restores_seed() {
        let mut sim = blinker();
        let mut clock = SimulationClock::new();
        clock.tick(&mut sim);
        clock.toggle_pause();

        clock.reset(&mut sim);
        assert!(!clock.is_paused());
        assert_eq!(clock.frames(), 0);
        assert_eq!(sim.generation(), 0);
        assert!(sim.get_cell(0, 0));
        assert!(sim.get_cell(2, 0));
    }
}
