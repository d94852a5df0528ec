// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Simulation policy seam.
//!
//! Slot confirmation and parts of delivery estimation model live
//! contention with randomized failure. All such non-determinism flows
//! through this trait so tests can disable it, while the availability
//! engine stays a pure function of its hashed inputs.

/// Source of randomized decisions for contention and capacity modeling.
pub trait Simulation {
    /// Returns `true` with the given probability in `[0, 1]`.
    fn chance(&self, probability: f64) -> bool;

    /// Returns a uniform value in `[0, 1)`.
    fn unit(&self) -> f64;

    /// Returns a count in `[min, max]` (inclusive).
    fn pick_count(&self, min: usize, max: usize) -> usize;
}

/// Randomized simulation for demo parity with live contention.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveSimulation;

impl Simulation for LiveSimulation {
    fn chance(&self, probability: f64) -> bool {
        rand::random::<f64>() < probability
    }

    fn unit(&self) -> f64 {
        rand::random::<f64>()
    }

    fn pick_count(&self, min: usize, max: usize) -> usize {
        if min >= max {
            return min;
        }
        rand::random_range(min..=max)
    }
}

/// Simulation that never trips a failure; used by tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSimulation;

impl Simulation for DisabledSimulation {
    fn chance(&self, _probability: f64) -> bool {
        false
    }

    fn unit(&self) -> f64 {
        0.0
    }

    fn pick_count(&self, min: usize, _max: usize) -> usize {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_simulation_never_trips() {
        let simulation: DisabledSimulation = DisabledSimulation;
        assert!(!simulation.chance(1.0));
        assert!(simulation.unit() < f64::EPSILON);
        assert_eq!(simulation.pick_count(2, 3), 2);
    }

    #[test]
    fn test_live_simulation_respects_certainties() {
        let simulation: LiveSimulation = LiveSimulation;
        assert!(simulation.chance(1.0));
        assert!(!simulation.chance(0.0));
    }

    #[test]
    fn test_live_pick_count_stays_in_range() {
        let simulation: LiveSimulation = LiveSimulation;
        for _ in 0..50 {
            let count: usize = simulation.pick_count(2, 3);
            assert!((2..=3).contains(&count));
        }
    }
}
