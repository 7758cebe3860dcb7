//! Seeded random scenario generation.
//!
//! Used for soak runs and determinism checks over rosters nobody wrote by
//! hand.  The same parameters and seed always yield the same table.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use lt_agent::AgentConfig;
use lt_core::{LtError, Tick};

use crate::{ScenarioResult, ScenarioTable};

/// Parameters for [`RandomScenario::generate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomScenario {
    /// Agents to admit in total.
    pub agents:       usize,
    /// Admissions are spread over ticks `0..spawn_ticks`.
    pub spawn_ticks:  u64,
    /// Lanes are drawn from `1..=num_lanes`.
    pub num_lanes:    u32,
    /// Master seed.
    pub seed:         u64,
}

impl RandomScenario {
    /// Build the table.
    ///
    /// Each agent gets a uniformly drawn entry tick, entry lane and goal
    /// lane, enters at position 0 at nominal speed, and is labelled
    /// `car-<n>` in generation order.
    pub fn generate(&self) -> ScenarioResult<ScenarioTable> {
        if self.num_lanes == 0 {
            return Err(LtError::Config("random scenario needs at least one lane".into()).into());
        }
        if self.spawn_ticks == 0 && self.agents > 0 {
            return Err(LtError::Config("random scenario needs spawn_ticks >= 1".into()).into());
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut table = ScenarioTable::new();
        for n in 0..self.agents {
            let tick = rng.gen_range(0..self.spawn_ticks);
            let lane = rng.gen_range(1..=self.num_lanes);
            let goal = rng.gen_range(1..=self.num_lanes);
            table.push(Tick(tick), AgentConfig::new(lane, goal, format!("car-{n}")));
        }
        Ok(table)
    }
}
