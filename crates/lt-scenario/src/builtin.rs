//! Hand-written demo scenarios.

use lt_agent::AgentConfig;
use lt_core::Tick;

use crate::{ScenarioError, ScenarioResult, ScenarioTable};

/// Number of built-in scenarios.
pub const COUNT: usize = 2;

/// Built-in scenario by zero-based index.
pub fn by_index(index: usize) -> ScenarioResult<ScenarioTable> {
    match index {
        0 => Ok(weave()),
        1 => Ok(converge()),
        n => Err(ScenarioError::UnknownScenario(n)),
    }
}

/// Six cars entering over five ticks, most of them crossing several lanes.
/// Needs a 5-lane road.
pub fn weave() -> ScenarioTable {
    ScenarioTable::new()
        .with(Tick(0), AgentConfig::new(1, 4, "green"))
        .with(Tick(0), AgentConfig::new(2, 5, "blue"))
        .with(Tick(1), AgentConfig::new(3, 3, "red"))
        .with(Tick(3), AgentConfig::new(5, 2, "brown"))
        .with(Tick(5), AgentConfig::new(2, 4, "white"))
        .with(Tick(5), AgentConfig::new(1, 5, "orange"))
}

/// Two cars converging on lane 3 from either side at the same tick.
pub fn converge() -> ScenarioTable {
    ScenarioTable::new()
        .with(Tick(0), AgentConfig::new(2, 3, "blue"))
        .with(Tick(0), AgentConfig::new(4, 3, "orange"))
}
