//! `ScenarioTable`: sparse per-tick admission schedule.
//!
//! Most ticks admit nobody, so the table is a `BTreeMap` keyed by tick rather
//! than a dense `Vec`.  Unlike a queue it is never drained: reloading a
//! scenario replays the same table from tick 0.

use std::collections::BTreeMap;

use lt_agent::AgentConfig;
use lt_core::{AgentId, SimConfig, Tick};

use crate::ScenarioResult;

/// Admission schedule: tick → agents entering the road at that tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScenarioTable {
    inner: BTreeMap<Tick, Vec<AgentConfig>>,
    /// Cached total agent count for O(1) `len()`.
    total: usize,
}

impl ScenarioTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `config` to enter at `tick`.  Agents scheduled for the same
    /// tick are admitted in insertion order.
    pub fn push(&mut self, tick: Tick, config: AgentConfig) {
        self.inner.entry(tick).or_default().push(config);
        self.total += 1;
    }

    /// Fluent form of [`push`][Self::push].
    pub fn with(mut self, tick: Tick, config: AgentConfig) -> Self {
        self.push(tick, config);
        self
    }

    /// Agents entering at exactly `tick` (empty slice if none).
    pub fn admissions(&self, tick: Tick) -> &[AgentConfig] {
        self.inner.get(&tick).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ticks with at least one admission, ascending.
    pub fn ticks(&self) -> impl Iterator<Item = Tick> + '_ {
        self.inner.keys().copied()
    }

    /// The latest tick with an admission, or `None` if empty.
    pub fn last_tick(&self) -> Option<Tick> {
        self.inner.keys().next_back().copied()
    }

    /// Total number of agents across all ticks.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Check every entry's lanes and entry speed against `sim`.
    ///
    /// Run before a simulation starts so a malformed table fails up front
    /// instead of at its admission tick.  Errors carry
    /// [`AgentId::INVALID`] since no id has been allocated yet.
    pub fn validate(&self, sim: &SimConfig) -> ScenarioResult<()> {
        for config in self.inner.values().flatten() {
            lt_agent::Agent::new(AgentId::INVALID, config.clone(), sim)?;
        }
        Ok(())
    }
}
