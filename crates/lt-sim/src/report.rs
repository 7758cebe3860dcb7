//! Per-tick summary returned by `Sim::advance_tick`.

use lt_core::{AgentId, Tick};

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The tick that was processed.
    pub tick: Tick,

    /// Agents that ran the three phases.
    pub active_agents: usize,

    /// Agents whose future cell was shared with at least one other agent.
    pub conflicted: usize,

    /// Agents whose declared intent was replaced during resolution.
    pub overridden: usize,

    /// Agents admitted after the tick, ready for the next one.
    pub admitted: Vec<AgentId>,
}
