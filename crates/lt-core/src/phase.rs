//! Per-tick protocol state of an agent.

use std::fmt;

/// Where an agent stands in the decide → resolve → commit cycle.
///
/// ```text
/// Idle ──decide──▶ Declared ──resolve──▶ Resolved ──commit──▶ Committed
///  ▲                                                               │
///  └────────────────────────── next tick ──────────────────────────┘
/// ```
///
/// `Committed` is equivalent to `Idle` for the purpose of starting the next
/// tick.  There is no terminal state; agents persist until the roster is
/// dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentPhase {
    /// No intent decided yet this tick.
    #[default]
    Idle,
    /// Intent decided and published on the channel.
    Declared,
    /// Intent checked against the other agents' declarations.
    Resolved,
    /// Motion applied for this tick.
    Committed,
}

impl AgentPhase {
    /// `true` if a new tick may start from this phase.
    #[inline]
    pub fn is_ready(self) -> bool {
        matches!(self, AgentPhase::Idle | AgentPhase::Committed)
    }
}

impl fmt::Display for AgentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgentPhase::Idle      => "idle",
            AgentPhase::Declared  => "declared",
            AgentPhase::Resolved  => "resolved",
            AgentPhase::Committed => "committed",
        };
        f.write_str(s)
    }
}
