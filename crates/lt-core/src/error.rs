//! Framework error type.
//!
//! Every variant is a contract breach rather than a transient condition;
//! nothing here is retryable.  Sub-crates wrap `LtError` as one variant of
//! their own enums via `#[from]`.

use thiserror::Error;

use crate::{AgentId, AgentPhase};

/// The top-level error type for `lt-core` and a common base for sub-crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LtError {
    /// A decelerate commit would take the agent's speed below 1.
    #[error("invariant violation: {agent} would decelerate from speed {speed} to below 1")]
    SpeedUnderflow { agent: AgentId, speed: u32 },

    /// A lane index outside `[1, num_lanes]`.
    #[error("{agent}: lane {lane} is outside 1..={num_lanes}")]
    UnknownLane {
        agent:     AgentId,
        lane:      u32,
        num_lanes: u32,
    },

    /// A protocol phase was entered out of order.
    #[error("{agent}: expected phase {expected}, found {found}")]
    PhaseOrder {
        agent:    AgentId,
        expected: AgentPhase,
        found:    AgentPhase,
    },

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `lt-*` crates.
pub type LtResult<T> = Result<T, LtError>;
