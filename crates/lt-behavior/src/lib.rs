//! `lt-behavior`: how agents decide, broadcast, and resolve conflicts.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`channel`]  | `AgentSnapshot`, `BroadcastChannel` (tick-scoped id → snapshot)|
//! | [`model`]    | `DecisionModel` trait, `CruiseAndMerge` default rule           |
//! | [`resolve`]  | `FutureCell`, `Resolution`, the lane-order resolution rule     |
//! | [`protocol`] | Phase drivers: `declare`, `decide_and_publish`, `resolve_agent`|
//!
//! # Per-tick protocol
//!
//! 1. **Decide & declare**: each agent asks the `DecisionModel` for an
//!    intent, records it, and publishes a snapshot on the channel.
//! 2. **Resolve**: each agent reads every *other* snapshot, finds the agents
//!    heading for the same future cell, and overrides its own intent by a
//!    deterministic rank rule.  No extra message round is needed because
//!    every agent evaluates the same rule over the same public data.
//! 3. **Commit**: `lt_agent::Agent::commit`.
//!
//! The scheduler in `lt-sim` owns the barriers between phases.

pub mod channel;
pub mod model;
pub mod protocol;
pub mod resolve;

#[cfg(test)]
mod tests;

pub use channel::{AgentSnapshot, BroadcastChannel};
pub use model::{CruiseAndMerge, DecisionModel};
pub use protocol::{decide_and_publish, declare, resolve_agent};
pub use resolve::{FutureCell, Resolution, future_cell, resolve_intent};
