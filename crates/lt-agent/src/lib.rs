//! `lt-agent`: vehicle agent state for the `rust_lanes` simulator.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`config`]   | `AgentConfig`: immutable construction parameters            |
//! | [`agent`]    | `Agent`: kinematic state, phase transitions, commit rules   |
//! | [`roster`]   | `Roster`: the scheduler-owned set of active agents          |
//! | [`render`]   | `RenderSnapshot`: read-only view for drawing                |
//!
//! Agents are passive here: the decision and resolution rules live in
//! `lt-behavior`, which drives the `declare` / `settle` transitions.  This
//! crate owns only what an agent does to *itself*: phase bookkeeping and the
//! phase-3 commit.

pub mod agent;
pub mod config;
pub mod render;
pub mod roster;


pub use agent::Agent;
pub use config::AgentConfig;
pub use render::RenderSnapshot;
pub use roster::Roster;
