//! `lt-core`: foundational types for the `rust_lanes` traffic simulator.
//!
//! This crate is a dependency of every other `lt-*` crate.  It has no `lt-*`
//! dependencies and a single required external one (`thiserror`, plus an
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `IdAllocator`                                  |
//! | [`intent`]  | `Intent` enum and its lane/speed delta mapping            |
//! | [`phase`]   | `AgentPhase`: the per-tick protocol state                 |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`                           |
//! | [`error`]   | `LtError`, `LtResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod error;
pub mod ids;
pub mod intent;
pub mod phase;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{LtError, LtResult};
pub use ids::{AgentId, IdAllocator};
pub use intent::Intent;
pub use phase::AgentPhase;
pub use time::{SimClock, SimConfig, Tick};
