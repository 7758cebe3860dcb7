//! `lt-scenario`: which agents enter the road, and when.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`table`]   | `ScenarioTable` (`BTreeMap<Tick, Vec<AgentConfig>>`)        |
//! | [`builtin`] | The two hand-written demo scenarios                         |
//! | [`loader`]  | `load_scenario_csv`, `load_scenario_reader`                 |
//! | [`random`]  | `RandomScenario`: seeded generator for stress runs          |
//! | [`error`]   | `ScenarioError`, `ScenarioResult<T>`                        |
//!
//! A scenario table is pure data: it never touches the decision logic.  The
//! scheduler in `lt-sim` reads `admissions(tick)` after each tick and turns
//! each config into an agent with a fresh id.

pub mod builtin;
pub mod error;
pub mod loader;
pub mod random;
pub mod table;


pub use error::{ScenarioError, ScenarioResult};
pub use loader::{load_scenario_csv, load_scenario_reader};
pub use random::RandomScenario;
pub use table::ScenarioTable;
