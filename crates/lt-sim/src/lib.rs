//! `lt-sim`: tick scheduler for the rust_lanes traffic simulator.
//!
//! # Three-phase tick loop
//!
//! ```text
//! advance_tick():
//!   open the broadcast channel for tick t (drops last tick's entries)
//!   ① Decide  : every agent picks an intent and publishes it
//!   ── barrier ──
//!   ② Resolve : every agent reads the others and settles its intent
//!   ── barrier ──
//!   ③ Commit  : every agent applies its intent
//!   advance the clock to t+1 and admit agents scheduled for t+1
//! ```
//!
//! Within a phase agents are independent, so with the `parallel` feature each
//! phase runs on Rayon's pool.  The joins between the three parallel
//! iterators are the barriers.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs each phase on Rayon's thread pool.                |
//! | `fx-hash`  | FxHash for the broadcast channel map.                  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lt_behavior::CruiseAndMerge;
//! use lt_core::SimConfig;
//! use lt_scenario::builtin;
//! use lt_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), CruiseAndMerge)
//!     .scenario(builtin::weave())
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::TickReport;
pub use sim::Sim;
