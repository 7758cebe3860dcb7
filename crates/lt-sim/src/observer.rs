//! Simulation observer trait for progress reporting and rendering hooks.

use lt_agent::Roster;
use lt_core::Tick;

use crate::TickReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] and
/// [`Sim::run_ticks`][crate::Sim::run_ticks] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ConflictLog;
///
/// impl SimObserver for ConflictLog {
///     fn on_tick_end(&mut self, report: &TickReport) {
///         if report.conflicted > 0 {
///             println!("{}: {} agents in conflict", report.tick, report.conflicted);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before phase 1.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the tick's commits and admissions.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`).
    ///
    /// `tick` is the tick the roster is now ready to run: positions reflect
    /// every commit so far and newly admitted agents are included.
    fn on_snapshot(&mut self, _tick: Tick, _roster: &Roster) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
