//! Simulation time model and run configuration.
//!
//! Time is a monotonically increasing `Tick` counter.  The core is agnostic
//! to real-world frame rate: a driver decides how often to call
//! `advance_tick` and how many frames to render per tick.

use std::fmt;

use crate::{AgentId, LtError, LtResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick immediately after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick.  Cheap to copy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.next();
    }

    /// Rewind to tick 0 (scenario reload).
    #[inline]
    pub fn reset(&mut self) {
        self.current_tick = Tick::ZERO;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.current_tick.fmt(f)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Usually built in code by the driver; with the `serde` feature it can be
/// loaded from any serde format instead.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of lanes.  Valid lane indices are `1..=num_lanes`.
    pub num_lanes: u32,

    /// Nominal cruising speed in cells/tick.  Agents return to it before
    /// attempting any lane change.  Must be at least 1.
    pub target_speed: u32,

    /// Ticks simulated by `Sim::run`.
    pub total_ticks: u64,

    /// Call `SimObserver::on_snapshot` every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_lanes:             5,
            target_speed:          2,
            total_ticks:           20,
            output_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// The tick at which `Sim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Reject configurations the protocol cannot run under.
    pub fn validate(&self) -> LtResult<()> {
        if self.num_lanes == 0 {
            return Err(LtError::Config("num_lanes must be at least 1".into()));
        }
        if self.target_speed == 0 {
            return Err(LtError::Config("target_speed must be at least 1".into()));
        }
        Ok(())
    }

    /// `true` if `lane` is a valid index on this road.
    #[inline]
    pub fn lane_in_bounds(&self, lane: u32) -> bool {
        (1..=self.num_lanes).contains(&lane)
    }

    /// `Ok(lane)` if in bounds, `UnknownLane` otherwise.
    pub fn check_lane(&self, agent: AgentId, lane: u32) -> LtResult<u32> {
        if self.lane_in_bounds(lane) {
            Ok(lane)
        } else {
            Err(LtError::UnknownLane { agent, lane, num_lanes: self.num_lanes })
        }
    }
}
