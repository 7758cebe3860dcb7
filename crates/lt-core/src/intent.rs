//! The per-tick motion intent of a vehicle.

use std::fmt;

/// What an agent plans to do during ONE tick.
///
/// Decided in phase 1, possibly overridden by conflict resolution in phase 2,
/// applied in phase 3.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    /// Keep speed and lane, advance by the current speed.
    #[default]
    Hold,
    /// Speed up by one cell/tick, then advance by the new speed.
    Accelerate,
    /// Slow down by one cell/tick, then advance by the new speed.
    Decelerate,
    /// Move to the lane with the next lower index ("up" on screen).
    ShiftUp,
    /// Move to the lane with the next higher index ("down" on screen).
    ShiftDown,
}

impl Intent {
    /// Every variant, in declaration order.
    pub const ALL: [Intent; 5] = [
        Intent::Hold,
        Intent::Accelerate,
        Intent::Decelerate,
        Intent::ShiftUp,
        Intent::ShiftDown,
    ];

    /// The lane an agent in `lane` occupies after committing this intent.
    ///
    /// This is the only lane-delta mapping in the workspace; decision,
    /// conflict resolution, commit and render projection all go through it.
    /// `ShiftUp` from lane 0 saturates at 0, which is out of bounds and is
    /// reported by the caller's lane check.
    #[inline]
    pub fn lane_after(self, lane: u32) -> u32 {
        match self {
            Intent::ShiftUp   => lane.saturating_sub(1),
            Intent::ShiftDown => lane.saturating_add(1),
            Intent::Hold | Intent::Accelerate | Intent::Decelerate => lane,
        }
    }

    /// Change in speed applied at commit: `+1`, `-1` or `0`.
    #[inline]
    pub fn speed_delta(self) -> i32 {
        match self {
            Intent::Accelerate => 1,
            Intent::Decelerate => -1,
            _ => 0,
        }
    }

    /// `true` for `ShiftUp` / `ShiftDown`.
    #[inline]
    pub fn is_lane_change(self) -> bool {
        matches!(self, Intent::ShiftUp | Intent::ShiftDown)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::Hold       => "hold",
            Intent::Accelerate => "accelerate",
            Intent::Decelerate => "decelerate",
            Intent::ShiftUp    => "shift-up",
            Intent::ShiftDown  => "shift-down",
        };
        f.write_str(s)
    }
}
