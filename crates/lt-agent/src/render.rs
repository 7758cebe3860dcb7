//! Read-only agent view handed to renderers.

use lt_core::{AgentId, Intent};

/// A copy of one agent's drawable state, taken between ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderSnapshot {
    pub id:       AgentId,
    pub label:    String,
    pub position: u64,
    pub lane:     u32,
    pub speed:    u32,
    pub intent:   Intent,
}

impl RenderSnapshot {
    /// `(position, lane)` the agent would occupy after committing `intent`.
    ///
    /// Used to draw intent lines.  Mirrors the commit rules: speed changes
    /// apply before the advance.  No bounds checking; a projection off the
    /// road is drawn as-is.
    pub fn projected_cell(&self) -> (u64, u32) {
        let speed = self.speed.saturating_add_signed(self.intent.speed_delta());
        (self.position + u64::from(speed), self.intent.lane_after(self.lane))
    }
}
