//! Conflict detection and the lane-order resolution rule.
//!
//! # Future cell
//!
//! ```text
//! future_cell = (position + speed, intent.lane_after(lane))
//! ```
//!
//! `speed` is the *current* speed: an accelerate/decelerate does not shift
//! the cell used as the collision key.  Two agents conflict when their future
//! cells are equal.
//!
//! # Rank rule
//!
//! All agents sharing one future cell form a conflict group.  Members are
//! ranked by
//!
//! 1. lane index, ascending (the agent "above" ranks first),
//! 2. position, descending (the agent further ahead ranks first),
//! 3. id, ascending.
//!
//! Every member gives up its lane change and picks a speed intent.  The first
//! member wants to accelerate, the last to decelerate, and anyone in between
//! to hold.  Walking the group in rank order, each member takes the first
//! intent on its preference list whose committed cell no higher-ranked member
//! has claimed:
//!
//! | Rank   | Preference                           |
//! |--------|--------------------------------------|
//! | first  | `Accelerate`, `Hold`, `Decelerate`   |
//! | middle | `Hold`, `Decelerate`, `Accelerate`   |
//! | last   | `Decelerate`, `Hold`, `Accelerate`   |
//!
//! A fallback `Decelerate` is never taken at speed 1.  Groups of two and three
//! always get their first choice, which is exactly "upper lane speeds up,
//! lower lane slows down".  Larger groups stay collision-free as long as no
//! single lane holds more than three members.  Every member evaluates the
//! same walk over the same broadcast data, so the outcome is consistent
//! without a second message round.

use std::fmt;

use lt_core::{AgentId, Intent};

use crate::AgentSnapshot;

// ── FutureCell ────────────────────────────────────────────────────────────────

/// The `(position, lane)` collision key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FutureCell {
    pub position: u64,
    pub lane:     u32,
}

impl fmt::Display for FutureCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, lane {})", self.position, self.lane)
    }
}

/// Where an agent is heading, as used by conflict detection.
#[inline]
pub fn future_cell(position: u64, speed: u32, lane: u32, intent: Intent) -> FutureCell {
    FutureCell {
        position: position + u64::from(speed),
        lane:     intent.lane_after(lane),
    }
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// Outcome of phase 2 for one agent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Intent declared in phase 1.
    pub declared:  Intent,
    /// Intent to commit.
    pub resolved:  Intent,
    /// Other agents that shared the future cell, ascending by id.
    pub conflicts: Vec<AgentId>,
}

impl Resolution {
    /// `true` if resolution replaced the declared intent.
    #[inline]
    pub fn is_override(&self) -> bool {
        self.declared != self.resolved
    }

    /// `true` if at least one other agent shared the future cell.
    #[inline]
    pub fn had_conflict(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Resolve `me` against the other agents' snapshots.
///
/// `others` must not contain `me`; any entry with `me.id` is ignored.
pub fn resolve_intent<'a, I>(me: &AgentSnapshot, others: I) -> Resolution
where
    I: IntoIterator<Item = &'a AgentSnapshot>,
{
    let cell = me.future_cell();
    let mut group: Vec<&AgentSnapshot> = others
        .into_iter()
        .filter(|o| o.id != me.id && o.future_cell() == cell)
        .collect();

    if group.is_empty() {
        return Resolution { declared: me.intent, resolved: me.intent, conflicts: Vec::new() };
    }

    let mut conflicts: Vec<AgentId> = group.iter().map(|o| o.id).collect();
    conflicts.sort_unstable();

    group.push(me);
    group.sort_unstable_by_key(|s| rank_key(s));
    let resolved = settle_group(&group)
        .into_iter()
        .zip(&group)
        .find(|(_, s)| s.id == me.id)
        .map_or(me.intent, |(intent, _)| intent);

    Resolution { declared: me.intent, resolved, conflicts }
}

const LEAD:   [Intent; 3] = [Intent::Accelerate, Intent::Hold, Intent::Decelerate];
const MIDDLE: [Intent; 3] = [Intent::Hold, Intent::Decelerate, Intent::Accelerate];
const TAIL:   [Intent; 3] = [Intent::Decelerate, Intent::Hold, Intent::Accelerate];

/// Settled intent for every member of a ranked conflict group, in rank order.
fn settle_group(ranked: &[&AgentSnapshot]) -> Vec<Intent> {
    let last = ranked.len().saturating_sub(1);
    let mut claimed: Vec<(u64, u32)> = Vec::with_capacity(ranked.len());
    let mut settled = Vec::with_capacity(ranked.len());

    for (rank, s) in ranked.iter().enumerate() {
        let prefs = match rank {
            0 => &LEAD,
            r if r == last => &TAIL,
            _ => &MIDDLE,
        };
        let choice = prefs
            .iter()
            .enumerate()
            .find(|&(i, &intent)| {
                let feasible = i == 0 || intent != Intent::Decelerate || s.speed > 1;
                feasible && !claimed.contains(&committed_cell(s, intent))
            })
            .map_or(prefs[0], |(_, &intent)| intent);
        claimed.push(committed_cell(s, choice));
        settled.push(choice);
    }
    settled
}

/// Where `s` ends up if it commits `intent`; speed changes apply first.
fn committed_cell(s: &AgentSnapshot, intent: Intent) -> (u64, u32) {
    let speed = s.speed.saturating_add_signed(intent.speed_delta());
    (s.position + u64::from(speed), intent.lane_after(s.lane))
}

/// Sort key for the rank rule; lower sorts first.
fn rank_key(s: &AgentSnapshot) -> (u32, std::cmp::Reverse<u64>, AgentId) {
    (s.lane, std::cmp::Reverse(s.position), s.id)
}
