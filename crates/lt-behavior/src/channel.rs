//! The broadcast channel agents use to learn each other's intents.
//!
//! # Staleness
//!
//! Entries live for exactly one tick.  [`BroadcastChannel::open_tick`] empties
//! the map and bumps the stamp; every publish is stamped with the open tick
//! and reads ignore anything stamped otherwise.  An agent that skips phase 1
//! therefore simply has no entry, instead of leaking last tick's intent.

use std::collections::BTreeMap;

use lt_core::{AgentId, Intent, Tick};

use crate::resolve::{FutureCell, future_cell};

#[cfg(feature = "fx-hash")]
type SnapshotMap = rustc_hash::FxHashMap<AgentId, AgentSnapshot>;
#[cfg(not(feature = "fx-hash"))]
type SnapshotMap = std::collections::HashMap<AgentId, AgentSnapshot>;

// ── AgentSnapshot ─────────────────────────────────────────────────────────────

/// One agent's declared state for the current tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    pub id:       AgentId,
    pub position: u64,
    pub lane:     u32,
    pub speed:    u32,
    pub intent:   Intent,
    /// Tick the snapshot was published in.
    pub tick:     Tick,
}

impl AgentSnapshot {
    /// The cell this agent is heading for, computed from its current speed.
    #[inline]
    pub fn future_cell(&self) -> FutureCell {
        future_cell(self.position, self.speed, self.lane, self.intent)
    }
}

// ── BroadcastChannel ──────────────────────────────────────────────────────────

/// Tick-scoped `AgentId → AgentSnapshot` map shared by all agents.
///
/// Each agent writes only the entry keyed by its own id, so concurrent
/// phase-1 producers never contend on an entry.  Readers must wait until
/// every agent has published; the scheduler guarantees that ordering.
#[derive(Debug, Default)]
pub struct BroadcastChannel {
    tick:    Tick,
    entries: SnapshotMap,
}

impl BroadcastChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new tick: drop every entry and stamp future publishes `tick`.
    pub fn open_tick(&mut self, tick: Tick) {
        self.entries.clear();
        self.tick = tick;
    }

    /// The tick currently open for publishing.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Insert or overwrite the entry for `id`.  Last write wins.
    pub fn publish(&mut self, id: AgentId, position: u64, lane: u32, speed: u32, intent: Intent) {
        let snapshot = AgentSnapshot { id, position, lane, speed, intent, tick: self.tick };
        self.entries.insert(id, snapshot);
    }

    /// Publish a snapshot produced elsewhere (e.g. by a parallel phase 1).
    ///
    /// The snapshot's own `tick` field is replaced by the open tick.
    pub fn publish_snapshot(&mut self, snapshot: AgentSnapshot) {
        self.publish(snapshot.id, snapshot.position, snapshot.lane, snapshot.speed, snapshot.intent);
    }

    /// Every current-tick entry except `id`'s own, ordered by id.
    pub fn read_others(&self, id: AgentId) -> BTreeMap<AgentId, &AgentSnapshot> {
        self.current()
            .filter(|s| s.id != id)
            .map(|s| (s.id, s))
            .collect()
    }

    /// The current-tick entry for `id`, if it published.
    pub fn get(&self, id: AgentId) -> Option<&AgentSnapshot> {
        self.entries.get(&id).filter(|s| s.tick == self.tick)
    }

    /// Number of current-tick entries.
    pub fn len(&self) -> usize {
        self.current().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn current(&self) -> impl Iterator<Item = &AgentSnapshot> {
        self.entries.values().filter(move |s| s.tick == self.tick)
    }
}
