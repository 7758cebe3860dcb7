//! Strongly typed agent identifiers and the allocator that hands them out.
//!
//! Ids are `Copy + Ord + Hash` so they can key maps and sort without
//! ceremony.  They are *identities*, not storage indices: an id stays valid
//! for the whole run and is never reused, even after the roster is cleared
//! by a scenario reload.

use std::fmt;

/// Unique identity of a vehicle agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// Sentinel meaning "no valid ID": equivalent to `u32::MAX`.
    pub const INVALID: AgentId = AgentId(u32::MAX);
}

impl Default for AgentId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}

// ── IdAllocator ───────────────────────────────────────────────────────────────

/// Monotonic source of [`AgentId`]s.
///
/// Owned by the scheduler rather than held in a global, so two simulations
/// in the same process (or two tests running in parallel) never share a
/// counter.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next unused id.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX - 1` ids are requested; the last value
    /// is reserved for [`AgentId::INVALID`].
    pub fn allocate(&mut self) -> AgentId {
        assert!(self.next < u32::MAX, "agent id space exhausted");
        let id = AgentId(self.next);
        self.next += 1;
        id
    }
}
