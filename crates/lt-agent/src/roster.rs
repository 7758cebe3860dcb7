//! The set of agents currently on the road.

use lt_core::{AgentId, LtError, LtResult};

use crate::Agent;

/// Active agents in admission order.
///
/// Ids come from a monotonic allocator and agents are only ever appended, so
/// the backing `Vec` is sorted by id and lookups are a binary search.  The
/// mutable slice lets the scheduler fan a phase out over `par_iter_mut`.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    agents: Vec<Agent>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an agent to the road.
    ///
    /// # Errors
    ///
    /// `Config` if `agent`'s id is not greater than every id already present
    /// (ids must be fresh).
    pub fn admit(&mut self, agent: Agent) -> LtResult<()> {
        if let Some(last) = self.agents.last() {
            if agent.id() <= last.id() {
                return Err(LtError::Config(format!(
                    "{} admitted after {}; ids must be fresh",
                    agent.id(),
                    last.id()
                )));
            }
        }
        self.agents.push(agent);
        Ok(())
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.position_of(id).map(|i| &self.agents[i])
    }

    /// Like [`get`][Self::get] but returns `AgentNotFound` on a miss.
    pub fn require(&self, id: AgentId) -> LtResult<&Agent> {
        self.get(id).ok_or(LtError::AgentNotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn as_mut_slice(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Remove every agent (scenario reload).
    pub fn clear(&mut self) {
        self.agents.clear();
    }

    fn position_of(&self, id: AgentId) -> Option<usize> {
        self.agents.binary_search_by_key(&id, Agent::id).ok()
    }
}
