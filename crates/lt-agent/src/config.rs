//! Immutable agent construction parameters.

/// Everything needed to build (or rebuild) an agent.
///
/// Scenario tables hold `AgentConfig`s; the scheduler turns each into an
/// [`Agent`][crate::Agent] with a freshly allocated id when its admission
/// tick arrives.  Reloading a scenario simply rebuilds agents from the same
/// configs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentConfig {
    /// Lane the agent enters on.
    pub initial_lane: u32,

    /// Lane the agent wants to end up in.
    pub goal_lane: u32,

    /// Opaque display tag (a colour name in the demo).
    pub label: String,

    /// Entry position in grid cells.  Default 0 (the left edge of the road).
    pub position: u64,

    /// Entry speed in cells/tick.  `None` enters at the nominal speed.
    pub speed: Option<u32>,
}

impl AgentConfig {
    /// An agent entering at position 0 at nominal speed.
    pub fn new(initial_lane: u32, goal_lane: u32, label: impl Into<String>) -> Self {
        Self {
            initial_lane,
            goal_lane,
            label: label.into(),
            position: 0,
            speed: None,
        }
    }

    /// Override entry position and speed.
    pub fn at(mut self, position: u64, speed: u32) -> Self {
        self.position = position;
        self.speed = Some(speed);
        self
    }
}
