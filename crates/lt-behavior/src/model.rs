//! The `DecisionModel` trait: phase-1 intent selection.

use lt_agent::Agent;
use lt_core::{Intent, SimConfig};

/// Pluggable phase-1 rule.
///
/// Called once per agent per tick with only that agent's own state; other
/// agents are not visible until phase 2.
///
/// # Thread safety
///
/// With the `parallel` feature of `lt-sim` phase 1 runs on Rayon's pool, so
/// implementations must be `Send + Sync`.
pub trait DecisionModel: Send + Sync + 'static {
    fn decide(&self, agent: &Agent, config: &SimConfig) -> Intent;
}

/// The default rule: get back to nominal speed, then merge toward the goal
/// lane one lane per tick.
///
/// First match wins:
///
/// | Condition                   | Intent        |
/// |-----------------------------|---------------|
/// | `speed > target_speed`      | `Decelerate`  |
/// | `speed < target_speed`      | `Accelerate`  |
/// | `lane == goal_lane`         | `Hold`        |
/// | `lane > goal_lane`          | `ShiftUp`     |
/// | otherwise                   | `ShiftDown`   |
///
/// Speed always takes priority, so lane changes are only ever attempted at
/// nominal speed.
#[derive(Copy, Clone, Debug, Default)]
pub struct CruiseAndMerge;

impl DecisionModel for CruiseAndMerge {
    fn decide(&self, agent: &Agent, config: &SimConfig) -> Intent {
        let speed = agent.speed();
        let target = config.target_speed;
        if speed > target {
            Intent::Decelerate
        } else if speed < target {
            Intent::Accelerate
        } else if agent.lane() == agent.goal_lane() {
            Intent::Hold
        } else if agent.lane() > agent.goal_lane() {
            Intent::ShiftUp
        } else {
            Intent::ShiftDown
        }
    }
}
