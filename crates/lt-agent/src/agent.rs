//! The vehicle agent and its per-tick state machine.

use lt_core::{AgentId, AgentPhase, Intent, LtError, LtResult, SimConfig};

use crate::{AgentConfig, RenderSnapshot};

/// One vehicle on the road.
///
/// Kinematic fields are private: they change only through
/// [`commit`][Self::commit], so the `speed >= 1` and lane-bounds invariants
/// hold for every state an outside observer can see.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Agent {
    id:       AgentId,
    config:   AgentConfig,
    lane:     u32,
    position: u64,
    speed:    u32,
    intent:   Intent,
    phase:    AgentPhase,
}

impl Agent {
    /// Build an agent from `config`, validating it against the road.
    ///
    /// # Errors
    ///
    /// `UnknownLane` if either lane is outside `1..=num_lanes`; `Config` if
    /// an explicit entry speed is 0.
    pub fn new(id: AgentId, config: AgentConfig, sim: &SimConfig) -> LtResult<Self> {
        sim.check_lane(id, config.initial_lane)?;
        sim.check_lane(id, config.goal_lane)?;
        let speed = config.speed.unwrap_or(sim.target_speed);
        if speed == 0 {
            return Err(LtError::Config(format!("{id}: entry speed must be at least 1")));
        }
        Ok(Self {
            id,
            lane: config.initial_lane,
            position: config.position,
            speed,
            intent: Intent::Hold,
            phase: AgentPhase::Idle,
            config,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn lane(&self) -> u32 {
        self.lane
    }

    #[inline]
    pub fn goal_lane(&self) -> u32 {
        self.config.goal_lane
    }

    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    #[inline]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    #[inline]
    pub fn intent(&self) -> Intent {
        self.intent
    }

    #[inline]
    pub fn phase(&self) -> AgentPhase {
        self.phase
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.config.label
    }

    /// The parameters this agent was built from.
    #[inline]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Read-only copy of the state a renderer needs.
    pub fn render_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            id:       self.id,
            label:    self.config.label.clone(),
            position: self.position,
            lane:     self.lane,
            speed:    self.speed,
            intent:   self.intent,
        }
    }

    // ── Phase transitions ─────────────────────────────────────────────────

    /// Phase 1: record the decided intent (`Idle → Declared`).
    pub fn declare(&mut self, intent: Intent) -> LtResult<()> {
        if !self.phase.is_ready() {
            return Err(self.phase_error(AgentPhase::Idle));
        }
        self.intent = intent;
        self.phase = AgentPhase::Declared;
        Ok(())
    }

    /// Phase 2: record the post-resolution intent (`Declared → Resolved`).
    pub fn settle(&mut self, intent: Intent) -> LtResult<()> {
        self.expect_phase(AgentPhase::Declared)?;
        self.intent = intent;
        self.phase = AgentPhase::Resolved;
        Ok(())
    }

    /// Phase 3: apply the resolved intent (`Resolved → Committed`).
    ///
    /// `Accelerate`/`Decelerate` change speed *first* and then advance by the
    /// new speed; every other intent advances by the current speed.
    ///
    /// # Errors
    ///
    /// - `SpeedUnderflow` if a decelerate would take speed below 1.
    /// - `UnknownLane` if a lane change would leave the road.
    ///
    /// On error the agent is left exactly as it was.
    pub fn commit(&mut self, sim: &SimConfig) -> LtResult<()> {
        self.expect_phase(AgentPhase::Resolved)?;

        let speed = match self.intent {
            Intent::Accelerate => self.speed + 1,
            Intent::Decelerate if self.speed <= 1 => {
                return Err(LtError::SpeedUnderflow { agent: self.id, speed: self.speed });
            }
            Intent::Decelerate => self.speed - 1,
            _ => self.speed,
        };
        let lane = sim.check_lane(self.id, self.intent.lane_after(self.lane))?;

        self.speed = speed;
        self.position += u64::from(speed);
        self.lane = lane;
        self.phase = AgentPhase::Committed;
        Ok(())
    }

    fn expect_phase(&self, expected: AgentPhase) -> LtResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(self.phase_error(expected))
        }
    }

    fn phase_error(&self, expected: AgentPhase) -> LtError {
        LtError::PhaseOrder { agent: self.id, expected, found: self.phase }
    }
}
