//! The `Sim` struct and its tick loop.

use lt_agent::{Agent, AgentConfig, RenderSnapshot, Roster};
use lt_behavior::{BroadcastChannel, DecisionModel, Resolution};
use lt_core::{AgentId, IdAllocator, LtError, LtResult, SimClock, SimConfig, Tick};
use lt_scenario::ScenarioTable;

use crate::{SimError, SimObserver, SimResult, TickReport};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The tick scheduler.
///
/// `Sim<M>` owns the roster, the broadcast channel, the id allocator and the
/// admission schedule, and drives the three-phase cycle described in the
/// crate docs.  Create via [`SimBuilder`][crate::SimBuilder].
///
/// A fatal error during a tick (speed underflow, a lane change off the road,
/// a phase-order breach) halts the simulation: the tick is not rolled back,
/// and every later [`advance_tick`][Self::advance_tick] returns
/// [`SimError::Halted`] until [`load_scenario`][Self::load_scenario] or
/// [`restart`][Self::restart] is called.
pub struct Sim<M: DecisionModel> {
    /// Global configuration (lane count, nominal speed, run length, …).
    pub config: SimConfig,

    /// Tracks the current tick.
    pub clock: SimClock,

    /// Phase-1 decision rule.
    pub model: M,

    roster:   Roster,
    channel:  BroadcastChannel,
    ids:      IdAllocator,
    scenario: ScenarioTable,
    halted:   Option<(Tick, LtError)>,
}

impl<M: DecisionModel> Sim<M> {
    pub(crate) fn new(config: SimConfig, model: M, scenario: ScenarioTable) -> Self {
        Self {
            config,
            clock: SimClock::new(),
            model,
            roster: Roster::new(),
            channel: BroadcastChannel::new(),
            ids: IdAllocator::new(),
            scenario,
            halted: None,
        }
    }

    // ── Driver API ────────────────────────────────────────────────────────

    /// Admit a new agent immediately.  It takes part from the next
    /// `advance_tick` on.
    ///
    /// # Errors
    ///
    /// `UnknownLane` / `Config` if `config` does not fit the road.  The id
    /// allocated for the rejected agent is not reused.
    pub fn create_agent(&mut self, config: AgentConfig) -> SimResult<AgentId> {
        self.admit(config).map_err(SimError::Agent)
    }

    /// Run the decide / resolve / commit cycle once over every active agent,
    /// then admit the agents scheduled for the next tick.
    ///
    /// A failure in any phase or in the admissions halts the simulation.
    pub fn advance_tick(&mut self) -> SimResult<TickReport> {
        if let Some((tick, cause)) = &self.halted {
            return Err(SimError::Halted { tick: *tick, cause: cause.clone() });
        }

        let now = self.clock.current_tick;
        let outcome = self.process_tick(now).and_then(|mut report| {
            self.clock.advance();
            report.admitted = self.admit_scheduled(self.clock.current_tick)?;
            Ok(report)
        });
        match outcome {
            Ok(report) => {
                log::debug!(
                    "{now}: {} agents, {} in conflict, {} overridden, {} admitted",
                    report.active_agents,
                    report.conflicted,
                    report.overridden,
                    report.admitted.len(),
                );
                Ok(report)
            }
            Err(cause) => {
                log::warn!("halting at {now}: {cause}");
                self.halted = Some((now, cause.clone()));
                Err(SimError::Agent(cause))
            }
        }
    }

    /// Read-only drawable state of one agent.  Side-effect free.
    pub fn snapshot_for_render(&self, id: AgentId) -> SimResult<RenderSnapshot> {
        Ok(self.roster.require(id)?.render_snapshot())
    }

    /// Drawable state of every active agent, ascending by id.
    pub fn render_all(&self) -> Vec<RenderSnapshot> {
        self.roster.iter().map(Agent::render_snapshot).collect()
    }

    /// Read-only view of the active agents.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The admission schedule currently loaded.
    pub fn scenario(&self) -> &ScenarioTable {
        &self.scenario
    }

    /// The error that halted the simulation, if any.
    pub fn halt_cause(&self) -> Option<&LtError> {
        self.halted.as_ref().map(|(_, cause)| cause)
    }

    /// Replace the scenario and start over from tick 0.
    ///
    /// The roster is cleared and the new table's tick-0 agents are admitted
    /// with fresh ids; ids are never reused across reloads.
    pub fn load_scenario(&mut self, scenario: ScenarioTable) -> SimResult<()> {
        scenario.validate(&self.config)?;
        self.scenario = scenario;
        self.restart()
    }

    /// Start the current scenario over from tick 0.
    pub fn restart(&mut self) -> SimResult<()> {
        self.roster.clear();
        self.clock.reset();
        self.channel.open_tick(Tick::ZERO);
        self.halted = None;
        let admitted = self.admit_scheduled(Tick::ZERO)?;
        log::info!(
            "scenario loaded: {} agents scheduled, {} on the road at {}",
            self.scenario.len(),
            admitted.len(),
            Tick::ZERO,
        );
        Ok(())
    }

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step_observed(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and interactive drivers.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step_observed(observer)?;
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step_observed<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        observer.on_tick_start(self.clock.current_tick);
        let report = self.advance_tick()?;
        observer.on_tick_end(&report);

        let interval = self.config.output_interval_ticks;
        if interval > 0 && report.tick.0.is_multiple_of(interval) {
            observer.on_snapshot(self.clock.current_tick, &self.roster);
        }
        Ok(())
    }

    fn process_tick(&mut self, now: Tick) -> LtResult<TickReport> {
        self.channel.open_tick(now);

        // ── Phase 1: decide & publish ─────────────────────────────────────
        self.decide_all()?;

        // ── Phase 2: resolve ──────────────────────────────────────────────
        //
        // Every agent has published, so each read sees the full tick.
        let resolutions = self.resolve_all()?;

        // ── Phase 3: commit ───────────────────────────────────────────────
        self.commit_all()?;

        Ok(TickReport {
            tick:          now,
            active_agents: resolutions.len(),
            conflicted:    resolutions.iter().filter(|r| r.had_conflict()).count(),
            overridden:    resolutions.iter().filter(|r| r.is_override()).count(),
            admitted:      Vec::new(),
        })
    }

    /// Phase 1.  Sequentially each agent publishes as soon as it decides;
    /// in parallel the snapshots are gathered first and published after the
    /// fan-in, since the channel has a single writer.
    fn decide_all(&mut self) -> LtResult<()> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let model   = &self.model;
        let config  = &self.config;
        let channel = &mut self.channel;
        let agents  = self.roster.as_mut_slice();

        #[cfg(not(feature = "parallel"))]
        {
            for agent in agents.iter_mut() {
                lt_behavior::decide_and_publish(agent, model, config, channel)?;
            }
            Ok(())
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let snapshots: Vec<_> = agents
                .par_iter_mut()
                .map(|agent| lt_behavior::declare(agent, model, config))
                .collect::<LtResult<_>>()?;
            for snapshot in snapshots {
                channel.publish_snapshot(snapshot);
            }
            Ok(())
        }
    }

    /// Phase 2.  Reads only the channel, writes only the agent's own intent.
    fn resolve_all(&mut self) -> LtResult<Vec<Resolution>> {
        let channel = &self.channel;
        let agents  = self.roster.as_mut_slice();

        #[cfg(not(feature = "parallel"))]
        {
            agents
                .iter_mut()
                .map(|agent| lt_behavior::resolve_agent(agent, channel))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            agents
                .par_iter_mut()
                .map(|agent| lt_behavior::resolve_agent(agent, channel))
                .collect()
        }
    }

    /// Phase 3.  Each commit touches only its own agent.
    fn commit_all(&mut self) -> LtResult<()> {
        let config = &self.config;
        let agents = self.roster.as_mut_slice();

        #[cfg(not(feature = "parallel"))]
        {
            agents.iter_mut().try_for_each(|agent| agent.commit(config))
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            agents.par_iter_mut().try_for_each(|agent| agent.commit(config))
        }
    }

    /// Build an agent with a fresh id and put it on the road.
    fn admit(&mut self, config: AgentConfig) -> LtResult<AgentId> {
        let id = self.ids.allocate();
        let agent = Agent::new(id, config, &self.config)?;
        self.roster.admit(agent)?;
        log::debug!("{} admitted at {}", id, self.clock.current_tick);
        Ok(id)
    }

    /// Admit every agent the scenario schedules for `tick`, in table order.
    fn admit_scheduled(&mut self, tick: Tick) -> LtResult<Vec<AgentId>> {
        let configs = self.scenario.admissions(tick).to_vec();
        configs
            .into_iter()
            .map(|config| self.admit(config))
            .collect()
    }
}
