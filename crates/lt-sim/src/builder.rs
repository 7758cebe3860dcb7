//! Fluent builder for constructing a [`Sim`].

use lt_behavior::DecisionModel;
use lt_core::SimConfig;
use lt_scenario::ScenarioTable;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<M>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: lane count, nominal speed, run length, …
/// - `M: DecisionModel`: the phase-1 rule (usually
///   [`lt_behavior::CruiseAndMerge`])
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                  |
/// |-----------------|--------------------------|
/// | `.scenario(t)`  | Empty `ScenarioTable`    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, CruiseAndMerge)
///     .scenario(builtin::converge())
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<M: DecisionModel> {
    config:   SimConfig,
    model:    M,
    scenario: Option<ScenarioTable>,
}

impl<M: DecisionModel> SimBuilder<M> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, model: M) -> Self {
        Self { config, model, scenario: None }
    }

    /// Supply the admission schedule.
    ///
    /// If not called, the road starts empty and agents only enter through
    /// [`Sim::create_agent`].
    pub fn scenario(mut self, scenario: ScenarioTable) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Validate inputs, admit the tick-0 agents, and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<M>> {
        self.config
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;

        let scenario = self.scenario.unwrap_or_default();
        scenario.validate(&self.config)?;

        let mut sim = Sim::new(self.config, self.model, scenario);
        sim.restart()?;
        Ok(sim)
    }
}
