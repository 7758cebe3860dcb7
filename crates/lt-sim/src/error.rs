use lt_core::{LtError, Tick};
use lt_scenario::ScenarioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Agent(#[from] LtError),

    #[error("scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// A previous tick failed; the simulation refuses to continue until a
    /// scenario is (re)loaded.
    #[error("simulation halted at {tick}: {cause}")]
    Halted {
        tick:  Tick,
        #[source]
        cause: LtError,
    },
}

pub type SimResult<T> = Result<T, SimError>;
