use lt_core::LtError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario parse error: {0}")]
    Parse(String),

    #[error("no built-in scenario {0}")]
    UnknownScenario(usize),

    #[error("invalid scenario entry: {0}")]
    Invalid(#[from] LtError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
