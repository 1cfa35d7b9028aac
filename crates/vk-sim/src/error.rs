use thiserror::Error;
use vk_core::{AgentId, Step, VkError};

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] VkError),

    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("heading of {agent} has zero norm after noise at {step}")]
    DegenerateHeading { agent: AgentId, step: Step },

    #[error("run cancelled after {completed}")]
    Cancelled { completed: Step },
}

pub type SimResult<T> = Result<T, SimError>;
