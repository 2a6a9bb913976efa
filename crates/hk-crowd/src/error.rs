use hk_agent::AgentError;
use hk_core::{AgentId, CoreError};
use hk_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrowdError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error(transparent)]
    Agents(#[from] AgentError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("target for agent {0} is not finite")]
    NonFiniteTarget(AgentId),
}

pub type CrowdResult<T> = Result<T, CrowdError>;
