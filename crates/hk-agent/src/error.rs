use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("{what}[{index}] is not finite")]
    NonFinite { what: &'static str, index: usize },
}

pub type AgentResult<T> = Result<T, AgentError>;
