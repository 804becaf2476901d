use ai_fsm::FsmError;
use ai_rules::RuleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnemyError {
    #[error("state machine: {0}")]
    Fsm(#[from] FsmError),

    #[error("behavior rules: {0}")]
    Rules(#[from] RuleError),
}

pub type Result<T> = std::result::Result<T, EnemyError>;
