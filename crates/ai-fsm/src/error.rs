use thiserror::Error;

/// Authoring and wiring mistakes. None of these are expected at runtime in a correctly built
/// machine, so callers usually propagate them straight up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsmError {
    #[error("state {0} is already registered")]
    DuplicateState(String),

    #[error("state {0} is not registered")]
    UnknownState(String),

    #[error("initial state is already set to {0}")]
    InitialStateAlreadySet(String),

    #[error("state machine has no initial state")]
    NotStarted,

    #[error("transition {from} -> {to} panicked before it finished")]
    Poisoned { from: String, to: String },
}

pub type Result<T> = std::result::Result<T, FsmError>;

pub(crate) fn key_name<K: core::fmt::Debug>(key: &K) -> String {
    format!("{key:?}")
}
