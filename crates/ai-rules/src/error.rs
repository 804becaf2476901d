use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("behavior set must contain at least one behavior")]
    EmptyBehaviorSet,

    #[error("behavior {0:?} is declared more than once")]
    DuplicateBehavior(String),

    #[error("behavior {behavior:?} has an invalid condition: {reason}")]
    InvalidCondition { behavior: String, reason: String },

    #[error("behavior {behavior:?} has an invalid action weight {weight}")]
    InvalidWeight { behavior: String, weight: f32 },

    #[error("behavior {behavior:?} has an invalid action: {reason}")]
    InvalidAction { behavior: String, reason: String },

    #[error("decision interval must be finite and >= 0, got {0}")]
    InvalidDecisionInterval(f32),

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RuleError>;
