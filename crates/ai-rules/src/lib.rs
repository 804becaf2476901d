//! Condition/action behavior selection.
//!
//! A [`BehaviorSet`] is an ordered list of authored [`BehaviorState`]s. Each state is guarded by
//! condition groups: a group passes when all of its conditions hold, and a state activates when
//! any of its groups passes. Selection walks the list in declaration order and takes the first
//! state that activates; when none does, the last declared state is the fallback.
//!
//! The [`Brain`] re-runs selection against its [`Telemetry`] snapshot on a fixed decision
//! interval and publishes a [`Decision`]: the chosen behavior plus a weighted roll of its move and
//! attack actions.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod behavior;
pub mod brain;
pub mod condition;
pub mod error;
pub mod file;
pub mod telemetry;

pub use action::{ActionTable, AttackAction, MoveAction, WeightedAction};
pub use behavior::{BehaviorSet, BehaviorState, Selection};
pub use brain::{Brain, BrainConfig, Decision};
pub use condition::{
    BoolCondition, Condition, ConditionGroup, FloatCondition, FloatOp, IntCondition, IntOp,
    LOOSE_EQUALITY_EPSILON,
};
pub use error::{Result, RuleError};
pub use file::BehaviorFile;
pub use telemetry::{BoolSignal, FloatSignal, IntSignal, Telemetry};
