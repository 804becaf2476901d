//! Reference enemy built from the generic pieces.
//!
//! [`EnemyAgent`] owns a [`StateMachine`](ai_fsm::StateMachine) over [`EnemyStateKey`] whose
//! context carries the [`Brain`](ai_rules::Brain). Each logical step it refreshes telemetry from
//! the host, ticks the Brain on its decision interval, ticks the state machine, and hands the
//! queued [`EnemyCommand`]s back to the host. States never touch the host directly.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod attack;
pub mod command;
pub mod context;
pub mod detection;
pub mod error;
pub mod states;
pub mod steering;
pub mod telemetry;

pub use agent::EnemyAgent;
pub use attack::{AttackExecutor, AttackPhase};
pub use command::{EnemyCommand, EnemyHost};
pub use context::{EnemyConfig, EnemyContext, IkSide, TargetMemory};
pub use detection::DetectionBehavior;
pub use error::{EnemyError, Result};
pub use states::{ApproachState, AttackState, EnemyStateKey, ResetState, SearchState};
pub use telemetry::refresh_telemetry;
