//! Generic finite state machine keyed by a closed set of state identifiers.
//!
//! The machine owns its states and a shared context value. Each tick it asks the current state
//! where to go next; staying put runs `update`, anything else runs `exit` on the old state and
//! `enter` on the new one before the tick returns.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod machine;
pub mod state;

pub use error::{FsmError, Result};
pub use machine::{StateMachine, TickOutcome};
pub use state::{State, StateKey};
