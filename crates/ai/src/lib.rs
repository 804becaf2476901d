//! Umbrella crate that re-exports the `ai-*` building blocks.
//!
//! - [`core`]: ticks, seeded randomness, countdown timers, host capability traits
//! - [`fsm`]: the enum-keyed state machine
//! - [`rules`]: condition/action behavior selection (the Brain)
//! - [`enemy`]: a reference enemy built from the two
//! - [`tools`]: trace recording
//!
//! ```
//! use ai::core::TickContext;
//! use ai::rules::{BehaviorFile, MoveAction};
//!
//! let file = BehaviorFile::from_yaml_str(
//!     "behaviors:\n  - name: idle\n    move_actions:\n      - { action: { kind: hold } }\n",
//! )
//! .unwrap();
//! let mut brain = file.into_brain(1).unwrap();
//! brain.tick(&TickContext::new(0, 0.1, 0));
//! assert_eq!(brain.move_action(), Some(MoveAction::Hold));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use ai_core as core;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use ai_tools as tools;

#[cfg(feature = "fsm")]
#[cfg_attr(docsrs, doc(cfg(feature = "fsm")))]
pub use ai_fsm as fsm;

#[cfg(feature = "rules")]
#[cfg_attr(docsrs, doc(cfg(feature = "rules")))]
pub use ai_rules as rules;

#[cfg(feature = "enemy")]
#[cfg_attr(docsrs, doc(cfg(feature = "enemy")))]
pub use ai_enemy as enemy;
