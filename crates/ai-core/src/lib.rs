//! Deterministic, engine-agnostic primitives shared by the enemy AI crates.
//!
//! Nothing here knows about states, rules, or behaviors. The crate provides the per-step
//! [`TickContext`], a small deterministic RNG, [`CountdownTimer`] for multi-step waits, and the
//! capability traits through which a host simulation exposes positions, perception, health,
//! navigation, and velocity.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod rng;
pub mod tick;
pub mod timer;
pub mod world;

pub use glam::Vec3;
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::{AgentId, TickContext};
pub use timer::CountdownTimer;
pub use world::{
    ContactEvent, ContactPhase, HealthSource, NavigationSource, PerceptionSource, PositionSource,
    VelocitySource, WorldView,
};
