use glam::Vec3;

use crate::AgentId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Read-only world access.
///
/// The host decides what an agent is; the capability traits below add the queries the AI
/// needs. Each subsystem depends only on the capabilities it reads.
pub trait WorldView {
    type Agent: AgentId;
}

/// World-space placement of agents and their tracked target.
pub trait PositionSource: WorldView {
    fn position(&self, agent: Self::Agent) -> Option<Vec3>;

    /// Unit facing direction.
    fn forward(&self, agent: Self::Agent) -> Vec3;

    /// Current position of the agent's tracked target, if it has one.
    fn target_position(&self, agent: Self::Agent) -> Option<Vec3>;
}

pub trait PerceptionSource: WorldView {
    fn is_target_detected(&self, agent: Self::Agent) -> bool;

    /// Where the target was when it was last perceived.
    fn last_known_target_position(&self, agent: Self::Agent) -> Option<Vec3>;
}

pub trait HealthSource: WorldView {
    fn health(&self, agent: Self::Agent) -> f32;
    fn max_health(&self, agent: Self::Agent) -> f32;
}

pub trait NavigationSource: WorldView {
    /// Remaining path length to the current destination. `None` when there is no destination.
    fn remaining_distance(&self, agent: Self::Agent) -> Option<f32>;

    fn set_destination(&mut self, agent: Self::Agent, destination: Vec3);

    fn clear_destination(&mut self, agent: Self::Agent);
}

pub trait VelocitySource: WorldView {
    fn velocity(&self, agent: Self::Agent) -> Vec3;

    fn speed(&self, agent: Self::Agent) -> f32 {
        self.velocity(agent).length()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ContactPhase {
    Enter,
    Stay,
    Exit,
}

/// A trigger-volume contact reported by the host's physics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactEvent {
    pub phase: ContactPhase,
    /// Host-defined id of the other collider.
    pub other: u64,
    /// Host-defined collision layer of the other collider.
    pub layer: u32,
    pub point: Vec3,
}

impl ContactEvent {
    pub fn new(phase: ContactPhase, other: u64, layer: u32, point: Vec3) -> Self {
        Self {
            phase,
            other,
            layer,
            point,
        }
    }
}
