use ai_core::{
    HealthSource, NavigationSource, PerceptionSource, PositionSource, Vec3, VelocitySource,
};
use serde::{Deserialize, Serialize};

use crate::context::IkSide;

/// Side effects requested by the enemy's states, applied by the host after the tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EnemyCommand {
    SetDestination { point: Vec3 },
    Stop,
    FaceTowards { point: Vec3 },
    /// Melee hit resolved by the host against whatever is within `range`.
    Strike { damage: f32, range: f32 },
    FireProjectile { damage: f32, target: Vec3 },
    Detonate { damage: f32, radius: f32 },
    SetIkSide { side: IkSide },
}

impl EnemyCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyCommand::SetDestination { .. } => "set_destination",
            EnemyCommand::Stop => "stop",
            EnemyCommand::FaceTowards { .. } => "face_towards",
            EnemyCommand::Strike { .. } => "strike",
            EnemyCommand::FireProjectile { .. } => "fire_projectile",
            EnemyCommand::Detonate { .. } => "detonate",
            EnemyCommand::SetIkSide { .. } => "set_ik_side",
        }
    }

    pub fn is_attack(&self) -> bool {
        matches!(
            self,
            EnemyCommand::Strike { .. }
                | EnemyCommand::FireProjectile { .. }
                | EnemyCommand::Detonate { .. }
        )
    }
}

/// Everything the enemy reads from and writes to its host simulation.
///
/// Navigation commands (`SetDestination`, `Stop`) are applied through [`NavigationSource`];
/// everything else is handed to [`EnemyHost::execute`].
pub trait EnemyHost:
    PositionSource + PerceptionSource + HealthSource + NavigationSource + VelocitySource
{
    fn execute(&mut self, agent: Self::Agent, command: &EnemyCommand);
}
