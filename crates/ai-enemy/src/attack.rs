use ai_core::CountdownTimer;
use ai_rules::AttackAction;

use crate::command::EnemyCommand;
use crate::context::EnemyContext;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AttackPhase {
    #[default]
    Idle,
    /// Wind-up, or the fuse of a charge.
    Windup,
    /// The single step that emits the hit.
    Strike,
    Recovery,
    Finished,
}

/// Runs one attack as timed phases: `Windup -> Strike -> Recovery -> Finished`.
///
/// Nothing happens between calls to [`AttackExecutor::step`]; all waiting is done by
/// [`CountdownTimer`]s advanced with the step's `dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackExecutor {
    attack: Option<AttackAction>,
    phase: AttackPhase,
    timer: CountdownTimer,
    strikes: u32,
}

impl Default for AttackExecutor {
    fn default() -> Self {
        Self {
            attack: None,
            phase: AttackPhase::Idle,
            timer: CountdownTimer::expired(0.0),
            strikes: 0,
        }
    }
}

impl AttackExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attack(&self) -> Option<AttackAction> {
        self.attack
    }

    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    /// Hits emitted by the current attack.
    pub fn strikes(&self) -> u32 {
        self.strikes
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.phase,
            AttackPhase::Windup | AttackPhase::Strike | AttackPhase::Recovery
        )
    }

    pub fn is_finished(&self) -> bool {
        self.phase == AttackPhase::Finished
    }

    pub fn begin(&mut self, attack: AttackAction) {
        self.attack = Some(attack);
        self.phase = AttackPhase::Windup;
        self.timer.start_with(windup_seconds(attack));
        self.strikes = 0;
    }

    pub fn cancel(&mut self) {
        self.attack = None;
        self.phase = AttackPhase::Idle;
        self.timer.stop();
    }

    /// Cut the wind-up short so the hit lands on the next step. Returns whether it did.
    pub fn trigger_early(&mut self) -> bool {
        if self.phase != AttackPhase::Windup {
            return false;
        }
        self.timer.stop();
        self.phase = AttackPhase::Strike;
        true
    }

    pub fn step(&mut self, dt: f32, ctx: &mut EnemyContext) -> AttackPhase {
        let Some(attack) = self.attack else {
            return self.phase;
        };

        match self.phase {
            AttackPhase::Idle | AttackPhase::Finished => {}
            AttackPhase::Windup => {
                let charging = matches!(attack, AttackAction::Charge { .. });
                if let Some(target) = ctx.target.last_known.filter(|_| charging) {
                    ctx.move_to(target);
                }
                if self.timer.update(dt) {
                    self.phase = AttackPhase::Strike;
                }
            }
            AttackPhase::Strike => {
                let command = strike_command(attack, ctx);
                tracing::debug!(
                    agent = ctx.agent,
                    tick = ctx.tick,
                    attack = attack.name(),
                    damage = attack.damage(),
                    "attack strike"
                );
                ctx.push(command);
                self.strikes += 1;

                self.phase = AttackPhase::Recovery;
                self.timer.start_with(recovery_seconds(attack));
            }
            AttackPhase::Recovery => {
                if self.timer.update(dt) {
                    self.phase = AttackPhase::Finished;
                }
            }
        }
        self.phase
    }
}

fn windup_seconds(attack: AttackAction) -> f32 {
    match attack {
        AttackAction::Melee { windup, .. } | AttackAction::Ranged { windup, .. } => windup,
        AttackAction::Charge { fuse, .. } => fuse,
    }
}

fn recovery_seconds(attack: AttackAction) -> f32 {
    match attack {
        AttackAction::Melee { recovery, .. } | AttackAction::Ranged { recovery, .. } => recovery,
        AttackAction::Charge { .. } => 0.0,
    }
}

fn strike_command(attack: AttackAction, ctx: &EnemyContext) -> EnemyCommand {
    match attack {
        AttackAction::Melee { range, damage, .. } => EnemyCommand::Strike { damage, range },
        AttackAction::Ranged { range, damage, .. } => EnemyCommand::FireProjectile {
            damage,
            target: ctx
                .target
                .last_known
                .unwrap_or(ctx.position + ctx.forward * range),
        },
        AttackAction::Charge { radius, damage, .. } => EnemyCommand::Detonate { damage, radius },
    }
}
