use ai_core::{ContactEvent, TickContext};
use ai_fsm::State;
use ai_rules::{AttackAction, MoveAction};
use serde::{Deserialize, Serialize};

use crate::attack::AttackExecutor;
use crate::context::EnemyContext;
use crate::steering::steer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyStateKey {
    Reset,
    Search,
    Approach,
    Attack,
}

impl EnemyStateKey {
    pub fn name(self) -> &'static str {
        match self {
            EnemyStateKey::Reset => "reset",
            EnemyStateKey::Search => "search",
            EnemyStateKey::Approach => "approach",
            EnemyStateKey::Attack => "attack",
        }
    }
}

/// Forgets the target and heads home. Always hands over to `Search` on the next tick.
#[derive(Debug, Default)]
pub struct ResetState;

impl State<EnemyStateKey, EnemyContext> for ResetState {
    fn next_state(&self, _context: &EnemyContext) -> EnemyStateKey {
        EnemyStateKey::Search
    }

    fn update(&mut self, _tick: &TickContext, _context: &mut EnemyContext) {}

    fn enter(&mut self, context: &mut EnemyContext) {
        context.forget_target();
        steer(MoveAction::ReturnHome, context);
    }
}

/// Idles or patrols per the Brain until the target is seen or makes contact.
#[derive(Debug, Default)]
pub struct SearchState;

impl State<EnemyStateKey, EnemyContext> for SearchState {
    fn next_state(&self, context: &EnemyContext) -> EnemyStateKey {
        if context.target.detected || context.target.alerted {
            EnemyStateKey::Approach
        } else {
            EnemyStateKey::Search
        }
    }

    fn update(&mut self, _tick: &TickContext, context: &mut EnemyContext) {
        let action = context.brain.move_action().unwrap_or(MoveAction::Hold);
        steer(action, context);
    }

    fn on_trigger_enter(&mut self, contact: &ContactEvent, context: &mut EnemyContext) {
        if contact.layer == context.config.target_layer {
            context.notice(contact.point);
        }
    }
}

/// Closes in on the target until an attack is in range, or gives up once it is lost.
#[derive(Debug, Default)]
pub struct ApproachState;

impl ApproachState {
    fn attack_in_range(context: &EnemyContext) -> Option<AttackAction> {
        let attack = context.brain.attack_action()?;
        (context.target.detected && context.distance_to_target <= attack.range()).then_some(attack)
    }
}

impl State<EnemyStateKey, EnemyContext> for ApproachState {
    fn next_state(&self, context: &EnemyContext) -> EnemyStateKey {
        if context.target_lost() {
            EnemyStateKey::Reset
        } else if Self::attack_in_range(context).is_some() {
            EnemyStateKey::Attack
        } else {
            EnemyStateKey::Approach
        }
    }

    fn update(&mut self, _tick: &TickContext, context: &mut EnemyContext) {
        if !context.target.detected {
            // Investigate where the target was last known to be.
            if let Some(target) = context.target.last_known {
                context.move_to(target);
            }
            return;
        }

        let action = context.brain.move_action().unwrap_or_else(|| {
            let reach = context.brain.attack_action().map_or(1.0, |a| a.range());
            MoveAction::Chase {
                stopping_distance: reach * 0.9,
            }
        });
        steer(action, context);
        context.face_target();
    }
}

/// Drives one attack through [`AttackExecutor`], then returns to `Approach`.
#[derive(Debug, Default)]
pub struct AttackState {
    executor: AttackExecutor,
}

impl AttackState {
    pub fn executor(&self) -> &AttackExecutor {
        &self.executor
    }
}

impl State<EnemyStateKey, EnemyContext> for AttackState {
    fn next_state(&self, _context: &EnemyContext) -> EnemyStateKey {
        if self.executor.is_active() {
            EnemyStateKey::Attack
        } else {
            EnemyStateKey::Approach
        }
    }

    fn update(&mut self, tick: &TickContext, context: &mut EnemyContext) {
        context.face_target();
        self.executor.step(tick.dt_seconds, context);
    }

    fn enter(&mut self, context: &mut EnemyContext) {
        let Some(attack) = context.brain.attack_action() else {
            return;
        };
        if !matches!(attack, AttackAction::Charge { .. }) {
            context.stop();
        }
        self.executor.begin(attack);
    }

    fn exit(&mut self, context: &mut EnemyContext) {
        self.executor.cancel();
        // Let the next attack in this behavior be rolled afresh.
        context.brain.request_reroll();
    }

    fn on_trigger_enter(&mut self, contact: &ContactEvent, context: &mut EnemyContext) {
        let charging = matches!(self.executor.attack(), Some(AttackAction::Charge { .. }));
        if charging && contact.layer == context.config.target_layer {
            self.executor.trigger_early();
        }
    }
}
