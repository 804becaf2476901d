use ai_core::Vec3;
use ai_rules::MoveAction;
use glam::Quat;

use crate::context::EnemyContext;

/// Turn a move action into navigation commands on `ctx`.
///
/// Target-relative actions (`Chase`, `Strafe`, `Retreat`) stop the enemy when there is no
/// remembered target.
pub fn steer(action: MoveAction, ctx: &mut EnemyContext) {
    let tolerance = ctx.config.arrive_tolerance;
    match action {
        MoveAction::Hold => ctx.stop(),
        MoveAction::ReturnHome => {
            if ctx.position.distance(ctx.home) <= tolerance {
                ctx.stop();
            } else {
                ctx.move_to(ctx.home);
            }
        }
        MoveAction::Patrol { radius } => {
            if ctx.arrived() {
                let point = ctx.patrol_point(radius);
                ctx.move_to(point);
            }
        }
        MoveAction::Chase { stopping_distance } => {
            let Some(target) = ctx.target.last_known else {
                return ctx.stop();
            };
            if ctx.distance_to_target <= stopping_distance {
                ctx.stop();
            } else {
                let approach = horizontal(ctx.position - target).normalize_or_zero();
                ctx.move_to(target + approach * stopping_distance);
            }
        }
        MoveAction::Strafe { radius, clockwise } => {
            let Some(target) = ctx.target.last_known else {
                return ctx.stop();
            };
            if ctx.arrived() {
                let step = ctx.config.strafe_step_degrees.to_radians();
                let angle = if clockwise { -step } else { step };
                let mut offset = horizontal(ctx.position - target).normalize_or_zero();
                if offset == Vec3::ZERO {
                    offset = -horizontal(ctx.forward).normalize_or_zero();
                }
                let waypoint = target + Quat::from_rotation_y(angle) * offset * radius;
                ctx.move_to(waypoint);
            }
        }
        MoveAction::Retreat { distance } => {
            let Some(target) = ctx.target.last_known else {
                return ctx.stop();
            };
            if ctx.distance_to_target >= distance {
                ctx.stop();
            } else {
                let mut away = horizontal(ctx.position - target).normalize_or_zero();
                if away == Vec3::ZERO {
                    away = -horizontal(ctx.forward).normalize_or_zero();
                }
                ctx.move_to(ctx.position + away * (distance - ctx.distance_to_target));
            }
        }
    }
}

fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}
