use ai_core::{HealthSource, NavigationSource, PerceptionSource, PositionSource, VelocitySource};
use ai_rules::Telemetry;

/// Overwrite the host-derived signals of `telemetry` for `agent`.
///
/// `behavior_mode` is owned by whoever sets it externally and is left alone. Missing data maps
/// to the "no data" sentinels: no position or no last known target gives an infinite target
/// distance, no destination gives an infinite destination distance.
pub fn refresh_telemetry<H>(host: &H, agent: H::Agent, telemetry: &mut Telemetry)
where
    H: PositionSource + PerceptionSource + HealthSource + NavigationSource + VelocitySource,
{
    let position = host.position(agent);
    let last_known = host.last_known_target_position(agent);

    telemetry.distance_from_target = match (position, last_known) {
        (Some(position), Some(target)) => position.distance(target),
        _ => f32::INFINITY,
    };
    telemetry.distance_from_destination = host.remaining_distance(agent).unwrap_or(f32::INFINITY);
    telemetry.speed = host.speed(agent);
    telemetry.health_percentage = health_fraction(host.health(agent), host.max_health(agent));
    telemetry.is_target_detected = host.is_target_detected(agent);
}

fn health_fraction(health: f32, max_health: f32) -> f32 {
    if max_health <= 0.0 || !max_health.is_finite() {
        return 0.0;
    }
    (health / max_health).clamp(0.0, 1.0)
}
