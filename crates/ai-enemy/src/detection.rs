use ai_core::Vec3;
use serde::{Deserialize, Serialize};

/// How a host decides whether an enemy perceives its target.
///
/// Hosts implementing [`PerceptionSource`](ai_core::PerceptionSource) can delegate to this
/// instead of writing their own cone and radius checks. Occlusion is left to the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum DetectionBehavior {
    /// Horizontal view cone of `fov_degrees` total width, `range` deep.
    Sight { range: f32, fov_degrees: f32 },
    /// Anything within `radius`, regardless of facing.
    Proximity { radius: f32 },
    Omniscient,
}

impl Default for DetectionBehavior {
    fn default() -> Self {
        DetectionBehavior::Sight {
            range: 15.0,
            fov_degrees: 120.0,
        }
    }
}

impl DetectionBehavior {
    pub fn detects(&self, observer: Vec3, forward: Vec3, target: Vec3) -> bool {
        match *self {
            DetectionBehavior::Omniscient => true,
            DetectionBehavior::Proximity { radius } => observer.distance(target) <= radius,
            DetectionBehavior::Sight { range, fov_degrees } => {
                let offset = flatten(target - observer);
                let distance = offset.length();
                if distance > range {
                    return false;
                }
                if distance <= f32::EPSILON || fov_degrees >= 360.0 {
                    return true;
                }
                let facing = flatten(forward).normalize_or_zero();
                if facing == Vec3::ZERO {
                    return false;
                }
                let half_angle = (fov_degrees.max(0.0) * 0.5).to_radians();
                let cos_angle = facing.dot(offset / distance).clamp(-1.0, 1.0);
                cos_angle.acos() <= half_angle
            }
        }
    }
}

fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EYE: Vec3 = Vec3::ZERO;
    const NORTH: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    #[test]
    fn sight_respects_range_and_cone() {
        let sight = DetectionBehavior::Sight {
            range: 10.0,
            fov_degrees: 90.0,
        };
        assert!(sight.detects(EYE, NORTH, Vec3::new(0.0, 0.0, 5.0)));
        assert!(sight.detects(EYE, NORTH, Vec3::new(3.0, 0.0, 5.0)));
        assert!(!sight.detects(EYE, NORTH, Vec3::new(6.0, 0.0, 5.0)));
        assert!(!sight.detects(EYE, NORTH, Vec3::new(0.0, 0.0, -5.0)));
        assert!(!sight.detects(EYE, NORTH, Vec3::new(0.0, 0.0, 10.5)));
    }

    #[test]
    fn sight_ignores_height_difference() {
        let sight = DetectionBehavior::Sight {
            range: 10.0,
            fov_degrees: 60.0,
        };
        assert!(sight.detects(EYE, NORTH, Vec3::new(0.0, 8.0, 4.0)));
    }

    #[test]
    fn full_circle_sight_sees_behind() {
        let sight = DetectionBehavior::Sight {
            range: 10.0,
            fov_degrees: 360.0,
        };
        assert!(sight.detects(EYE, NORTH, Vec3::new(0.0, 0.0, -5.0)));
    }

    #[test]
    fn proximity_and_omniscient() {
        let near = DetectionBehavior::Proximity { radius: 2.0 };
        assert!(near.detects(EYE, NORTH, Vec3::new(0.0, 0.0, -2.0)));
        assert!(!near.detects(EYE, NORTH, Vec3::new(0.0, 0.0, 2.5)));
        assert!(DetectionBehavior::Omniscient.detects(EYE, NORTH, Vec3::splat(1e6)));
    }

    #[test]
    fn parses_from_tagged_yaml() {
        let sight: DetectionBehavior =
            serde_yaml::from_str("{ kind: sight, range: 12.0, fov_degrees: 90.0 }").unwrap();
        assert_eq!(
            sight,
            DetectionBehavior::Sight {
                range: 12.0,
                fov_degrees: 90.0,
            }
        );
        let all: DetectionBehavior = serde_yaml::from_str("kind: omniscient").unwrap();
        assert_eq!(all, DetectionBehavior::Omniscient);
        assert!(serde_yaml::from_str::<DetectionBehavior>("kind: telepathy").is_err());
    }
}
