use serde::{Deserialize, Serialize};

/// Live signals the conditions are evaluated against.
///
/// Written once per tick by whoever owns the host queries (see `ai-enemy`), read by the
/// selector. Missing data is encoded as sentinels rather than errors: no target means
/// `distance_from_target == f32::INFINITY` and `is_target_detected == false`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Telemetry {
    pub distance_from_target: f32,
    /// Remaining path length to the navigation destination.
    pub distance_from_destination: f32,
    pub speed: f32,
    /// Current over max health, in `[0, 1]`.
    pub health_percentage: f32,
    pub is_target_detected: bool,
    /// Integer tag of an externally chosen behavior mode (scripted overrides, difficulty, ...).
    pub behavior_mode: i32,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self {
            distance_from_target: f32::INFINITY,
            distance_from_destination: f32::INFINITY,
            speed: 0.0,
            health_percentage: 1.0,
            is_target_detected: false,
            behavior_mode: 0,
        }
    }
}

impl Telemetry {
    pub fn float(&self, signal: FloatSignal) -> f32 {
        match signal {
            FloatSignal::DistanceFromTarget => self.distance_from_target,
            FloatSignal::DistanceFromDestination => self.distance_from_destination,
            FloatSignal::Speed => self.speed,
            FloatSignal::HealthPercentage => self.health_percentage,
        }
    }

    pub fn int(&self, signal: IntSignal) -> i32 {
        match signal {
            IntSignal::BehaviorMode => self.behavior_mode,
        }
    }

    pub fn bool(&self, signal: BoolSignal) -> bool {
        match signal {
            BoolSignal::IsTargetDetected => self.is_target_detected,
        }
    }

    /// Drop everything target-related back to the "no target" sentinels.
    pub fn clear_target(&mut self) {
        self.distance_from_target = f32::INFINITY;
        self.is_target_detected = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatSignal {
    DistanceFromTarget,
    DistanceFromDestination,
    Speed,
    HealthPercentage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntSignal {
    BehaviorMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoolSignal {
    IsTargetDetected,
}
