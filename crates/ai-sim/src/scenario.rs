//! Scenario configuration, loaded from YAML.

use std::path::Path;

use ai_core::Vec3;
use ai_enemy::{DetectionBehavior, EnemyConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One enemy against one scripted target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub enemy: EnemySetup,
    pub target: TargetSetup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnemySetup {
    #[serde(default)]
    pub home: Vec3,

    /// Movement speed in units per second
    #[serde(default = "default_enemy_speed")]
    pub speed: f32,

    #[serde(default = "default_health")]
    pub max_health: f32,

    #[serde(default)]
    pub detection: DetectionBehavior,

    /// Distance at which the target touches the enemy's trigger volume
    #[serde(default = "default_contact_radius")]
    pub contact_radius: f32,

    #[serde(default)]
    pub agent: EnemyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSetup {
    /// Path walked in order; the target stays at the last point
    #[serde(default = "default_waypoints")]
    pub waypoints: Vec<Vec3>,

    #[serde(default = "default_target_speed")]
    pub speed: f32,

    #[serde(default = "default_health")]
    pub health: f32,
}

fn default_enemy_speed() -> f32 {
    3.0
}
fn default_target_speed() -> f32 {
    2.0
}
fn default_health() -> f32 {
    100.0
}
fn default_contact_radius() -> f32 {
    0.75
}
fn default_waypoints() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.0, 24.0),
        Vec3::new(0.0, 0.0, 2.0),
        Vec3::new(0.5, 0.0, 2.0),
        Vec3::new(40.0, 0.0, 40.0),
    ]
}

impl Default for EnemySetup {
    fn default() -> Self {
        Self {
            home: Vec3::ZERO,
            speed: default_enemy_speed(),
            max_health: default_health(),
            detection: DetectionBehavior::default(),
            contact_radius: default_contact_radius(),
            agent: EnemyConfig::default(),
        }
    }
}

impl Default for TargetSetup {
    fn default() -> Self {
        Self {
            waypoints: default_waypoints(),
            speed: default_target_speed(),
            health: default_health(),
        }
    }
}

impl ScenarioConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))?;
        Ok(config)
    }
}
