//! Authored behavior files.
//!
//! ```yaml
//! decision_interval: 0.1
//! seed: 7
//! behaviors:
//!   - name: engage
//!     conditions:
//!       - - { type: bool, signal: is_target_detected, value: true }
//!         - { type: float, signal: distance_from_target, op: "<=", value: 9.0 }
//!     move_actions:
//!       - { action: { kind: chase, stopping_distance: 1.5 }, weight: 3 }
//!     attack_actions:
//!       - { action: { kind: melee, range: 2.0, windup: 0.3, recovery: 0.5 } }
//!   - name: idle
//!     move_actions:
//!       - { action: { kind: patrol, radius: 4.0 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::behavior::{BehaviorSet, BehaviorState};
use crate::brain::{Brain, BrainConfig};
use crate::error::{Result, RuleError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BehaviorFile {
    #[serde(default = "default_decision_interval")]
    pub decision_interval: f32,

    #[serde(default)]
    pub seed: u64,

    pub behaviors: Vec<BehaviorState>,
}

fn default_decision_interval() -> f32 {
    BrainConfig::default().decision_interval
}

impl BehaviorFile {
    /// Read a behavior file; `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RuleError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn brain_config(&self) -> BrainConfig {
        BrainConfig {
            decision_interval: self.decision_interval,
            seed: self.seed,
        }
    }

    /// Validate the behaviors without building a Brain.
    pub fn validate(&self) -> Result<BehaviorSet> {
        BehaviorSet::new(self.behaviors.clone())
    }

    pub fn into_behavior_set(self) -> Result<BehaviorSet> {
        BehaviorSet::new(self.behaviors)
    }

    pub fn into_brain(self, agent: u64) -> Result<Brain> {
        let config = self.brain_config();
        Brain::new(agent, self.into_behavior_set()?, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::MoveAction;
    use crate::condition::{Condition, FloatOp};
    use crate::telemetry::FloatSignal;

    #[test]
    fn minimal_yaml_uses_defaults() {
        let file = BehaviorFile::from_yaml_str(
            "behaviors:\n  - name: idle\n    move_actions:\n      - action: { kind: hold }\n",
        )
        .unwrap();
        assert_eq!(file.seed, 0);
        assert_eq!(file.decision_interval, 1.0 / 15.0);
        assert_eq!(file.behaviors[0].conditions.len(), 0);
        assert_eq!(file.behaviors[0].move_actions.entries()[0].weight, 1.0);
        assert_eq!(
            file.behaviors[0].move_actions.entries()[0].action,
            MoveAction::Hold
        );
    }

    #[test]
    fn operator_symbols_and_names_both_parse() {
        let yaml = r#"
behaviors:
  - name: near
    conditions:
      - - { type: float, signal: distance_from_target, op: "<=", value: 9.0 }
      - - { type: float, signal: distance_from_target, op: less_than_or_equal_to, value: 9.0 }
"#;
        let file = BehaviorFile::from_yaml_str(yaml).unwrap();
        let expected = Condition::float(
            FloatSignal::DistanceFromTarget,
            FloatOp::LessThanOrEqualTo,
            9.0,
        );
        let groups = &file.behaviors[0].conditions;
        assert_eq!(groups[0].conditions(), &[expected]);
        assert_eq!(groups[1].conditions(), &[expected]);
    }

    #[test]
    fn int_signal_in_float_condition_is_rejected() {
        let yaml = r#"
behaviors:
  - name: bad
    conditions:
      - - { type: float, signal: behavior_mode, op: "==", value: 1.0 }
"#;
        assert!(matches!(
            BehaviorFile::from_yaml_str(yaml),
            Err(RuleError::Yaml(_))
        ));
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        let yaml = "decison_interval: 0.2\nbehaviors: []\n";
        assert!(BehaviorFile::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn empty_behavior_list_parses_but_does_not_validate() {
        let file = BehaviorFile::from_yaml_str("behaviors: []\n").unwrap();
        assert!(matches!(
            file.into_brain(0),
            Err(RuleError::EmptyBehaviorSet)
        ));
    }
}
