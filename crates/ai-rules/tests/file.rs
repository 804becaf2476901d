use std::io::Write;

use ai_core::TickContext;
use ai_rules::{AttackAction, BehaviorFile, MoveAction, RuleError};

const GRUNT: &str = r#"
decision_interval: 0.2
seed: 42
behaviors:
  - name: flee
    conditions:
      - - { type: float, signal: health_percentage, op: "<", value: 0.2 }
    move_actions:
      - { action: { kind: retreat, distance: 10.0 } }
  - name: engage
    conditions:
      - - { type: bool, signal: is_target_detected, value: true }
        - { type: float, signal: distance_from_target, op: "<=", value: 9.0 }
      - - { type: int, signal: behavior_mode, op: "==", value: 2 }
    move_actions:
      - { action: { kind: chase, stopping_distance: 1.5 }, weight: 3 }
      - { action: { kind: strafe, radius: 4.0, clockwise: true }, weight: 1 }
    attack_actions:
      - { action: { kind: melee, range: 2.0, windup: 0.3, recovery: 0.5 } }
  - name: idle
    move_actions:
      - { action: { kind: patrol, radius: 4.0 } }
"#;

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn loads_yaml_and_drives_a_brain() {
    let tmp = write_temp(".yaml", GRUNT);
    let file = BehaviorFile::load(tmp.path()).unwrap();
    assert_eq!(file.seed, 42);
    assert_eq!(file.decision_interval, 0.2);
    assert_eq!(file.behaviors.len(), 3);

    let mut brain = file.into_brain(1).unwrap();
    let ctx = TickContext::new(0, 0.1, 0);
    assert_eq!(brain.tick(&ctx).unwrap().behavior_name, "idle");
    assert_eq!(brain.move_action(), Some(MoveAction::Patrol { radius: 4.0 }));

    brain.set_behavior_mode(2);
    let decision = brain.decide_now(1);
    assert_eq!(decision.behavior_name, "engage");
    assert_eq!(
        decision.attack_action,
        Some(AttackAction::Melee {
            range: 2.0,
            windup: 0.3,
            recovery: 0.5,
            damage: 10.0,
        })
    );
}

#[test]
fn json_extension_selects_json() {
    let yaml = BehaviorFile::from_yaml_str(GRUNT).unwrap();
    let json = serde_json::to_string_pretty(&yaml).unwrap();
    let tmp = write_temp(".json", &json);

    let loaded = BehaviorFile::load(tmp.path()).unwrap();
    assert_eq!(loaded, yaml);
}

#[test]
fn unknown_signal_fails_to_load() {
    let yaml = GRUNT.replace("health_percentage", "stamina");
    let tmp = write_temp(".yaml", &yaml);
    assert!(matches!(
        BehaviorFile::load(tmp.path()),
        Err(RuleError::Yaml(_))
    ));
}

#[test]
fn unknown_operator_fails_to_load() {
    let json = r#"{"behaviors":[{"name":"x","conditions":[[
        {"type":"int","signal":"behavior_mode","op":"<>","value":1}
    ]]}]}"#;
    assert!(matches!(
        BehaviorFile::from_json_str(json),
        Err(RuleError::Json(_))
    ));
}

#[test]
fn missing_file_reports_path() {
    let err = BehaviorFile::load(std::path::Path::new("/nonexistent/grunt.yaml")).unwrap_err();
    match err {
        RuleError::Io { path, .. } => assert!(path.ends_with("grunt.yaml")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn negative_weight_fails_validation_not_parsing() {
    let yaml = GRUNT.replace("weight: 3", "weight: -3");
    let file = BehaviorFile::from_yaml_str(&yaml).unwrap();
    assert!(matches!(
        file.validate(),
        Err(RuleError::InvalidWeight { behavior, .. }) if behavior == "engage"
    ));
}

fn assert_rejected(yaml: &str) {
    match BehaviorFile::from_yaml_str(yaml) {
        Err(RuleError::Yaml(_)) => {}
        other => panic!("misspelled key was accepted: {other:?}"),
    }
}

#[test]
fn misspelled_condition_keys_fail_to_load() {
    assert_rejected(&GRUNT.replace(
        r#"op: "<=", value: 9.0 }"#,
        r#"op: "<=", value: 9.0, invertd: true }"#,
    ));
    assert_rejected(&GRUNT.replace(
        "signal: is_target_detected, value: true",
        "signal: is_target_detected, valeu: true",
    ));
}

#[test]
fn misspelled_behavior_keys_fail_to_load() {
    assert_rejected(&GRUNT.replacen("conditions:", "condtions:", 1));
    assert_rejected(&GRUNT.replace("move_actions:", "move_action:"));
}

#[test]
fn misspelled_action_keys_fail_to_load() {
    assert_rejected(&GRUNT.replace("recovery: 0.5 }", "recovery: 0.5, damge: 50.0 }"));
    assert_rejected(&GRUNT.replace("weight: 3", "wieght: 3"));
    assert_rejected(&GRUNT.replace(
        "{ kind: patrol, radius: 4.0 }",
        "{ kind: patrol, raduis: 4.0 }",
    ));
}
