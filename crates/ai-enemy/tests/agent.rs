use ai_core::{
    ContactEvent, ContactPhase, HealthSource, NavigationSource, PerceptionSource, PositionSource,
    TickContext, Vec3, VelocitySource, WorldView,
};
use ai_enemy::{EnemyAgent, EnemyCommand, EnemyConfig, EnemyHost, EnemyStateKey};
use ai_fsm::TickOutcome;
use ai_rules::{
    AttackAction, BehaviorSet, BehaviorState, BoolSignal, Brain, BrainConfig, Condition,
    MoveAction,
};
use ai_tools::SharedTraceSink;

const DT: f32 = 0.1;
const HOME: Vec3 = Vec3::new(0.0, 0.0, 0.0);

/// Host whose world only changes when the test says so.
struct ScriptedHost {
    position: Vec3,
    target: Option<Vec3>,
    detected: bool,
    health: f32,
    destination: Option<Vec3>,
    executed: Vec<EnemyCommand>,
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self {
            position: HOME,
            target: None,
            detected: false,
            health: 100.0,
            destination: None,
            executed: Vec::new(),
        }
    }
}

impl ScriptedHost {
    fn see_target_at(&mut self, point: Vec3) {
        self.target = Some(point);
        self.detected = true;
    }

    fn strikes(&self) -> usize {
        self.executed.iter().filter(|c| c.is_attack()).count()
    }
}

impl WorldView for ScriptedHost {
    type Agent = u64;
}

impl PositionSource for ScriptedHost {
    fn position(&self, _agent: u64) -> Option<Vec3> {
        Some(self.position)
    }

    fn forward(&self, _agent: u64) -> Vec3 {
        Vec3::Z
    }

    fn target_position(&self, _agent: u64) -> Option<Vec3> {
        self.target
    }
}

impl PerceptionSource for ScriptedHost {
    fn is_target_detected(&self, _agent: u64) -> bool {
        self.detected
    }

    fn last_known_target_position(&self, _agent: u64) -> Option<Vec3> {
        self.target
    }
}

impl HealthSource for ScriptedHost {
    fn health(&self, _agent: u64) -> f32 {
        self.health
    }

    fn max_health(&self, _agent: u64) -> f32 {
        100.0
    }
}

impl NavigationSource for ScriptedHost {
    fn remaining_distance(&self, _agent: u64) -> Option<f32> {
        self.destination.map(|d| d.distance(self.position))
    }

    fn set_destination(&mut self, _agent: u64, destination: Vec3) {
        self.destination = Some(destination);
    }

    fn clear_destination(&mut self, _agent: u64) {
        self.destination = None;
    }
}

impl VelocitySource for ScriptedHost {
    fn velocity(&self, _agent: u64) -> Vec3 {
        Vec3::ZERO
    }
}

impl EnemyHost for ScriptedHost {
    fn execute(&mut self, _agent: u64, command: &EnemyCommand) {
        self.executed.push(*command);
    }
}

fn grunt_brain(attack: AttackAction) -> Brain {
    grunt_brain_deciding_every(attack, 0.0)
}

fn grunt_brain_deciding_every(attack: AttackAction, decision_interval: f32) -> Brain {
    let behaviors = BehaviorSet::new(vec![
        BehaviorState::new("engage")
            .when_single(Condition::boolean(BoolSignal::IsTargetDetected, true))
            .with_move(
                MoveAction::Chase {
                    stopping_distance: 1.5,
                },
                1.0,
            )
            .with_attack(attack, 1.0),
        BehaviorState::new("idle").with_move(MoveAction::Hold, 1.0),
    ])
    .unwrap();
    let config = BrainConfig {
        decision_interval,
        seed: 5,
    };
    Brain::new(1, behaviors, config).unwrap()
}

fn melee() -> AttackAction {
    AttackAction::Melee {
        range: 2.0,
        windup: 0.2,
        recovery: 0.2,
        damage: 7.0,
    }
}

fn grunt(attack: AttackAction) -> EnemyAgent<u64> {
    let config = EnemyConfig {
        lose_target_after: 0.5,
        ..EnemyConfig::default()
    };
    EnemyAgent::new(1, HOME, grunt_brain(attack), config).unwrap()
}

struct Clock(TickContext);

impl Clock {
    fn new() -> Self {
        Self(TickContext::new(0, DT, 0))
    }

    fn step(
        &mut self,
        enemy: &mut EnemyAgent<u64>,
        host: &mut ScriptedHost,
    ) -> TickOutcome<EnemyStateKey> {
        let outcome = enemy.tick(&self.0, host).unwrap();
        self.0 = self.0.next();
        outcome
    }
}

#[test]
fn first_tick_leaves_reset_for_search() {
    let mut enemy = grunt(melee());
    let mut host = ScriptedHost::default();
    let mut clock = Clock::new();

    assert_eq!(enemy.state(), EnemyStateKey::Reset);
    assert_eq!(
        clock.step(&mut enemy, &mut host),
        TickOutcome::Transitioned {
            from: EnemyStateKey::Reset,
            to: EnemyStateKey::Search,
        }
    );
    assert_eq!(
        clock.step(&mut enemy, &mut host),
        TickOutcome::Updated(EnemyStateKey::Search)
    );
    assert_eq!(enemy.decision().unwrap().behavior_name, "idle");
}

#[test]
fn seeing_the_target_starts_the_approach() {
    let mut enemy = grunt(melee());
    let mut host = ScriptedHost::default();
    let mut clock = Clock::new();
    clock.step(&mut enemy, &mut host);

    host.see_target_at(Vec3::new(0.0, 0.0, 10.0));
    assert!(clock.step(&mut enemy, &mut host).is_transition());
    assert_eq!(enemy.state(), EnemyStateKey::Approach);
    assert_eq!(enemy.decision().unwrap().behavior_name, "engage");

    clock.step(&mut enemy, &mut host);
    let destination = host.destination.expect("chasing sets a destination");
    assert!((destination.z - 8.5).abs() < 1e-4);
    assert!((enemy.context().distance_to_target - 10.0).abs() < 1e-4);
}

#[test]
fn melee_attack_lands_exactly_once() {
    let mut enemy = grunt(melee());
    let mut host = ScriptedHost::default();
    let mut clock = Clock::new();
    clock.step(&mut enemy, &mut host);

    host.see_target_at(Vec3::new(0.0, 0.0, 1.8));
    clock.step(&mut enemy, &mut host);
    assert_eq!(enemy.state(), EnemyStateKey::Approach);
    clock.step(&mut enemy, &mut host);
    assert_eq!(enemy.state(), EnemyStateKey::Attack);

    let mut ticks = 0;
    while enemy.state() == EnemyStateKey::Attack {
        clock.step(&mut enemy, &mut host);
        ticks += 1;
        assert!(ticks < 50, "attack never finished");
    }

    assert_eq!(host.strikes(), 1);
    assert!(host.executed.contains(&EnemyCommand::Strike {
        damage: 7.0,
        range: 2.0,
    }));
    assert_eq!(enemy.state(), EnemyStateKey::Approach);
}

#[test]
fn losing_the_target_resets_then_searches() {
    let mut enemy = grunt(melee());
    let mut host = ScriptedHost::default();
    let mut clock = Clock::new();
    clock.step(&mut enemy, &mut host);

    host.see_target_at(Vec3::new(0.0, 0.0, 10.0));
    clock.step(&mut enemy, &mut host);
    host.position = Vec3::new(0.0, 0.0, 6.0);
    clock.step(&mut enemy, &mut host);
    assert_eq!(enemy.state(), EnemyStateKey::Approach);

    host.detected = false;
    let mut ticks = 0;
    while enemy.state() == EnemyStateKey::Approach {
        clock.step(&mut enemy, &mut host);
        ticks += 1;
        assert!(ticks < 20, "target never given up");
    }
    assert!(ticks >= 5, "gave up after {ticks} ticks");
    assert_eq!(enemy.state(), EnemyStateKey::Reset);
    assert_eq!(enemy.context().target.last_known, None);
    assert_eq!(host.destination, Some(HOME));

    clock.step(&mut enemy, &mut host);
    assert_eq!(enemy.state(), EnemyStateKey::Search);
}

#[test]
fn contact_on_target_layer_alerts_a_searching_enemy() {
    let mut enemy = grunt(melee());
    let mut host = ScriptedHost::default();
    let mut clock = Clock::new();
    clock.step(&mut enemy, &mut host);

    let bump = Vec3::new(1.0, 0.0, -1.0);
    enemy
        .on_contact(&ContactEvent::new(ContactPhase::Enter, 9, 4, bump))
        .unwrap();
    clock.step(&mut enemy, &mut host);
    assert_eq!(enemy.state(), EnemyStateKey::Search);

    enemy
        .on_contact(&ContactEvent::new(ContactPhase::Enter, 9, 1, bump))
        .unwrap();
    assert!(enemy.context().target.alerted);
    clock.step(&mut enemy, &mut host);
    assert_eq!(enemy.state(), EnemyStateKey::Approach);

    clock.step(&mut enemy, &mut host);
    assert_eq!(host.destination, Some(bump));
}

#[test]
fn charge_detonates_early_on_contact() {
    let charge = AttackAction::Charge {
        range: 3.0,
        fuse: 5.0,
        radius: 2.5,
        damage: 30.0,
    };
    let mut enemy = grunt(charge);
    let mut host = ScriptedHost::default();
    let mut clock = Clock::new();
    clock.step(&mut enemy, &mut host);

    let target = Vec3::new(0.0, 0.0, 2.0);
    host.see_target_at(target);
    clock.step(&mut enemy, &mut host);
    clock.step(&mut enemy, &mut host);
    assert_eq!(enemy.state(), EnemyStateKey::Attack);
    clock.step(&mut enemy, &mut host);
    assert_eq!(host.strikes(), 0);

    enemy
        .on_contact(&ContactEvent::new(ContactPhase::Enter, 2, 1, target))
        .unwrap();
    clock.step(&mut enemy, &mut host);
    assert_eq!(
        host.executed.iter().filter(|c| c.is_attack()).collect::<Vec<_>>(),
        vec![&EnemyCommand::Detonate {
            damage: 30.0,
            radius: 2.5,
        }]
    );
}

#[test]
fn telemetry_follows_the_host() {
    let mut enemy = grunt(melee());
    let mut host = ScriptedHost {
        health: 25.0,
        destination: Some(Vec3::new(3.0, 0.0, 4.0)),
        ..ScriptedHost::default()
    };
    enemy.context_mut().brain.set_behavior_mode(3);
    Clock::new().step(&mut enemy, &mut host);

    let t = enemy.brain().telemetry();
    assert_eq!(t.health_percentage, 0.25);
    assert_eq!(t.distance_from_destination, 5.0);
    assert_eq!(t.distance_from_target, f32::INFINITY);
    assert!(!t.is_target_detected);
    assert_eq!(t.behavior_mode, 3);
}

#[test]
fn transitions_and_selections_are_traced() {
    let sink = SharedTraceSink::new();
    let mut enemy = grunt(melee()).with_trace(sink.clone());
    let mut host = ScriptedHost::default();
    let mut clock = Clock::new();
    clock.step(&mut enemy, &mut host);
    host.see_target_at(Vec3::new(0.0, 0.0, 10.0));
    clock.step(&mut enemy, &mut host);

    let log = sink.take();
    let transitions: Vec<_> = log.transitions().collect();
    assert_eq!(transitions, vec![("Reset", "Search"), ("Search", "Approach")]);
    assert!(log.events.iter().all(|e| e.agent == 1));
    assert!(log.len() > transitions.len());
}

#[test]
fn decisions_only_change_on_decision_ticks() {
    let config = EnemyConfig {
        lose_target_after: 0.5,
        ..EnemyConfig::default()
    };
    let brain = grunt_brain_deciding_every(melee(), 0.5);
    let mut enemy = EnemyAgent::new(1, HOME, brain, config).unwrap();
    let mut host = ScriptedHost::default();
    let mut clock = Clock::new();
    clock.step(&mut enemy, &mut host);
    host.see_target_at(Vec3::new(0.0, 0.0, 1.8));

    let mut previous = enemy.decision().cloned();
    let mut changed_on = Vec::new();
    let mut attacked = false;
    for _ in 1..30 {
        let tick = clock.0.tick;
        let outcome = clock.step(&mut enemy, &mut host);
        attacked |= outcome
            == TickOutcome::Transitioned {
                from: EnemyStateKey::Attack,
                to: EnemyStateKey::Approach,
            };
        let current = enemy.decision().cloned();
        if current != previous {
            changed_on.push(tick);
            previous = current;
        }
    }

    assert!(attacked);
    assert!(host.strikes() >= 1);
    assert!(!changed_on.is_empty());
    assert!(changed_on.iter().all(|tick| tick % 5 == 0), "{changed_on:?}");
}
