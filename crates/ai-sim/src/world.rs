//! Kinematic stand-in for a game world: one enemy, one target walking a fixed path.

use ai_core::{
    ContactEvent, ContactPhase, HealthSource, NavigationSource, PerceptionSource, PositionSource,
    Vec3, VelocitySource, WorldView,
};
use ai_enemy::{DetectionBehavior, EnemyCommand, EnemyHost, IkSide};

use crate::scenario::ScenarioConfig;

pub const ENEMY: u64 = 1;
const TARGET: u64 = 2;
const TARGET_LAYER: u32 = 1;
const ARRIVE_DISTANCE: f32 = 0.1;

/// A hit or miss resolved by the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub command: EnemyCommand,
    pub hit: bool,
}

#[derive(Debug, Clone)]
struct Walker {
    position: Vec3,
    waypoints: Vec<Vec3>,
    next: usize,
    speed: f32,
}

impl Walker {
    fn advance(&mut self, dt: f32) {
        let mut budget = self.speed * dt;
        while budget > 0.0 {
            let Some(&goal) = self.waypoints.get(self.next) else {
                return;
            };
            let to_goal = goal - self.position;
            let distance = to_goal.length();
            if distance <= budget {
                self.position = goal;
                self.next += 1;
                budget -= distance;
            } else {
                self.position += to_goal / distance * budget;
                return;
            }
        }
    }
}

pub struct SimWorld {
    enemy_position: Vec3,
    enemy_forward: Vec3,
    enemy_velocity: Vec3,
    enemy_speed: f32,
    enemy_health: f32,
    enemy_max_health: f32,
    destination: Option<Vec3>,
    detection: DetectionBehavior,
    contact_radius: f32,
    in_contact: bool,
    target: Walker,
    target_health: f32,
    detected: bool,
    last_known: Option<Vec3>,
    ik_side: IkSide,
    impacts: Vec<Impact>,
}

impl SimWorld {
    pub fn new(scenario: &ScenarioConfig) -> Self {
        let enemy = &scenario.enemy;
        let start = scenario
            .target
            .waypoints
            .first()
            .copied()
            .unwrap_or(Vec3::new(0.0, 0.0, 20.0));
        Self {
            enemy_position: enemy.home,
            enemy_forward: Vec3::Z,
            enemy_velocity: Vec3::ZERO,
            enemy_speed: enemy.speed,
            enemy_health: enemy.max_health,
            enemy_max_health: enemy.max_health,
            destination: None,
            detection: enemy.detection,
            contact_radius: enemy.contact_radius,
            in_contact: false,
            target: Walker {
                position: start,
                waypoints: scenario.target.waypoints.clone(),
                next: 0,
                speed: scenario.target.speed,
            },
            target_health: scenario.target.health,
            detected: false,
            last_known: None,
            ik_side: IkSide::default(),
            impacts: Vec::new(),
        }
    }

    /// Move both bodies, then refresh perception. Returns a contact event if the target entered
    /// or left the enemy's trigger volume.
    pub fn step(&mut self, dt: f32) -> Option<ContactEvent> {
        if self.target_health > 0.0 {
            self.target.advance(dt);
        }
        self.move_enemy(dt);

        self.detected = self.target_health > 0.0
            && self
                .detection
                .detects(self.enemy_position, self.enemy_forward, self.target.position);
        if self.detected {
            self.last_known = Some(self.target.position);
        }

        let touching = self.enemy_position.distance(self.target.position) <= self.contact_radius;
        let phase = match (self.in_contact, touching) {
            (false, true) => ContactPhase::Enter,
            (true, false) => ContactPhase::Exit,
            _ => return None,
        };
        self.in_contact = touching;
        Some(ContactEvent::new(
            phase,
            TARGET,
            TARGET_LAYER,
            self.target.position,
        ))
    }

    fn move_enemy(&mut self, dt: f32) {
        if self.enemy_health <= 0.0 {
            self.enemy_velocity = Vec3::ZERO;
            return;
        }
        let Some(destination) = self.destination else {
            self.enemy_velocity = Vec3::ZERO;
            return;
        };

        let to_goal = destination - self.enemy_position;
        let distance = to_goal.length();
        if distance <= ARRIVE_DISTANCE {
            self.destination = None;
            self.enemy_velocity = Vec3::ZERO;
            return;
        }

        let direction = to_goal / distance;
        let travel = (self.enemy_speed * dt).min(distance);
        self.enemy_position += direction * travel;
        self.enemy_velocity = direction * self.enemy_speed;
        self.enemy_forward = direction;
    }

    pub fn enemy_position(&self) -> Vec3 {
        self.enemy_position
    }

    pub fn target_position(&self) -> Vec3 {
        self.target.position
    }

    pub fn target_health(&self) -> f32 {
        self.target_health
    }

    pub fn enemy_alive(&self) -> bool {
        self.enemy_health > 0.0
    }

    pub fn ik_side(&self) -> IkSide {
        self.ik_side
    }

    /// Attacks resolved since the last call.
    pub fn take_impacts(&mut self) -> Vec<Impact> {
        std::mem::take(&mut self.impacts)
    }

    fn distance_to_target(&self) -> f32 {
        self.enemy_position.distance(self.target.position)
    }

    fn resolve(&mut self, command: EnemyCommand, hit: bool, damage: f32) {
        if hit {
            self.target_health = (self.target_health - damage).max(0.0);
        }
        self.impacts.push(Impact { command, hit });
    }
}

impl WorldView for SimWorld {
    type Agent = u64;
}

impl PositionSource for SimWorld {
    fn position(&self, agent: u64) -> Option<Vec3> {
        match agent {
            ENEMY => Some(self.enemy_position),
            TARGET => Some(self.target.position),
            _ => None,
        }
    }

    fn forward(&self, _agent: u64) -> Vec3 {
        self.enemy_forward
    }

    fn target_position(&self, agent: u64) -> Option<Vec3> {
        (agent == ENEMY && self.target_health > 0.0).then_some(self.target.position)
    }
}

impl PerceptionSource for SimWorld {
    fn is_target_detected(&self, _agent: u64) -> bool {
        self.detected
    }

    fn last_known_target_position(&self, _agent: u64) -> Option<Vec3> {
        self.last_known
    }
}

impl HealthSource for SimWorld {
    fn health(&self, _agent: u64) -> f32 {
        self.enemy_health
    }

    fn max_health(&self, _agent: u64) -> f32 {
        self.enemy_max_health
    }
}

impl NavigationSource for SimWorld {
    fn remaining_distance(&self, _agent: u64) -> Option<f32> {
        self.destination
            .map(|destination| destination.distance(self.enemy_position))
    }

    fn set_destination(&mut self, _agent: u64, destination: Vec3) {
        self.destination = Some(destination);
    }

    fn clear_destination(&mut self, _agent: u64) {
        self.destination = None;
    }
}

impl VelocitySource for SimWorld {
    fn velocity(&self, _agent: u64) -> Vec3 {
        self.enemy_velocity
    }
}

impl EnemyHost for SimWorld {
    fn execute(&mut self, agent: u64, command: &EnemyCommand) {
        match *command {
            EnemyCommand::SetDestination { point } => self.set_destination(agent, point),
            EnemyCommand::Stop => self.clear_destination(agent),
            EnemyCommand::FaceTowards { point } => {
                let facing = Vec3::new(
                    point.x - self.enemy_position.x,
                    0.0,
                    point.z - self.enemy_position.z,
                )
                .normalize_or_zero();
                if facing != Vec3::ZERO {
                    self.enemy_forward = facing;
                }
            }
            EnemyCommand::SetIkSide { side } => self.ik_side = side,
            EnemyCommand::Strike { damage, range } => {
                let hit = self.distance_to_target() <= range;
                self.resolve(*command, hit, damage);
            }
            EnemyCommand::FireProjectile { damage, target } => {
                let hit = self.target.position.distance(target) <= 1.0;
                self.resolve(*command, hit, damage);
            }
            EnemyCommand::Detonate { damage, radius } => {
                let hit = self.distance_to_target() <= radius;
                self.resolve(*command, hit, damage);
                self.enemy_health = 0.0;
            }
        }
    }
}
