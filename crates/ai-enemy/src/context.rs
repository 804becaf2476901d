use ai_core::{rng, CountdownTimer, DeterministicRng, SplitMix64, TickContext, Vec3};
use ai_rules::Brain;
use serde::{Deserialize, Serialize};

use crate::command::EnemyCommand;

const PATROL_STREAM: u64 = 0x9A7;

/// Which hand/foot the animation rig should favour when reaching towards the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IkSide {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnemyConfig {
    /// Seconds without detection before a chased target is given up.
    pub lose_target_after: f32,
    /// Destinations within this distance of the current one are not re-sent.
    pub arrive_tolerance: f32,
    /// Contact layer that belongs to the target.
    pub target_layer: u32,
    /// Angle advanced around the target per strafe waypoint.
    pub strafe_step_degrees: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            lose_target_after: 3.0,
            arrive_tolerance: 0.5,
            target_layer: 1,
            strafe_step_degrees: 30.0,
        }
    }
}

/// What the enemy remembers about its target between perception updates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TargetMemory {
    pub last_known: Option<Vec3>,
    pub detected: bool,
    /// Touched by the target while not seeing it.
    pub alerted: bool,
    pub seconds_since_seen: f32,
}

/// Data shared by all enemy states. Owned by the state machine.
pub struct EnemyContext {
    pub agent: u64,
    pub home: Vec3,
    pub brain: Brain,
    pub config: EnemyConfig,
    /// Tick of the most recent observation.
    pub tick: u64,
    pub position: Vec3,
    pub forward: Vec3,
    pub target: TargetMemory,
    pub ik_side: IkSide,
    /// Distance to the remembered target position, `f32::INFINITY` without one.
    pub distance_to_target: f32,
    lose_target: CountdownTimer,
    destination: Option<Vec3>,
    patrol_rng: SplitMix64,
    commands: Vec<EnemyCommand>,
}

impl EnemyContext {
    pub fn new(agent: u64, home: Vec3, brain: Brain, config: EnemyConfig) -> Self {
        let seed = rng::derive_seed(brain.config().seed, agent, PATROL_STREAM);
        Self {
            agent,
            home,
            brain,
            config,
            tick: 0,
            position: home,
            forward: Vec3::Z,
            target: TargetMemory::default(),
            ik_side: IkSide::default(),
            distance_to_target: f32::INFINITY,
            lose_target: CountdownTimer::expired(config.lose_target_after),
            destination: None,
            patrol_rng: SplitMix64::new(seed),
            commands: Vec::new(),
        }
    }

    /// Fold this tick's host observations into the context.
    ///
    /// Detection is read from the Brain's telemetry, so telemetry must be refreshed first.
    pub fn observe(
        &mut self,
        tick: &TickContext,
        position: Option<Vec3>,
        forward: Vec3,
        last_known_target: Option<Vec3>,
    ) {
        self.tick = tick.tick;
        if let Some(position) = position {
            self.position = position;
        }
        self.forward = forward;

        let detected = self.brain.telemetry().is_target_detected;
        self.target.detected = detected;
        if detected {
            if let Some(target) = last_known_target {
                self.target.last_known = Some(target);
            }
            self.target.seconds_since_seen = 0.0;
            self.lose_target.start();
        } else {
            if self.target.last_known.is_some() {
                self.target.seconds_since_seen += tick.dt_seconds;
            }
            self.lose_target.update(tick.dt_seconds);
        }

        self.distance_to_target = self
            .target
            .last_known
            .map_or(f32::INFINITY, |target| self.position.distance(target));
    }

    /// Remember a target position learned from something other than sight.
    pub fn notice(&mut self, point: Vec3) {
        self.target.last_known = Some(point);
        self.target.alerted = true;
        self.target.seconds_since_seen = 0.0;
        self.lose_target.start();
        self.distance_to_target = self.position.distance(point);
    }

    pub fn forget_target(&mut self) {
        self.target = TargetMemory::default();
        self.lose_target = CountdownTimer::expired(self.config.lose_target_after);
        self.distance_to_target = f32::INFINITY;
    }

    /// Undetected for longer than `lose_target_after`.
    pub fn target_lost(&self) -> bool {
        !self.target.detected && self.lose_target.is_finished()
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    /// The current destination is reached, or there is none.
    pub fn arrived(&self) -> bool {
        if self.destination.is_none() {
            return true;
        }
        let remaining = self.brain.telemetry().distance_from_destination;
        remaining.is_infinite() || remaining <= self.config.arrive_tolerance
    }

    pub fn move_to(&mut self, point: Vec3) {
        let unchanged = self
            .destination
            .is_some_and(|current| current.distance(point) <= self.config.arrive_tolerance);
        if unchanged {
            return;
        }
        self.destination = Some(point);
        self.push(EnemyCommand::SetDestination { point });
    }

    pub fn stop(&mut self) {
        if self.destination.take().is_some() {
            self.push(EnemyCommand::Stop);
        }
    }

    /// Turn towards the remembered target and pick the IK side it falls on.
    pub fn face_target(&mut self) {
        let Some(target) = self.target.last_known else {
            return;
        };
        self.push(EnemyCommand::FaceTowards { point: target });

        let side = if self.forward.cross(target - self.position).y > 0.0 {
            IkSide::Left
        } else {
            IkSide::Right
        };
        if side != self.ik_side {
            self.ik_side = side;
            self.push(EnemyCommand::SetIkSide { side });
        }
    }

    /// Uniform point on the horizontal disc of `radius` around home.
    pub fn patrol_point(&mut self, radius: f32) -> Vec3 {
        let angle = self.patrol_rng.range_f32(0.0, std::f32::consts::TAU);
        let distance = radius * self.patrol_rng.next_f32_unit().sqrt();
        self.home + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
    }

    pub fn push(&mut self, command: EnemyCommand) {
        self.commands.push(command);
    }

    pub fn pending_commands(&self) -> &[EnemyCommand] {
        &self.commands
    }

    pub fn drain_commands(&mut self) -> Vec<EnemyCommand> {
        std::mem::take(&mut self.commands)
    }
}
