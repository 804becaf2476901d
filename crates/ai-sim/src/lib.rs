//! Headless harness for authored behavior files.
//!
//! `ai-sim run` drops one enemy into a [`SimWorld`] with a target walking a scripted path and
//! reports what the enemy did; `ai-sim check` only loads and validates the behavior file.

#![forbid(unsafe_code)]

pub mod scenario;
pub mod world;

use ai_core::TickContext;
use ai_enemy::{EnemyAgent, EnemyStateKey};
use ai_fsm::TickOutcome;
use ai_rules::BehaviorFile;
use ai_tools::{SharedTraceSink, TraceEvent, TraceLog, TraceSink};
use anyhow::{Context, Result};

pub use scenario::ScenarioConfig;
pub use world::{Impact, SimWorld, ENEMY};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    pub ticks: u64,
    pub dt: f32,
    /// Overrides the seed from the behavior file.
    pub seed: Option<u64>,
    pub trace: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            ticks: 600,
            dt: 1.0 / 30.0,
            seed: None,
            trace: false,
        }
    }
}

/// Something worth printing that happened during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    State {
        tick: u64,
        from: EnemyStateKey,
        to: EnemyStateKey,
    },
    Behavior {
        tick: u64,
        name: String,
        fallback: bool,
    },
    Impact {
        tick: u64,
        impact: Impact,
    },
}

#[derive(Debug, Default)]
pub struct SimReport {
    pub ticks: u64,
    pub events: Vec<SimEvent>,
    pub hits: u32,
    pub final_state: Option<EnemyStateKey>,
    pub target_health: f32,
    pub trace: Option<TraceLog>,
}

/// Run `behaviors` against `scenario` for `options.ticks` steps.
///
/// Stops early once the enemy is dead (a charge detonated) or the target is down.
pub fn run(
    mut behaviors: BehaviorFile,
    scenario: &ScenarioConfig,
    options: RunOptions,
) -> Result<SimReport> {
    if let Some(seed) = options.seed {
        behaviors.seed = seed;
    }
    let seed = behaviors.seed;

    let brain = behaviors
        .into_brain(ENEMY)
        .context("Behavior file failed validation")?;
    let mut enemy = EnemyAgent::new(ENEMY, scenario.enemy.home, brain, scenario.enemy.agent)
        .context("Failed to assemble enemy")?;

    let mut sink = options.trace.then(SharedTraceSink::new);
    if let Some(sink) = &sink {
        enemy = enemy.with_trace(sink.clone());
    }

    let mut world = SimWorld::new(scenario);
    let mut report = SimReport::default();
    let mut last_behavior: Option<String> = None;
    let mut ctx = TickContext::new(0, options.dt, seed);

    tracing::info!(ticks = options.ticks, dt = options.dt, seed, "Starting simulation");

    while ctx.tick < options.ticks {
        if let Some(contact) = world.step(ctx.dt_seconds) {
            enemy.on_contact(&contact)?;
        }

        let outcome = enemy.tick(&ctx, &mut world)?;
        if let TickOutcome::Transitioned { from, to } = outcome {
            report.events.push(SimEvent::State {
                tick: ctx.tick,
                from,
                to,
            });
        }

        if let Some(decision) = enemy.decision() {
            if last_behavior.as_deref() != Some(decision.behavior_name.as_str()) {
                last_behavior = Some(decision.behavior_name.clone());
                report.events.push(SimEvent::Behavior {
                    tick: ctx.tick,
                    name: decision.behavior_name.clone(),
                    fallback: decision.fallback,
                });
            }
        }

        for impact in world.take_impacts() {
            if impact.hit {
                report.hits += 1;
                if let Some(sink) = sink.as_mut() {
                    sink.record(TraceEvent::note(
                        ctx.tick,
                        ENEMY,
                        impact.command.name(),
                        world.target_health(),
                    ));
                }
            }
            report.events.push(SimEvent::Impact {
                tick: ctx.tick,
                impact,
            });
        }

        ctx = ctx.next();
        if !world.enemy_alive() || world.target_health() <= 0.0 {
            tracing::info!(tick = ctx.tick, "Simulation ended early");
            break;
        }
    }

    report.ticks = ctx.tick;
    report.final_state = Some(enemy.state());
    report.target_health = world.target_health();
    report.trace = sink.map(|sink| sink.take());
    Ok(report)
}
