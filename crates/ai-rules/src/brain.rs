use ai_core::{rng, CountdownTimer, SplitMix64, TickContext};
use ai_tools::{TraceEvent, TraceKind, TraceSink};

use crate::action::{AttackAction, MoveAction};
use crate::behavior::{BehaviorSet, BehaviorState};
use crate::error::{Result, RuleError};
use crate::telemetry::Telemetry;

/// RNG stream reserved for action rolls.
const ACTION_STREAM: u64 = 0xB4A1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrainConfig {
    /// Seconds between re-evaluations. Zero re-evaluates every tick.
    pub decision_interval: f32,
    pub seed: u64,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            decision_interval: 1.0 / 15.0,
            seed: 0,
        }
    }
}

/// What the Brain currently wants the agent to do.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub behavior_index: usize,
    pub behavior_name: String,
    pub fallback: bool,
    pub move_action: Option<MoveAction>,
    pub attack_action: Option<AttackAction>,
    /// Tick of the most recent evaluation that confirmed this decision.
    pub decided_at_tick: u64,
}

/// Slow-cadence behavior selector.
///
/// Owns the telemetry snapshot it evaluates against; whoever refreshes telemetry writes through
/// [`Brain::telemetry_mut`] before ticking. Actions are rolled when the selected behavior changes
/// and kept until it changes again. [`Brain::request_reroll`] asks for fresh rolls, served by the
/// next scheduled evaluation; the published [`Decision`] is only ever written by evaluations.
pub struct Brain {
    agent: u64,
    behaviors: BehaviorSet,
    config: BrainConfig,
    telemetry: Telemetry,
    rng: SplitMix64,
    timer: CountdownTimer,
    decision: Option<Decision>,
    evaluations: u64,
    /// Written only by `request_reroll`.
    reroll_requests: u64,
    /// Written only by evaluations; behind `reroll_requests` while a re-roll is pending.
    rerolls_served: u64,
    trace: Option<Box<dyn TraceSink>>,
}

impl Brain {
    pub fn new(agent: u64, behaviors: BehaviorSet, config: BrainConfig) -> Result<Self> {
        let interval = config.decision_interval;
        if !interval.is_finite() || interval < 0.0 {
            return Err(RuleError::InvalidDecisionInterval(interval));
        }

        Ok(Self {
            agent,
            behaviors,
            config,
            telemetry: Telemetry::default(),
            rng: SplitMix64::new(rng::derive_seed(config.seed, agent, ACTION_STREAM)),
            timer: CountdownTimer::expired(interval),
            decision: None,
            evaluations: 0,
            reroll_requests: 0,
            rerolls_served: 0,
            trace: None,
        })
    }

    pub fn with_trace(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.set_trace(sink);
        self
    }

    /// Record selection changes and action rolls into `sink`.
    pub fn set_trace(&mut self, sink: Box<dyn TraceSink>) {
        self.trace = Some(sink);
    }

    pub fn agent(&self) -> u64 {
        self.agent
    }

    pub fn behaviors(&self) -> &BehaviorSet {
        &self.behaviors
    }

    pub fn config(&self) -> &BrainConfig {
        &self.config
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn telemetry_mut(&mut self) -> &mut Telemetry {
        &mut self.telemetry
    }

    pub fn set_behavior_mode(&mut self, mode: i32) {
        self.telemetry.behavior_mode = mode;
    }

    /// Number of selections run so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn decision(&self) -> Option<&Decision> {
        self.decision.as_ref()
    }

    pub fn selected_behavior(&self) -> Option<&BehaviorState> {
        self.decision
            .as_ref()
            .and_then(|d| self.behaviors.get(d.behavior_index))
    }

    pub fn move_action(&self) -> Option<MoveAction> {
        self.decision.as_ref().and_then(|d| d.move_action)
    }

    pub fn attack_action(&self) -> Option<AttackAction> {
        self.decision.as_ref().and_then(|d| d.attack_action)
    }

    /// Advance the decision timer; re-evaluate on the first tick and whenever it fires.
    pub fn tick(&mut self, ctx: &TickContext) -> Option<&Decision> {
        let due = self.decision.is_none() || self.timer.update(ctx.dt_seconds);
        if due {
            self.decide_now(ctx.tick);
        }
        self.decision.as_ref()
    }

    /// Evaluate immediately and restart the decision interval.
    pub fn decide_now(&mut self, tick: u64) -> &Decision {
        self.timer.start();
        self.evaluate(tick)
    }

    /// Ask for new action rolls even if the next evaluation keeps the same behavior.
    ///
    /// The current [`Decision`] is left untouched until that evaluation runs.
    pub fn request_reroll(&mut self) {
        self.reroll_requests += 1;
    }

    pub fn reroll_pending(&self) -> bool {
        self.reroll_requests != self.rerolls_served
    }

    fn evaluate(&mut self, tick: u64) -> &Decision {
        self.evaluations += 1;

        let selection = self.behaviors.select(&self.telemetry);
        let index = selection.index;
        let fallback = selection.fallback;
        let behavior_name = selection.behavior.name.clone();

        let reroll = self.reroll_pending();
        self.rerolls_served = self.reroll_requests;

        let kept = self
            .decision
            .as_ref()
            .filter(|d| d.behavior_index == index)
            .map(|d| (d.move_action, d.attack_action));

        let (move_action, attack_action) = match kept {
            Some(_) if reroll => {
                let actions = self.roll_actions(index);
                self.record_actions(tick, actions.0, actions.1);
                actions
            }
            Some(actions) => actions,
            None => {
                tracing::debug!(
                    agent = self.agent,
                    tick,
                    behavior = %behavior_name,
                    index,
                    fallback,
                    "behavior selected"
                );
                let actions = self.roll_actions(index);
                if let Some(sink) = self.trace.as_mut() {
                    sink.record(TraceEvent::new(
                        tick,
                        self.agent,
                        TraceKind::BehaviorSelected {
                            index,
                            name: behavior_name.clone(),
                            fallback,
                        },
                    ));
                }
                self.record_actions(tick, actions.0, actions.1);
                actions
            }
        };

        self.decision.insert(Decision {
            behavior_index: index,
            behavior_name,
            fallback,
            move_action,
            attack_action,
            decided_at_tick: tick,
        })
    }

    fn roll_actions(&mut self, index: usize) -> (Option<MoveAction>, Option<AttackAction>) {
        let Some(behavior) = self.behaviors.get(index) else {
            return (None, None);
        };
        let move_action = behavior.move_actions.select(&mut self.rng).copied();
        let attack_action = behavior.attack_actions.select(&mut self.rng).copied();
        (move_action, attack_action)
    }

    fn record_actions(
        &mut self,
        tick: u64,
        move_action: Option<MoveAction>,
        attack_action: Option<AttackAction>,
    ) {
        let Some(sink) = self.trace.as_mut() else {
            return;
        };
        if let Some(action) = move_action {
            sink.record(TraceEvent::new(
                tick,
                self.agent,
                TraceKind::MoveActionSelected {
                    action: action.name().to_string(),
                },
            ));
        }
        if let Some(action) = attack_action {
            sink.record(TraceEvent::new(
                tick,
                self.agent,
                TraceKind::AttackActionSelected {
                    action: action.name().to_string(),
                },
            ));
        }
    }
}
