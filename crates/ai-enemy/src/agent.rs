use ai_core::{AgentId, ContactEvent, TickContext, Vec3};
use ai_fsm::{StateMachine, TickOutcome};
use ai_rules::{Brain, Decision};
use ai_tools::TraceSink;

use crate::command::{EnemyCommand, EnemyHost};
use crate::context::{EnemyConfig, EnemyContext};
use crate::error::Result;
use crate::states::{ApproachState, AttackState, EnemyStateKey, ResetState, SearchState};
use crate::telemetry::refresh_telemetry;

/// One enemy: the state machine, its context, and the host id it acts for.
pub struct EnemyAgent<A: AgentId> {
    agent: A,
    machine: StateMachine<EnemyStateKey, EnemyContext>,
}

impl<A: AgentId> EnemyAgent<A> {
    /// Build the four-state machine, starting in `Reset` (whose `enter` is not run).
    pub fn new(agent: A, home: Vec3, brain: Brain, config: EnemyConfig) -> Result<Self> {
        let context = EnemyContext::new(agent.stable_id(), home, brain, config);
        let mut machine = StateMachine::new(context)
            .with_state(EnemyStateKey::Reset, ResetState)?
            .with_state(EnemyStateKey::Search, SearchState)?
            .with_state(EnemyStateKey::Approach, ApproachState)?
            .with_state(EnemyStateKey::Attack, AttackState::default())?;
        machine.set_initial_state(EnemyStateKey::Reset)?;

        Ok(Self { agent, machine })
    }

    /// Record transitions, selections, and action rolls into clones of `sink`.
    pub fn with_trace<S>(mut self, sink: S) -> Self
    where
        S: TraceSink + Clone + 'static,
    {
        let id = self.agent.stable_id();
        self.machine
            .context_mut()
            .brain
            .set_trace(Box::new(sink.clone()));
        self.machine.set_trace(id, Box::new(sink));
        self
    }

    pub fn agent(&self) -> A {
        self.agent
    }

    pub fn state(&self) -> EnemyStateKey {
        self.machine.current_key().unwrap_or(EnemyStateKey::Reset)
    }

    pub fn context(&self) -> &EnemyContext {
        self.machine.context()
    }

    pub fn context_mut(&mut self) -> &mut EnemyContext {
        self.machine.context_mut()
    }

    pub fn brain(&self) -> &Brain {
        &self.machine.context().brain
    }

    pub fn decision(&self) -> Option<&Decision> {
        self.brain().decision()
    }

    pub fn transition_count(&self) -> u64 {
        self.machine.transition_count()
    }

    /// One logical step: refresh telemetry, tick the Brain, tick the state machine, then apply
    /// the queued commands to `host`.
    pub fn tick<H>(
        &mut self,
        ctx: &TickContext,
        host: &mut H,
    ) -> Result<TickOutcome<EnemyStateKey>>
    where
        H: EnemyHost<Agent = A>,
    {
        let agent = self.agent;
        let context = self.machine.context_mut();

        refresh_telemetry(host, agent, context.brain.telemetry_mut());
        context.observe(
            ctx,
            host.position(agent),
            host.forward(agent),
            host.last_known_target_position(agent),
        );
        context.brain.tick(ctx);

        let outcome = self.machine.tick(ctx)?;

        for command in self.machine.context_mut().drain_commands() {
            tracing::trace!(agent = agent.stable_id(), command = command.name(), "enemy command");
            match command {
                EnemyCommand::SetDestination { point } => host.set_destination(agent, point),
                EnemyCommand::Stop => host.clear_destination(agent),
                other => host.execute(agent, &other),
            }
        }

        Ok(outcome)
    }

    /// Forward a trigger contact from the host to the current state.
    pub fn on_contact(&mut self, event: &ContactEvent) -> Result<()> {
        self.machine.on_contact(event)?;
        Ok(())
    }

    /// Commands queued by contacts since the last tick; applied on the next tick.
    pub fn pending_commands(&self) -> &[EnemyCommand] {
        self.machine.context().pending_commands()
    }
}
