use std::borrow::Cow;
use std::collections::BTreeMap;

use ai_core::{ContactEvent, ContactPhase, TickContext};
use ai_tools::{TraceEvent, TraceKind, TraceSink};

use crate::error::{key_name, FsmError, Result};
use crate::state::{State, StateKey};

/// What a call to [`StateMachine::tick`] or [`StateMachine::transition_to`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome<K> {
    /// The current state stayed and ran `update`.
    Updated(K),
    /// `exit` ran on `from`, then `enter` on `to`.
    Transitioned { from: K, to: K },
}

impl<K: StateKey> TickOutcome<K> {
    pub fn is_transition(&self) -> bool {
        matches!(self, TickOutcome::Transitioned { .. })
    }
}

struct TraceTarget {
    agent: u64,
    sink: Box<dyn TraceSink>,
}

pub struct StateMachine<K, C>
where
    K: StateKey,
    C: 'static,
{
    states: BTreeMap<K, Box<dyn State<K, C>>>,
    current: Option<K>,
    context: C,
    /// Set while `exit`/`enter` run. Still set afterwards only if one of them unwound.
    resolving: Option<(K, K)>,
    transitions: u64,
    last_tick: u64,
    trace: Option<TraceTarget>,
}

impl<K, C> StateMachine<K, C>
where
    K: StateKey,
    C: 'static,
{
    pub fn new(context: C) -> Self {
        Self {
            states: BTreeMap::new(),
            current: None,
            context,
            resolving: None,
            transitions: 0,
            last_tick: 0,
            trace: None,
        }
    }

    /// Record every transition into `sink`, tagged with `agent`.
    pub fn with_trace(mut self, agent: u64, sink: Box<dyn TraceSink>) -> Self {
        self.set_trace(agent, sink);
        self
    }

    pub fn set_trace(&mut self, agent: u64, sink: Box<dyn TraceSink>) {
        self.trace = Some(TraceTarget { agent, sink });
    }

    /// Chaining form of [`StateMachine::register_state`].
    pub fn with_state(mut self, key: K, state: impl State<K, C>) -> Result<Self> {
        self.register_state(key, state)?;
        Ok(self)
    }

    /// Add a state. Keys are unique; registering the same key twice is an error.
    pub fn register_state(&mut self, key: K, state: impl State<K, C>) -> Result<()> {
        if self.states.contains_key(&key) {
            return Err(FsmError::DuplicateState(key_name(&key)));
        }
        self.states.insert(key, Box::new(state));
        Ok(())
    }

    /// Pick the state the machine starts in.
    ///
    /// The initial state's `enter` is not called; only later transitions run `exit`/`enter`.
    pub fn set_initial_state(&mut self, key: K) -> Result<()> {
        if let Some(current) = self.current {
            return Err(FsmError::InitialStateAlreadySet(key_name(&current)));
        }
        if !self.states.contains_key(&key) {
            return Err(FsmError::UnknownState(key_name(&key)));
        }
        self.current = Some(key);
        Ok(())
    }

    pub fn current_key(&self) -> Option<K> {
        self.current
    }

    pub fn contains(&self, key: K) -> bool {
        self.states.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Number of completed transitions since construction.
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    /// True once an `exit` or `enter` callback panicked mid-transition. A poisoned machine
    /// refuses every further tick, transition, and contact with [`FsmError::Poisoned`].
    pub fn is_poisoned(&self) -> bool {
        self.resolving.is_some()
    }

    fn check_poisoned(&self) -> Result<()> {
        match self.resolving {
            Some((from, to)) => Err(FsmError::Poisoned {
                from: key_name(&from),
                to: key_name(&to),
            }),
            None => Ok(()),
        }
    }

    /// Drive one step: transition if the current state asks for it, otherwise update it.
    ///
    /// At most one transition happens per tick. The freshly entered state is first consulted on
    /// the next tick.
    pub fn tick(&mut self, tick: &TickContext) -> Result<TickOutcome<K>> {
        let current = self.current.ok_or(FsmError::NotStarted)?;
        self.check_poisoned()?;
        self.last_tick = tick.tick;

        let state = self
            .states
            .get_mut(&current)
            .ok_or_else(|| FsmError::UnknownState(key_name(&current)))?;

        let next = state.next_state(&self.context);
        if next == current {
            state.update(tick, &mut self.context);
            return Ok(TickOutcome::Updated(current));
        }

        self.transition_to(next)
    }

    /// Leave the current state for `key`: guard, `exit` old, swap, `enter` new, release guard.
    ///
    /// An unregistered `key` is reported without touching the machine. States only ever see the
    /// context, never the machine, so no callback can start a second transition while this one
    /// resolves.
    pub fn transition_to(&mut self, key: K) -> Result<TickOutcome<K>> {
        let from = self.current.ok_or(FsmError::NotStarted)?;
        self.check_poisoned()?;
        if !self.states.contains_key(&key) {
            return Err(FsmError::UnknownState(key_name(&key)));
        }

        self.resolving = Some((from, key));

        if let Some(old) = self.states.get_mut(&from) {
            old.exit(&mut self.context);
        }
        self.current = Some(key);
        if let Some(new) = self.states.get_mut(&key) {
            new.enter(&mut self.context);
        }

        self.resolving = None;
        self.transitions += 1;

        tracing::debug!(from = ?from, to = ?key, tick = self.last_tick, "state transition");
        if let Some(trace) = self.trace.as_mut() {
            trace.sink.record(TraceEvent::new(
                self.last_tick,
                trace.agent,
                TraceKind::StateTransition {
                    from: Cow::Owned(key_name(&from)),
                    to: Cow::Owned(key_name(&key)),
                },
            ));
        }

        Ok(TickOutcome::Transitioned { from, to: key })
    }

    /// Forward a host contact to the current state's trigger callback for its phase.
    pub fn on_contact(&mut self, contact: &ContactEvent) -> Result<()> {
        let current = self.current.ok_or(FsmError::NotStarted)?;
        self.check_poisoned()?;
        let state = self
            .states
            .get_mut(&current)
            .ok_or_else(|| FsmError::UnknownState(key_name(&current)))?;

        match contact.phase {
            ContactPhase::Enter => state.on_trigger_enter(contact, &mut self.context),
            ContactPhase::Stay => state.on_trigger_stay(contact, &mut self.context),
            ContactPhase::Exit => state.on_trigger_exit(contact, &mut self.context),
        }
        Ok(())
    }

}
