use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What happened.
///
/// State keys and action names are carried as text so the tooling never depends on the game's
/// own enums.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TraceKind {
    StateTransition {
        from: Cow<'static, str>,
        to: Cow<'static, str>,
    },
    BehaviorSelected {
        index: usize,
        name: String,
        fallback: bool,
    },
    MoveActionSelected { action: String },
    AttackActionSelected { action: String },
    /// Free-form marker for host-side events (attack strikes, contacts, ...).
    Note {
        tag: Cow<'static, str>,
        value: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub agent: u64,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: TraceKind,
}

impl TraceEvent {
    pub fn new(tick: u64, agent: u64, kind: TraceKind) -> Self {
        Self { tick, agent, kind }
    }

    pub fn note(tick: u64, agent: u64, tag: impl Into<Cow<'static, str>>, value: f32) -> Self {
        Self::new(
            tick,
            agent,
            TraceKind::Note {
                tag: tag.into(),
                value,
            },
        )
    }
}

pub trait TraceSink {
    fn record(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn record(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events recorded for one agent, in recording order.
    pub fn for_agent(&self, agent: u64) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter().filter(move |e| e.agent == agent)
    }

    pub fn transitions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.events.iter().filter_map(|e| match &e.kind {
            TraceKind::StateTransition { from, to } => Some((from.as_ref(), to.as_ref())),
            _ => None,
        })
    }
}

impl TraceSink for TraceLog {
    fn record(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// A cloneable handle onto one [`TraceLog`], for feeding several producers into a single log.
///
/// Single-threaded by construction, matching the cooperative tick model.
#[derive(Debug, Clone, Default)]
pub struct SharedTraceSink(Rc<RefCell<TraceLog>>);

impl SharedTraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Move the recorded events out, leaving the log empty.
    pub fn take(&self) -> TraceLog {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn with_log<R>(&self, f: impl FnOnce(&TraceLog) -> R) -> R {
        f(&self.0.borrow())
    }
}

impl TraceSink for SharedTraceSink {
    fn record(&mut self, event: TraceEvent) {
        self.0.borrow_mut().push(event);
    }
}
