//! Trace recording for deterministic enemy AI.
//!
//! The state machine and the behavior selector report what they decided as plain
//! [`TraceEvent`] values. Where the events go is up to the caller: drop them, collect them in a
//! [`TraceLog`], or share one log between several producers with [`SharedTraceSink`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{NullTraceSink, SharedTraceSink, TraceEvent, TraceKind, TraceLog, TraceSink};
