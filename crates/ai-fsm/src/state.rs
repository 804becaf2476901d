use core::fmt::Debug;

use ai_core::{ContactEvent, TickContext};

/// Identifier of a state within one machine. Typically a fieldless enum.
pub trait StateKey: Copy + Ord + Debug + 'static {}

impl<T> StateKey for T where T: Copy + Ord + Debug + 'static {}

/// One state of a [`StateMachine`](crate::StateMachine).
///
/// States never hold a reference to the machine or to each other. Shared data lives in the
/// context `C`, which the machine owns and lends to every callback.
pub trait State<K, C>: 'static
where
    K: StateKey,
{
    /// Where the machine should be after this tick. Returning the current key keeps the state
    /// and runs [`State::update`].
    fn next_state(&self, context: &C) -> K;

    fn update(&mut self, tick: &TickContext, context: &mut C);

    fn enter(&mut self, _context: &mut C) {}

    fn exit(&mut self, _context: &mut C) {}

    fn on_trigger_enter(&mut self, _contact: &ContactEvent, _context: &mut C) {}

    fn on_trigger_stay(&mut self, _contact: &ContactEvent, _context: &mut C) {}

    fn on_trigger_exit(&mut self, _contact: &ContactEvent, _context: &mut C) {}
}
