//! The state table: one handler per state identifier.

use super::event::Event;
use super::next::{NextState, Target};
use super::state::State;
use crate::engine::FsmError;
use std::collections::HashMap;

/// Function registered for a state (or as the default handler).
///
/// Receives the event for the current dispatch and returns the transition
/// to commit.
pub type Handler<S, M, D> =
    Box<dyn Fn(&Event<'_, S, M, D>) -> Result<NextState<S, D>, FsmError> + Send + Sync>;

/// Side-effect-only callback fired with `(from, to)` on every committed transition.
pub type Observer<S> = Box<dyn Fn(&S, &Target<S>) + Send + Sync>;

/// Mapping from state identifier to handler.
pub struct StateTable<S: State, M, D> {
    handlers: HashMap<S, Handler<S, M, D>>,
}

impl<S: State, M, D> StateTable<S, M, D> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` for `state`, returning the handler it replaced.
    /// Last registration wins.
    pub fn insert(&mut self, state: S, handler: Handler<S, M, D>) -> Option<Handler<S, M, D>> {
        self.handlers.insert(state, handler)
    }

    pub fn get(&self, state: &S) -> Option<&Handler<S, M, D>> {
        self.handlers.get(state)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.handlers.contains_key(state)
    }

    /// Registered states, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.handlers.keys()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<S: State, M, D> Default for StateTable<S, M, D> {
    fn default() -> Self {
        Self::new()
    }
}
