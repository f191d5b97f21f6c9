//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::core::{Event, Handler, NextState, Observer, State, StateTable, Target};
use crate::engine::{FsmError, Machine};

/// Builder for a [`Machine`] with a fluent API.
///
/// Everything that must not change while messages are being dispatched is
/// configured here. [`MachineBuilder::build`] moves the state table into
/// the machine, after which no handler can be added or replaced.
pub struct MachineBuilder<S: State, M, D> {
    table: StateTable<S, M, D>,
    fallback: Option<Handler<S, M, D>>,
    observer: Option<Observer<S>>,
    initial: Option<(S, D)>,
}

impl<S: State, M, D: Clone> MachineBuilder<S, M, D> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            table: StateTable::new(),
            fallback: None,
            observer: None,
            initial: None,
        }
    }

    /// Register the handler for `state`.
    /// Registering the same state again replaces the earlier handler.
    pub fn when<F>(mut self, state: S, handler: F) -> Self
    where
        F: Fn(&Event<'_, S, M, D>) -> Result<NextState<S, D>, FsmError> + Send + Sync + 'static,
    {
        self.table.insert(state, Box::new(handler));
        self
    }

    /// Set the handler that [`Event::defer_to_default`] runs.
    pub fn default_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Event<'_, S, M, D>) -> Result<NextState<S, D>, FsmError> + Send + Sync + 'static,
    {
        self.fallback = Some(Box::new(handler));
        self
    }

    /// Set the callback fired with `(from, to)` on every committed
    /// transition, self-transitions included.
    pub fn on_transition<F>(mut self, observer: F) -> Self
    where
        F: Fn(&S, &Target<S>) + Send + Sync + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Set the initial state and data (required).
    /// They are also the point [`Machine::reinitialize`] returns to.
    pub fn start_with(mut self, state: S, data: D) -> Self {
        self.initial = Some((state, data));
        self
    }

    /// Build the machine.
    /// Returns an error if required fields are missing or the initial state
    /// has no handler.
    pub fn build(self) -> Result<Machine<S, M, D>, BuildError> {
        if self.table.is_empty() {
            return Err(BuildError::NoStates);
        }
        let (state, data) = self.initial.ok_or(BuildError::MissingInitialState)?;
        if !self.table.contains(&state) {
            return Err(BuildError::UnregisteredInitialState {
                state: state.name().to_string(),
            });
        }

        Ok(Machine::new(
            self.table,
            self.fallback,
            self.observer,
            state,
            data,
        ))
    }
}

impl<S: State, M, D: Clone> Default for MachineBuilder<S, M, D> {
    fn default() -> Self {
        Self::new()
    }
}
