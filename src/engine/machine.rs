//! Dispatch engine: current state, current data and the dispatch loop.

use crate::checkpoint::Snapshot;
use crate::core::{Event, Handler, Observer, State, StateTable, Target};
use crate::engine::error::FsmError;
use parking_lot::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

/// Live part of the machine. Only ever touched under the lock.
struct Runtime<S, D> {
    initial_state: S,
    initial_data: D,
    state: S,
    data: D,
    completed: bool,
}

/// A finite state machine.
///
/// The state table, default handler and observer are fixed when the
/// machine is built. Current state and data live behind one mutex:
/// [`Machine::dispatch`] holds it for the whole cycle (event construction,
/// handler, observer, commit), so at most one handler runs at a time and
/// every handler sees the most recently committed `(state, data)` pair.
///
/// Handlers and observers run inside that critical section. A handler that
/// blocks stalls every other caller; hand slow work to another task
/// instead (see the `actor` module).
///
/// Share a machine between threads with `Arc`.
pub struct Machine<S: State, M, D> {
    id: Uuid,
    table: StateTable<S, M, D>,
    fallback: Option<Handler<S, M, D>>,
    observer: Option<Observer<S>>,
    runtime: Mutex<Runtime<S, D>>,
}

impl<S: State, M, D> Machine<S, M, D> {
    /// Deliver one message and commit the resulting transition.
    ///
    /// Fails with [`FsmError::Completed`] once an end marker was committed,
    /// and with whatever the handler returned otherwise. On error the
    /// current state and data are left untouched. Panics raised by
    /// handlers or the observer propagate to the caller, also without a
    /// commit.
    pub fn dispatch(&self, message: M) -> Result<(), FsmError> {
        let mut guard = self.runtime.lock();
        let runtime = &mut *guard;

        if runtime.completed {
            warn!(machine = %self.id, "dispatch rejected: machine already completed");
            return Err(FsmError::Completed);
        }

        let result = match self.table.get(&runtime.state) {
            Some(handler) => {
                let event = Event::new(
                    &message,
                    &runtime.data,
                    &runtime.state,
                    &self.table,
                    self.fallback.as_ref(),
                );
                handler(&event)
            }
            None => Err(FsmError::UnknownState {
                state: runtime.state.name().to_string(),
            }),
        };

        let next = match result {
            Ok(next) => next,
            Err(error) => {
                warn!(
                    machine = %self.id,
                    state = runtime.state.name(),
                    %error,
                    "dispatch failed"
                );
                return Err(error);
            }
        };

        let (target, data) = next.into_parts();
        if let Some(observer) = &self.observer {
            observer(&runtime.state, &target);
        }
        debug!(
            machine = %self.id,
            from = runtime.state.name(),
            to = target.name(),
            "transition"
        );

        match target {
            Target::State(state) => runtime.state = state,
            Target::End => runtime.completed = true,
        }
        if let Some(data) = data {
            runtime.data = data;
        }
        Ok(())
    }

    /// Unique id of this machine instance, used in log fields.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current_state(&self) -> S {
        self.runtime.lock().state.clone()
    }

    /// Whether an end marker was committed.
    pub fn is_completed(&self) -> bool {
        self.runtime.lock().completed
    }

    /// Read the current state and data without cloning the data.
    ///
    /// The closure runs under the machine lock; keep it short.
    pub fn inspect<R>(&self, f: impl FnOnce(&S, &D) -> R) -> R {
        let runtime = self.runtime.lock();
        f(&runtime.state, &runtime.data)
    }

    pub fn contains_state(&self, state: &S) -> bool {
        self.table.contains(state)
    }

    /// Registered states, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.table.states()
    }
}

impl<S: State, M, D: Clone> Machine<S, M, D> {
    pub(crate) fn new(
        table: StateTable<S, M, D>,
        fallback: Option<Handler<S, M, D>>,
        observer: Option<Observer<S>>,
        initial_state: S,
        initial_data: D,
    ) -> Self {
        let id = Uuid::new_v4();
        debug!(
            machine = %id,
            states = table.len(),
            initial = initial_state.name(),
            "machine built"
        );
        Self {
            id,
            table,
            fallback,
            observer,
            runtime: Mutex::new(Runtime {
                state: initial_state.clone(),
                data: initial_data.clone(),
                initial_state,
                initial_data,
                completed: false,
            }),
        }
    }

    /// Snapshot of the current data.
    pub fn current_data(&self) -> D {
        self.runtime.lock().data.clone()
    }

    /// Set a new restart point and move the machine onto it.
    ///
    /// Clears the completed flag. Fails with [`FsmError::UnknownState`] if
    /// `state` has no handler, leaving the machine as it was.
    pub fn start_with(&self, state: S, data: D) -> Result<(), FsmError> {
        if !self.table.contains(&state) {
            return Err(FsmError::UnknownState {
                state: state.name().to_string(),
            });
        }
        let mut runtime = self.runtime.lock();
        debug!(machine = %self.id, state = state.name(), "machine restarted");
        runtime.state = state.clone();
        runtime.data = data.clone();
        runtime.initial_state = state;
        runtime.initial_data = data;
        runtime.completed = false;
        Ok(())
    }

    /// Return to the state and data last passed to `start_with`, discarding
    /// everything committed since. Also revives a completed machine.
    pub fn reinitialize(&self) {
        let mut guard = self.runtime.lock();
        let runtime = &mut *guard;
        debug!(
            machine = %self.id,
            state = runtime.initial_state.name(),
            "machine reinitialized"
        );
        runtime.state = runtime.initial_state.clone();
        runtime.data = runtime.initial_data.clone();
        runtime.completed = false;
    }

    /// Capture the live state, data and completed flag.
    pub fn snapshot(&self) -> Snapshot<S, D> {
        let runtime = self.runtime.lock();
        Snapshot::new(
            self.id,
            runtime.state.clone(),
            runtime.data.clone(),
            runtime.completed,
        )
    }

    /// Replace the live state, data and completed flag with a snapshot's.
    ///
    /// The restart point used by [`Machine::reinitialize`] is kept. Fails
    /// with [`FsmError::UnknownState`] if the snapshot's state has no
    /// handler in this machine.
    pub fn restore(&self, snapshot: Snapshot<S, D>) -> Result<(), FsmError> {
        if !self.table.contains(&snapshot.state) {
            return Err(FsmError::UnknownState {
                state: snapshot.state.name().to_string(),
            });
        }
        let mut runtime = self.runtime.lock();
        debug!(
            machine = %self.id,
            snapshot = %snapshot.id,
            state = snapshot.state.name(),
            "machine restored"
        );
        runtime.state = snapshot.state;
        runtime.data = snapshot.data;
        runtime.completed = snapshot.completed;
        Ok(())
    }
}
