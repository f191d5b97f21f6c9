//! The event a handler receives for one dispatch.

use super::next::{NextState, Target};
use super::state::State;
use super::table::{Handler, StateTable};
use crate::engine::FsmError;
use std::error::Error;
use std::fmt;

/// Read-only view of one dispatch: the incoming message and the machine's
/// data at the moment of dispatch.
///
/// Besides the pair itself, an event carries the transition builders. They
/// only describe a transition; the engine commits whatever the handler
/// returns once the handler is done.
///
/// # Example
///
/// ```rust
/// use fsm_runtime::builder::MachineBuilder;
///
/// #[derive(Debug)]
/// enum Msg {
///     Push,
///     Reset,
/// }
///
/// let machine = MachineBuilder::<&'static str, Msg, u32>::new()
///     .when("Idle", |event| match event.message() {
///         Msg::Push => Ok(event.goto("Busy")?.with(event.data() + 1)),
///         Msg::Reset => event.defer_to_default(),
///     })
///     .when("Busy", |event| Ok(event.stay()))
///     .default_handler(|event| Ok(event.stay().with(0)))
///     .start_with("Idle", 0)
///     .build()
///     .unwrap();
///
/// machine.dispatch(Msg::Push).unwrap();
/// assert_eq!(machine.current_state(), "Busy");
/// assert_eq!(machine.current_data(), 1);
/// ```
pub struct Event<'a, S: State, M, D> {
    message: &'a M,
    data: &'a D,
    state: &'a S,
    table: &'a StateTable<S, M, D>,
    fallback: Option<&'a Handler<S, M, D>>,
    in_fallback: bool,
}

impl<'a, S: State, M, D> Event<'a, S, M, D> {
    pub(crate) fn new(
        message: &'a M,
        data: &'a D,
        state: &'a S,
        table: &'a StateTable<S, M, D>,
        fallback: Option<&'a Handler<S, M, D>>,
    ) -> Self {
        Self {
            message,
            data,
            state,
            table,
            fallback,
            in_fallback: false,
        }
    }

    pub fn message(&self) -> &'a M {
        self.message
    }

    /// The machine's data as it was when the dispatch started.
    pub fn data(&self) -> &'a D {
        self.data
    }

    /// The state whose handler is running.
    pub fn state(&self) -> &'a S {
        self.state
    }

    /// Transition to `state`, keeping the current data unless
    /// [`NextState::with`] follows.
    ///
    /// The destination is checked against the state table here, not at
    /// commit time: an unregistered state yields [`FsmError::UnknownState`].
    pub fn goto(&self, state: S) -> Result<NextState<S, D>, FsmError> {
        if !self.table.contains(&state) {
            return Err(FsmError::UnknownState {
                state: state.name().to_string(),
            });
        }
        Ok(NextState::new(Target::State(state)))
    }

    /// Transition back into the current state.
    pub fn stay(&self) -> NextState<S, D> {
        NextState::new(Target::State(self.state.clone()))
    }

    /// Terminal transition. Once committed, the machine rejects further
    /// dispatches until it is reinitialized.
    pub fn end(&self) -> NextState<S, D> {
        NextState::new(Target::End)
    }

    /// Hand this event to the default handler and return its verdict.
    ///
    /// Runs inside the same dispatch. Fails with
    /// [`FsmError::MissingDefaultHandler`] when none is configured, and with
    /// [`FsmError::Unhandled`] when called from the default handler itself.
    pub fn defer_to_default(&self) -> Result<NextState<S, D>, FsmError> {
        if self.in_fallback {
            return Err(self.unhandled());
        }
        let handler = self.fallback.ok_or_else(|| FsmError::MissingDefaultHandler {
            state: self.state.name().to_string(),
        })?;
        let event = Event {
            in_fallback: true,
            ..*self
        };
        handler(&event)
    }

    /// Error for a message nobody recognises in the current state.
    pub fn unhandled(&self) -> FsmError {
        FsmError::Unhandled {
            state: self.state.name().to_string(),
        }
    }

    /// Wrap a collaborator error so it reaches the dispatch caller.
    pub fn fail<E>(&self, error: E) -> FsmError
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        FsmError::Handler {
            state: self.state.name().to_string(),
            source: error.into(),
        }
    }
}

impl<S: State, M: fmt::Debug, D: fmt::Debug> fmt::Debug for Event<'_, S, M, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("state", self.state)
            .field("message", self.message)
            .field("data", self.data)
            .finish_non_exhaustive()
    }
}
