//! Transition values returned by state handlers.
//!
//! A handler never mutates the machine. It describes what should happen
//! next with a [`NextState`], and the engine commits it.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a transition leads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target<S> {
    /// Move to (or stay in) a registered state.
    State(S),
    /// Terminal marker: committing it completes the machine.
    End,
}

impl<S: State> Target<S> {
    /// The destination state, or `None` for [`Target::End`].
    pub fn state(&self) -> Option<&S> {
        match self {
            Self::State(state) => Some(state),
            Self::End => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    /// Name used in logs and observer output. `End` renders as `"end"`.
    pub fn name(&self) -> &str {
        match self {
            Self::State(state) => state.name(),
            Self::End => "end",
        }
    }
}

impl<S: State> fmt::Display for Target<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The transition a handler asks the engine to commit.
///
/// Built through [`Event::goto`](crate::core::Event::goto),
/// [`Event::stay`](crate::core::Event::stay) or
/// [`Event::end`](crate::core::Event::end). Unless [`NextState::with`] is
/// applied, the machine keeps its current data.
///
/// # Example
///
/// ```rust
/// use fsm_runtime::builder::MachineBuilder;
///
/// let machine = MachineBuilder::<&'static str, u32, u32>::new()
///     .when("Counting", |event| Ok(event.stay().with(event.data() + event.message())))
///     .start_with("Counting", 0)
///     .build()
///     .unwrap();
///
/// machine.dispatch(5).unwrap();
/// assert_eq!(machine.current_data(), 5);
/// ```
#[derive(Debug)]
#[must_use = "a NextState does nothing unless it is returned from a handler"]
pub struct NextState<S, D> {
    target: Target<S>,
    data: Option<D>,
}

impl<S, D> NextState<S, D> {
    pub(crate) fn new(target: Target<S>) -> Self {
        Self { target, data: None }
    }

    /// Replace the data carried into the next state.
    pub fn with(mut self, data: D) -> Self {
        self.data = Some(data);
        self
    }

    pub fn target(&self) -> &Target<S> {
        &self.target
    }

    /// The replacement data, if one was attached.
    pub fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Target<S>, Option<D>) {
        (self.target, self.data)
    }
}
