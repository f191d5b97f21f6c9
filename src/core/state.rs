//! State identifiers.
//!
//! A state is an opaque, comparable token naming an entry in the state
//! table. Anything string-like works out of the box; enums get an
//! implementation from [`state_enum!`](crate::state_enum).

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state identifiers.
///
/// Identifiers are compared structurally (`Eq` + `Hash`), so two values
/// that compare equal address the same handler.
///
/// # Required Traits
///
/// - `Clone`: the engine hands copies of the current state to observers and accessors
/// - `Eq` + `Hash`: states key the handler table
/// - `Debug`: states must be debuggable for diagnostics
/// - `Send` + `Sync`: a machine is shared between threads
///
/// # Example
///
/// ```rust
/// use fsm_runtime::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum DoorState {
///     Open,
///     Closed,
/// }
///
/// impl State for DoorState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(DoorState::Closed.name(), "Closed");
/// assert_eq!("Open".name(), "Open");
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + Sync {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

impl State for String {
    fn name(&self) -> &str {
        self
    }
}

impl State for &'static str {
    fn name(&self) -> &str {
        self
    }
}
