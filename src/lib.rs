//! fsm-runtime: a small finite state machine runtime
//!
//! Register one handler per state, pick an initial state and data, then
//! feed the machine messages. Each handler receives an [`Event`] (the
//! message plus the machine's current data) and returns a [`NextState`]:
//! go to another state, stay, or end. The engine commits the transition,
//! notifies an optional observer, and serializes all of this behind a
//! single lock so concurrent callers never see a half-applied transition.
//!
//! # Core Concepts
//!
//! - **State**: an identifier implementing [`State`]; strings work as-is,
//!   enums via [`state_enum!`]
//! - **Handler**: `Fn(&Event) -> Result<NextState, FsmError>`, one per state
//! - **Default handler**: fallback a handler reaches through
//!   [`Event::defer_to_default`]
//! - **Observer**: callback fired with `(from, to)` on every commit
//! - **End**: terminal marker; a completed machine rejects messages until
//!   [`Machine::reinitialize`], [`Machine::start_with`] or
//!   [`Machine::restore`] revives it
//!
//! # Features
//!
//! - `actor` (default): tokio mailbox front-end in the `actor` module
//!
//! # Example
//!
//! ```rust
//! use fsm_runtime::builder::MachineBuilder;
//! use fsm_runtime::state_enum;
//!
//! state_enum! {
//!     enum Light {
//!         Red,
//!         Green,
//!     }
//! }
//!
//! enum Signal {
//!     Tick,
//!     Off,
//! }
//!
//! let light = MachineBuilder::<Light, Signal, u32>::new()
//!     .when(Light::Red, |event| match event.message() {
//!         Signal::Tick => Ok(event.goto(Light::Green)?.with(event.data() + 1)),
//!         Signal::Off => Ok(event.end()),
//!     })
//!     .when(Light::Green, |event| match event.message() {
//!         Signal::Tick => event.goto(Light::Red),
//!         Signal::Off => Ok(event.end()),
//!     })
//!     .start_with(Light::Red, 0)
//!     .build()
//!     .unwrap();
//!
//! light.dispatch(Signal::Tick).unwrap();
//! assert_eq!(light.current_state(), Light::Green);
//! assert_eq!(light.current_data(), 1);
//!
//! light.dispatch(Signal::Off).unwrap();
//! assert!(light.is_completed());
//! assert!(light.dispatch(Signal::Tick).is_err());
//! ```

#[cfg(feature = "actor")]
pub mod actor;
pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::builder::{BuildError, MachineBuilder};
pub use crate::checkpoint::Snapshot;
pub use crate::core::{Event, NextState, State, Target};
pub use crate::engine::{FsmError, Machine};

#[doc(hidden)]
pub use serde;
