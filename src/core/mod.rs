//! State table and transition algebra.
//!
//! This module contains the value types handlers work with:
//! - State identifiers via the `State` trait
//! - `Event`, the read-only `(message, data)` pair handed to a handler
//! - `NextState` / `Target`, the transition a handler returns
//! - `StateTable`, the state -> handler mapping
//!
//! Nothing here touches the engine's lock or bookkeeping, so handlers can
//! be written and tested as plain functions.

mod event;
mod next;
mod state;
mod table;

pub use event::Event;
pub use next::{NextState, Target};
pub use state::State;
pub use table::{Handler, Observer, StateTable};
