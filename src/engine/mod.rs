//! The dispatch engine.
//!
//! [`Machine`] owns the current state and data behind a single lock and
//! runs exactly one handler at a time. Build one with
//! [`MachineBuilder`](crate::builder::MachineBuilder).

mod error;
mod machine;

pub use error::FsmError;
pub use machine::Machine;
