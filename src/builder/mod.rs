//! Builder API for machine construction.
//!
//! [`MachineBuilder`] collects the state table, the default handler, the
//! transition observer and the initial state/data, and validates them
//! before handing out a [`Machine`](crate::engine::Machine).
//! [`state_enum!`](crate::state_enum) declares enum state identifiers.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;
