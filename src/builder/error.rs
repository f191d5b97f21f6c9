//! Build errors for the machine builder.

use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .start_with(state, data) before .build()")]
    MissingInitialState,

    #[error("No states defined. Register at least one handler with .when(state, handler)")]
    NoStates,

    #[error("Initial state '{state}' has no registered handler")]
    UnregisteredInitialState { state: String },
}
