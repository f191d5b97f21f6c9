//! Engine-level errors.

use std::error::Error;
use thiserror::Error;

/// Errors surfaced by [`Machine::dispatch`](crate::engine::Machine::dispatch)
/// and the transition builders.
///
/// Every variant except [`FsmError::Handler`] signals a configuration or
/// logic defect rather than a transient condition; the engine never
/// retries. When dispatch returns an error, nothing is committed.
#[derive(Debug, Error)]
pub enum FsmError {
    /// A handler deferred to the default handler, but none is configured.
    #[error("default handler is not defined (event was not handled in state '{state}')")]
    MissingDefaultHandler { state: String },

    /// The default handler did not recognise the event either.
    #[error("event was not handled in state '{state}'")]
    Unhandled { state: String },

    /// A transition named a state that has no registered handler.
    #[error("unknown state '{state}': no handler is registered for it")]
    UnknownState { state: String },

    /// The machine reached its end marker.
    #[error("machine reached its final state; call reinitialize() before dispatching again")]
    Completed,

    /// A handler reported a collaborator failure.
    #[error("handler failed in state '{state}': {source}")]
    Handler {
        state: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}
