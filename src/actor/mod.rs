//! Mailbox front-end for a machine.
//!
//! [`spawn`] moves a shared [`Machine`] behind a tokio task that drains an
//! unbounded mailbox and dispatches messages one by one, in the order they
//! were sent. Collaborators that must not wait on the machine's lock (for
//! example a handler that wants to send a follow-up message to its own
//! machine) use [`MachineHandle::tell`] and return immediately.
//!
//! # Example
//!
//! ```rust
//! use fsm_runtime::actor;
//! use fsm_runtime::builder::MachineBuilder;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let machine = Arc::new(
//!     MachineBuilder::<&'static str, u32, u32>::new()
//!         .when("Counting", |event| Ok(event.stay().with(event.data() + event.message())))
//!         .start_with("Counting", 0)
//!         .build()
//!         .unwrap(),
//! );
//!
//! let (handle, _task) = actor::spawn(Arc::clone(&machine));
//! handle.tell(2).unwrap();
//! handle.ask(3).await.unwrap();
//! assert_eq!(machine.current_data(), 5);
//! # }
//! ```

use crate::core::State;
use crate::engine::{FsmError, Machine};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Errors returned by [`MachineHandle`].
#[derive(Debug, Error)]
pub enum ActorError {
    /// The mailbox task has stopped (all work done, aborted or panicked).
    #[error("machine mailbox is closed")]
    Closed,

    /// The machine rejected the message.
    #[error(transparent)]
    Dispatch(#[from] FsmError),
}

struct Envelope<M> {
    message: M,
    reply: Option<oneshot::Sender<Result<(), FsmError>>>,
}

/// Cloneable sender side of a machine's mailbox.
pub struct MachineHandle<M> {
    sender: mpsc::UnboundedSender<Envelope<M>>,
}

impl<M> Clone for MachineHandle<M> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<M> MachineHandle<M> {
    /// Queue a message without waiting for it to be dispatched.
    ///
    /// Dispatch errors for told messages are logged, not returned.
    pub fn tell(&self, message: M) -> Result<(), ActorError> {
        self.sender
            .send(Envelope {
                message,
                reply: None,
            })
            .map_err(|_| ActorError::Closed)
    }

    /// Queue a message and wait for its dispatch outcome.
    pub async fn ask(&self, message: M) -> Result<(), ActorError> {
        let (reply, outcome) = oneshot::channel();
        self.sender
            .send(Envelope {
                message,
                reply: Some(reply),
            })
            .map_err(|_| ActorError::Closed)?;
        outcome.await.map_err(|_| ActorError::Closed)??;
        Ok(())
    }

    /// Whether the mailbox task has gone away.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Start the mailbox task for `machine`.
///
/// The task ends once every [`MachineHandle`] has been dropped and the
/// queued messages are drained, or after a handler panics. Each dispatch
/// runs on tokio's blocking pool and is awaited before the next message is
/// taken, so a slow handler delays this mailbox only. Must be called from
/// within a tokio runtime.
pub fn spawn<S, M, D>(machine: Arc<Machine<S, M, D>>) -> (MachineHandle<M>, JoinHandle<()>)
where
    S: State + 'static,
    M: Send + 'static,
    D: Send + 'static,
{
    let (sender, mut receiver) = mpsc::unbounded_channel::<Envelope<M>>();
    let task = tokio::spawn(async move {
        debug!(machine = %machine.id(), "mailbox started");
        while let Some(envelope) = receiver.recv().await {
            let worker = Arc::clone(&machine);
            let message = envelope.message;
            // Handlers may block; keep them off the async worker threads.
            let result = match tokio::task::spawn_blocking(move || worker.dispatch(message)).await {
                Ok(result) => result,
                Err(error) => {
                    warn!(
                        machine = %machine.id(),
                        %error,
                        "dispatch panicked, closing mailbox"
                    );
                    break;
                }
            };
            match envelope.reply {
                Some(reply) => {
                    // The asker may have stopped waiting.
                    let _ = reply.send(result);
                }
                None => {
                    if let Err(error) = result {
                        warn!(machine = %machine.id(), %error, "told message was rejected");
                    }
                }
            }
        }
        debug!(machine = %machine.id(), "mailbox closed");
    });
    (MachineHandle { sender }, task)
}
