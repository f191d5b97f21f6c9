//! Wire Transfer
//!
//! Moves money between two accounts in two phases. The machine hands the
//! amount to the source account, waits for it to confirm, hands it to the
//! target account, and waits again. The accounts are separate tokio tasks
//! that report back through the machine's mailbox.
//!
//! Key concepts:
//! - Transfer details travel as machine data across transitions
//! - Handlers hand values off without waiting, so the lock is never held
//!   while a collaborator works
//! - `actor::spawn` gives collaborators a fire-and-forget handle
//!
//! Run with: RUST_LOG=debug cargo run --example wire_transfer

use fsm_runtime::actor::{self, ActorError};
use fsm_runtime::builder::MachineBuilder;
use fsm_runtime::engine::Machine;
use fsm_runtime::state_enum;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::info;
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Wire {
        Initial,
        AwaitFrom,
        AwaitTo,
        Done,
    }
}

#[derive(Debug, Clone)]
struct Transfer {
    source: UnboundedSender<u32>,
    target: UnboundedSender<u32>,
    amount: u32,
}

#[derive(Debug, Clone)]
enum WireMessage {
    Transfer(Transfer),
    Done,
    Failed,
}

#[derive(Debug, Clone)]
enum WireData {
    Idle,
    Pending(Transfer),
}

fn wire_transfer(transferred: UnboundedSender<bool>) -> Machine<Wire, WireMessage, WireData> {
    let failed = transferred.clone();
    MachineBuilder::<Wire, WireMessage, WireData>::new()
        .when(Wire::Initial, |event| match (event.message(), event.data()) {
            (WireMessage::Transfer(transfer), WireData::Idle) => {
                transfer
                    .source
                    .send(transfer.amount)
                    .map_err(|e| event.fail(e))?;
                Ok(event
                    .goto(Wire::AwaitFrom)?
                    .with(WireData::Pending(transfer.clone())))
            }
            _ => event.defer_to_default(),
        })
        .when(Wire::AwaitFrom, |event| match (event.message(), event.data()) {
            (WireMessage::Done, WireData::Pending(transfer)) => {
                transfer
                    .target
                    .send(transfer.amount)
                    .map_err(|e| event.fail(e))?;
                event.goto(Wire::AwaitTo)
            }
            _ => event.defer_to_default(),
        })
        .when(Wire::AwaitTo, move |event| match event.message() {
            WireMessage::Done => {
                transferred.send(true).map_err(|e| event.fail(e))?;
                event.goto(Wire::Done)
            }
            _ => event.defer_to_default(),
        })
        .when(Wire::Done, |event| Ok(event.stay()))
        .default_handler(move |event| match event.message() {
            WireMessage::Failed => {
                let _ = failed.send(false);
                Ok(event.end())
            }
            _ => Err(event.unhandled()),
        })
        .start_with(Wire::Initial, WireData::Idle)
        .build()
        .expect("wire transfer configuration is valid")
}

#[tokio::main]
async fn main() -> Result<(), ActorError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Wire Transfer Example ===\n");

    let (transferred_tx, mut transferred) = mpsc::unbounded_channel();
    let machine = Arc::new(wire_transfer(transferred_tx));
    let (handle, _mailbox) = actor::spawn(Arc::clone(&machine));

    let (source, mut withdrawals) = mpsc::unbounded_channel();
    let (target, mut top_ups) = mpsc::unbounded_channel();

    let source_account = handle.clone();
    tokio::spawn(async move {
        if let Some(amount) = withdrawals.recv().await {
            info!(amount, "withdrawn from source account");
            let _ = source_account.tell(WireMessage::Done);
        }
    });

    let target_account = handle.clone();
    tokio::spawn(async move {
        if let Some(amount) = top_ups.recv().await {
            info!(amount, "topped up target account");
            let _ = target_account.tell(WireMessage::Done);
        }
    });

    handle
        .ask(WireMessage::Transfer(Transfer {
            source,
            target,
            amount: 30,
        }))
        .await?;

    match transferred.recv().await {
        Some(true) => println!("Transfer complete, machine is in {}", machine.current_state()),
        _ => println!("Transfer failed"),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
