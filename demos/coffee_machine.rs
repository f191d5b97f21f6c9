//! Coffee Machine
//!
//! A vending machine that takes deposits, brews once the price is reached,
//! and lets a default handler deal with cancel and shutdown from any state.
//!
//! Key concepts:
//! - Closed enums for messages, exhaustive matching in handlers
//! - `defer_to_default` for commands every state shares
//! - A transition observer used for logging only
//!
//! Run with: RUST_LOG=debug cargo run --example coffee_machine

use fsm_runtime::builder::MachineBuilder;
use fsm_runtime::engine::{FsmError, Machine};
use fsm_runtime::{state_enum, Target};
use tracing::info;
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Coffee {
        Open,
        ReadyToBuy,
        PoweredOff,
    }
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Deposit(u32),
    Cancel,
    BrewCoffee,
    GetCostOfCoffee,
    SetCostOfCoffee(u32),
    GetNumberOfCoffee,
    SetNumberOfCoffee(u32),
    ShutDownMachine,
    StartUpMachine,
}

#[derive(Debug, Clone, Copy)]
struct Till {
    total: u32,
    price: u32,
    left: u32,
}

fn coffee_machine() -> Machine<Coffee, Command, Till> {
    MachineBuilder::<Coffee, Command, Till>::new()
        .when(Coffee::Open, |event| {
            let till = *event.data();
            if till.left == 0 {
                return event.goto(Coffee::PoweredOff);
            }
            match *event.message() {
                Command::Deposit(value) => {
                    let total = till.total + value;
                    let next = if total >= till.price {
                        event.goto(Coffee::ReadyToBuy)?
                    } else {
                        event.stay()
                    };
                    Ok(next.with(Till { total, ..till }))
                }
                Command::SetNumberOfCoffee(left) => {
                    info!(left, "set new number of coffees");
                    Ok(event.stay().with(Till { left, ..till }))
                }
                Command::GetNumberOfCoffee => {
                    info!(left = till.left, "coffees left");
                    Ok(event.stay())
                }
                Command::SetCostOfCoffee(price) => {
                    info!(price, "set new coffee price");
                    Ok(event.stay().with(Till { price, ..till }))
                }
                Command::GetCostOfCoffee => {
                    info!(price = till.price, "cost of coffee");
                    Ok(event.stay())
                }
                _ => event.defer_to_default(),
            }
        })
        .when(Coffee::ReadyToBuy, |event| match event.message() {
            Command::BrewCoffee => {
                let till = *event.data();
                let change = till.total - till.price;
                if change > 0 {
                    info!(change, "balance to be dispensed");
                }
                Ok(event.goto(Coffee::Open)?.with(Till {
                    total: 0,
                    left: till.left - 1,
                    ..till
                }))
            }
            _ => event.defer_to_default(),
        })
        .when(Coffee::PoweredOff, |event| match event.message() {
            Command::StartUpMachine => event.goto(Coffee::Open),
            _ => {
                info!("machine powered down, start it with StartUpMachine first");
                Ok(event.stay())
            }
        })
        .default_handler(|event| {
            let till = *event.data();
            match event.message() {
                Command::ShutDownMachine => {
                    info!(balance = till.total, "shutting down");
                    Ok(event.goto(Coffee::PoweredOff)?.with(Till { total: 0, ..till }))
                }
                Command::Cancel => {
                    info!(balance = till.total, "cancelled");
                    Ok(event.goto(Coffee::Open)?.with(Till { total: 0, ..till }))
                }
                _ => Err(event.unhandled()),
            }
        })
        .on_transition(|from, to| match (from, to) {
            (Coffee::Open, Target::State(Coffee::ReadyToBuy)) => {
                info!("from transacting to ready to buy")
            }
            (Coffee::ReadyToBuy, Target::State(Coffee::Open)) => {
                info!("from ready to buy to open")
            }
            _ => {}
        })
        .start_with(
            Coffee::Open,
            Till {
                total: 0,
                price: 5,
                left: 10,
            },
        )
        .build()
        .expect("coffee machine configuration is valid")
}

fn main() -> Result<(), FsmError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Coffee Machine Example ===\n");

    let machine = coffee_machine();
    for command in [
        Command::GetCostOfCoffee,
        Command::Deposit(2),
        Command::Deposit(5),
        Command::BrewCoffee,
        Command::GetNumberOfCoffee,
        Command::Deposit(3),
        Command::Cancel,
        Command::ShutDownMachine,
        Command::Deposit(1),
        Command::StartUpMachine,
    ] {
        machine.dispatch(command)?;
        println!(
            "{:<20} -> {:<11} {:?}",
            format!("{command:?}"),
            machine.current_state().to_string(),
            machine.current_data()
        );
    }

    match machine.dispatch(Command::BrewCoffee) {
        Err(error) => println!("\nBrewing without paying is refused: {error}"),
        Ok(()) => println!("\nBrewed for free?"),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
