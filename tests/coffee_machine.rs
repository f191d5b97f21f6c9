//! End-to-end tests driving a coffee vending machine.

use fsm_runtime::builder::MachineBuilder;
use fsm_runtime::engine::{FsmError, Machine};
use fsm_runtime::state_enum;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

state_enum! {
    enum Coffee {
        Open,
        ReadyToBuy,
        PoweredOff,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
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

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct MachineData {
    total: u32,
    price: u32,
    left: u32,
}

fn data(total: u32, price: u32, left: u32) -> MachineData {
    MachineData { total, price, left }
}

type CoffeeBuilder = MachineBuilder<Coffee, Command, MachineData>;

fn vending() -> CoffeeBuilder {
    MachineBuilder::<Coffee, Command, MachineData>::new()
        .when(Coffee::Open, |event| {
            let current = *event.data();
            if current.left == 0 {
                return event.goto(Coffee::PoweredOff);
            }
            match *event.message() {
                Command::Deposit(value) if current.total + value >= current.price => {
                    Ok(event.goto(Coffee::ReadyToBuy)?.with(MachineData {
                        total: current.total + value,
                        ..current
                    }))
                }
                Command::Deposit(value) => Ok(event.stay().with(MachineData {
                    total: current.total + value,
                    ..current
                })),
                Command::SetNumberOfCoffee(left) => {
                    Ok(event.stay().with(MachineData { left, ..current }))
                }
                Command::SetCostOfCoffee(price) => {
                    Ok(event.stay().with(MachineData { price, ..current }))
                }
                Command::GetNumberOfCoffee | Command::GetCostOfCoffee => Ok(event.stay()),
                _ => event.defer_to_default(),
            }
        })
        .when(Coffee::ReadyToBuy, |event| match event.message() {
            Command::BrewCoffee => {
                let current = *event.data();
                Ok(event.goto(Coffee::Open)?.with(MachineData {
                    total: 0,
                    left: current.left - 1,
                    ..current
                }))
            }
            _ => event.defer_to_default(),
        })
        .when(Coffee::PoweredOff, |event| match event.message() {
            Command::StartUpMachine => event.goto(Coffee::Open),
            _ => Ok(event.stay()),
        })
        .start_with(Coffee::Open, data(0, 5, 10))
}

fn with_default(builder: CoffeeBuilder) -> CoffeeBuilder {
    builder.default_handler(|event| {
        let current = *event.data();
        match event.message() {
            Command::ShutDownMachine => Ok(event
                .goto(Coffee::PoweredOff)?
                .with(MachineData { total: 0, ..current })),
            Command::Cancel => Ok(event
                .goto(Coffee::Open)?
                .with(MachineData { total: 0, ..current })),
            _ => Err(event.unhandled()),
        }
    })
}

fn coffee_machine() -> Machine<Coffee, Command, MachineData> {
    with_default(vending()).build().unwrap()
}

fn send_all(machine: &Machine<Coffee, Command, MachineData>, commands: &[Command]) {
    for command in commands {
        machine.dispatch(*command).unwrap();
    }
}

#[test]
fn deposit_below_price_stays_open() {
    let machine = coffee_machine();
    machine.dispatch(Command::Deposit(2)).unwrap();

    assert_eq!(machine.current_state(), Coffee::Open);
    assert_eq!(machine.current_data(), data(2, 5, 10));
}

#[test]
fn reaching_price_moves_to_ready_and_brewing_returns_to_open() {
    let machine = coffee_machine();

    machine.dispatch(Command::Deposit(2)).unwrap();
    machine.dispatch(Command::Deposit(5)).unwrap();
    assert_eq!(machine.current_state(), Coffee::ReadyToBuy);
    assert_eq!(machine.current_data().total, 7);

    machine.dispatch(Command::BrewCoffee).unwrap();
    assert_eq!(machine.current_state(), Coffee::Open);
    assert_eq!(machine.current_data(), data(0, 5, 9));
}

#[test]
fn cancel_in_open_flushes_deposit() {
    let machine = coffee_machine();
    send_all(
        &machine,
        &[
            Command::SetCostOfCoffee(7),
            Command::Deposit(2),
            Command::Deposit(2),
            Command::Deposit(2),
        ],
    );
    assert_eq!(machine.current_state(), Coffee::Open);
    assert_eq!(machine.current_data().total, 6);

    machine.dispatch(Command::Cancel).unwrap();
    assert_eq!(machine.current_state(), Coffee::Open);
    assert_eq!(machine.current_data(), data(0, 7, 10));
}

#[test]
fn cancel_in_ready_to_buy_returns_to_open() {
    let machine = coffee_machine();
    send_all(&machine, &[Command::Deposit(2), Command::Deposit(2), Command::Deposit(2)]);
    assert_eq!(machine.current_state(), Coffee::ReadyToBuy);

    machine.dispatch(Command::Cancel).unwrap();
    assert_eq!(machine.current_state(), Coffee::Open);
    assert_eq!(machine.current_data().total, 0);
}

#[test]
fn price_can_be_set_and_read() {
    let machine = coffee_machine();
    send_all(&machine, &[Command::SetCostOfCoffee(7), Command::GetCostOfCoffee]);

    assert_eq!(machine.current_data().price, 7);
    assert_eq!(machine.current_state(), Coffee::Open);
}

#[test]
fn stock_can_be_set_and_read() {
    let machine = coffee_machine();
    send_all(&machine, &[Command::SetNumberOfCoffee(3), Command::GetNumberOfCoffee]);

    assert_eq!(machine.current_data().left, 3);
}

#[test]
fn shut_down_from_ready_to_buy_powers_off_and_clears_deposit() {
    let machine = coffee_machine();
    send_all(&machine, &[Command::Deposit(2), Command::Deposit(2), Command::Deposit(2)]);
    assert_eq!(machine.current_state(), Coffee::ReadyToBuy);

    machine.dispatch(Command::ShutDownMachine).unwrap();
    assert_eq!(machine.current_state(), Coffee::PoweredOff);
    assert_eq!(machine.current_data().total, 0);
}

#[test]
fn powered_off_machine_only_wakes_on_start_up() {
    let machine = coffee_machine();
    send_all(&machine, &[Command::Deposit(2), Command::ShutDownMachine]);
    assert_eq!(machine.current_state(), Coffee::PoweredOff);

    machine.dispatch(Command::Deposit(5)).unwrap();
    assert_eq!(machine.current_state(), Coffee::PoweredOff);
    assert_eq!(machine.current_data().total, 0);

    machine.dispatch(Command::StartUpMachine).unwrap();
    assert_eq!(machine.current_state(), Coffee::Open);
}

#[test]
fn sold_out_machine_powers_off() {
    let machine = with_default(vending())
        .start_with(Coffee::Open, data(0, 5, 1))
        .build()
        .unwrap();
    send_all(&machine, &[Command::Deposit(5), Command::BrewCoffee]);
    assert_eq!(machine.current_data(), data(0, 5, 0));

    machine.dispatch(Command::GetNumberOfCoffee).unwrap();
    assert_eq!(machine.current_state(), Coffee::PoweredOff);
}

#[test]
fn unrecognised_command_without_default_handler_fails() {
    let machine = vending().build().unwrap();
    machine.dispatch(Command::Deposit(3)).unwrap();

    let result = machine.dispatch(Command::Cancel);
    assert!(matches!(result, Err(FsmError::MissingDefaultHandler { .. })));
    assert_eq!(machine.current_state(), Coffee::Open);
    assert_eq!(machine.current_data().total, 3);
}

#[test]
fn command_nobody_handles_is_rejected_without_commit() {
    let machine = coffee_machine();
    machine.dispatch(Command::Deposit(1)).unwrap();

    let result = machine.dispatch(Command::BrewCoffee);
    match result {
        Err(FsmError::Unhandled { state }) => assert_eq!(state, "Open"),
        other => panic!("Expected Unhandled, got {other:?}"),
    }
    assert_eq!(machine.current_data().total, 1);
}

#[test]
fn observer_reports_every_commit() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let machine = with_default(vending())
        .on_transition(move |from, to| sink.lock().unwrap().push(format!("{from} -> {to}")))
        .build()
        .unwrap();

    send_all(&machine, &[Command::Deposit(2), Command::Deposit(3), Command::BrewCoffee]);

    assert_eq!(
        *log.lock().unwrap(),
        vec!["Open -> Open", "Open -> ReadyToBuy", "ReadyToBuy -> Open"]
    );
}

#[test]
fn reinitialize_discards_the_session() {
    let machine = coffee_machine();
    send_all(&machine, &[Command::SetCostOfCoffee(3), Command::Deposit(4)]);
    assert_eq!(machine.current_state(), Coffee::ReadyToBuy);

    machine.reinitialize();
    assert_eq!(machine.current_state(), Coffee::Open);
    assert_eq!(machine.current_data(), data(0, 5, 10));
}

#[test]
fn snapshot_survives_json_round_trip() {
    let machine = coffee_machine();
    send_all(&machine, &[Command::Deposit(3), Command::Deposit(3)]);

    let json = machine.snapshot().to_json().unwrap();
    let restored = coffee_machine();
    restored
        .restore(fsm_runtime::Snapshot::from_json(&json).unwrap())
        .unwrap();

    assert_eq!(restored.current_state(), Coffee::ReadyToBuy);
    assert_eq!(restored.current_data(), data(6, 5, 10));
}
