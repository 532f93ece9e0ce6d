//! Simulators in common starting states.
//!
//! - [`initialized`] is an empty list of the given capacity.
//! - [`with_values`] appends each character of a string in order.
//! - [`reference_scenario`] replays the A/B/C/D walkthrough at capacity 5.

use statlink_core::Command;
use statlink_engine::StaticListSimulator;

/// An initialized, empty simulator.
pub fn initialized(capacity: usize) -> StaticListSimulator {
    let mut sim = StaticListSimulator::with_capacity(capacity).expect("fixture capacity is valid");
    sim.initialize();
    sim
}

/// An initialized simulator whose chain spells `values`, in slots
/// `1..=values.len()`.
pub fn with_values(capacity: usize, values: &str) -> StaticListSimulator {
    let mut sim = initialized(capacity);
    for (i, c) in values.chars().enumerate() {
        sim.insert(&c.to_string(), i as i64)
            .expect("fixture values fit the capacity");
    }
    sim
}

/// The command sequence of the reference walkthrough.
///
/// Ends with chain `D C B` in slots `1 3 2`.
pub fn reference_commands() -> Vec<Command> {
    vec![
        Command::Initialize,
        Command::insert("A", 0),
        Command::insert("B", 1),
        Command::insert("C", 1),
        Command::delete("A"),
        Command::insert("D", 0),
    ]
}

/// A capacity-5 simulator after [`reference_commands`].
pub fn reference_scenario() -> StaticListSimulator {
    let mut sim = StaticListSimulator::with_capacity(5).expect("capacity 5 is valid");
    for cmd in reference_commands() {
        let receipt = sim.apply(&cmd);
        assert!(receipt.accepted, "{cmd:?} rejected: {:?}", receipt.reason_code);
    }
    sim
}
