//! Benchmark profiles and workloads for the statlink simulator.
//!
//! - [`reference_profile`]: the 5-slot arena of the classic walkthrough
//! - [`stress_profile`]: a 4097-slot arena (4096 elements)
//! - [`churn_commands`]: a deterministic insert/delete mix driven by a seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use statlink_arena::ArenaConfig;
use statlink_core::Command;
use statlink_engine::StaticListSimulator;

/// The 5-slot arena of the classic walkthrough.
pub fn reference_profile() -> ArenaConfig {
    ArenaConfig::default()
}

/// A 4097-slot arena: 4096 element slots plus the head.
pub fn stress_profile() -> ArenaConfig {
    ArenaConfig::new(4097)
}

/// An initialized simulator filled to `len` elements by appending.
///
/// Panics if `len` does not fit the profile.
pub fn filled(config: ArenaConfig, len: usize) -> StaticListSimulator {
    let mut sim = StaticListSimulator::new(config).expect("bench profile is valid");
    sim.initialize();
    for i in 0..len {
        let c = char::from(b'a' + (i % 26) as u8);
        sim.insert(&c.to_string(), i as i64)
            .expect("fill length fits the profile");
    }
    sim
}

/// Generate a deterministic insert/delete workload.
///
/// Roughly two inserts per delete, positions spread over the expected
/// chain length, values drawn from `a..=z`. Starts with `Initialize`.
pub fn churn_commands(count: usize, capacity: usize, seed: u64) -> Vec<Command> {
    let mut state = seed;
    let mut next = || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        state >> 33
    };

    let mut commands = Vec::with_capacity(count + 1);
    commands.push(Command::Initialize);
    let mut len = 0usize;
    for _ in 0..count {
        let value = char::from(b'a' + (next() % 26) as u8).to_string();
        if next() % 3 == 0 || len + 1 >= capacity {
            commands.push(Command::delete(value));
            len = len.saturating_sub(1);
        } else {
            let position = next() % (len as u64 + 1);
            commands.push(Command::insert(value, position as i64));
            len += 1;
        }
    }
    commands
}
