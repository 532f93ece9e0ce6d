//! Statlink walkthrough: the list operations step by step.
//!
//! Demonstrates:
//!   1. Building a simulator from an `ArenaConfig`
//!   2. Inserting at logical offsets and watching slots get allocated
//!   3. Deleting by value and watching slots get reused
//!   4. Rejected operations and their receipts
//!   5. Re-initializing (reset)
//!   6. The "Hello" run: fill, overflow, misses, slot reuse
//!
//! Run with:
//!   RUST_LOG=statlink_engine=debug cargo run --example walkthrough

use statlink_arena::{ArenaConfig, ArenaSnapshot};
use statlink_core::Command;
use statlink_engine::StaticListSimulator;

// ─── Rendering ──────────────────────────────────────────────────

fn render(snapshot: &ArenaSnapshot) {
    println!(
        "  {:>5} | {:>4} | {:>4} | {:>8} | {:>6}",
        "slot", "data", "next", "occupied", "linked"
    );
    println!("  {}", "-".repeat(40));
    for row in snapshot.rows() {
        let data = row.data.map_or_else(|| "-".to_string(), |p| p.to_string());
        println!(
            "  {:>5} | {:>4} | {:>4} | {:>8} | {:>6}",
            row.index.0,
            data,
            row.raw_next(),
            if row.occupied { "yes" } else { "no" },
            if row.linked { "*" } else { "" },
        );
    }
}

fn show(sim: &StaticListSimulator, title: &str) -> Result<(), Box<dyn std::error::Error>> {
    let seq = sim.logical_sequence()?;
    println!("\n{title}");
    let chain: Vec<String> = seq.text().chars().map(String::from).collect();
    println!("  chain: [{}]", chain.join(", "));
    render(&sim.snapshot()?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Statlink Walkthrough ===");

    // 1. Capacity 5: the head plus four element slots.
    let config = ArenaConfig::default();
    config.validate()?;
    let mut sim = StaticListSimulator::new(config)?;
    sim.initialize();
    show(&sim, "After initialize")?;

    // 2. Insert A, B, then C between them.
    sim.insert("A", 0)?;
    sim.insert("B", 1)?;
    let c = sim.insert("C", 1)?;
    show(&sim, &format!("After inserting A, B, and C at 1 (C went to slot {c})"))?;

    // 3. Delete A; its slot is the lowest free one, so D reuses it.
    let freed = sim.delete("A")?;
    let d = sim.insert("D", 0)?;
    show(&sim, &format!("After deleting A (slot {freed}) and inserting D (slot {d})"))?;

    // 4. Rejections leave the arena untouched.
    println!();
    for cmd in [
        Command::insert("E", 7),
        Command::insert("EE", 0),
        Command::delete("Z"),
        Command::insert("E", 3),
        Command::insert("F", 0),
    ] {
        let receipt = sim.apply(&cmd);
        match receipt.reason_code {
            None => println!("  {cmd:?} -> applied at slot {:?}", receipt.slot.map(|s| s.0)),
            Some(reason) => println!("  {cmd:?} -> rejected: {reason}"),
        }
    }
    show(&sim, "After the rejection round")?;

    // 5. Reset.
    sim.initialize();
    show(&sim, "After re-initialize")?;

    // 6. Hello: four letters fill the arena, so 'o' does not fit.
    for (position, value) in "Hello".chars().enumerate() {
        match sim.insert(&value.to_string(), position as i64) {
            Ok(slot) => println!("  insert {value:?} at {position} -> slot {slot}"),
            Err(e) => println!("  insert {value:?} at {position} -> {e}"),
        }
    }
    show(&sim, "After inserting H, e, l, l, o")?;

    for value in ["e", "a", "o"] {
        match sim.delete(value) {
            Ok(slot) => println!("  delete {value:?} -> freed slot {slot}"),
            Err(e) => println!("  delete {value:?} -> {e}"),
        }
    }
    show(&sim, "After deleting e, a and o")?;

    let x = sim.insert("x", 2)?;
    show(&sim, &format!("After inserting x at 2 (slot {x})"))?;

    let m = sim.metrics();
    println!(
        "\n{} operations, {} rejected, peak length {}",
        m.operations(),
        m.rejections(),
        m.peak_len
    );
    Ok(())
}
