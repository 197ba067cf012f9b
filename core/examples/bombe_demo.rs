//! Walk through the worked example
//!
//! Run with: cargo run --example bombe_demo

use bombe_core::*;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Bombe Demo ===\n");

    // 1. Scramblers
    println!("1. Scrambler casing:");
    let descriptor = builtin("full")?;
    let alphabet = descriptor.alphabet.clone();
    let mut casing = descriptor.casing()?;
    println!("   Encoding at 0: {}", alphabet.text(&casing.encoding())?);
    casing.set_rotation(5);
    println!("   Encoding at 5: {}", alphabet.text(&casing.encoding())?);
    casing.set_rotation(0);
    let steckers = scrambler::casing::no_steckers(alphabet.len());
    println!(
        "   babbage encrypts to {}\n",
        casing.encode_crib(&alphabet, "babbage", &steckers)?
    );

    // 2. Menu
    println!("2. Menu:");
    let menu = descriptor.menu()?;
    let summary = menu.summary();
    println!("   Letters: {}", summary.letters);
    println!("   Edges: {}", summary.edges.len());
    println!("   Cycles by length: {:?}", summary.cycle_classification);
    println!(
        "   Test register {} with live wire {}\n",
        summary.test_register, summary.live_wire
    );

    // 3. Machine
    println!("3. Machine:");
    let mut scenario = descriptor.build()?;
    let (junctions, wires, plugs, cables) = scenario.bombe.circuit().counts();
    println!("   Drum columns: {}", scenario.bombe.num_drum_columns());
    println!(
        "   Circuit: {} junctions, {} wires, {} plugs, {} cables\n",
        junctions, wires, plugs, cables
    );

    // 4. Power
    println!("4. Power from the live wire:");
    let wire = scenario.live_wire;
    scenario.bombe.power_on(wire)?;
    let mut waves = 0;
    while !scenario.bombe.step_power()? {
        waves += 1;
    }
    let register = scenario.bombe.test_register_index();
    let mut lit = Vec::new();
    for j in 0..scenario.bombe.size() {
        if scenario.bombe.is_powered_on(register, j)? {
            lit.push(alphabet.symbol(j)?);
        }
    }
    println!("   Settled after {} waves", waves + 1);
    println!("   Test register wires lit: {:?}", lit);
    scenario.bombe.power_off()?;
    println!();

    // 5. Search
    println!("5. Search:");
    let stops = scenario
        .bombe
        .collect_stops(wire, 0, SearchConfig { render: 64 })?;
    println!("   Without diagonal board: {} stops", stops.len());

    scenario.bombe.set_dboard(true)?;
    match scenario.bombe.search(wire, 0, SearchConfig::default())? {
        SearchPoll::Stop { combs } => {
            println!("   With diagonal board: stop at {}", combs);
            for (i, drum) in scenario.bombe.drums().iter().enumerate() {
                println!(
                    "     drum {} on {:?}: rotors {:?}",
                    i,
                    drum.connected_to(),
                    scenario.bombe.drum_rotations(i)?
                );
            }
        }
        other => println!("   With diagonal board: {:?}", other),
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
