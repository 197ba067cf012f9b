//! Bombe Core
//!
//! Electromechanical Bombe simulation: keyed scramblers, a connectivity
//! circuit of junctions, wires, plugs and cables, crib menus, and the
//! resumable stop search

pub mod alphabet;
pub mod scrambler; // Rotors, reflectors and the three-rotor casing
pub mod circuit;   // Arena of junctions, wires, plugs and cables
pub mod columns;   // Test register, diagonal board and drum columns
pub mod menu;      // Crib menu graph and cycle statistics
pub mod bombe;     // Machine assembly, power and search
pub mod scenario;  // Declarative setups and JSON loading
pub mod crib;      // Random crib generation

pub use alphabet::{Alphabet, AlphabetError};
pub use scrambler::{catalog, Scrambler, ScramblerCasing, ScramblerError};
pub use circuit::{CableId, Circuit, CircuitError, JunctionId, PlugId, Propagation, WireId};
pub use columns::{DBoardColumn, DrumColumn, PlugColumn, TestRegisterColumn};
pub use menu::{BombeMenu, MenuError, MenuSummary};
pub use bombe::{
    Bombe, BombeConfig, BombeError, BombeLogEvent, Capability, Editable, SearchConfig, SearchPoll,
    SearchState,
};
pub use scenario::{
    builtin, load_scenario, load_scenarios, FullExample, LoadError, Scenario, ScenarioDescriptor,
    ScenarioError,
};
pub use crib::{CribConfig, CribError, CribGenerator, GeneratedCrib};
