//! Bombe CLI
//!
//! Inspect crib menus, encode cribs with catalog rotors, run stop searches
//! on scenarios, and generate cribs

use bombe_core::scrambler::casing::no_steckers;
use bombe_core::*;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "bombe")]
#[command(about = "Simulate the Bombe's stop search on crib menus")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the menu metrics of a crib
    Menu {
        plaintext: String,
        ciphertext: String,
        /// Alphabet symbols in order
        #[arg(long, default_value = "abcdefghijklmnopqrstuvwxyz")]
        alphabet: String,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encode a crib with catalog rotors over the Latin alphabet
    Encode {
        plaintext: String,
        /// Slow, mid and fast rotor names
        #[arg(long, num_args = 3, default_values = ["I", "II", "III"])]
        rotors: Vec<String>,
        #[arg(long, default_value = "B")]
        reflector: String,
        /// Start position as one number over N³
        #[arg(long, default_value_t = 0)]
        rotation: i64,
    },

    /// Run the stop search of a built-in scenario or a scenario file
    Search {
        /// Built-in name, or a path to a JSON scenario
        scenario: String,
        /// Force the diagonal board off
        #[arg(long)]
        no_dboard: bool,
        /// Iterations per chunk
        #[arg(long, default_value_t = 1000)]
        render: u64,
        /// Print stops without the rotor positions
        #[arg(long)]
        quiet: bool,
        /// Dump the event log as JSON lines
        #[arg(long)]
        log_json: bool,
    },

    /// Generate a crib with random rotors
    Crib {
        plaintext: String,
        #[arg(long, default_value = "abcdefgh")]
        alphabet: String,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long)]
        connected: bool,
        /// Accept menus that miss self-steckered letters
        #[arg(long)]
        allow_missing_self_steckers: bool,
        #[arg(long, default_value_t = 0)]
        min_full_stops: usize,
        #[arg(long, default_value_t = usize::MAX)]
        max_full_stops: usize,
        #[arg(long, default_value_t = 16)]
        max_casings: usize,
    },

    /// List the built-in scenarios
    Scenarios,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Menu {
            plaintext,
            ciphertext,
            alphabet,
            json,
        } => menu(&plaintext, &ciphertext, &alphabet, json),
        Command::Encode {
            plaintext,
            rotors,
            reflector,
            rotation,
        } => encode(&plaintext, &rotors, &reflector, rotation),
        Command::Search {
            scenario,
            no_dboard,
            render,
            quiet,
            log_json,
        } => search(&scenario, no_dboard, render, quiet, log_json),
        Command::Crib {
            plaintext,
            alphabet,
            seed,
            connected,
            allow_missing_self_steckers,
            min_full_stops,
            max_full_stops,
            max_casings,
        } => {
            let mut config = CribConfig::new(Alphabet::new(&alphabet)?, &plaintext);
            config.require_connected_menu = connected;
            config.require_self_steckers_in_menu = !allow_missing_self_steckers;
            config.min_full_stops = min_full_stops;
            config.max_full_stops = max_full_stops;
            config.max_casings = max_casings;
            crib(config, seed)
        }
        Command::Scenarios => {
            for name in scenario::BUILTIN_NAMES {
                let descriptor = builtin(name)?;
                println!("{:<24} {}", name, descriptor.description);
            }
            Ok(())
        }
    }
}

fn menu(plaintext: &str, ciphertext: &str, alphabet: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let alphabet = Alphabet::new(alphabet)?;
    let menu = BombeMenu::new(&alphabet, &alphabet, plaintext, ciphertext)?;
    let summary = menu.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Letters: {}", summary.letters);
    for edge in &summary.edges {
        println!(
            "  {} - {}  [{}]",
            menu.nodes()[edge.source].letter,
            menu.nodes()[edge.target].letter,
            edge.label
        );
    }
    println!("Connected: {}", summary.connected);
    for (length, count) in summary.cycle_classification.iter().enumerate() {
        if *count > 0 {
            println!("Cycles of length {}: {}", length, count);
        }
    }
    println!(
        "Test register: {}  live wire: {}",
        summary.test_register, summary.live_wire
    );
    Ok(())
}

fn encode(plaintext: &str, rotors: &[String], reflector: &str, rotation: i64) -> Result<(), Box<dyn Error>> {
    let alphabet = Alphabet::latin();
    let mut scramblers = Vec::with_capacity(4);
    for name in rotors {
        scramblers.push(catalog::rotor(name, &alphabet)?);
    }
    scramblers.push(catalog::reflector(reflector, &alphabet)?);

    let mut casing = ScramblerCasing::from_slice(&scramblers)?;
    casing.set_rotation(rotation);
    let ciphertext = casing.encode_crib(&alphabet, &plaintext.to_uppercase(), &no_steckers(alphabet.len()))?;

    println!("{}", ciphertext);
    Ok(())
}

fn load(name: &str) -> Result<ScenarioDescriptor, Box<dyn Error>> {
    if scenario::BUILTIN_NAMES.contains(&name) {
        Ok(builtin(name)?)
    } else {
        Ok(load_scenario(name)?)
    }
}

fn search(name: &str, no_dboard: bool, render: u64, quiet: bool, log_json: bool) -> Result<(), Box<dyn Error>> {
    let descriptor = load(name)?;
    let mut scenario = descriptor.build()?;
    let bombe = &mut scenario.bombe;

    if no_dboard && bombe.dboard() {
        let mut editable = bombe.editable();
        editable.dboard = true;
        bombe.set_editable(editable);
        bombe.set_dboard(false)?;
    }
    if !bombe.editable().allows(Capability::Search) {
        let mut editable = bombe.editable();
        editable.search = true;
        bombe.set_editable(editable);
    }

    println!(
        "Searching '{}': {} drums, test register {}, live wire {}, diagonal board {}",
        scenario.descriptor.id,
        bombe.num_drum_columns(),
        bombe.alphabet().symbol(bombe.test_register_index())?,
        bombe.alphabet().symbol(scenario.live_wire)?,
        if bombe.dboard() { "on" } else { "off" }
    );

    let config = SearchConfig { render };
    let mut combs = 0;
    let mut stops = 0;
    loop {
        match bombe.search(scenario.live_wire, combs, config)? {
            SearchPoll::Stop { combs: at } => {
                stops += 1;
                combs = at;
                if quiet {
                    println!("stop at {}", at);
                } else {
                    let positions: Vec<String> = (0..bombe.num_drum_columns())
                        .map(|i| {
                            bombe
                                .drum_rotations(i)
                                .map(|r| format!("{:?}", r))
                                .unwrap_or_default()
                        })
                        .collect();
                    let lit: Vec<usize> = bombe
                        .test_register_connectivity(scenario.live_wire)?
                        .into_iter()
                        .collect();
                    println!(
                        "stop at {:>6}: drums {}  live {}",
                        at,
                        positions.join(" "),
                        bombe.alphabet().text(&lit)?
                    );
                }
            }
            SearchPoll::NoDrums { .. } => {
                println!("No drum columns to rotate");
                break;
            }
            other => {
                println!("Search finished after {} positions: {} stops", other.combs(), stops);
                break;
            }
        }
    }

    if log_json {
        for event in bombe.take_logs() {
            eprintln!("{}", serde_json::to_string(&event)?);
        }
    }
    Ok(())
}

fn crib(config: CribConfig, seed: u64) -> Result<(), Box<dyn Error>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut generator = CribGenerator::new(config)?;
    let crib = generator.generate(&mut rng)?;

    println!("Plaintext:  {}", crib.plaintext);
    println!("Ciphertext: {}", crib.ciphertext);
    println!("Start:      {:?}", crib.initial_positions);
    println!("Rotors:     {}", crib.rotor_wirings[..3].join(" "));
    println!("Reflector:  {}", crib.rotor_wirings[3]);
    println!(
        "Stops:      {} with diagonal board, {} without",
        crib.full_stops, crib.reduced_stops
    );
    Ok(())
}
