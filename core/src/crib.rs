//! Crib generation
//!
//! Searches random rotor wirings and start positions for a crib whose menu
//! and stop counts have the requested properties: a puzzle setter's tool for
//! producing worked examples.

use crate::alphabet::{Alphabet, AlphabetError};
use crate::bombe::{Bombe, BombeConfig, BombeError, BombeLogEvent, Editable, SearchConfig};
use crate::menu::{BombeMenu, MenuError};
use crate::scrambler::casing::no_steckers;
use crate::scrambler::{Scrambler, ScramblerCasing, ScramblerError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CRIB_COMPONENT: &str = "crib_generator";

/// Chunk size for the stop counting searches
const COUNT_RENDER: u64 = 100_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CribError {
    #[error("invalid steckering: {0}")]
    InvalidSteckering(String),

    #[error("alphabet has {alphabet} symbols but stecker alphabet has {stecker}")]
    SteckerAlphabetMismatch { alphabet: usize, stecker: usize },

    #[error("crib of {crib} letters is longer than the alphabet ({size})")]
    CribTooLong { crib: usize, size: usize },

    #[error("no crib found after {0} casings")]
    NotFound(usize),

    #[error(transparent)]
    Alphabet(#[from] AlphabetError),

    #[error(transparent)]
    Scrambler(#[from] ScramblerError),

    #[error(transparent)]
    Menu(#[from] MenuError),

    #[error(transparent)]
    Bombe(#[from] BombeError),
}

pub type CribResult<T> = Result<T, CribError>;

/// What the generated crib must satisfy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CribConfig {
    pub alphabet: Alphabet,

    pub stecker_alphabet: Alphabet,

    pub plaintext: String,

    /// `steckerings[i] == j` steckers letter i to j; must be symmetric.
    /// Empty means no steckers.
    #[serde(default)]
    pub steckerings: Vec<usize>,

    #[serde(default)]
    pub require_connected_menu: bool,

    /// Required leading entries of the menu's cycle classification
    #[serde(default)]
    pub required_cycle_classification: Vec<u64>,

    /// Every self-steckered letter must appear in the crib
    #[serde(default = "enabled")]
    pub require_self_steckers_in_menu: bool,

    /// Stop bounds with the diagonal board
    #[serde(default)]
    pub min_full_stops: usize,
    #[serde(default = "unbounded")]
    pub max_full_stops: usize,

    /// Stop bounds without the diagonal board
    #[serde(default)]
    pub min_reduced_stops: usize,
    #[serde(default = "unbounded")]
    pub max_reduced_stops: usize,

    /// Random casings to try before giving up
    #[serde(default = "default_max_casings")]
    pub max_casings: usize,
}

fn enabled() -> bool {
    true
}

fn unbounded() -> usize {
    usize::MAX
}

fn default_max_casings() -> usize {
    16
}

impl CribConfig {
    /// Default filters: self-steckered letters must appear in the crib,
    /// nothing else is constrained
    pub fn new(alphabet: Alphabet, plaintext: &str) -> Self {
        Self {
            stecker_alphabet: alphabet.clone(),
            alphabet,
            plaintext: plaintext.to_string(),
            steckerings: Vec::new(),
            require_connected_menu: false,
            required_cycle_classification: Vec::new(),
            require_self_steckers_in_menu: true,
            min_full_stops: 0,
            max_full_stops: unbounded(),
            min_reduced_stops: 0,
            max_reduced_stops: unbounded(),
            max_casings: default_max_casings(),
        }
    }
}

/// An accepted crib
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCrib {
    pub plaintext: String,
    pub ciphertext: String,
    /// `[slow, mid, fast]` rotor positions before the first letter
    pub initial_positions: [usize; 3],
    /// Slow, mid, fast and reflector wirings over the alphabet
    pub rotor_wirings: [String; 4],
    pub test_register: usize,
    pub live_wire: usize,
    pub full_stops: usize,
    pub reduced_stops: usize,
}

/// Why one casing position was accepted or passed over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CribVerdict {
    Accepted(GeneratedCrib),
    SelfSteckerMissing(char),
    Disconnected,
    CycleMismatch(Vec<u64>),
    FullStops(usize),
    ReducedStops(usize),
}

impl CribVerdict {
    fn outcome(&self) -> &'static str {
        match self {
            CribVerdict::Accepted(_) => "accepted",
            CribVerdict::SelfSteckerMissing(_) => "self_stecker_missing",
            CribVerdict::Disconnected => "disconnected",
            CribVerdict::CycleMismatch(_) => "cycle_mismatch",
            CribVerdict::FullStops(_) => "full_stops_out_of_bounds",
            CribVerdict::ReducedStops(_) => "reduced_stops_out_of_bounds",
        }
    }
}

/// Searches for cribs matching a [`CribConfig`]
#[derive(Debug, Clone)]
pub struct CribGenerator {
    config: CribConfig,
    steckerings: Vec<usize>,
    logs: Vec<BombeLogEvent>,
}

impl CribGenerator {
    pub fn new(config: CribConfig) -> CribResult<Self> {
        let n = config.alphabet.len();
        if config.stecker_alphabet.len() != n {
            return Err(CribError::SteckerAlphabetMismatch {
                alphabet: n,
                stecker: config.stecker_alphabet.len(),
            });
        }

        let plain = config.alphabet.indices(&config.plaintext)?;
        if plain.len() > n {
            return Err(CribError::CribTooLong {
                crib: plain.len(),
                size: n,
            });
        }

        let steckerings = if config.steckerings.is_empty() {
            no_steckers(n)
        } else {
            config.steckerings.clone()
        };
        if steckerings.len() != n {
            return Err(CribError::InvalidSteckering(format!(
                "expected {} entries, got {}",
                n,
                steckerings.len()
            )));
        }
        for (i, &j) in steckerings.iter().enumerate() {
            if j >= n || steckerings[j] != i {
                return Err(CribError::InvalidSteckering(format!(
                    "{} is steckered to {} but not the other way round",
                    i, j
                )));
            }
        }

        Ok(Self {
            config,
            steckerings,
            logs: Vec::new(),
        })
    }

    pub fn config(&self) -> &CribConfig {
        &self.config
    }

    pub fn logs(&self) -> &[BombeLogEvent] {
        &self.logs
    }

    /// Try random casings until one yields an acceptable crib
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> CribResult<GeneratedCrib> {
        let n = self.config.alphabet.len();
        for _ in 0..self.config.max_casings {
            let casing = ScramblerCasing::new([
                Scrambler::random(n, rng)?,
                Scrambler::random(n, rng)?,
                Scrambler::random(n, rng)?,
                Scrambler::random_reflector(n, rng)?,
            ])?;
            if let Some(crib) = self.try_casing(&casing)? {
                return Ok(crib);
            }
        }

        self.logs.push(
            BombeLogEvent::new(CRIB_COMPONENT, "generate", "not_found").with_error_code("not_found"),
        );
        Err(CribError::NotFound(self.config.max_casings))
    }

    /// Try every start position of one casing
    pub fn try_casing(&mut self, casing: &ScramblerCasing) -> CribResult<Option<GeneratedCrib>> {
        let mut casing = casing.clone();
        for rotation in 0..casing.positions() {
            casing.set_rotation(rotation as i64);
            let verdict = self.evaluate(&casing)?;
            self.logs.push(
                BombeLogEvent::new(CRIB_COMPONENT, "candidate", verdict.outcome())
                    .with_combs(rotation),
            );
            if let CribVerdict::Accepted(crib) = verdict {
                return Ok(Some(crib));
            }
        }
        Ok(None)
    }

    /// Judge a casing at its current rotation
    pub fn evaluate(&self, casing: &ScramblerCasing) -> CribResult<CribVerdict> {
        let config = &self.config;
        let alphabet = &config.alphabet;

        let initial_positions = casing.rotations();
        let ciphertext = casing.encode_crib(alphabet, &config.plaintext, &self.steckerings)?;
        let menu = BombeMenu::new(
            alphabet,
            &config.stecker_alphabet,
            &config.plaintext,
            &ciphertext,
        )?;

        if config.require_self_steckers_in_menu {
            for (i, &j) in self.steckerings.iter().enumerate() {
                let letter = alphabet.symbol(i)?;
                if i == j && !config.plaintext.contains(letter) && !ciphertext.contains(letter) {
                    return Ok(CribVerdict::SelfSteckerMissing(letter));
                }
            }
        }

        if config.require_connected_menu && !menu.is_connected() {
            return Ok(CribVerdict::Disconnected);
        }

        let classification = menu.classify_cycles();
        let checked = menu.len().min(config.required_cycle_classification.len());
        if classification[..checked] != config.required_cycle_classification[..checked] {
            return Ok(CribVerdict::CycleMismatch(classification));
        }

        let mut bombe = Bombe::new(BombeConfig {
            alphabet: alphabet.clone(),
            stecker_alphabet: config.stecker_alphabet.clone(),
            dboard: true,
            test_register_index: 0,
            editable: Editable::default(),
        })?;
        let (test_register, live_wire) = bombe.add_drum_columns_from_menu(&menu, casing, None)?;

        let search = SearchConfig {
            render: COUNT_RENDER,
        };
        let full_stops = bombe.collect_stops(live_wire, 0, search)?.len();
        if full_stops < config.min_full_stops || full_stops > config.max_full_stops {
            return Ok(CribVerdict::FullStops(full_stops));
        }

        // A full pass of N³ steps leaves the drums where they started
        bombe.set_dboard(false)?;
        let reduced_stops = bombe.collect_stops(live_wire, 0, search)?.len();
        if reduced_stops < config.min_reduced_stops || reduced_stops > config.max_reduced_stops {
            return Ok(CribVerdict::ReducedStops(reduced_stops));
        }

        let [slow, mid, fast, reflector] = casing.scramblers();
        Ok(CribVerdict::Accepted(GeneratedCrib {
            plaintext: config.plaintext.clone(),
            ciphertext,
            initial_positions,
            rotor_wirings: [
                slow.wiring_string(alphabet)?,
                mid.wiring_string(alphabet)?,
                fast.wiring_string(alphabet)?,
                reflector.wiring_string(alphabet)?,
            ],
            test_register,
            live_wire,
            full_stops,
            reduced_stops,
        }))
    }
}
