//! Declarative machine setups
//!
//! A [`ScenarioDescriptor`] names everything needed to stand up a Bombe for a
//! crib: alphabets, scrambler wirings, which crib positions become drums,
//! overrides for the test register and live wire, and which parts stay
//! editable. The worked examples are built-in descriptors; others are loaded
//! from JSON.

pub mod loader;

pub use loader::{load_scenario, load_scenarios, LoadError, LoadResult};

use crate::alphabet::{Alphabet, AlphabetError};
use crate::bombe::{Bombe, BombeConfig, BombeError, Editable};
use crate::menu::{BombeMenu, MenuError};
use crate::scrambler::{ScramblerCasing, ScramblerError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a scenario
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("unknown built-in scenario '{0}'")]
    UnknownScenario(String),

    #[error(transparent)]
    Alphabet(#[from] AlphabetError),

    #[error(transparent)]
    Scrambler(#[from] ScramblerError),

    #[error(transparent)]
    Menu(#[from] MenuError),

    #[error(transparent)]
    Bombe(#[from] BombeError),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// A drum placed explicitly rather than from a crib position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrumSpec {
    pub connected_to: [usize; 2],

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<i64>,
}

/// Complete description of a Bombe set up for one crib
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDescriptor {
    pub id: String,

    #[serde(default)]
    pub description: String,

    pub alphabet: Alphabet,

    pub stecker_alphabet: Alphabet,

    /// Slow, mid and fast rotor wirings followed by the reflector wiring
    pub scramblers: [String; 4],

    pub plaintext: String,

    pub ciphertext: String,

    /// Crib positions that become drums; every position when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<usize>>,

    /// Drums added after the crib drums
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drums: Vec<DrumSpec>,

    #[serde(default)]
    pub dboard: bool,

    /// Overrides the menu's test register choice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_register: Option<usize>,

    /// Overrides the menu's live wire choice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_wire: Option<usize>,

    #[serde(default)]
    pub editable: Editable,
}

/// A built scenario, ready to search
#[derive(Debug, Clone)]
pub struct Scenario {
    pub descriptor: ScenarioDescriptor,
    pub menu: BombeMenu,
    pub bombe: Bombe,
    pub live_wire: usize,
}

impl ScenarioDescriptor {
    pub fn casing(&self) -> ScenarioResult<ScramblerCasing> {
        let wirings: Vec<&str> = self.scramblers.iter().map(String::as_str).collect();
        Ok(ScramblerCasing::from_wiring_strs(&wirings, &self.alphabet)?)
    }

    pub fn menu(&self) -> ScenarioResult<BombeMenu> {
        Ok(BombeMenu::new(
            &self.alphabet,
            &self.stecker_alphabet,
            &self.plaintext,
            &self.ciphertext,
        )?)
    }

    /// Build the menu and the Bombe, then apply the editing locks
    pub fn build(&self) -> ScenarioResult<Scenario> {
        let casing = self.casing()?;
        let menu = self.menu()?;

        let mut bombe = Bombe::new(BombeConfig {
            alphabet: self.alphabet.clone(),
            stecker_alphabet: self.stecker_alphabet.clone(),
            dboard: self.dboard,
            test_register_index: 0,
            editable: Editable::default(),
        })?;

        let (_, chosen_wire) =
            bombe.add_drum_columns_from_menu(&menu, &casing, self.links.as_deref())?;
        for drum in &self.drums {
            bombe.add_drum_column(&casing, drum.connected_to, drum.rotation, None)?;
        }
        if let Some(index) = self.test_register {
            bombe.set_test_register_index(index)?;
        }
        let live_wire = self.live_wire.unwrap_or(chosen_wire);
        if live_wire >= self.alphabet.len() {
            return Err(BombeError::WireOutOfRange {
                wire: live_wire,
                size: self.alphabet.len(),
            }
            .into());
        }
        bombe.set_editable(self.editable);

        Ok(Scenario {
            descriptor: self.clone(),
            menu,
            bombe,
            live_wire,
        })
    }
}

/// Shape of the full worked example
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FullExample {
    /// No drums yet
    Empty,
    /// The single line hypothesis drums, test register on 'a'
    Partial,
    /// Every crib position as a drum
    Full,
}

const EXAMPLE_ALPHABET: &str = "abcdefgh";
const EXAMPLE_STECKER_ALPHABET: &str = "αβγδεζηθ";
const EXAMPLE_PLAINTEXT: &str = "babbage";
const EXAMPLE_CIPHERTEXT: &str = "egffbhg";
const EXAMPLE_SCRAMBLERS: [&str; 4] = ["egcdabfh", "aebhdgcf", "cdfghbae", "cgahfebd"];

/// Crib positions of the single line hypothesis
pub const SINGLE_LINE_LINKS: [usize; 4] = [4, 0, 6, 1];

/// Every crib position, in the order the full example adds them
pub const FULL_LINKS: [usize; 7] = [4, 0, 6, 1, 5, 2, 3];

fn example(id: &str, description: &str) -> ScenarioResult<ScenarioDescriptor> {
    Ok(ScenarioDescriptor {
        id: id.to_string(),
        description: description.to_string(),
        alphabet: Alphabet::new(EXAMPLE_ALPHABET)?,
        stecker_alphabet: Alphabet::new(EXAMPLE_STECKER_ALPHABET)?,
        scramblers: EXAMPLE_SCRAMBLERS.map(String::from),
        plaintext: EXAMPLE_PLAINTEXT.to_string(),
        ciphertext: EXAMPLE_CIPHERTEXT.to_string(),
        links: Some(Vec::new()),
        drums: Vec::new(),
        dboard: false,
        test_register: None,
        live_wire: None,
        // fixed machines that can still be searched
        editable: Editable {
            search: true,
            ..Editable::locked()
        },
    })
}

/// The crib's menu with an empty machine
pub fn menu_example() -> ScenarioResult<ScenarioDescriptor> {
    example("menu_example", "Menu of babbage/egffbhg")
}

/// One drum between 'a' and 'b', structure locked
pub fn introduction() -> ScenarioResult<ScenarioDescriptor> {
    let mut d = example("introduction", "A single drum on plugs a and b")?;
    d.drums = vec![DrumSpec {
        connected_to: [0, 1],
        rotation: None,
    }];
    d.test_register = Some(0);
    Ok(d)
}

/// Four drums around the a-b-e-g loop, test register on 'a'
pub fn single_line_hypothesis() -> ScenarioResult<ScenarioDescriptor> {
    let mut d = example(
        "single_line_hypothesis",
        "Crib positions 5, 1, 7 and 2 without a diagonal board",
    )?;
    d.links = Some(SINGLE_LINE_LINKS.to_vec());
    d.test_register = Some(0);
    Ok(d)
}

/// The full example in one of its three stages
pub fn full_example(stage: FullExample) -> ScenarioResult<ScenarioDescriptor> {
    let mut d = match stage {
        FullExample::Empty => example("full_empty", "Empty machine for the full example")?,
        FullExample::Partial => {
            let mut d = example("full_partial", "First four crib drums placed")?;
            d.links = Some(SINGLE_LINE_LINKS.to_vec());
            d.test_register = Some(0);
            d
        }
        FullExample::Full => {
            let mut d = example("full", "Every crib position as a drum")?;
            d.links = Some(FULL_LINKS.to_vec());
            d
        }
    };
    d.editable = Editable::default();
    Ok(d)
}

/// Names accepted by [`builtin`]
pub const BUILTIN_NAMES: [&str; 6] = [
    "menu_example",
    "introduction",
    "single_line_hypothesis",
    "full_empty",
    "full_partial",
    "full",
];

/// Look up a built-in scenario by name
pub fn builtin(name: &str) -> ScenarioResult<ScenarioDescriptor> {
    match name {
        "menu_example" => menu_example(),
        "introduction" => introduction(),
        "single_line_hypothesis" => single_line_hypothesis(),
        "full_empty" => full_example(FullExample::Empty),
        "full_partial" => full_example(FullExample::Partial),
        "full" => full_example(FullExample::Full),
        other => Err(ScenarioError::UnknownScenario(other.to_string())),
    }
}
