//! The Bombe: a test register, a chain of drum columns and a diagonal board
//!
//! Columns are chained `[test register, drum 0, ..., drum k, diagonal board]`;
//! every column's cables run into the previous column, so plug i of every
//! column sits on the same letter bus. Structural edits re-link the chain
//! after the edit point.
//!
//! Structural edits are not fenced off from a running search or a pending
//! power change; callers sequence them.

pub mod capabilities; // Editing locks
pub mod events;       // Structured event log
pub mod search;       // Resumable stop search

pub use capabilities::{Capability, Editable};
pub use events::BombeLogEvent;
pub use search::{SearchConfig, SearchPoll, SearchState};

use crate::alphabet::Alphabet;
use crate::circuit::{Circuit, CircuitError, PlugId, Propagation};
use crate::columns::{ColumnError, DBoardColumn, DrumColumn, PlugColumn, TestRegisterColumn};
use crate::menu::{BombeMenu, MenuError};
use crate::scrambler::{ScramblerCasing, ScramblerError};
use events::{BOMBE_COMPONENT, POWER_COMPONENT};
use search::SearchRun;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors raised by Bombe operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BombeError {
    #[error("alphabet has {alphabet} symbols but stecker alphabet has {stecker}")]
    SteckerAlphabetMismatch { alphabet: usize, stecker: usize },

    #[error("menu alphabet \"{menu}\" differs from bombe alphabet \"{bombe}\"")]
    AlphabetMismatch { menu: String, bombe: String },

    #[error("crib of {crib} letters is longer than the alphabet ({size})")]
    CribTooLong { crib: usize, size: usize },

    #[error("menu link {link} is outside crib of length {len}")]
    LinkOutOfRange { link: usize, len: usize },

    #[error("scramblers cover {actual} symbols but the bombe has {expected}")]
    DomainMismatch { expected: usize, actual: usize },

    #[error("drum column {index} is outside 0..{count}")]
    DrumIndexOutOfRange { index: usize, count: usize },

    #[error("insert position {index} is outside 0..={count}")]
    InsertPositionOutOfRange { index: usize, count: usize },

    #[error("there are no drum columns")]
    NoDrumColumns,

    #[error("wire {wire} is outside 0..{size}")]
    WireOutOfRange { wire: usize, size: usize },

    #[error("render interval must be at least 1")]
    InvalidRender,

    #[error("{0} editing is locked")]
    Locked(Capability),

    #[error("a search is already active")]
    SearchActive,

    #[error("no search is active")]
    NoActiveSearch,

    #[error("a power change is still propagating")]
    PowerActive,

    #[error("power is not on")]
    NoActivePower,

    #[error(transparent)]
    Column(#[from] ColumnError),

    #[error(transparent)]
    Circuit(#[from] CircuitError),

    #[error(transparent)]
    Menu(#[from] MenuError),

    #[error(transparent)]
    Scrambler(#[from] ScramblerError),
}

impl BombeError {
    /// Stable code recorded in the event log
    pub fn error_code(&self) -> &'static str {
        match self {
            BombeError::SteckerAlphabetMismatch { .. } => "stecker_alphabet_mismatch",
            BombeError::AlphabetMismatch { .. } => "alphabet_mismatch",
            BombeError::CribTooLong { .. } => "crib_too_long",
            BombeError::LinkOutOfRange { .. } => "link_out_of_range",
            BombeError::DomainMismatch { .. } => "domain_mismatch",
            BombeError::DrumIndexOutOfRange { .. } => "drum_index_out_of_range",
            BombeError::InsertPositionOutOfRange { .. } => "insert_position_out_of_range",
            BombeError::NoDrumColumns => "no_drum_columns",
            BombeError::WireOutOfRange { .. } => "wire_out_of_range",
            BombeError::InvalidRender => "invalid_render",
            BombeError::Locked(_) => "locked",
            BombeError::SearchActive => "search_active",
            BombeError::NoActiveSearch => "no_active_search",
            BombeError::PowerActive => "power_active",
            BombeError::NoActivePower => "no_active_power",
            BombeError::Column(_) => "column",
            BombeError::Circuit(_) => "circuit",
            BombeError::Menu(_) => "menu",
            BombeError::Scrambler(_) => "scrambler",
        }
    }
}

pub type BombeResult<T> = Result<T, BombeError>;

/// Construction parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BombeConfig {
    pub alphabet: Alphabet,

    /// Display labels for the letters; no behavioural effect
    pub stecker_alphabet: Alphabet,

    /// Wire the diagonal board
    pub dboard: bool,

    pub test_register_index: usize,

    pub editable: Editable,
}

impl Default for BombeConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::latin(),
            stecker_alphabet: Alphabet::latin(),
            dboard: true,
            test_register_index: 0,
            editable: Editable::default(),
        }
    }
}

/// Bombe machine with its circuit, columns and search state
#[derive(Debug, Clone)]
pub struct Bombe {
    circuit: Circuit,
    alphabet: Alphabet,
    stecker_alphabet: Alphabet,
    test_register: TestRegisterColumn,
    drums: Vec<DrumColumn>,
    dboard: DBoardColumn,
    editable: Editable,
    power: Option<Propagation>,
    search: Option<SearchRun>,
    search_state: SearchState,
    logs: Vec<BombeLogEvent>,
}

impl Bombe {
    pub fn new(config: BombeConfig) -> BombeResult<Self> {
        let size = config.alphabet.len();
        if config.stecker_alphabet.len() != size {
            return Err(BombeError::SteckerAlphabetMismatch {
                alphabet: size,
                stecker: config.stecker_alphabet.len(),
            });
        }

        let mut circuit = Circuit::new();
        let test_register = TestRegisterColumn::new(&mut circuit, size, config.test_register_index)?;
        let mut dboard = DBoardColumn::new(&mut circuit, size, config.dboard)?;
        dboard.set_adjacency(&mut circuit, Some(test_register.plugs()))?;

        let mut bombe = Self {
            circuit,
            alphabet: config.alphabet,
            stecker_alphabet: config.stecker_alphabet,
            test_register,
            drums: Vec::new(),
            dboard,
            editable: config.editable,
            power: None,
            search: None,
            search_state: SearchState::Idle,
            logs: Vec::new(),
        };
        bombe.log(BombeLogEvent::new(BOMBE_COMPONENT, "bombe_created", "ok"));
        Ok(bombe)
    }

    /// Alphabet size N
    pub fn size(&self) -> usize {
        self.alphabet.len()
    }

    /// Number of rotor positions, N³
    pub fn positions(&self) -> u64 {
        (self.size() as u64).pow(3)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn stecker_alphabet(&self) -> &Alphabet {
        &self.stecker_alphabet
    }

    /// Read-only view of the circuit for observers
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn editable(&self) -> Editable {
        self.editable
    }

    pub fn set_editable(&mut self, editable: Editable) {
        self.editable = editable;
    }

    pub fn logs(&self) -> &[BombeLogEvent] {
        &self.logs
    }

    /// Drain the event log
    pub fn take_logs(&mut self) -> Vec<BombeLogEvent> {
        std::mem::take(&mut self.logs)
    }

    pub(crate) fn log(&mut self, event: BombeLogEvent) {
        self.logs.push(event);
    }

    /// Record the outcome of a request and pass it through
    fn logged<T>(&mut self, component: &str, event: &str, result: BombeResult<T>) -> BombeResult<T> {
        let entry = match &result {
            Ok(_) => BombeLogEvent::new(component, event, "ok"),
            Err(e) => BombeLogEvent::new(component, event, "rejected").with_error_code(e.error_code()),
        };
        self.log(entry);
        result
    }

    fn require(&self, capability: Capability) -> BombeResult<()> {
        if self.editable.allows(capability) {
            Ok(())
        } else {
            Err(BombeError::Locked(capability))
        }
    }

    // ---- Test register ----

    pub fn test_register(&self) -> &TestRegisterColumn {
        &self.test_register
    }

    pub fn test_register_index(&self) -> usize {
        self.test_register.test_register_index()
    }

    pub fn set_test_register_index(&mut self, index: usize) -> BombeResult<()> {
        let result = self
            .require(Capability::TestRegister)
            .and_then(|_| Ok(self.test_register.set_test_register_index(index)?));
        self.logged(BOMBE_COMPONENT, "test_register_moved", result)
    }

    /// Test register junctions connected to junction `wire`
    pub fn test_register_connectivity(&self, wire: usize) -> BombeResult<BTreeSet<usize>> {
        self.check_wire(wire)?;
        Ok(self.test_register.connected_set(&self.circuit, wire)?)
    }

    /// Partition of the test register into connected groups
    pub fn test_register_partition(&self) -> BombeResult<Vec<BTreeSet<usize>>> {
        Ok(self.circuit.plug_partition(self.test_register.test_register())?)
    }

    /// Not every test register junction is reachable from `wire`
    pub fn is_stop(&self, wire: usize) -> BombeResult<bool> {
        Ok(self.test_register_connectivity(wire)?.len() != self.size())
    }

    fn check_wire(&self, wire: usize) -> BombeResult<()> {
        if wire >= self.size() {
            return Err(BombeError::WireOutOfRange {
                wire,
                size: self.size(),
            });
        }
        Ok(())
    }

    // ---- Diagonal board ----

    pub fn dboard(&self) -> bool {
        self.dboard.enabled()
    }

    pub fn dboard_column(&self) -> &DBoardColumn {
        &self.dboard
    }

    pub fn set_dboard(&mut self, enabled: bool) -> BombeResult<()> {
        let result = match self.require(Capability::DBoard) {
            Ok(()) => self
                .dboard
                .set_enabled(&mut self.circuit, enabled)
                .map_err(BombeError::from),
            Err(e) => Err(e),
        };
        self.logged(BOMBE_COMPONENT, "dboard_toggled", result)
    }

    // ---- Drum columns ----

    pub fn drums(&self) -> &[DrumColumn] {
        &self.drums
    }

    pub fn num_drum_columns(&self) -> usize {
        self.drums.len()
    }

    fn drum(&self, index: usize) -> BombeResult<&DrumColumn> {
        drum_at(&self.drums, index)
    }

    /// Plugs of the column before drum `index` in the chain
    fn previous_plugs(&self, index: usize) -> Vec<PlugId> {
        match index {
            0 => self.test_register.plugs().to_vec(),
            k => self.drums[k - 1].plugs().to_vec(),
        }
    }

    /// Re-link drum `from` and everything after it, diagonal board included
    fn relink_from(&mut self, from: usize) -> BombeResult<()> {
        for k in from..self.drums.len() {
            let previous = self.previous_plugs(k);
            self.drums[k].set_adjacency(&mut self.circuit, Some(&previous))?;
        }
        let last = self.previous_plugs(self.drums.len());
        self.dboard.set_adjacency(&mut self.circuit, Some(&last))?;
        Ok(())
    }

    /// Insert a drum column bridging `connected_to`
    ///
    /// `position` is the drum index the new column takes; `None` appends it
    /// just before the diagonal board. The casing is copied. Returns the index
    /// of the new column.
    pub fn add_drum_column(
        &mut self,
        casing: &ScramblerCasing,
        connected_to: [usize; 2],
        rotation: Option<i64>,
        position: Option<usize>,
    ) -> BombeResult<usize> {
        let result = self
            .require(Capability::Columns)
            .and_then(|_| self.insert_drum_column(casing, connected_to, rotation, position));
        self.logged(BOMBE_COMPONENT, "drum_column_added", result)
    }

    fn insert_drum_column(
        &mut self,
        casing: &ScramblerCasing,
        connected_to: [usize; 2],
        rotation: Option<i64>,
        position: Option<usize>,
    ) -> BombeResult<usize> {
        let count = self.drums.len();
        let index = position.unwrap_or(count);
        if index > count {
            return Err(BombeError::InsertPositionOutOfRange { index, count });
        }
        if casing.domain() != self.size() {
            return Err(BombeError::DomainMismatch {
                expected: self.size(),
                actual: casing.domain(),
            });
        }

        let column = DrumColumn::new(&mut self.circuit, casing, connected_to)?;
        if let Some(rotation) = rotation {
            column.set_rotation(&mut self.circuit, rotation)?;
        }
        self.drums.insert(index, column);
        self.relink_from(index)?;
        Ok(index)
    }

    /// Remove drum column `position`, or the last one when `None`
    pub fn delete_drum_column(&mut self, position: Option<usize>) -> BombeResult<()> {
        let result = self
            .require(Capability::Columns)
            .and_then(|_| self.remove_drum_column(position));
        self.logged(BOMBE_COMPONENT, "drum_column_deleted", result)
    }

    fn remove_drum_column(&mut self, position: Option<usize>) -> BombeResult<()> {
        if self.drums.is_empty() {
            return Err(BombeError::NoDrumColumns);
        }
        let index = position.unwrap_or(self.drums.len() - 1);
        self.drum(index)?;

        let column = self.drums.remove(index);
        column.destroy(&mut self.circuit)?;
        self.relink_from(index)
    }

    pub fn delete_all_drum_columns(&mut self) -> BombeResult<()> {
        let result = self
            .require(Capability::Columns)
            .and_then(|_| self.clear_drum_columns());
        self.logged(BOMBE_COMPONENT, "drum_columns_cleared", result)
    }

    fn clear_drum_columns(&mut self) -> BombeResult<()> {
        for column in std::mem::take(&mut self.drums) {
            column.destroy(&mut self.circuit)?;
        }
        self.relink_from(0)
    }

    /// Reconnect drum `index` to another plug pair
    pub fn set_connected_to(&mut self, index: usize, connected_to: [usize; 2]) -> BombeResult<()> {
        let result = self.require(Capability::Columns).and_then(|_| {
            let count = self.drums.len();
            let column = self
                .drums
                .get_mut(index)
                .ok_or(BombeError::DrumIndexOutOfRange { index, count })?;
            Ok(column.set_connected_to(&mut self.circuit, connected_to)?)
        });
        self.logged(BOMBE_COMPONENT, "drum_reconnected", result)
    }

    pub fn drum_rotation(&self, index: usize) -> BombeResult<usize> {
        Ok(self.drum(index)?.rotation(&self.circuit)?)
    }

    pub fn drum_rotations(&self, index: usize) -> BombeResult<[usize; 3]> {
        Ok(self.drum(index)?.rotations(&self.circuit)?)
    }

    pub fn set_drum_rotation(&mut self, index: usize, rotation: i64) -> BombeResult<()> {
        let result = self.require(Capability::Columns).and_then(|_| {
            Ok(drum_at(&self.drums, index)?.set_rotation(&mut self.circuit, rotation)?)
        });
        self.logged(BOMBE_COMPONENT, "drum_rotated", result)
    }

    pub fn set_drum_rotations(&mut self, index: usize, rotations: [i64; 3]) -> BombeResult<()> {
        let result = self.require(Capability::Columns).and_then(|_| {
            Ok(drum_at(&self.drums, index)?.set_rotations(&mut self.circuit, rotations)?)
        });
        self.logged(BOMBE_COMPONENT, "drum_rotated", result)
    }

    /// Advance every drum's inverse rotation by `delta` (slow rotor fastest)
    ///
    /// Rejected while a search is active, since the search counts positions
    /// from the drums it last moved.
    pub fn rotate_all(&mut self, delta: i64) -> BombeResult<()> {
        let result = if self.search.is_some() {
            Err(BombeError::SearchActive)
        } else {
            self.require(Capability::Columns)
                .and_then(|_| self.advance_drums(delta))
        };
        self.logged(BOMBE_COMPONENT, "drums_rotated", result)
    }

    /// Step every drum without checks or logging; the search loop's move
    pub(crate) fn advance_drums(&mut self, delta: i64) -> BombeResult<()> {
        for column in &self.drums {
            let current = column.inverse_rotation(&self.circuit)? as i64;
            column.set_inverse_rotation(&mut self.circuit, current + delta)?;
        }
        Ok(())
    }

    /// Replace the drum columns with one per selected crib position
    ///
    /// Link k joins the plaintext and ciphertext letters at crib position k
    /// and starts at rotation k + 1. `links` defaults to every position. The
    /// test register is then moved to the menu's choice. Returns the
    /// `(test_register, live_wire)` pair chosen by the menu.
    pub fn add_drum_columns_from_menu(
        &mut self,
        menu: &BombeMenu,
        casing: &ScramblerCasing,
        links: Option<&[usize]>,
    ) -> BombeResult<(usize, usize)> {
        let result = self
            .require(Capability::Columns)
            .and_then(|_| self.require(Capability::TestRegister))
            .and_then(|_| self.apply_menu(menu, casing, links));
        self.logged(BOMBE_COMPONENT, "menu_applied", result)
    }

    fn apply_menu(
        &mut self,
        menu: &BombeMenu,
        casing: &ScramblerCasing,
        links: Option<&[usize]>,
    ) -> BombeResult<(usize, usize)> {
        // Validate everything before tearing down the current drums
        if menu.alphabet() != &self.alphabet {
            return Err(BombeError::AlphabetMismatch {
                menu: menu.alphabet().to_string(),
                bombe: self.alphabet.to_string(),
            });
        }
        if menu.len() > self.size() {
            return Err(BombeError::CribTooLong {
                crib: menu.len(),
                size: self.size(),
            });
        }
        if casing.domain() != self.size() {
            return Err(BombeError::DomainMismatch {
                expected: self.size(),
                actual: casing.domain(),
            });
        }

        let all: Vec<usize> = (0..menu.len()).collect();
        let links = links.unwrap_or(&all);
        let mut pairs = Vec::with_capacity(links.len());
        for &link in links {
            let pair = menu.link_at(link).ok_or(BombeError::LinkOutOfRange {
                link,
                len: menu.len(),
            })?;
            pairs.push((link, pair));
        }

        self.clear_drum_columns()?;
        for (link, (plain, cipher)) in pairs {
            self.insert_drum_column(casing, [plain, cipher], Some(link as i64 + 1), None)?;
        }

        let (test_register, live_wire) = menu.choose_test_register();
        self.test_register.set_test_register_index(test_register)?;
        Ok((test_register, live_wire))
    }

    // ---- Power ----

    /// The current or most recent power-on, if power is on
    pub fn active_power(&self) -> Option<&Propagation> {
        self.power.as_ref()
    }

    /// Begin powering junction `wire` of the test register
    ///
    /// Only one power-on may be propagating at a time.
    pub fn power_on(&mut self, wire: usize) -> BombeResult<()> {
        let result = self.start_power_on(wire);
        self.logged(POWER_COMPONENT, "power_on", result)
    }

    fn start_power_on(&mut self, wire: usize) -> BombeResult<()> {
        if self.power.as_ref().is_some_and(|p| !p.is_settled()) {
            return Err(BombeError::PowerActive);
        }
        self.check_wire(wire)?;
        let register = self.test_register_index();
        let propagation = self.test_register.power_on(&mut self.circuit, register, wire)?;
        self.power = Some(propagation);
        Ok(())
    }

    /// Run one wave of the pending power-on; true once settled
    pub fn step_power(&mut self) -> BombeResult<bool> {
        let propagation = self.power.as_mut().ok_or(BombeError::NoActivePower)?;
        Ok(propagation.step(&mut self.circuit)?)
    }

    /// Run the pending power-on to completion
    pub fn settle_power(&mut self) -> BombeResult<()> {
        let propagation = self.power.as_mut().ok_or(BombeError::NoActivePower)?;
        Ok(propagation.settle(&mut self.circuit)?)
    }

    /// Switch power off from the junction it was switched on at
    ///
    /// A power-on still propagating is completed first.
    pub fn power_off(&mut self) -> BombeResult<()> {
        let result = self.switch_power_off();
        self.logged(POWER_COMPONENT, "power_off", result)
    }

    fn switch_power_off(&mut self) -> BombeResult<()> {
        let mut propagation = self.power.take().ok_or(BombeError::NoActivePower)?;
        propagation.settle(&mut self.circuit)?;
        if self.circuit.contains_junction(propagation.origin()) {
            self.circuit.power_off(propagation.origin())?;
        }
        Ok(())
    }

    /// Clear every power flag without propagating
    pub fn force_off_all(&mut self) -> BombeResult<()> {
        let result = match self.power.take() {
            Some(_) => {
                self.circuit.force_off_all();
                Ok(())
            }
            None => Err(BombeError::NoActivePower),
        };
        self.logged(POWER_COMPONENT, "forced_off", result)
    }

    /// Power flag of junction `junction` in test register plug `plug`
    pub fn is_powered_on(&self, plug: usize, junction: usize) -> BombeResult<bool> {
        Ok(self.test_register.is_powered_on(&self.circuit, plug, junction)?)
    }
}

fn drum_at(drums: &[DrumColumn], index: usize) -> BombeResult<&DrumColumn> {
    drums.get(index).ok_or(BombeError::DrumIndexOutOfRange {
        index,
        count: drums.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: [&str; 4] = ["egcdabfh", "aebhdgcf", "cdfghbae", "cgahfebd"];

    fn config(dboard: bool) -> BombeConfig {
        BombeConfig {
            alphabet: Alphabet::new("abcdefgh").unwrap(),
            stecker_alphabet: Alphabet::new("αβγδεζηθ").unwrap(),
            dboard,
            test_register_index: 0,
            editable: Editable::default(),
        }
    }

    fn casing(alphabet: &Alphabet) -> ScramblerCasing {
        ScramblerCasing::from_wiring_strs(&EXAMPLE, alphabet).unwrap()
    }

    #[test]
    fn test_new_bombe_has_no_drums() {
        let bombe = Bombe::new(config(true)).unwrap();
        assert_eq!(bombe.num_drum_columns(), 0);
        assert!(bombe.dboard());
        assert_eq!(bombe.positions(), 512);
        assert_eq!(bombe.logs()[0].event, "bombe_created");
    }

    #[test]
    fn test_config_validation() {
        let mut bad = config(true);
        bad.stecker_alphabet = Alphabet::new("xyz").unwrap();
        assert!(matches!(
            Bombe::new(bad),
            Err(BombeError::SteckerAlphabetMismatch { .. })
        ));

        let mut bad = config(true);
        bad.test_register_index = 8;
        assert!(matches!(Bombe::new(bad), Err(BombeError::Column(_))));
    }

    #[test]
    fn test_add_and_delete_drum_columns_relink_chain() {
        let mut bombe = Bombe::new(config(false)).unwrap();
        let c = casing(bombe.alphabet());

        assert_eq!(bombe.add_drum_column(&c, [0, 1], None, None).unwrap(), 0);
        assert_eq!(bombe.add_drum_column(&c, [2, 3], None, None).unwrap(), 1);
        assert_eq!(bombe.add_drum_column(&c, [4, 5], Some(3), Some(0)).unwrap(), 0);
        assert_eq!(bombe.drums()[0].connected_to(), [4, 5]);
        assert_eq!(bombe.drum_rotation(0).unwrap(), 3);

        // every column's cables lead into the previous column
        let circuit = bombe.circuit();
        let (_, into) = circuit.cable_endpoints(bombe.drums()[0].cables()[0]).unwrap();
        assert_eq!(into, Some(bombe.test_register().plugs()[0]));
        let (_, into) = circuit.cable_endpoints(bombe.drums()[1].cables()[0]).unwrap();
        assert_eq!(into, Some(bombe.drums()[0].plugs()[0]));
        let (_, into) = circuit
            .cable_endpoints(bombe.dboard_column().cables()[0])
            .unwrap();
        assert_eq!(into, Some(bombe.drums()[2].plugs()[0]));

        bombe.delete_drum_column(Some(0)).unwrap();
        assert_eq!(bombe.drums()[0].connected_to(), [0, 1]);
        let (_, into) = bombe
            .circuit()
            .cable_endpoints(bombe.drums()[0].cables()[0])
            .unwrap();
        assert_eq!(into, Some(bombe.test_register().plugs()[0]));

        bombe.delete_drum_column(None).unwrap();
        assert_eq!(bombe.num_drum_columns(), 1);
        bombe.delete_all_drum_columns().unwrap();
        assert_eq!(bombe.num_drum_columns(), 0);
        assert_eq!(
            bombe.delete_drum_column(None),
            Err(BombeError::NoDrumColumns)
        );
    }

    #[test]
    fn test_deleting_columns_frees_circuit() {
        let mut bombe = Bombe::new(config(true)).unwrap();
        let before = bombe.circuit().counts();
        let c = casing(bombe.alphabet());

        bombe.add_drum_column(&c, [0, 1], None, None).unwrap();
        bombe.add_drum_column(&c, [1, 2], None, None).unwrap();
        bombe.delete_all_drum_columns().unwrap();
        assert_eq!(bombe.circuit().counts(), before);
    }

    #[test]
    fn test_invalid_edits_leave_state_unchanged() {
        let mut bombe = Bombe::new(config(true)).unwrap();
        let c = casing(bombe.alphabet());
        bombe.add_drum_column(&c, [0, 1], None, None).unwrap();
        let before = bombe.circuit().counts();

        assert_eq!(
            bombe.add_drum_column(&c, [0, 1], None, Some(5)),
            Err(BombeError::InsertPositionOutOfRange { index: 5, count: 1 })
        );
        assert!(matches!(
            bombe.add_drum_column(&c, [3, 3], None, None),
            Err(BombeError::Column(ColumnError::SameConnection(3, 3)))
        ));
        assert!(matches!(
            bombe.set_connected_to(0, [0, 9]),
            Err(BombeError::Column(_))
        ));
        assert_eq!(
            bombe.delete_drum_column(Some(1)),
            Err(BombeError::DrumIndexOutOfRange { index: 1, count: 1 })
        );
        assert_eq!(bombe.circuit().counts(), before);
        assert_eq!(bombe.drums()[0].connected_to(), [0, 1]);

        let last = bombe.logs().last().unwrap();
        assert_eq!(last.outcome, "rejected");
        assert_eq!(last.error_code.as_deref(), Some("drum_index_out_of_range"));
    }

    #[test]
    fn test_locked_capabilities() {
        let mut bombe = Bombe::new(config(true)).unwrap();
        let c = casing(bombe.alphabet());
        bombe.set_editable(Editable::locked());

        assert_eq!(
            bombe.add_drum_column(&c, [0, 1], None, None),
            Err(BombeError::Locked(Capability::Columns))
        );
        assert_eq!(
            bombe.set_dboard(false),
            Err(BombeError::Locked(Capability::DBoard))
        );
        assert_eq!(
            bombe.set_test_register_index(2),
            Err(BombeError::Locked(Capability::TestRegister))
        );
        assert!(bombe.dboard());
        assert_eq!(bombe.test_register_index(), 0);
    }

    #[test]
    fn test_add_drum_columns_from_menu() {
        let mut bombe = Bombe::new(config(false)).unwrap();
        let c = casing(bombe.alphabet());
        let menu = BombeMenu::new(bombe.alphabet(), bombe.stecker_alphabet(), "babbage", "egffbhg")
            .unwrap();

        let choice = bombe
            .add_drum_columns_from_menu(&menu, &c, Some(&[4, 0, 6, 1]))
            .unwrap();
        assert_eq!(choice, (1, 6));
        assert_eq!(bombe.test_register_index(), 1);

        let pairs: Vec<[usize; 2]> = bombe.drums().iter().map(|d| d.connected_to()).collect();
        // positions 5, 1, 7, 2: a-b, b-e, e-g, a-g
        assert_eq!(pairs, vec![[0, 1], [1, 4], [4, 6], [0, 6]]);
        assert_eq!(bombe.drum_rotation(0).unwrap(), 5);
        assert_eq!(bombe.drum_rotation(3).unwrap(), 2);

        bombe.add_drum_columns_from_menu(&menu, &c, None).unwrap();
        assert_eq!(bombe.num_drum_columns(), 7);
    }

    #[test]
    fn test_menu_validation() {
        let mut bombe = Bombe::new(config(false)).unwrap();
        let c = casing(bombe.alphabet());
        let other = Alphabet::new("hgfedcba").unwrap();
        let menu = BombeMenu::new(&other, &other, "ab", "ba").unwrap();
        assert!(matches!(
            bombe.add_drum_columns_from_menu(&menu, &c, None),
            Err(BombeError::AlphabetMismatch { .. })
        ));

        let long = BombeMenu::new(bombe.alphabet(), bombe.alphabet(), "abababab", "babababa").unwrap();
        assert!(bombe.add_drum_columns_from_menu(&long, &c, None).is_ok());
        let too_long =
            BombeMenu::new(bombe.alphabet(), bombe.alphabet(), "ababababa", "babababab").unwrap();
        assert_eq!(
            bombe.add_drum_columns_from_menu(&too_long, &c, None),
            Err(BombeError::CribTooLong { crib: 9, size: 8 })
        );

        let menu = BombeMenu::new(bombe.alphabet(), bombe.alphabet(), "ab", "ba").unwrap();
        assert_eq!(
            bombe.add_drum_columns_from_menu(&menu, &c, Some(&[0, 2])),
            Err(BombeError::LinkOutOfRange { link: 2, len: 2 })
        );
        // the earlier eight columns survive the rejected requests
        assert_eq!(bombe.num_drum_columns(), 8);
    }

    #[test]
    fn test_power_lifecycle() {
        let mut bombe = Bombe::new(config(true)).unwrap();
        let c = casing(bombe.alphabet());
        bombe.add_drum_column(&c, [0, 1], None, None).unwrap();

        assert_eq!(bombe.power_off(), Err(BombeError::NoActivePower));
        assert_eq!(bombe.force_off_all(), Err(BombeError::NoActivePower));

        bombe.power_on(4).unwrap();
        assert!(bombe.is_powered_on(0, 4).unwrap());
        assert_eq!(bombe.power_on(5), Err(BombeError::PowerActive));

        bombe.settle_power().unwrap();
        assert!(bombe.active_power().unwrap().is_settled());
        // diagonal board carries plug 0 junction 4 onto plug 4 junction 0
        assert!(bombe.is_powered_on(4, 0).unwrap());

        bombe.power_off().unwrap();
        assert_eq!(bombe.circuit().num_powered(), 0);
        assert!(bombe.active_power().is_none());

        bombe.power_on(2).unwrap();
        bombe.force_off_all().unwrap();
        assert_eq!(bombe.circuit().num_powered(), 0);
        assert_eq!(bombe.power_on(8), Err(BombeError::WireOutOfRange { wire: 8, size: 8 }));
    }

    #[test]
    fn test_rotate_all_steps_slow_rotor() {
        let mut bombe = Bombe::new(config(true)).unwrap();
        let c = casing(bombe.alphabet());
        bombe.add_drum_column(&c, [0, 1], Some(1), None).unwrap();
        bombe.add_drum_column(&c, [1, 2], None, None).unwrap();

        bombe.rotate_all(1).unwrap();
        assert_eq!(bombe.drum_rotations(0).unwrap(), [1, 0, 1]);
        assert_eq!(bombe.drum_rotations(1).unwrap(), [1, 0, 0]);

        bombe.rotate_all(-2).unwrap();
        assert_eq!(bombe.drum_rotations(1).unwrap(), [7, 7, 7]);
    }

    #[test]
    fn test_rotation_edits_respect_lock_and_are_logged() {
        let mut bombe = Bombe::new(config(true)).unwrap();
        let c = casing(bombe.alphabet());
        bombe.add_drum_column(&c, [0, 1], Some(3), None).unwrap();

        let before = bombe.logs().len();
        bombe.set_drum_rotation(0, 4).unwrap();
        bombe.set_drum_rotations(0, [0, 0, 3]).unwrap();
        bombe.rotate_all(1).unwrap();
        let events: Vec<&str> = bombe.logs()[before..].iter().map(|e| e.event.as_str()).collect();
        assert_eq!(events, vec!["drum_rotated", "drum_rotated", "drums_rotated"]);
        assert_eq!(bombe.drum_rotations(0).unwrap(), [1, 0, 3]);

        bombe.set_editable(Editable::locked());
        let before = bombe.logs().len();
        assert_eq!(bombe.set_drum_rotation(0, 1), Err(BombeError::Locked(Capability::Columns)));
        assert_eq!(
            bombe.set_drum_rotations(0, [1, 1, 1]),
            Err(BombeError::Locked(Capability::Columns))
        );
        assert_eq!(bombe.rotate_all(5), Err(BombeError::Locked(Capability::Columns)));
        assert_eq!(bombe.drum_rotations(0).unwrap(), [1, 0, 3]);

        let rejected = &bombe.logs()[before..];
        assert_eq!(rejected.len(), 3);
        assert!(rejected
            .iter()
            .all(|e| e.outcome == "rejected" && e.error_code.as_deref() == Some("locked")));
    }

    #[test]
    fn test_rotate_all_rejected_during_search() {
        let mut bombe = Bombe::new(config(false)).unwrap();
        let c = casing(bombe.alphabet());
        bombe.add_drum_column(&c, [0, 1], None, None).unwrap();

        bombe.start_search(0, 0, SearchConfig::default()).unwrap();
        assert_eq!(bombe.rotate_all(1), Err(BombeError::SearchActive));
        assert_eq!(bombe.drum_rotations(0).unwrap(), [0, 0, 0]);
        assert_eq!(
            bombe.logs().last().unwrap().error_code.as_deref(),
            Some("search_active")
        );

        bombe.cancel_search().unwrap();
        assert_eq!(bombe.step_search().unwrap(), SearchPoll::Cancelled { combs: 0 });
        bombe.rotate_all(1).unwrap();
        assert_eq!(bombe.drum_rotations(0).unwrap(), [1, 0, 0]);
    }
}
