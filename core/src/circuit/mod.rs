//! Electrical connectivity graph
//!
//! Junctions are nodes, wires are directed edges between junctions. Plugs
//! group N junctions and cables group N wires running from one plug to
//! another. A drum is a cable whose wire routing follows a scrambler casing.
//!
//! Every element lives in a [`Circuit`] arena and is addressed by a typed id.
//! Endpoint membership (a wire listed in its junctions' adjacency sets, a
//! cable listed in its plugs' cable sets) is kept consistent by the circuit's
//! setters, so reassigning an endpoint is a single atomic operation.

pub mod junction; // Nodes, traversal, absorb
pub mod wire;     // Edges and endpoint reassignment
pub mod plug;     // Junction groups, connectivity partitions
pub mod cable;    // Wire groups between plugs
pub mod drum;     // Casing-routed cables
pub mod power;    // Stepped power propagation

pub use power::Propagation;

use crate::scrambler::ScramblerCasing;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Newtype wrapper for junction identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JunctionId(pub u32);

/// Newtype wrapper for wire identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WireId(pub u32);

/// Newtype wrapper for plug identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlugId(pub u32);

/// Newtype wrapper for cable identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CableId(pub u32);

/// Errors raised by circuit operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CircuitError {
    #[error("unknown junction {0:?}")]
    UnknownJunction(JunctionId),

    #[error("unknown wire {0:?}")]
    UnknownWire(WireId),

    #[error("unknown plug {0:?}")]
    UnknownPlug(PlugId),

    #[error("unknown cable {0:?}")]
    UnknownCable(CableId),

    #[error("junction index {index} is outside plug of size {size}")]
    JunctionIndexOutOfRange { index: usize, size: usize },

    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("cable {0:?} is not a drum")]
    NotADrum(CableId),
}

pub type CircuitResult<T> = Result<T, CircuitError>;

#[derive(Debug, Clone, Default)]
pub(crate) struct JunctionNode {
    pub(crate) powered: bool,
    pub(crate) incoming: FxHashSet<WireId>,
    pub(crate) outgoing: FxHashSet<WireId>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct WireNode {
    pub(crate) outof: Option<JunctionId>,
    pub(crate) into: Option<JunctionId>,
}

#[derive(Debug, Clone)]
pub(crate) struct PlugNode {
    pub(crate) junctions: Vec<JunctionId>,
    pub(crate) incoming: FxHashSet<CableId>,
    pub(crate) outgoing: FxHashSet<CableId>,
}

/// How a cable maps its wire i onto the junctions of the into-plug
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CableRouting {
    /// Wire i lands on junction i
    Identity,
    /// Wire i lands on junction `casing.encode(i)`
    Drum(ScramblerCasing),
}

impl CableRouting {
    pub fn route(&self, index: usize) -> usize {
        match self {
            CableRouting::Identity => index,
            CableRouting::Drum(casing) => casing.encode(index),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CableNode {
    pub(crate) wires: Vec<WireId>,
    pub(crate) outof: Option<PlugId>,
    pub(crate) into: Option<PlugId>,
    pub(crate) routing: CableRouting,
}

/// Arena owning every junction, wire, plug and cable of one machine
///
/// Destroyed elements leave an empty slot; ids are never reused.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    pub(crate) junctions: Vec<Option<JunctionNode>>,
    pub(crate) wires: Vec<Option<WireNode>>,
    pub(crate) plugs: Vec<Option<PlugNode>>,
    pub(crate) cables: Vec<Option<CableNode>>,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live element counts as `(junctions, wires, plugs, cables)`
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        fn live<T>(slots: &[Option<T>]) -> usize {
            slots.iter().filter(|s| s.is_some()).count()
        }
        (
            live(&self.junctions),
            live(&self.wires),
            live(&self.plugs),
            live(&self.cables),
        )
    }

    pub(crate) fn junction_node(&self, id: JunctionId) -> CircuitResult<&JunctionNode> {
        self.junctions
            .get(id.0 as usize)
            .and_then(Option::as_ref)
            .ok_or(CircuitError::UnknownJunction(id))
    }

    pub(crate) fn junction_node_mut(&mut self, id: JunctionId) -> CircuitResult<&mut JunctionNode> {
        self.junctions
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(CircuitError::UnknownJunction(id))
    }

    pub(crate) fn wire_node(&self, id: WireId) -> CircuitResult<&WireNode> {
        self.wires
            .get(id.0 as usize)
            .and_then(Option::as_ref)
            .ok_or(CircuitError::UnknownWire(id))
    }

    pub(crate) fn wire_node_mut(&mut self, id: WireId) -> CircuitResult<&mut WireNode> {
        self.wires
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(CircuitError::UnknownWire(id))
    }

    pub(crate) fn plug_node(&self, id: PlugId) -> CircuitResult<&PlugNode> {
        self.plugs
            .get(id.0 as usize)
            .and_then(Option::as_ref)
            .ok_or(CircuitError::UnknownPlug(id))
    }

    pub(crate) fn plug_node_mut(&mut self, id: PlugId) -> CircuitResult<&mut PlugNode> {
        self.plugs
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(CircuitError::UnknownPlug(id))
    }

    pub(crate) fn cable_node(&self, id: CableId) -> CircuitResult<&CableNode> {
        self.cables
            .get(id.0 as usize)
            .and_then(Option::as_ref)
            .ok_or(CircuitError::UnknownCable(id))
    }

    pub(crate) fn cable_node_mut(&mut self, id: CableId) -> CircuitResult<&mut CableNode> {
        self.cables
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(CircuitError::UnknownCable(id))
    }
}
