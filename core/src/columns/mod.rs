//! Plug columns
//!
//! A column owns N plugs of N junctions each. Every column except the test
//! register also owns N cables, cable i running out of its own plug i into
//! plug i of the previous column in the machine. Columns are chained by
//! [`PlugColumn::set_adjacency`].

pub mod test_register; // Head of the chain, no cables
pub mod dboard;        // Diagonal board
pub mod drum_column;   // One drum bridging two plugs

pub use dboard::DBoardColumn;
pub use drum_column::DrumColumn;
pub use test_register::TestRegisterColumn;

use crate::circuit::{CableId, Circuit, CircuitError, CircuitResult, Propagation, PlugId};
use thiserror::Error;

/// Errors raised while building or rewiring columns
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColumnError {
    #[error("plug index {index} is outside column of size {size}")]
    PlugIndexOutOfRange { index: usize, size: usize },

    #[error("drum must connect two distinct plugs, got [{0}, {1}]")]
    SameConnection(usize, usize),

    #[error("the test register heads the chain and cannot be adjacent to another column")]
    TestRegisterAdjacency,

    #[error(transparent)]
    Circuit(#[from] CircuitError),
}

pub type ColumnResult<T> = Result<T, ColumnError>;

/// Behaviour shared by every column in the chain
pub trait PlugColumn {
    /// The column's N plugs, one per letter
    fn plugs(&self) -> &[PlugId];

    /// Cables leading into the previous column (empty for the test register)
    fn cables(&self) -> &[CableId] {
        &[]
    }

    /// Point this column's cables at `adjacent` (the previous column's plugs)
    fn set_adjacency(&mut self, circuit: &mut Circuit, adjacent: Option<&[PlugId]>) -> ColumnResult<()>;

    fn size(&self) -> usize {
        self.plugs().len()
    }

    /// Plug at `index`, bounds-checked
    fn plug(&self, index: usize) -> ColumnResult<PlugId> {
        self.plugs()
            .get(index)
            .copied()
            .ok_or(ColumnError::PlugIndexOutOfRange {
                index,
                size: self.size(),
            })
    }

    /// Begin powering junction `junction` of plug `plug`
    fn power_on(&self, circuit: &mut Circuit, plug: usize, junction: usize) -> ColumnResult<Propagation> {
        let j = circuit.plug_junction(self.plug(plug)?, junction)?;
        Ok(circuit.start_power(j, true)?)
    }

    /// Begin switching off junction `junction` of plug `plug`
    fn power_off(&self, circuit: &mut Circuit, plug: usize, junction: usize) -> ColumnResult<Propagation> {
        let j = circuit.plug_junction(self.plug(plug)?, junction)?;
        Ok(circuit.start_power(j, false)?)
    }

    fn is_powered_on(&self, circuit: &Circuit, plug: usize, junction: usize) -> ColumnResult<bool> {
        let j = circuit.plug_junction(self.plug(plug)?, junction)?;
        Ok(circuit.is_powered(j)?)
    }

    /// Clear the power flag of every junction in the column's plugs
    fn force_off_all(&self, circuit: &mut Circuit) -> ColumnResult<()> {
        for plug in self.plugs() {
            for j in circuit.plug_junctions(*plug)?.to_vec() {
                circuit.force_off(j)?;
            }
        }
        Ok(())
    }

    /// Remove the column's cables and plugs from the circuit
    fn destroy(&self, circuit: &mut Circuit) -> ColumnResult<()> {
        for cable in self.cables() {
            circuit.destroy_cable(*cable)?;
        }
        for plug in self.plugs() {
            circuit.destroy_plug(*plug)?;
        }
        Ok(())
    }
}

/// Plugs plus cables shared by the cabled column kinds
#[derive(Debug, Clone)]
pub(crate) struct CabledPlugs {
    pub(crate) plugs: Vec<PlugId>,
    pub(crate) cables: Vec<CableId>,
}

impl CabledPlugs {
    pub(crate) fn new(circuit: &mut Circuit, size: usize) -> CircuitResult<Self> {
        let plugs: Vec<PlugId> = (0..size).map(|_| circuit.add_plug(size)).collect();
        let mut cables = Vec::with_capacity(size);
        for plug in &plugs {
            cables.push(circuit.add_cable(size, Some(*plug), None)?);
        }
        Ok(Self { plugs, cables })
    }

    pub(crate) fn set_adjacency(&self, circuit: &mut Circuit, adjacent: Option<&[PlugId]>) -> ColumnResult<()> {
        if let Some(adjacent) = adjacent {
            if adjacent.len() != self.plugs.len() {
                return Err(CircuitError::SizeMismatch {
                    expected: self.plugs.len(),
                    actual: adjacent.len(),
                }
                .into());
            }
        }

        for (i, cable) in self.cables.iter().enumerate() {
            circuit.set_cable_into(*cable, adjacent.map(|plugs| plugs[i]))?;
        }
        Ok(())
    }
}

/// Validate and normalise a drum's plug pair to ascending order
pub fn normalise_connection(connected_to: [usize; 2], size: usize) -> ColumnResult<[usize; 2]> {
    let [a, b] = connected_to;
    for index in [a, b] {
        if index >= size {
            return Err(ColumnError::PlugIndexOutOfRange { index, size });
        }
    }
    if a == b {
        return Err(ColumnError::SameConnection(a, b));
    }
    Ok([a.min(b), a.max(b)])
}
