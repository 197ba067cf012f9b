//! Diagonal board
//!
//! When enabled, junction j of plug i is wired to junction i of plug j for
//! every i < j, enforcing the symmetry of steckering.

use super::{CabledPlugs, ColumnResult, PlugColumn};
use crate::circuit::{CableId, Circuit, PlugId, WireId};

#[derive(Debug, Clone)]
pub struct DBoardColumn {
    inner: CabledPlugs,
    diagonals: Vec<WireId>,
}

impl DBoardColumn {
    pub fn new(circuit: &mut Circuit, size: usize, enabled: bool) -> ColumnResult<Self> {
        let mut column = Self {
            inner: CabledPlugs::new(circuit, size)?,
            diagonals: Vec::new(),
        };
        column.set_enabled(circuit, enabled)?;
        Ok(column)
    }

    pub fn enabled(&self) -> bool {
        !self.diagonals.is_empty()
    }

    /// Add or remove the N(N-1)/2 diagonal wires
    pub fn set_enabled(&mut self, circuit: &mut Circuit, enabled: bool) -> ColumnResult<()> {
        if enabled == self.enabled() {
            return Ok(());
        }

        if !enabled {
            for wire in self.diagonals.drain(..) {
                circuit.destroy_wire(wire)?;
            }
            return Ok(());
        }

        let size = self.inner.plugs.len();
        for i in 0..size {
            for j in (i + 1)..size {
                // Wire direction alternates with the parity of the lower index
                let (from, to) = if i % 2 == 0 { (i, j) } else { (j, i) };
                let outof = circuit.plug_junction(self.inner.plugs[from], to)?;
                let into = circuit.plug_junction(self.inner.plugs[to], from)?;
                self.diagonals.push(circuit.add_wire(Some(outof), Some(into))?);
            }
        }
        Ok(())
    }

    pub fn diagonals(&self) -> &[WireId] {
        &self.diagonals
    }
}

impl PlugColumn for DBoardColumn {
    fn plugs(&self) -> &[PlugId] {
        &self.inner.plugs
    }

    fn cables(&self) -> &[CableId] {
        &self.inner.cables
    }

    fn set_adjacency(&mut self, circuit: &mut Circuit, adjacent: Option<&[PlugId]>) -> ColumnResult<()> {
        self.inner.set_adjacency(circuit, adjacent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_diagonal_wire_count() {
        let mut circuit = Circuit::new();
        let mut board = DBoardColumn::new(&mut circuit, 8, true).unwrap();
        assert_eq!(board.diagonals().len(), 28);
        assert!(board.enabled());

        board.set_enabled(&mut circuit, false).unwrap();
        assert!(!board.enabled());
        let (_, wires, _, _) = circuit.counts();
        // only the 8 cables of 8 wires remain
        assert_eq!(wires, 64);
    }

    #[test]
    fn test_diagonal_symmetry() {
        let mut circuit = Circuit::new();
        let board = DBoardColumn::new(&mut circuit, 4, true).unwrap();

        for i in 0..4 {
            for j in 0..4 {
                if i == j {
                    continue;
                }
                let ij = circuit.plug_junction(board.plugs()[i], j).unwrap();
                let ji = circuit.plug_junction(board.plugs()[j], i).unwrap();
                assert_eq!(
                    circuit.connected_set(ij).unwrap().into_iter().collect::<BTreeSet<_>>(),
                    BTreeSet::from([ij, ji])
                );
            }
        }

        // self-steckered junctions stay alone
        let diag = circuit.plug_junction(board.plugs()[2], 2).unwrap();
        assert_eq!(circuit.connected_set(diag).unwrap().len(), 1);
    }
}
