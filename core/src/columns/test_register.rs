//! Test register column: the head of the chain, read for stops

use super::{ColumnError, ColumnResult, PlugColumn};
use crate::circuit::{Circuit, CircuitResult, PlugId};
use std::collections::BTreeSet;

/// N plugs with no cables, one of which is the test register
#[derive(Debug, Clone)]
pub struct TestRegisterColumn {
    plugs: Vec<PlugId>,
    test_register_index: usize,
}

impl TestRegisterColumn {
    pub fn new(circuit: &mut Circuit, size: usize, test_register_index: usize) -> ColumnResult<Self> {
        if test_register_index >= size {
            return Err(ColumnError::PlugIndexOutOfRange {
                index: test_register_index,
                size,
            });
        }
        let plugs = (0..size).map(|_| circuit.add_plug(size)).collect();
        Ok(Self {
            plugs,
            test_register_index,
        })
    }

    pub fn test_register_index(&self) -> usize {
        self.test_register_index
    }

    pub fn set_test_register_index(&mut self, index: usize) -> ColumnResult<()> {
        self.plug(index)?;
        self.test_register_index = index;
        Ok(())
    }

    /// The plug currently acting as test register
    pub fn test_register(&self) -> PlugId {
        self.plugs[self.test_register_index]
    }

    /// Test register junctions connected to junction `wire`
    pub fn connected_set(&self, circuit: &Circuit, wire: usize) -> CircuitResult<BTreeSet<usize>> {
        circuit.plug_connected_set(self.test_register(), wire)
    }
}

impl PlugColumn for TestRegisterColumn {
    fn plugs(&self) -> &[PlugId] {
        &self.plugs
    }

    fn set_adjacency(&mut self, _circuit: &mut Circuit, adjacent: Option<&[PlugId]>) -> ColumnResult<()> {
        match adjacent {
            Some(_) => Err(ColumnError::TestRegisterAdjacency),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_index_bounds() {
        let mut circuit = Circuit::new();
        assert_eq!(
            TestRegisterColumn::new(&mut circuit, 4, 4).unwrap_err(),
            ColumnError::PlugIndexOutOfRange { index: 4, size: 4 }
        );

        let mut column = TestRegisterColumn::new(&mut circuit, 4, 1).unwrap();
        assert!(column.set_test_register_index(9).is_err());
        assert_eq!(column.test_register_index(), 1);

        column.set_test_register_index(3).unwrap();
        assert_eq!(column.test_register(), column.plugs()[3]);
    }

    #[test]
    fn test_register_refuses_adjacency() {
        let mut circuit = Circuit::new();
        let mut column = TestRegisterColumn::new(&mut circuit, 2, 0).unwrap();
        let other = column.plugs().to_vec();
        assert_eq!(
            column.set_adjacency(&mut circuit, Some(&other)),
            Err(ColumnError::TestRegisterAdjacency)
        );
        assert!(column.set_adjacency(&mut circuit, None).is_ok());
    }

    #[test]
    fn test_unwired_register_is_disconnected() {
        let mut circuit = Circuit::new();
        let column = TestRegisterColumn::new(&mut circuit, 4, 0).unwrap();
        assert_eq!(column.connected_set(&circuit, 2).unwrap(), BTreeSet::from([2]));
    }
}
