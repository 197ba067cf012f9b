//! Plugs: ordered groups of N junctions
//!
//! Connectivity queries on a plug are answered in terms of junction indices
//! within that plug, which is what the test register reads.

use super::{CableId, Circuit, CircuitError, CircuitResult, JunctionId, PlugId, PlugNode};
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;

impl Circuit {
    /// Create a plug of `size` fresh junctions
    pub fn add_plug(&mut self, size: usize) -> PlugId {
        let junctions = (0..size).map(|_| self.add_junction()).collect();
        let id = PlugId(self.plugs.len() as u32);
        self.plugs.push(Some(PlugNode {
            junctions,
            incoming: FxHashSet::default(),
            outgoing: FxHashSet::default(),
        }));
        id
    }

    pub fn contains_plug(&self, id: PlugId) -> bool {
        self.plug_node(id).is_ok()
    }

    pub fn plug_size(&self, id: PlugId) -> CircuitResult<usize> {
        Ok(self.plug_node(id)?.junctions.len())
    }

    pub fn plug_junctions(&self, id: PlugId) -> CircuitResult<&[JunctionId]> {
        Ok(&self.plug_node(id)?.junctions)
    }

    /// Junction at `index`, bounds-checked
    pub fn plug_junction(&self, id: PlugId, index: usize) -> CircuitResult<JunctionId> {
        let junctions = &self.plug_node(id)?.junctions;
        junctions
            .get(index)
            .copied()
            .ok_or(CircuitError::JunctionIndexOutOfRange {
                index,
                size: junctions.len(),
            })
    }

    /// Cables whose `into` end is this plug
    pub fn plug_incoming_cables(&self, id: PlugId) -> CircuitResult<Vec<CableId>> {
        let mut cables: Vec<CableId> = self.plug_node(id)?.incoming.iter().copied().collect();
        cables.sort();
        Ok(cables)
    }

    /// Cables whose `outof` end is this plug
    pub fn plug_outgoing_cables(&self, id: PlugId) -> CircuitResult<Vec<CableId>> {
        let mut cables: Vec<CableId> = self.plug_node(id)?.outgoing.iter().copied().collect();
        cables.sort();
        Ok(cables)
    }

    /// Indices within this plug reachable from junction `index`
    pub fn plug_connected_set(&self, id: PlugId, index: usize) -> CircuitResult<BTreeSet<usize>> {
        let start = self.plug_junction(id, index)?;
        let reachable = self.connected_set(start)?;

        Ok(self
            .plug_node(id)?
            .junctions
            .iter()
            .enumerate()
            .filter(|(_, j)| reachable.contains(j))
            .map(|(i, _)| i)
            .collect())
    }

    /// Partition `0..N` into the plug's connected components, ordered by
    /// smallest member
    pub fn plug_partition(&self, id: PlugId) -> CircuitResult<Vec<BTreeSet<usize>>> {
        let size = self.plug_size(id)?;
        let mut remaining: BTreeSet<usize> = (0..size).collect();
        let mut parts = Vec::new();

        while let Some(&first) = remaining.iter().next() {
            let part = self.plug_connected_set(id, first)?;
            remaining.retain(|i| !part.contains(i));
            parts.push(part);
        }

        Ok(parts)
    }

    /// Every junction of the plug is reachable from junction 0
    pub fn plug_fully_connected(&self, id: PlugId) -> CircuitResult<bool> {
        let size = self.plug_size(id)?;
        Ok(self.plug_connected_set(id, 0)?.len() == size)
    }

    /// Number of powered junctions
    pub fn plug_num_live(&self, id: PlugId) -> CircuitResult<usize> {
        let mut live = 0;
        for j in &self.plug_node(id)?.junctions {
            if self.is_powered(*j)? {
                live += 1;
            }
        }
        Ok(live)
    }

    /// Fresh plug of the same size, with no cables or wires
    pub fn clone_plug_without_connections(&mut self, id: PlugId) -> CircuitResult<PlugId> {
        let size = self.plug_size(id)?;
        Ok(self.add_plug(size))
    }

    /// Move every cable end and stray wire of `other` onto `target`, then
    /// destroy `other`
    pub fn absorb_plug(&mut self, target: PlugId, other: PlugId) -> CircuitResult<()> {
        if target == other {
            return Ok(());
        }
        let expected = self.plug_size(target)?;
        let actual = self.plug_size(other)?;
        if expected != actual {
            return Err(CircuitError::SizeMismatch { expected, actual });
        }

        let node = self.plug_node(other)?;
        let incoming: Vec<CableId> = node.incoming.iter().copied().collect();
        let outgoing: Vec<CableId> = node.outgoing.iter().copied().collect();

        for cable in incoming {
            self.set_cable_into(cable, Some(target))?;
        }
        for cable in outgoing {
            self.set_cable_outof(cable, Some(target))?;
        }

        // Wires attached directly to the junctions follow them index by index
        let pairs: Vec<(JunctionId, JunctionId)> = self
            .plug_node(target)?
            .junctions
            .iter()
            .copied()
            .zip(self.plug_node(other)?.junctions.iter().copied())
            .collect();
        for (keep, gone) in pairs {
            self.absorb_junction(keep, gone)?;
        }

        self.plugs[other.0 as usize] = None;
        Ok(())
    }

    /// Detach every cable end at this plug and remove it with its junctions
    pub fn destroy_plug(&mut self, id: PlugId) -> CircuitResult<()> {
        let node = self.plug_node(id)?;
        let incoming: Vec<CableId> = node.incoming.iter().copied().collect();
        let outgoing: Vec<CableId> = node.outgoing.iter().copied().collect();
        let junctions = node.junctions.clone();

        for cable in incoming {
            self.set_cable_into(cable, None)?;
        }
        for cable in outgoing {
            self.set_cable_outof(cable, None)?;
        }
        for j in junctions {
            self.destroy_junction(j)?;
        }

        self.plugs[id.0 as usize] = None;
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plug_connectivity() {
        let mut circuit = Circuit::new();
        let p = circuit.add_plug(4);
        let j = circuit.plug_junctions(p).unwrap().to_vec();

        circuit.add_wire(Some(j[0]), Some(j[2])).unwrap();
        circuit.add_wire(Some(j[3]), Some(j[1])).unwrap();

        assert_eq!(circuit.plug_connected_set(p, 2).unwrap(), BTreeSet::from([0, 2]));
        assert_eq!(
            circuit.plug_partition(p).unwrap(),
            vec![BTreeSet::from([0, 2]), BTreeSet::from([1, 3])]
        );
        assert!(!circuit.plug_fully_connected(p).unwrap());

        circuit.add_wire(Some(j[1]), Some(j[2])).unwrap();
        assert!(circuit.plug_fully_connected(p).unwrap());
        assert_eq!(circuit.plug_partition(p).unwrap().len(), 1);
    }

    #[test]
    fn test_plug_index_bounds() {
        let mut circuit = Circuit::new();
        let p = circuit.add_plug(3);
        assert_eq!(
            circuit.plug_connected_set(p, 3),
            Err(CircuitError::JunctionIndexOutOfRange { index: 3, size: 3 })
        );
    }

    #[test]
    fn test_absorb_plug_moves_cables_and_wires() {
        let mut circuit = Circuit::new();
        let source = circuit.add_plug(3);
        let old = circuit.add_plug(3);
        let target = circuit.add_plug(3);
        let cable = circuit.add_cable(3, Some(source), Some(old)).unwrap();

        // a stray wire between two junctions of the absorbed plug
        let stray_from = circuit.plug_junction(old, 0).unwrap();
        let stray_to = circuit.plug_junction(old, 1).unwrap();
        circuit.add_wire(Some(stray_from), Some(stray_to)).unwrap();

        circuit.absorb_plug(target, old).unwrap();

        assert!(!circuit.contains_plug(old));
        assert_eq!(circuit.cable_endpoints(cable).unwrap(), (Some(source), Some(target)));
        assert_eq!(circuit.plug_incoming_cables(target).unwrap(), vec![cable]);
        assert_eq!(circuit.plug_connected_set(target, 0).unwrap(), BTreeSet::from([0, 1]));
        assert_eq!(
            circuit.plug_connected_set(source, 1).unwrap(),
            BTreeSet::from([0, 1])
        );
    }

    #[test]
    fn test_absorb_plug_size_mismatch() {
        let mut circuit = Circuit::new();
        let a = circuit.add_plug(3);
        let b = circuit.add_plug(4);
        assert_eq!(
            circuit.absorb_plug(a, b),
            Err(CircuitError::SizeMismatch {
                expected: 3,
                actual: 4
            })
        );
        assert!(circuit.contains_plug(b));
    }

    #[test]
    fn test_destroy_plug_detaches_cables() {
        let mut circuit = Circuit::new();
        let a = circuit.add_plug(2);
        let b = circuit.add_plug(2);
        let cable = circuit.add_cable(2, Some(a), Some(b)).unwrap();

        circuit.destroy_plug(b).unwrap();
        assert_eq!(circuit.cable_endpoints(cable).unwrap(), (Some(a), None));
        assert_eq!(circuit.counts(), (2, 2, 1, 1));
    }
}
