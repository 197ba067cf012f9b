//! Junctions: graph nodes with a power flag

use super::{Circuit, CircuitResult, JunctionId, JunctionNode, WireId};
use rustc_hash::FxHashSet;

impl Circuit {
    /// Create an unpowered junction with no wires
    pub fn add_junction(&mut self) -> JunctionId {
        let id = JunctionId(self.junctions.len() as u32);
        self.junctions.push(Some(JunctionNode::default()));
        id
    }

    pub fn contains_junction(&self, id: JunctionId) -> bool {
        self.junction_node(id).is_ok()
    }

    pub fn is_powered(&self, id: JunctionId) -> CircuitResult<bool> {
        Ok(self.junction_node(id)?.powered)
    }

    /// Wires whose `into` end is this junction
    pub fn junction_incoming(&self, id: JunctionId) -> CircuitResult<Vec<WireId>> {
        let mut wires: Vec<WireId> = self.junction_node(id)?.incoming.iter().copied().collect();
        wires.sort();
        Ok(wires)
    }

    /// Wires whose `outof` end is this junction
    pub fn junction_outgoing(&self, id: JunctionId) -> CircuitResult<Vec<WireId>> {
        let mut wires: Vec<WireId> = self.junction_node(id)?.outgoing.iter().copied().collect();
        wires.sort();
        Ok(wires)
    }

    /// Number of wire ends attached to this junction
    pub fn junction_degree(&self, id: JunctionId) -> CircuitResult<usize> {
        let node = self.junction_node(id)?;
        Ok(node.incoming.len() + node.outgoing.len())
    }

    /// Junctions one wire away, in either direction
    pub fn neighbours(&self, id: JunctionId) -> CircuitResult<Vec<JunctionId>> {
        let node = self.junction_node(id)?;
        let mut result = Vec::with_capacity(node.incoming.len() + node.outgoing.len());

        for wire in &node.outgoing {
            if let Some(into) = self.wire_node(*wire)?.into {
                result.push(into);
            }
        }
        for wire in &node.incoming {
            if let Some(outof) = self.wire_node(*wire)?.outof {
                result.push(outof);
            }
        }

        Ok(result)
    }

    /// All junctions reachable from `id` over wires in either direction,
    /// including `id` itself
    pub fn connected_set(&self, id: JunctionId) -> CircuitResult<FxHashSet<JunctionId>> {
        let mut visited = FxHashSet::default();
        let mut stack = vec![id];
        visited.insert(id);

        while let Some(current) = stack.pop() {
            for next in self.neighbours(current)? {
                if visited.insert(next) {
                    stack.push(next);
                }
            }
        }

        Ok(visited)
    }

    /// Re-point every wire of `other` onto `target`, then destroy `other`
    ///
    /// Absorbing a junction into itself is a no-op.
    pub fn absorb_junction(&mut self, target: JunctionId, other: JunctionId) -> CircuitResult<()> {
        if target == other {
            return Ok(());
        }
        self.junction_node(target)?;
        let node = self.junction_node(other)?;
        let incoming: Vec<WireId> = node.incoming.iter().copied().collect();
        let outgoing: Vec<WireId> = node.outgoing.iter().copied().collect();

        for wire in incoming {
            self.set_wire_into(wire, Some(target))?;
        }
        for wire in outgoing {
            self.set_wire_outof(wire, Some(target))?;
        }

        self.destroy_junction(other)
    }

    /// Remove a junction, leaving any attached wire ends dangling
    pub fn destroy_junction(&mut self, id: JunctionId) -> CircuitResult<()> {
        let node = self.junction_node(id)?;
        let incoming: Vec<WireId> = node.incoming.iter().copied().collect();
        let outgoing: Vec<WireId> = node.outgoing.iter().copied().collect();

        for wire in incoming {
            self.set_wire_into(wire, None)?;
        }
        for wire in outgoing {
            self.set_wire_outof(wire, None)?;
        }

        self.junctions[id.0 as usize] = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::CircuitError;
    use proptest::prelude::*;

    #[test]
    fn test_connected_set_includes_self() {
        let mut circuit = Circuit::new();
        let a = circuit.add_junction();
        let set = circuit.connected_set(a).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&a));
    }

    #[test]
    fn test_connected_set_follows_both_directions() {
        let mut circuit = Circuit::new();
        let a = circuit.add_junction();
        let b = circuit.add_junction();
        let c = circuit.add_junction();
        let d = circuit.add_junction();

        circuit.add_wire(Some(a), Some(b)).unwrap();
        circuit.add_wire(Some(c), Some(b)).unwrap();

        let from_a = circuit.connected_set(a).unwrap();
        assert_eq!(from_a.len(), 3);
        assert!(from_a.contains(&c));
        assert!(!from_a.contains(&d));
        assert_eq!(circuit.connected_set(c).unwrap(), from_a);
    }

    #[test]
    fn test_absorb_conserves_wires() {
        let mut circuit = Circuit::new();
        let a = circuit.add_junction();
        let b = circuit.add_junction();
        let c = circuit.add_junction();
        let d = circuit.add_junction();

        circuit.add_wire(Some(c), Some(b)).unwrap();
        circuit.add_wire(Some(b), Some(d)).unwrap();
        circuit.add_wire(Some(a), Some(c)).unwrap();

        let before = circuit.junction_degree(a).unwrap() + circuit.junction_degree(b).unwrap();
        circuit.absorb_junction(a, b).unwrap();

        assert_eq!(circuit.junction_degree(a).unwrap(), before);
        assert!(!circuit.contains_junction(b));
        assert_eq!(circuit.junction_degree(b), Err(CircuitError::UnknownJunction(b)));
        assert_eq!(circuit.connected_set(d).unwrap().len(), 3);
    }

    #[test]
    fn test_absorb_self_is_noop() {
        let mut circuit = Circuit::new();
        let a = circuit.add_junction();
        let b = circuit.add_junction();
        circuit.add_wire(Some(a), Some(b)).unwrap();

        circuit.absorb_junction(a, a).unwrap();
        assert!(circuit.contains_junction(a));
        assert_eq!(circuit.junction_degree(a).unwrap(), 1);
    }

    #[test]
    fn test_destroy_leaves_dangling_wire() {
        let mut circuit = Circuit::new();
        let a = circuit.add_junction();
        let b = circuit.add_junction();
        let w = circuit.add_wire(Some(a), Some(b)).unwrap();

        circuit.destroy_junction(b).unwrap();
        assert_eq!(circuit.wire_endpoints(w).unwrap(), (Some(a), None));
        assert_eq!(circuit.junction_degree(a).unwrap(), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

        #[test]
        fn prop_connectivity_is_symmetric(edges in proptest::collection::vec((0usize..12, 0usize..12), 0..20)) {
            let mut circuit = Circuit::new();
            let junctions: Vec<JunctionId> = (0..12).map(|_| circuit.add_junction()).collect();
            for (from, to) in edges {
                circuit.add_wire(Some(junctions[from]), Some(junctions[to])).unwrap();
            }

            for &a in &junctions {
                let from_a = circuit.connected_set(a).unwrap();
                prop_assert!(from_a.contains(&a));
                for &b in &junctions {
                    let from_b = circuit.connected_set(b).unwrap();
                    prop_assert_eq!(from_a.contains(&b), from_b.contains(&a));
                }
            }
        }
    }
}
