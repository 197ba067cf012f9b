//! Wires: directed edges with optional endpoints

use super::{Circuit, CircuitResult, JunctionId, WireId, WireNode};

impl Circuit {
    /// Create a wire between two (optional) junctions
    pub fn add_wire(
        &mut self,
        outof: Option<JunctionId>,
        into: Option<JunctionId>,
    ) -> CircuitResult<WireId> {
        // Validate endpoints before allocating
        if let Some(j) = outof {
            self.junction_node(j)?;
        }
        if let Some(j) = into {
            self.junction_node(j)?;
        }

        let id = WireId(self.wires.len() as u32);
        self.wires.push(Some(WireNode::default()));
        self.set_wire_outof(id, outof)?;
        self.set_wire_into(id, into)?;
        Ok(id)
    }

    pub fn contains_wire(&self, id: WireId) -> bool {
        self.wire_node(id).is_ok()
    }

    /// `(outof, into)` ends of a wire
    pub fn wire_endpoints(&self, id: WireId) -> CircuitResult<(Option<JunctionId>, Option<JunctionId>)> {
        let node = self.wire_node(id)?;
        Ok((node.outof, node.into))
    }

    /// Move the source end of a wire, updating both junctions' adjacency
    pub fn set_wire_outof(&mut self, id: WireId, outof: Option<JunctionId>) -> CircuitResult<()> {
        if let Some(j) = outof {
            self.junction_node(j)?;
        }
        let previous = self.wire_node(id)?.outof;
        if previous == outof {
            return Ok(());
        }

        if let Some(old) = previous {
            // The old end may already be gone when a junction is being destroyed
            if let Ok(node) = self.junction_node_mut(old) {
                node.outgoing.remove(&id);
            }
        }
        if let Some(new) = outof {
            self.junction_node_mut(new)?.outgoing.insert(id);
        }
        self.wire_node_mut(id)?.outof = outof;
        Ok(())
    }

    /// Move the destination end of a wire, updating both junctions' adjacency
    pub fn set_wire_into(&mut self, id: WireId, into: Option<JunctionId>) -> CircuitResult<()> {
        if let Some(j) = into {
            self.junction_node(j)?;
        }
        let previous = self.wire_node(id)?.into;
        if previous == into {
            return Ok(());
        }

        if let Some(old) = previous {
            if let Ok(node) = self.junction_node_mut(old) {
                node.incoming.remove(&id);
            }
        }
        if let Some(new) = into {
            self.junction_node_mut(new)?.incoming.insert(id);
        }
        self.wire_node_mut(id)?.into = into;
        Ok(())
    }

    /// Detach both ends and remove the wire
    pub fn destroy_wire(&mut self, id: WireId) -> CircuitResult<()> {
        self.set_wire_outof(id, None)?;
        self.set_wire_into(id, None)?;
        self.wires[id.0 as usize] = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::CircuitError;

    #[test]
    fn test_reassign_moves_membership() {
        let mut circuit = Circuit::new();
        let a = circuit.add_junction();
        let b = circuit.add_junction();
        let c = circuit.add_junction();
        let w = circuit.add_wire(Some(a), Some(b)).unwrap();

        circuit.set_wire_into(w, Some(c)).unwrap();
        assert!(circuit.junction_incoming(b).unwrap().is_empty());
        assert_eq!(circuit.junction_incoming(c).unwrap(), vec![w]);

        circuit.set_wire_outof(w, None).unwrap();
        assert!(circuit.junction_outgoing(a).unwrap().is_empty());
        assert_eq!(circuit.wire_endpoints(w).unwrap(), (None, Some(c)));
    }

    #[test]
    fn test_invalid_endpoint_leaves_wire_unchanged() {
        let mut circuit = Circuit::new();
        let a = circuit.add_junction();
        let b = circuit.add_junction();
        let w = circuit.add_wire(Some(a), Some(b)).unwrap();

        let missing = JunctionId(99);
        assert_eq!(
            circuit.set_wire_into(w, Some(missing)),
            Err(CircuitError::UnknownJunction(missing))
        );
        assert_eq!(circuit.wire_endpoints(w).unwrap(), (Some(a), Some(b)));
    }

    #[test]
    fn test_destroy_wire() {
        let mut circuit = Circuit::new();
        let a = circuit.add_junction();
        let b = circuit.add_junction();
        let w = circuit.add_wire(Some(a), Some(b)).unwrap();

        circuit.destroy_wire(w).unwrap();
        assert!(!circuit.contains_wire(w));
        assert_eq!(circuit.junction_degree(a).unwrap(), 0);
        assert_eq!(circuit.connected_set(a).unwrap().len(), 1);
    }
}
