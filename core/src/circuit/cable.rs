//! Cables: N wires running from one plug into another

use super::{CableId, CableNode, CableRouting, Circuit, CircuitError, CircuitResult, PlugId};

impl Circuit {
    /// Create a cable of `size` straight-through wires
    pub fn add_cable(
        &mut self,
        size: usize,
        outof: Option<PlugId>,
        into: Option<PlugId>,
    ) -> CircuitResult<CableId> {
        self.add_routed_cable(size, CableRouting::Identity, outof, into)
    }

    pub(crate) fn add_routed_cable(
        &mut self,
        size: usize,
        routing: CableRouting,
        outof: Option<PlugId>,
        into: Option<PlugId>,
    ) -> CircuitResult<CableId> {
        // Validate both ends before allocating anything
        for plug in [outof, into].into_iter().flatten() {
            let actual = self.plug_size(plug)?;
            if actual != size {
                return Err(CircuitError::SizeMismatch {
                    expected: size,
                    actual,
                });
            }
        }

        let mut wires = Vec::with_capacity(size);
        for _ in 0..size {
            wires.push(self.add_wire(None, None)?);
        }

        let id = CableId(self.cables.len() as u32);
        self.cables.push(Some(CableNode {
            wires,
            outof: None,
            into: None,
            routing,
        }));
        self.set_cable_outof(id, outof)?;
        self.set_cable_into(id, into)?;
        Ok(id)
    }

    pub fn contains_cable(&self, id: CableId) -> bool {
        self.cable_node(id).is_ok()
    }

    pub fn cable_size(&self, id: CableId) -> CircuitResult<usize> {
        Ok(self.cable_node(id)?.wires.len())
    }

    pub fn cable_wires(&self, id: CableId) -> CircuitResult<&[super::WireId]> {
        Ok(&self.cable_node(id)?.wires)
    }

    /// `(outof, into)` plugs of a cable
    pub fn cable_endpoints(&self, id: CableId) -> CircuitResult<(Option<PlugId>, Option<PlugId>)> {
        let node = self.cable_node(id)?;
        Ok((node.outof, node.into))
    }

    fn check_cable_fits(&self, id: CableId, plug: Option<PlugId>) -> CircuitResult<()> {
        let expected = self.cable_size(id)?;
        if let Some(plug) = plug {
            let actual = self.plug_size(plug)?;
            if actual != expected {
                return Err(CircuitError::SizeMismatch { expected, actual });
            }
        }
        Ok(())
    }

    /// Plug the source end into `outof`; wire i leaves junction i
    pub fn set_cable_outof(&mut self, id: CableId, outof: Option<PlugId>) -> CircuitResult<()> {
        self.check_cable_fits(id, outof)?;

        let previous = self.cable_node(id)?.outof;
        if let Some(old) = previous {
            if let Ok(node) = self.plug_node_mut(old) {
                node.outgoing.remove(&id);
            }
        }
        if let Some(new) = outof {
            self.plug_node_mut(new)?.outgoing.insert(id);
        }
        self.cable_node_mut(id)?.outof = outof;

        let wires = self.cable_node(id)?.wires.clone();
        for (i, wire) in wires.into_iter().enumerate() {
            let junction = match outof {
                Some(plug) => Some(self.plug_junction(plug, i)?),
                None => None,
            };
            self.set_wire_outof(wire, junction)?;
        }
        Ok(())
    }

    /// Plug the destination end into `into`; wire i lands on the junction
    /// chosen by the cable's routing
    pub fn set_cable_into(&mut self, id: CableId, into: Option<PlugId>) -> CircuitResult<()> {
        self.check_cable_fits(id, into)?;

        let previous = self.cable_node(id)?.into;
        if let Some(old) = previous {
            if let Ok(node) = self.plug_node_mut(old) {
                node.incoming.remove(&id);
            }
        }
        if let Some(new) = into {
            self.plug_node_mut(new)?.incoming.insert(id);
        }
        self.cable_node_mut(id)?.into = into;

        self.route_cable(id)
    }

    /// Recompute where every wire of the cable lands
    pub(crate) fn route_cable(&mut self, id: CableId) -> CircuitResult<()> {
        let node = self.cable_node(id)?;
        let Some(into) = node.into else {
            let wires = node.wires.clone();
            for wire in wires {
                self.set_wire_into(wire, None)?;
            }
            return Ok(());
        };

        let targets: Vec<_> = node
            .wires
            .iter()
            .enumerate()
            .map(|(i, wire)| (*wire, node.routing.route(i)))
            .collect();
        for (wire, index) in targets {
            let junction = self.plug_junction(into, index)?;
            self.set_wire_into(wire, Some(junction))?;
        }
        Ok(())
    }

    /// Replace the source plug with a fresh, unconnected one
    pub fn disconnect_cable_outof(&mut self, id: CableId) -> CircuitResult<PlugId> {
        let size = self.cable_size(id)?;
        let fresh = self.add_plug(size);
        self.set_cable_outof(id, Some(fresh))?;
        Ok(fresh)
    }

    /// Replace the destination plug with a fresh, unconnected one
    pub fn disconnect_cable_into(&mut self, id: CableId) -> CircuitResult<PlugId> {
        let size = self.cable_size(id)?;
        let fresh = self.add_plug(size);
        self.set_cable_into(id, Some(fresh))?;
        Ok(fresh)
    }

    /// Unplug both ends and remove the cable with its wires
    pub fn destroy_cable(&mut self, id: CableId) -> CircuitResult<()> {
        self.set_cable_outof(id, None)?;
        self.set_cable_into(id, None)?;
        let wires = self.cable_node(id)?.wires.clone();
        for wire in wires {
            self.destroy_wire(wire)?;
        }
        self.cables[id.0 as usize] = None;
        Ok(())
    }
}
