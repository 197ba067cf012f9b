//! Power propagation
//!
//! Switching a junction on or off spreads over the wires one wave at a time.
//! A [`Propagation`] holds the current wavefront so an observer can render
//! each wave; `settle` runs it to completion.

use super::{Circuit, CircuitResult, JunctionId};

/// An in-flight power change spreading from one junction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propagation {
    origin: JunctionId,
    powered: bool,
    frontier: Vec<JunctionId>,
    waves: usize,
}

impl Propagation {
    pub fn origin(&self) -> JunctionId {
        self.origin
    }

    /// Target state: true when powering on
    pub fn powered(&self) -> bool {
        self.powered
    }

    /// Junctions switched during the most recent wave
    pub fn frontier(&self) -> &[JunctionId] {
        &self.frontier
    }

    /// Number of waves run so far
    pub fn waves(&self) -> usize {
        self.waves
    }

    pub fn is_settled(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Switch every neighbour of the frontier that is not yet in the target
    /// state. Returns true once nothing is left to switch.
    pub fn step(&mut self, circuit: &mut Circuit) -> CircuitResult<bool> {
        if self.is_settled() {
            return Ok(true);
        }

        let mut next = Vec::new();
        for junction in std::mem::take(&mut self.frontier) {
            // Destroyed since it was queued
            if !circuit.contains_junction(junction) {
                continue;
            }
            for neighbour in circuit.neighbours(junction)? {
                let node = circuit.junction_node_mut(neighbour)?;
                if node.powered != self.powered {
                    node.powered = self.powered;
                    next.push(neighbour);
                }
            }
        }

        self.frontier = next;
        self.waves += 1;
        Ok(self.is_settled())
    }

    /// Run the remaining waves
    pub fn settle(&mut self, circuit: &mut Circuit) -> CircuitResult<()> {
        while !self.step(circuit)? {}
        Ok(())
    }
}

impl Circuit {
    /// Begin switching `origin` and everything connected to it
    ///
    /// If the origin is already in the target state the propagation starts
    /// settled and nothing changes.
    pub fn start_power(&mut self, origin: JunctionId, powered: bool) -> CircuitResult<Propagation> {
        let node = self.junction_node_mut(origin)?;
        let frontier = if node.powered == powered {
            Vec::new()
        } else {
            node.powered = powered;
            vec![origin]
        };

        Ok(Propagation {
            origin,
            powered,
            frontier,
            waves: 0,
        })
    }

    /// Power on `origin` and its connected set immediately
    pub fn power_on(&mut self, origin: JunctionId) -> CircuitResult<()> {
        self.start_power(origin, true)?.settle(self)
    }

    /// Power off `origin` and its connected set immediately
    pub fn power_off(&mut self, origin: JunctionId) -> CircuitResult<()> {
        self.start_power(origin, false)?.settle(self)
    }

    /// Clear one junction's flag without propagating
    pub fn force_off(&mut self, id: JunctionId) -> CircuitResult<()> {
        self.junction_node_mut(id)?.powered = false;
        Ok(())
    }

    /// Clear every junction's flag
    pub fn force_off_all(&mut self) {
        for node in self.junctions.iter_mut().flatten() {
            node.powered = false;
        }
    }

    /// Number of powered junctions in the whole circuit
    pub fn num_powered(&self) -> usize {
        self.junctions
            .iter()
            .flatten()
            .filter(|node| node.powered)
            .count()
    }
}
