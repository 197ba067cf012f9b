//! Drums: cables routed by a scrambler casing
//!
//! Wire i of a drum lands on junction `casing.encode(i)` of the into-plug.
//! The routing is recomputed whenever the casing changes or the drum is
//! plugged somewhere else.

use super::{CableId, CableRouting, Circuit, CircuitError, CircuitResult, PlugId};
use crate::scrambler::ScramblerCasing;

impl Circuit {
    /// Create a drum carrying its own copy of `casing`
    pub fn add_drum(
        &mut self,
        casing: &ScramblerCasing,
        outof: Option<PlugId>,
        into: Option<PlugId>,
    ) -> CircuitResult<CableId> {
        self.add_routed_cable(
            casing.domain(),
            CableRouting::Drum(casing.clone()),
            outof,
            into,
        )
    }

    pub fn is_drum(&self, id: CableId) -> CircuitResult<bool> {
        Ok(matches!(self.cable_node(id)?.routing, CableRouting::Drum(_)))
    }

    pub fn drum_casing(&self, id: CableId) -> CircuitResult<&ScramblerCasing> {
        match &self.cable_node(id)?.routing {
            CableRouting::Drum(casing) => Ok(casing),
            CableRouting::Identity => Err(CircuitError::NotADrum(id)),
        }
    }

    /// Mutate the drum's casing, then rewire the drum
    pub fn update_drum<F>(&mut self, id: CableId, update: F) -> CircuitResult<()>
    where
        F: FnOnce(&mut ScramblerCasing),
    {
        match &mut self.cable_node_mut(id)?.routing {
            CableRouting::Drum(casing) => update(casing),
            CableRouting::Identity => return Err(CircuitError::NotADrum(id)),
        }
        self.route_cable(id)
    }

    /// Swap in a different casing of the same domain
    pub fn set_drum_casing(&mut self, id: CableId, casing: &ScramblerCasing) -> CircuitResult<()> {
        let expected = self.cable_size(id)?;
        if casing.domain() != expected {
            return Err(CircuitError::SizeMismatch {
                expected,
                actual: casing.domain(),
            });
        }
        self.update_drum(id, |current| *current = casing.clone())
    }
}
