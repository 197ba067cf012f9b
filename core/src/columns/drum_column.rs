//! Drum column
//!
//! Besides its N plugs and chaining cables, a drum column holds two drum
//! plugs and a drum between them:
//!
//! ```text
//! plugs[a] --cable0--> drum_plug0 --drum--> drum_plug1 <--cable1-- plugs[b]
//! ```
//!
//! so junction i of plug a is joined to junction `encode(i)` of plug b.

use super::{normalise_connection, CabledPlugs, ColumnResult, PlugColumn};
use crate::circuit::{CableId, Circuit, PlugId};
use crate::scrambler::ScramblerCasing;

#[derive(Debug, Clone)]
pub struct DrumColumn {
    inner: CabledPlugs,
    drum_plugs: [PlugId; 2],
    drum_cables: [CableId; 2],
    drum: CableId,
    connected_to: [usize; 2],
}

impl DrumColumn {
    /// Build a column whose drum bridges plugs `connected_to`
    pub fn new(
        circuit: &mut Circuit,
        casing: &ScramblerCasing,
        connected_to: [usize; 2],
    ) -> ColumnResult<Self> {
        let size = casing.domain();
        let [a, b] = normalise_connection(connected_to, size)?;

        let inner = CabledPlugs::new(circuit, size)?;
        let drum_plugs = [circuit.add_plug(size), circuit.add_plug(size)];
        let drum_cables = [
            circuit.add_cable(size, Some(inner.plugs[a]), Some(drum_plugs[0]))?,
            circuit.add_cable(size, Some(inner.plugs[b]), Some(drum_plugs[1]))?,
        ];
        let drum = circuit.add_drum(casing, Some(drum_plugs[0]), Some(drum_plugs[1]))?;

        Ok(Self {
            inner,
            drum_plugs,
            drum_cables,
            drum,
            connected_to: [a, b],
        })
    }

    /// Plug pair bridged by the drum, ascending
    pub fn connected_to(&self) -> [usize; 2] {
        self.connected_to
    }

    /// Move the drum's flanking cables to a new plug pair
    pub fn set_connected_to(&mut self, circuit: &mut Circuit, connected_to: [usize; 2]) -> ColumnResult<()> {
        let [a, b] = normalise_connection(connected_to, self.size())?;
        // Both targets are this column's own live plugs, so neither move can fail
        // once the pair is validated and the column is still in the circuit.
        circuit.set_cable_outof(self.drum_cables[0], Some(self.inner.plugs[a]))?;
        circuit.set_cable_outof(self.drum_cables[1], Some(self.inner.plugs[b]))?;
        self.connected_to = [a, b];
        Ok(())
    }

    pub fn drum(&self) -> CableId {
        self.drum
    }

    pub fn drum_plugs(&self) -> [PlugId; 2] {
        self.drum_plugs
    }

    pub fn casing<'c>(&self, circuit: &'c Circuit) -> ColumnResult<&'c ScramblerCasing> {
        Ok(circuit.drum_casing(self.drum)?)
    }

    pub fn rotation(&self, circuit: &Circuit) -> ColumnResult<usize> {
        Ok(self.casing(circuit)?.rotation())
    }

    pub fn set_rotation(&self, circuit: &mut Circuit, rotation: i64) -> ColumnResult<()> {
        Ok(circuit.update_drum(self.drum, |c| c.set_rotation(rotation))?)
    }

    pub fn inverse_rotation(&self, circuit: &Circuit) -> ColumnResult<usize> {
        Ok(self.casing(circuit)?.inverse_rotation())
    }

    pub fn set_inverse_rotation(&self, circuit: &mut Circuit, rotation: i64) -> ColumnResult<()> {
        Ok(circuit.update_drum(self.drum, |c| c.set_inverse_rotation(rotation))?)
    }

    /// `[slow, mid, fast]`
    pub fn rotations(&self, circuit: &Circuit) -> ColumnResult<[usize; 3]> {
        Ok(self.casing(circuit)?.rotations())
    }

    pub fn set_rotations(&self, circuit: &mut Circuit, rotations: [i64; 3]) -> ColumnResult<()> {
        Ok(circuit.update_drum(self.drum, |c| c.set_rotations(rotations))?)
    }

    pub fn set_casing(&self, circuit: &mut Circuit, casing: &ScramblerCasing) -> ColumnResult<()> {
        Ok(circuit.set_drum_casing(self.drum, casing)?)
    }
}

impl PlugColumn for DrumColumn {
    fn plugs(&self) -> &[PlugId] {
        &self.inner.plugs
    }

    fn cables(&self) -> &[CableId] {
        &self.inner.cables
    }

    fn set_adjacency(&mut self, circuit: &mut Circuit, adjacent: Option<&[PlugId]>) -> ColumnResult<()> {
        self.inner.set_adjacency(circuit, adjacent)
    }

    fn destroy(&self, circuit: &mut Circuit) -> ColumnResult<()> {
        circuit.destroy_cable(self.drum)?;
        for cable in self.drum_cables {
            circuit.destroy_cable(cable)?;
        }
        for plug in self.drum_plugs {
            circuit.destroy_plug(plug)?;
        }
        for cable in self.cables() {
            circuit.destroy_cable(*cable)?;
        }
        for plug in self.plugs() {
            circuit.destroy_plug(*plug)?;
        }
        Ok(())
    }
}
