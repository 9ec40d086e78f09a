//! Collection synchronizer.
//!
//! # Responsibility
//! - Add and remove radionuclides together with their scenario contributions
//!   and DAC fraction records.
//! - Add and remove extremity entries.
//! - Expose the per-scenario and DAC views keyed by radionuclide identifier.
//!
//! # Invariants
//! - Every radionuclide has exactly one contribution per scenario and one DAC
//!   fraction record; they live in the same map value, so a single insertion
//!   or removal changes all of them at once.
//! - Identifiers come from per-task counters and are never reused.
//! - Neither collection can be emptied; the last removal is rejected.

use crate::error::{Collection, SyncError};
use crate::ids::{ExtremityId, RadionuclideId};
use crate::radionuclide::{Contribution, RadionuclideEntry, RadionuclideRecord};
use crate::scenario::ScenarioKind;
use crate::task::{ExtremityDoseSection, ExtremityEntry, Task};

impl Task {
    /// Appends a zeroed custom radionuclide with null companion records.
    pub fn add_radionuclide(&mut self) -> Result<RadionuclideId, SyncError> {
        let id = self
            .next_radionuclide
            .allocate()
            .map(RadionuclideId::new)
            .ok_or(SyncError::IdsExhausted {
                collection: Collection::Radionuclide,
            })?;
        self.radionuclides
            .insert(id, RadionuclideRecord::new(RadionuclideEntry::default()));
        Ok(id)
    }

    /// Removes a radionuclide and every companion record sharing its id.
    pub fn remove_radionuclide(
        &mut self,
        id: RadionuclideId,
    ) -> Result<RadionuclideRecord, SyncError> {
        if !self.radionuclides.contains_key(&id) {
            return Err(SyncError::UnknownEntry {
                collection: Collection::Radionuclide,
                id: id.to_string(),
            });
        }
        if self.radionuclides.len() == 1 {
            return Err(SyncError::LastEntry {
                collection: Collection::Radionuclide,
                id: id.to_string(),
            });
        }
        self.radionuclides
            .remove(&id)
            .ok_or_else(|| SyncError::UnknownEntry {
                collection: Collection::Radionuclide,
                id: id.to_string(),
            })
    }

    pub fn radionuclide_count(&self) -> usize {
        self.radionuclides.len()
    }

    pub fn radionuclide(&self, id: RadionuclideId) -> Option<&RadionuclideRecord> {
        self.radionuclides.get(&id)
    }

    pub fn radionuclide_mut(&mut self, id: RadionuclideId) -> Option<&mut RadionuclideRecord> {
        self.radionuclides.get_mut(&id)
    }

    /// Records in insertion order.
    pub fn radionuclides(&self) -> impl Iterator<Item = (RadionuclideId, &RadionuclideRecord)> {
        self.radionuclides.iter().map(|(id, record)| (*id, record))
    }

    pub fn radionuclides_mut(
        &mut self,
    ) -> impl Iterator<Item = (RadionuclideId, &mut RadionuclideRecord)> {
        self.radionuclides
            .iter_mut()
            .map(|(id, record)| (*id, record))
    }

    pub fn radionuclide_ids(&self) -> impl Iterator<Item = RadionuclideId> + '_ {
        self.radionuclides.keys().copied()
    }

    /// Per-radionuclide contributions for one scenario.
    pub fn contributions(
        &self,
        kind: ScenarioKind,
    ) -> impl Iterator<Item = (RadionuclideId, &Contribution)> {
        self.radionuclides
            .iter()
            .map(move |(id, record)| (*id, record.contribution(kind)))
    }

    /// Per-radionuclide DAC fractions.
    pub fn dac_fractions(&self) -> impl Iterator<Item = (RadionuclideId, Option<f64>)> + '_ {
        self.radionuclides
            .iter()
            .map(|(id, record)| (*id, record.dac_fraction))
    }

    pub fn add_extremity(&mut self) -> Result<ExtremityId, SyncError> {
        self.extremity.push_entry()
    }

    pub fn remove_extremity(&mut self, id: ExtremityId) -> Result<(), SyncError> {
        self.extremity.remove_entry(id)
    }
}

impl ExtremityDoseSection {
    pub(crate) fn push_entry(&mut self) -> Result<ExtremityId, SyncError> {
        let id = self
            .next_id
            .allocate()
            .map(ExtremityId::new)
            .ok_or(SyncError::IdsExhausted {
                collection: Collection::Extremity,
            })?;
        self.entries.push(ExtremityEntry::new(id));
        Ok(id)
    }

    pub(crate) fn remove_entry(&mut self, id: ExtremityId) -> Result<(), SyncError> {
        let Some(index) = self.entries.iter().position(|entry| entry.id() == id) else {
            return Err(SyncError::UnknownEntry {
                collection: Collection::Extremity,
                id: id.to_string(),
            });
        };
        if self.entries.len() == 1 {
            return Err(SyncError::LastEntry {
                collection: Collection::Extremity,
                id: id.to_string(),
            });
        }
        self.entries.remove(index);
        Ok(())
    }
}
