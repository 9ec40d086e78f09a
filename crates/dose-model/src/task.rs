//! Task document: the aggregate root of the worksheet.
//!
//! # Invariants
//! - A task exclusively owns every section and entry below it.
//! - Derived fields are overwritten on every recompute and have no edit path.
//! - The radionuclide and extremity collections are never empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Collection, ModelError, Result};
use crate::ids::{ExtremityId, IdCounter, RadionuclideId, TaskId};
use crate::lookup::CUSTOM_NUCLIDE_KEY;
use crate::protection::{EngineeringProtection, RespiratoryProtection};
use crate::radionuclide::{RadionuclideEntry, RadionuclideRecord};
use crate::scenario::{InternalDoseScenario, ScenarioKind};

/// Time estimation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSection {
    pub location: String,
    pub num_workers: u32,
    pub hours_per_worker: f64,
    /// Derived.
    pub person_hours: Option<f64>,
}

/// Direct external dose rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalDoseSection {
    /// mrem/hr.
    pub direct_exposure_rate: f64,
    /// Derived, mrem.
    pub external_exposure: Option<f64>,
}

/// Advisory extremity/skin dose triggers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerFlags {
    pub direct_handling: bool,
    pub shielded_glovebox_work: bool,
    pub shielding_leaks: bool,
    pub non_uniform_materials: bool,
    pub protective_clothing: bool,
    pub rso_deemed_necessary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerFlag {
    DirectHandling,
    ShieldedGloveboxWork,
    ShieldingLeaks,
    NonUniformMaterials,
    ProtectiveClothing,
    RsoDeemedNecessary,
}

impl TriggerFlag {
    pub const ALL: [TriggerFlag; 6] = [
        TriggerFlag::DirectHandling,
        TriggerFlag::ShieldedGloveboxWork,
        TriggerFlag::ShieldingLeaks,
        TriggerFlag::NonUniformMaterials,
        TriggerFlag::ProtectiveClothing,
        TriggerFlag::RsoDeemedNecessary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerFlag::DirectHandling => "direct_handling",
            TriggerFlag::ShieldedGloveboxWork => "shielded_glovebox_work",
            TriggerFlag::ShieldingLeaks => "shielding_leaks",
            TriggerFlag::NonUniformMaterials => "non_uniform_materials",
            TriggerFlag::ProtectiveClothing => "protective_clothing",
            TriggerFlag::RsoDeemedNecessary => "rso_deemed_necessary",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TriggerFlag::DirectHandling => "Direct handling",
            TriggerFlag::ShieldedGloveboxWork => "Shielded glovebox work",
            TriggerFlag::ShieldingLeaks => "Shielding leaks",
            TriggerFlag::NonUniformMaterials => "Non-uniform materials",
            TriggerFlag::ProtectiveClothing => "Protective clothing / leaded garments",
            TriggerFlag::RsoDeemedNecessary => "RSO deemed necessary",
        }
    }
}

impl TriggerFlags {
    pub fn get(&self, flag: TriggerFlag) -> bool {
        match flag {
            TriggerFlag::DirectHandling => self.direct_handling,
            TriggerFlag::ShieldedGloveboxWork => self.shielded_glovebox_work,
            TriggerFlag::ShieldingLeaks => self.shielding_leaks,
            TriggerFlag::NonUniformMaterials => self.non_uniform_materials,
            TriggerFlag::ProtectiveClothing => self.protective_clothing,
            TriggerFlag::RsoDeemedNecessary => self.rso_deemed_necessary,
        }
    }

    pub fn set(&mut self, flag: TriggerFlag, value: bool) {
        let slot = match flag {
            TriggerFlag::DirectHandling => &mut self.direct_handling,
            TriggerFlag::ShieldedGloveboxWork => &mut self.shielded_glovebox_work,
            TriggerFlag::ShieldingLeaks => &mut self.shielding_leaks,
            TriggerFlag::NonUniformMaterials => &mut self.non_uniform_materials,
            TriggerFlag::ProtectiveClothing => &mut self.protective_clothing,
            TriggerFlag::RsoDeemedNecessary => &mut self.rso_deemed_necessary,
        };
        *slot = value;
    }

    pub fn any(&self) -> bool {
        TriggerFlag::ALL.into_iter().any(|flag| self.get(flag))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremityEntry {
    id: ExtremityId,
    pub nuclide_key: String,
    pub name: String,
    pub hours_per_worker: f64,
    /// mrem/hr.
    pub dose_rate: f64,
    /// Derived, mrem.
    pub dose: Option<f64>,
}

impl ExtremityEntry {
    pub fn new(id: ExtremityId) -> Self {
        Self {
            id,
            nuclide_key: CUSTOM_NUCLIDE_KEY.to_string(),
            name: String::new(),
            hours_per_worker: 0.0,
            dose_rate: 0.0,
            dose: None,
        }
    }

    pub fn id(&self) -> ExtremityId {
        self.id
    }
}

/// Extremity/skin dose estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremityDoseSection {
    pub(crate) entries: Vec<ExtremityEntry>,
    pub(crate) next_id: IdCounter,
    /// Derived, mrem per individual.
    pub total_dose: Option<f64>,
    pub dosimetry_prescribed: bool,
    pub comments: String,
}

impl Default for ExtremityDoseSection {
    fn default() -> Self {
        let (first, next_id) = IdCounter::with_first();
        Self {
            entries: vec![ExtremityEntry::new(ExtremityId::new(first))],
            next_id,
            total_dose: None,
            dosimetry_prescribed: false,
            comments: String::new(),
        }
    }
}

impl ExtremityDoseSection {
    pub fn entries(&self) -> &[ExtremityEntry] {
        &self.entries
    }

    /// Mutable access to entry contents; the list shape stays fixed.
    pub fn entries_mut(&mut self) -> std::slice::IterMut<'_, ExtremityEntry> {
        self.entries.iter_mut()
    }

    pub fn entry(&self, id: ExtremityId) -> Option<&ExtremityEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entry_mut(&mut self, id: ExtremityId) -> Option<&mut ExtremityEntry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

}

/// Resuspension factors feeding the modified personnel intake fraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResuspensionFactors {
    pub r: f64,
    pub c: f64,
    pub d: f64,
    /// Occupancy factor.
    pub o: f64,
    pub s: f64,
    pub u: f64,
    /// Derived, m⁻¹.
    pub mpif: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResuspensionFactor {
    R,
    C,
    D,
    O,
    S,
    U,
}

impl ResuspensionFactor {
    pub const ALL: [ResuspensionFactor; 6] = [
        ResuspensionFactor::R,
        ResuspensionFactor::C,
        ResuspensionFactor::D,
        ResuspensionFactor::O,
        ResuspensionFactor::S,
        ResuspensionFactor::U,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResuspensionFactor::R => "r",
            ResuspensionFactor::C => "c",
            ResuspensionFactor::D => "d",
            ResuspensionFactor::O => "o",
            ResuspensionFactor::S => "s",
            ResuspensionFactor::U => "u",
        }
    }
}

impl ResuspensionFactors {
    pub fn get(&self, factor: ResuspensionFactor) -> f64 {
        match factor {
            ResuspensionFactor::R => self.r,
            ResuspensionFactor::C => self.c,
            ResuspensionFactor::D => self.d,
            ResuspensionFactor::O => self.o,
            ResuspensionFactor::S => self.s,
            ResuspensionFactor::U => self.u,
        }
    }

    pub fn set(&mut self, factor: ResuspensionFactor, value: f64) {
        let slot = match factor {
            ResuspensionFactor::R => &mut self.r,
            ResuspensionFactor::C => &mut self.c,
            ResuspensionFactor::D => &mut self.d,
            ResuspensionFactor::O => &mut self.o,
            ResuspensionFactor::S => &mut self.s,
            ResuspensionFactor::U => &mut self.u,
        };
        *slot = value;
    }

    /// r × c × d × o × s × u
    pub fn product(&self) -> f64 {
        ResuspensionFactor::ALL
            .into_iter()
            .map(|factor| self.get(factor))
            .product()
    }
}

/// DAC fraction totals and posting triggers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DacFractionSection {
    /// Derived.
    pub total: Option<f64>,
    /// Derived: total ≥ 0.3.
    pub air_sampling_required: bool,
    /// Derived: total ≥ 1.0.
    pub posted_ara: bool,
    pub comments: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummarySection {
    /// mrem.
    pub external_exposure: Option<f64>,
    /// mrem.
    pub internal_exposure: Option<f64>,
    /// mrem.
    pub effective_dose: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,

    pub time: TimeSection,
    pub external: ExternalDoseSection,
    pub triggers: TriggerFlags,
    pub extremity: ExtremityDoseSection,

    pub resuspension: ResuspensionFactors,
    pub(crate) radionuclides: BTreeMap<RadionuclideId, RadionuclideRecord>,
    pub(crate) next_radionuclide: IdCounter,

    pub respiratory_protection: RespiratoryProtection,
    pub engineering_protection: EngineeringProtection,
    pub engineering_controls_used: bool,

    pub without_controls: InternalDoseScenario,
    pub with_controls: InternalDoseScenario,

    pub dac: DacFractionSection,
    pub summary: SummarySection,
}

impl Task {
    /// Creates a task with one default radionuclide and one default
    /// extremity entry. Derived fields start out `None`.
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        let (first, next_radionuclide) = IdCounter::with_first();
        Self {
            id,
            title: title.into(),
            time: TimeSection::default(),
            external: ExternalDoseSection::default(),
            triggers: TriggerFlags::default(),
            extremity: ExtremityDoseSection::default(),
            resuspension: ResuspensionFactors::default(),
            radionuclides: BTreeMap::from([(
                RadionuclideId::new(first),
                RadionuclideRecord::new(RadionuclideEntry::default()),
            )]),
            next_radionuclide,
            respiratory_protection: RespiratoryProtection::default(),
            engineering_protection: EngineeringProtection::default(),
            engineering_controls_used: false,
            without_controls: InternalDoseScenario::default(),
            with_controls: InternalDoseScenario::default(),
            dac: DacFractionSection::default(),
            summary: SummarySection::default(),
        }
    }

    pub fn scenario(&self, kind: ScenarioKind) -> &InternalDoseScenario {
        match kind {
            ScenarioKind::WithoutControls => &self.without_controls,
            ScenarioKind::WithControls => &self.with_controls,
        }
    }

    pub fn scenario_mut(&mut self, kind: ScenarioKind) -> &mut InternalDoseScenario {
        match kind {
            ScenarioKind::WithoutControls => &mut self.without_controls,
            ScenarioKind::WithControls => &mut self.with_controls,
        }
    }

    /// Scenario selected by the engineering-controls toggle.
    pub fn active_scenario_kind(&self) -> ScenarioKind {
        ScenarioKind::from_controls_used(self.engineering_controls_used)
    }

    /// Checks structural invariants of a document loaded from outside.
    pub fn validate(&self) -> Result<()> {
        let task = self.id.to_string();
        if self.radionuclides.is_empty() {
            return Err(ModelError::EmptyCollection {
                task,
                collection: Collection::Radionuclide,
            });
        }
        if self.extremity.entries.is_empty() {
            return Err(ModelError::EmptyCollection {
                task,
                collection: Collection::Extremity,
            });
        }
        if let Some(last) = self.radionuclides.keys().next_back()
            && last.get() >= self.next_radionuclide.peek()
        {
            return Err(ModelError::StaleIdCounter {
                task,
                collection: Collection::Radionuclide,
                id: last.to_string(),
                next: self.next_radionuclide.peek(),
            });
        }
        let mut seen = std::collections::BTreeSet::new();
        for entry in &self.extremity.entries {
            if !seen.insert(entry.id) {
                return Err(ModelError::DuplicateId {
                    task,
                    collection: Collection::Extremity,
                    id: entry.id.to_string(),
                });
            }
            if entry.id.get() >= self.extremity.next_id.peek() {
                return Err(ModelError::StaleIdCounter {
                    task,
                    collection: Collection::Extremity,
                    id: entry.id.to_string(),
                    next: self.extremity.next_id.peek(),
                });
            }
        }
        Ok(())
    }
}
