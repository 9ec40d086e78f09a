//! Internal-dose source terms and their companion records.
//!
//! # Invariants
//! - An entry and its companion records share one identifier and are stored
//!   as a single [`RadionuclideRecord`], so they are added and removed together.
//! - Derived fields are `None` when not computable from current inputs.

use serde::{Deserialize, Serialize};

use crate::lookup::{CUSTOM_NUCLIDE_KEY, is_custom_key};
use crate::scenario::ScenarioKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadionuclideEntry {
    pub nuclide_key: String,
    pub name: String,
    /// Regulatory limit (DAC) in µCi/cm³. Copied from the reference table
    /// unless `nuclide_key` is custom.
    pub limit_value: f64,
    /// Gross contamination level in dpm/100 cm².
    pub contamination_level: f64,
    /// Derived, µCi/cm³.
    pub airborne_concentration: Option<f64>,
    /// Derived, µCi/cm³, after respiratory and engineering protection.
    pub controlled_concentration: Option<f64>,
}

impl Default for RadionuclideEntry {
    fn default() -> Self {
        Self {
            nuclide_key: CUSTOM_NUCLIDE_KEY.to_string(),
            name: String::new(),
            limit_value: 0.0,
            contamination_level: 0.0,
            airborne_concentration: None,
            controlled_concentration: None,
        }
    }
}

impl RadionuclideEntry {
    pub fn is_custom(&self) -> bool {
        is_custom_key(&self.nuclide_key)
    }
}

/// Per-radionuclide dose contribution within one scenario, in mrem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub without_respirator: Option<f64>,
    pub with_respirator: Option<f64>,
}

/// A radionuclide entry bundled with everything keyed by its identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadionuclideRecord {
    pub entry: RadionuclideEntry,
    pub without_controls: Contribution,
    pub with_controls: Contribution,
    pub dac_fraction: Option<f64>,
}

impl RadionuclideRecord {
    pub fn new(entry: RadionuclideEntry) -> Self {
        Self {
            entry,
            ..Self::default()
        }
    }

    pub fn contribution(&self, kind: ScenarioKind) -> &Contribution {
        match kind {
            ScenarioKind::WithoutControls => &self.without_controls,
            ScenarioKind::WithControls => &self.with_controls,
        }
    }

    pub fn contribution_mut(&mut self, kind: ScenarioKind) -> &mut Contribution {
        match kind {
            ScenarioKind::WithoutControls => &mut self.without_controls,
            ScenarioKind::WithControls => &mut self.with_controls,
        }
    }
}
