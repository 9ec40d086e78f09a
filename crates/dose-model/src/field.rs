//! Addressable input fields and edit values.
//!
//! Only user-writable fields have a [`FieldPath`]; derived fields cannot be
//! named and therefore cannot be edited. Paths have a stable dotted text form
//! (`radionuclide.nuc-2.contamination`) used by the CLI and by serialized edits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::ids::{ExtremityId, RadionuclideId};
use crate::scenario::ScenarioKind;
use crate::task::{ResuspensionFactor, TriggerFlag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    Location,
    NumWorkers,
    HoursPerWorker,
}

impl TimeField {
    pub const ALL: [TimeField; 3] = [
        TimeField::Location,
        TimeField::NumWorkers,
        TimeField::HoursPerWorker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeField::Location => "location",
            TimeField::NumWorkers => "num_workers",
            TimeField::HoursPerWorker => "hours_per_worker",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtremityField {
    Nuclide,
    Name,
    HoursPerWorker,
    DoseRate,
}

impl ExtremityField {
    pub const ALL: [ExtremityField; 4] = [
        ExtremityField::Nuclide,
        ExtremityField::Name,
        ExtremityField::HoursPerWorker,
        ExtremityField::DoseRate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtremityField::Nuclide => "nuclide",
            ExtremityField::Name => "name",
            ExtremityField::HoursPerWorker => "hours_per_worker",
            ExtremityField::DoseRate => "dose_rate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadionuclideField {
    Nuclide,
    Name,
    Limit,
    Contamination,
}

impl RadionuclideField {
    pub const ALL: [RadionuclideField; 4] = [
        RadionuclideField::Nuclide,
        RadionuclideField::Name,
        RadionuclideField::Limit,
        RadionuclideField::Contamination,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RadionuclideField::Nuclide => "nuclide",
            RadionuclideField::Name => "name",
            RadionuclideField::Limit => "limit",
            RadionuclideField::Contamination => "contamination",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioField {
    RespiratorPrescribed,
    Explanation,
}

impl ScenarioField {
    pub const ALL: [ScenarioField; 2] = [
        ScenarioField::RespiratorPrescribed,
        ScenarioField::Explanation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioField::RespiratorPrescribed => "respirator_prescribed",
            ScenarioField::Explanation => "explanation",
        }
    }
}

/// Kind of value a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    /// Non-negative integer (worker count).
    WholeNumber,
    Boolean,
    /// Named option, given by name or by its numeric factor.
    Choice,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::WholeNumber => "whole number",
            FieldKind::Boolean => "boolean",
            FieldKind::Choice => "choice",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Number | FieldKind::WholeNumber)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Title,
    Time(TimeField),
    DirectExposureRate,
    Trigger(TriggerFlag),
    Resuspension(ResuspensionFactor),
    Extremity {
        id: ExtremityId,
        field: ExtremityField,
    },
    DosimetryPrescribed,
    ExtremityComments,
    Radionuclide {
        id: RadionuclideId,
        field: RadionuclideField,
    },
    RespiratoryProtection,
    EngineeringProtection,
    EngineeringControlsUsed,
    Scenario {
        kind: ScenarioKind,
        field: ScenarioField,
    },
    DacComments,
}

impl FieldPath {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldPath::Title
            | FieldPath::Time(TimeField::Location)
            | FieldPath::ExtremityComments
            | FieldPath::DacComments => FieldKind::Text,
            FieldPath::Time(TimeField::NumWorkers) => FieldKind::WholeNumber,
            FieldPath::Time(TimeField::HoursPerWorker)
            | FieldPath::DirectExposureRate
            | FieldPath::Resuspension(_) => FieldKind::Number,
            FieldPath::Trigger(_)
            | FieldPath::DosimetryPrescribed
            | FieldPath::EngineeringControlsUsed => FieldKind::Boolean,
            FieldPath::Extremity { field, .. } => match field {
                ExtremityField::Nuclide | ExtremityField::Name => FieldKind::Text,
                ExtremityField::HoursPerWorker | ExtremityField::DoseRate => FieldKind::Number,
            },
            FieldPath::Radionuclide { field, .. } => match field {
                RadionuclideField::Nuclide | RadionuclideField::Name => FieldKind::Text,
                RadionuclideField::Limit | RadionuclideField::Contamination => FieldKind::Number,
            },
            FieldPath::RespiratoryProtection | FieldPath::EngineeringProtection => {
                FieldKind::Choice
            }
            FieldPath::Scenario { field, .. } => match field {
                ScenarioField::RespiratorPrescribed => FieldKind::Boolean,
                ScenarioField::Explanation => FieldKind::Text,
            },
        }
    }

    /// Every path that exists independently of entry identifiers.
    pub fn fixed_paths() -> Vec<FieldPath> {
        let mut paths = vec![FieldPath::Title];
        paths.extend(TimeField::ALL.into_iter().map(FieldPath::Time));
        paths.push(FieldPath::DirectExposureRate);
        paths.extend(TriggerFlag::ALL.into_iter().map(FieldPath::Trigger));
        paths.extend(ResuspensionFactor::ALL.into_iter().map(FieldPath::Resuspension));
        paths.push(FieldPath::DosimetryPrescribed);
        paths.push(FieldPath::ExtremityComments);
        paths.push(FieldPath::RespiratoryProtection);
        paths.push(FieldPath::EngineeringProtection);
        paths.push(FieldPath::EngineeringControlsUsed);
        for kind in ScenarioKind::ALL {
            for field in ScenarioField::ALL {
                paths.push(FieldPath::Scenario { kind, field });
            }
        }
        paths.push(FieldPath::DacComments);
        paths
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Title => f.write_str("title"),
            FieldPath::Time(field) => write!(f, "time.{}", field.as_str()),
            FieldPath::DirectExposureRate => f.write_str("external.direct_exposure_rate"),
            FieldPath::Trigger(flag) => write!(f, "triggers.{}", flag.as_str()),
            FieldPath::Resuspension(factor) => write!(f, "resuspension.{}", factor.as_str()),
            FieldPath::Extremity { id, field } => write!(f, "extremity.{id}.{}", field.as_str()),
            FieldPath::DosimetryPrescribed => f.write_str("extremity.dosimetry_prescribed"),
            FieldPath::ExtremityComments => f.write_str("extremity.comments"),
            FieldPath::Radionuclide { id, field } => {
                write!(f, "radionuclide.{id}.{}", field.as_str())
            }
            FieldPath::RespiratoryProtection => f.write_str("protection.respiratory"),
            FieldPath::EngineeringProtection => f.write_str("protection.engineering"),
            FieldPath::EngineeringControlsUsed => f.write_str("protection.controls_used"),
            FieldPath::Scenario { kind, field } => {
                write!(f, "scenario.{}.{}", kind.as_str(), field.as_str())
            }
            FieldPath::DacComments => f.write_str("dac.comments"),
        }
    }
}

fn find_named<T: Copy>(all: &[T], name: &str, as_str: impl Fn(&T) -> &'static str) -> Option<T> {
    all.iter().copied().find(|item| as_str(item) == name)
}

impl FromStr for FieldPath {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ModelError::UnknownFieldPath(s.to_string());
        let parts: Vec<&str> = s.trim().split('.').collect();
        let path = match parts.as_slice() {
            ["title"] => FieldPath::Title,
            ["time", field] => FieldPath::Time(
                find_named(&TimeField::ALL, field, TimeField::as_str).ok_or_else(unknown)?,
            ),
            ["external", "direct_exposure_rate"] => FieldPath::DirectExposureRate,
            ["triggers", flag] => FieldPath::Trigger(
                find_named(&TriggerFlag::ALL, flag, TriggerFlag::as_str).ok_or_else(unknown)?,
            ),
            ["resuspension", factor] => FieldPath::Resuspension(
                find_named(&ResuspensionFactor::ALL, factor, ResuspensionFactor::as_str)
                    .ok_or_else(unknown)?,
            ),
            ["extremity", "dosimetry_prescribed"] => FieldPath::DosimetryPrescribed,
            ["extremity", "comments"] => FieldPath::ExtremityComments,
            ["extremity", id, field] => FieldPath::Extremity {
                id: id.parse()?,
                field: find_named(&ExtremityField::ALL, field, ExtremityField::as_str)
                    .ok_or_else(unknown)?,
            },
            ["radionuclide", id, field] => FieldPath::Radionuclide {
                id: id.parse()?,
                field: find_named(&RadionuclideField::ALL, field, RadionuclideField::as_str)
                    .ok_or_else(unknown)?,
            },
            ["protection", "respiratory"] => FieldPath::RespiratoryProtection,
            ["protection", "engineering"] => FieldPath::EngineeringProtection,
            ["protection", "controls_used"] => FieldPath::EngineeringControlsUsed,
            ["scenario", kind, field] => FieldPath::Scenario {
                kind: kind.parse()?,
                field: find_named(&ScenarioField::ALL, field, ScenarioField::as_str)
                    .ok_or_else(unknown)?,
            },
            ["dac", "comments"] => FieldPath::DacComments,
            _ => return Err(unknown()),
        };
        Ok(path)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// New value for a field, already typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Parses raw text for a field of the given kind.
    ///
    /// Numeric kinds require a parseable number here; lenient handling of
    /// unparseable input happens before this point.
    pub fn parse(path: &FieldPath, raw: &str) -> Result<Self, ModelError> {
        let kind = path.kind();
        let invalid = || ModelError::InvalidValue {
            path: path.to_string(),
            expected: kind.as_str(),
            value: raw.to_string(),
        };
        match kind {
            FieldKind::Text | FieldKind::Choice => Ok(FieldValue::Text(raw.to_string())),
            FieldKind::Number | FieldKind::WholeNumber => raw
                .trim()
                .parse::<f64>()
                .map(FieldValue::Number)
                .map_err(|_| invalid()),
            FieldKind::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" | "on" => Ok(FieldValue::Bool(true)),
                "false" | "no" | "n" | "0" | "off" => Ok(FieldValue::Bool(false)),
                _ => Err(invalid()),
            },
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "boolean",
            FieldValue::Number(_) => "number",
            FieldValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(value) => write!(f, "{value}"),
            FieldValue::Number(value) => write!(f, "{value}"),
            FieldValue::Text(value) => f.write_str(value),
        }
    }
}

/// A single user edit: which field, and its new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEdit {
    pub path: FieldPath,
    pub value: FieldValue,
}

impl FieldEdit {
    pub fn new(path: FieldPath, value: FieldValue) -> Self {
        Self { path, value }
    }

    pub fn number(path: FieldPath, value: f64) -> Self {
        Self::new(path, FieldValue::Number(value))
    }

    pub fn flag(path: FieldPath, value: bool) -> Self {
        Self::new(path, FieldValue::Bool(value))
    }

    pub fn text(path: FieldPath, value: impl Into<String>) -> Self {
        Self::new(path, FieldValue::Text(value.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_paths_round_trip_through_text() {
        for path in FieldPath::fixed_paths() {
            let text = path.to_string();
            assert_eq!(text.parse::<FieldPath>(), Ok(path), "{text}");
        }
    }

    #[test]
    fn entry_paths_carry_ids() {
        let path: FieldPath = "radionuclide.nuc-4.contamination".parse().expect("path");
        assert_eq!(
            path,
            FieldPath::Radionuclide {
                id: RadionuclideId::new(4),
                field: RadionuclideField::Contamination,
            }
        );
        let path: FieldPath = "extremity.ext-2.dose_rate".parse().expect("path");
        assert_eq!(path.kind(), FieldKind::Number);
    }

    #[test]
    fn derived_fields_have_no_path() {
        for derived in [
            "time.person_hours",
            "resuspension.mpif",
            "dac.posted_ara",
            "dac.air_sampling_required",
            "summary.effective_dose",
            "radionuclide.nuc-1.airborne_concentration",
        ] {
            assert!(derived.parse::<FieldPath>().is_err(), "{derived}");
        }
    }

    #[test]
    fn booleans_parse_leniently() {
        let path = FieldPath::EngineeringControlsUsed;
        assert_eq!(FieldValue::parse(&path, "yes"), Ok(FieldValue::Bool(true)));
        assert_eq!(FieldValue::parse(&path, "Off"), Ok(FieldValue::Bool(false)));
        assert!(FieldValue::parse(&path, "maybe").is_err());
    }
}
