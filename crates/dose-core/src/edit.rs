//! Edit boundary.
//!
//! Applies a single [`FieldEdit`] to a task, validates the new value against
//! the field it targets, and recomputes the task. Derived fields have no
//! [`FieldPath`], so they cannot be reached from here.

use std::str::FromStr;

use dose_model::{
    CUSTOM_NUCLIDE_KEY, ExtremityEntry, ExtremityField, ExtremityId, FieldEdit, FieldPath,
    FieldValue, ModelError, NuclideInfo, NuclideLookup, RadionuclideEntry, RadionuclideField,
    RadionuclideId, ScenarioField, Task, TimeField, is_custom_key,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::engine::recompute_in_place;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("{path} takes a {expected} value, got a {found}")]
    TypeMismatch {
        path: FieldPath,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{path} must be a finite number, got {value}")]
    NonFinite { path: FieldPath, value: f64 },

    #[error("{path} cannot be negative, got {value}")]
    Negative { path: FieldPath, value: f64 },

    #[error("{path} must be a whole number, got {value}")]
    NotWhole { path: FieldPath, value: f64 },

    #[error("no radionuclide with id {0}")]
    UnknownRadionuclide(RadionuclideId),

    #[error("no extremity entry with id {0}")]
    UnknownExtremity(ExtremityId),

    #[error("nuclide {0:?} is not in the reference table")]
    UnknownNuclide(String),

    #[error(
        "the limit of {id} comes from the reference table entry {key}; \
         select \"custom\" to enter it by hand"
    )]
    LimitNotEditable { id: RadionuclideId, key: String },

    #[error(transparent)]
    InvalidChoice(#[from] ModelError),
}

/// Result of applying an edit.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The recomputed task differs from the input.
    Changed(Task),
    /// The edit had no observable effect.
    Unchanged,
}

impl EditOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, EditOutcome::Changed(_))
    }

    pub fn into_task(self) -> Option<Task> {
        match self {
            EditOutcome::Changed(task) => Some(task),
            EditOutcome::Unchanged => None,
        }
    }
}

/// Applies `edit` to a copy of `task` and recomputes it.
///
/// On error the input task is untouched. Nuclide selections are resolved
/// through `table`.
pub fn apply_edit<L>(task: &Task, edit: &FieldEdit, table: &L) -> Result<EditOutcome, EditError>
where
    L: NuclideLookup + ?Sized,
{
    let mut next = task.clone();
    write_field(&mut next, edit, table)?;
    recompute_in_place(&mut next);
    if next == *task {
        debug!(task = %task.id, path = %edit.path, "edit left task unchanged");
        return Ok(EditOutcome::Unchanged);
    }
    debug!(task = %task.id, path = %edit.path, value = %edit.value, "applied edit");
    Ok(EditOutcome::Changed(next))
}

fn write_field<L>(task: &mut Task, edit: &FieldEdit, table: &L) -> Result<(), EditError>
where
    L: NuclideLookup + ?Sized,
{
    match edit.path {
        FieldPath::Title => task.title = text(edit)?,
        FieldPath::Time(TimeField::Location) => task.time.location = text(edit)?,
        FieldPath::Time(TimeField::NumWorkers) => task.time.num_workers = whole(edit)?,
        FieldPath::Time(TimeField::HoursPerWorker) => task.time.hours_per_worker = amount(edit)?,
        FieldPath::DirectExposureRate => task.external.direct_exposure_rate = amount(edit)?,
        FieldPath::Trigger(trigger) => task.triggers.set(trigger, flag(edit)?),
        FieldPath::Resuspension(factor) => task.resuspension.set(factor, amount(edit)?),
        FieldPath::Extremity { id, field } => {
            let entry = task
                .extremity
                .entry_mut(id)
                .ok_or(EditError::UnknownExtremity(id))?;
            match field {
                ExtremityField::Nuclide => select_extremity_nuclide(entry, &text(edit)?, table)?,
                ExtremityField::Name => entry.name = text(edit)?,
                ExtremityField::HoursPerWorker => entry.hours_per_worker = amount(edit)?,
                ExtremityField::DoseRate => entry.dose_rate = amount(edit)?,
            }
        }
        FieldPath::DosimetryPrescribed => task.extremity.dosimetry_prescribed = flag(edit)?,
        FieldPath::ExtremityComments => task.extremity.comments = text(edit)?,
        FieldPath::Radionuclide { id, field } => {
            let entry = &mut task
                .radionuclide_mut(id)
                .ok_or(EditError::UnknownRadionuclide(id))?
                .entry;
            match field {
                RadionuclideField::Nuclide => select_nuclide(entry, &text(edit)?, table)?,
                RadionuclideField::Name => entry.name = text(edit)?,
                RadionuclideField::Limit => {
                    if !entry.is_custom() {
                        return Err(EditError::LimitNotEditable {
                            id,
                            key: entry.nuclide_key.clone(),
                        });
                    }
                    entry.limit_value = amount(edit)?;
                }
                RadionuclideField::Contamination => entry.contamination_level = amount(edit)?,
            }
        }
        FieldPath::RespiratoryProtection => task.respiratory_protection = choice(edit)?,
        FieldPath::EngineeringProtection => task.engineering_protection = choice(edit)?,
        FieldPath::EngineeringControlsUsed => task.engineering_controls_used = flag(edit)?,
        FieldPath::Scenario { kind, field } => {
            let scenario = task.scenario_mut(kind);
            match field {
                ScenarioField::RespiratorPrescribed => {
                    scenario.respirator_prescribed = flag(edit)?;
                }
                ScenarioField::Explanation => scenario.explanation = text(edit)?,
            }
        }
        FieldPath::DacComments => task.dac.comments = text(edit)?,
    }
    Ok(())
}

/// Resolves a nuclide selection. `None` means the custom key.
fn resolve_nuclide<'a, L>(raw: &str, table: &'a L) -> Result<Option<&'a NuclideInfo>, EditError>
where
    L: NuclideLookup + ?Sized,
{
    let key = raw.trim();
    if is_custom_key(key) {
        return Ok(None);
    }
    table
        .lookup(key)
        .map(Some)
        .ok_or_else(|| EditError::UnknownNuclide(key.to_string()))
}

/// Copies name and limit from the table; the custom key keeps both.
fn select_nuclide<L>(entry: &mut RadionuclideEntry, raw: &str, table: &L) -> Result<(), EditError>
where
    L: NuclideLookup + ?Sized,
{
    match resolve_nuclide(raw, table)? {
        Some(info) => {
            entry.nuclide_key = info.key.clone();
            entry.name = info.display_name.clone();
            entry.limit_value = info.limit_value.unwrap_or(0.0);
        }
        None => entry.nuclide_key = CUSTOM_NUCLIDE_KEY.to_string(),
    }
    Ok(())
}

fn select_extremity_nuclide<L>(
    entry: &mut ExtremityEntry,
    raw: &str,
    table: &L,
) -> Result<(), EditError>
where
    L: NuclideLookup + ?Sized,
{
    match resolve_nuclide(raw, table)? {
        Some(info) => {
            entry.nuclide_key = info.key.clone();
            entry.name = info.display_name.clone();
        }
        None => entry.nuclide_key = CUSTOM_NUCLIDE_KEY.to_string(),
    }
    Ok(())
}

fn mismatch(edit: &FieldEdit, expected: &'static str) -> EditError {
    EditError::TypeMismatch {
        path: edit.path,
        expected,
        found: edit.value.type_name(),
    }
}

fn text(edit: &FieldEdit) -> Result<String, EditError> {
    match &edit.value {
        FieldValue::Text(value) => Ok(value.clone()),
        _ => Err(mismatch(edit, "text")),
    }
}

fn flag(edit: &FieldEdit) -> Result<bool, EditError> {
    match edit.value {
        FieldValue::Bool(value) => Ok(value),
        _ => Err(mismatch(edit, "boolean")),
    }
}

/// Finite, non-negative number.
fn amount(edit: &FieldEdit) -> Result<f64, EditError> {
    let FieldValue::Number(value) = edit.value else {
        return Err(mismatch(edit, "number"));
    };
    if !value.is_finite() {
        return Err(EditError::NonFinite {
            path: edit.path,
            value,
        });
    }
    if value < 0.0 {
        return Err(EditError::Negative {
            path: edit.path,
            value,
        });
    }
    Ok(value)
}

fn whole(edit: &FieldEdit) -> Result<u32, EditError> {
    let value = amount(edit)?;
    if value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(EditError::NotWhole {
            path: edit.path,
            value,
        });
    }
    Ok(value as u32)
}

/// Protection selections accept the option name or its factor.
fn choice<T>(edit: &FieldEdit) -> Result<T, EditError>
where
    T: FromStr<Err = ModelError>,
{
    match &edit.value {
        FieldValue::Text(name) => Ok(name.parse()?),
        FieldValue::Number(factor) => Ok(factor.to_string().parse()?),
        FieldValue::Bool(_) => Err(mismatch(edit, "choice")),
    }
}

/// Current value of an input field, or `None` when the path names an entry
/// the task does not have.
pub fn current_value(task: &Task, path: &FieldPath) -> Option<FieldValue> {
    let text = |value: &str| Some(FieldValue::Text(value.to_string()));
    let number = |value: f64| Some(FieldValue::Number(value));
    let flag = |value: bool| Some(FieldValue::Bool(value));
    match *path {
        FieldPath::Title => text(&task.title),
        FieldPath::Time(TimeField::Location) => text(&task.time.location),
        FieldPath::Time(TimeField::NumWorkers) => number(f64::from(task.time.num_workers)),
        FieldPath::Time(TimeField::HoursPerWorker) => number(task.time.hours_per_worker),
        FieldPath::DirectExposureRate => number(task.external.direct_exposure_rate),
        FieldPath::Trigger(trigger) => flag(task.triggers.get(trigger)),
        FieldPath::Resuspension(factor) => number(task.resuspension.get(factor)),
        FieldPath::Extremity { id, field } => {
            let entry = task.extremity.entry(id)?;
            match field {
                ExtremityField::Nuclide => text(&entry.nuclide_key),
                ExtremityField::Name => text(&entry.name),
                ExtremityField::HoursPerWorker => number(entry.hours_per_worker),
                ExtremityField::DoseRate => number(entry.dose_rate),
            }
        }
        FieldPath::DosimetryPrescribed => flag(task.extremity.dosimetry_prescribed),
        FieldPath::ExtremityComments => text(&task.extremity.comments),
        FieldPath::Radionuclide { id, field } => {
            let entry = &task.radionuclide(id)?.entry;
            match field {
                RadionuclideField::Nuclide => text(&entry.nuclide_key),
                RadionuclideField::Name => text(&entry.name),
                RadionuclideField::Limit => number(entry.limit_value),
                RadionuclideField::Contamination => number(entry.contamination_level),
            }
        }
        FieldPath::RespiratoryProtection => text(task.respiratory_protection.as_str()),
        FieldPath::EngineeringProtection => text(task.engineering_protection.as_str()),
        FieldPath::EngineeringControlsUsed => flag(task.engineering_controls_used),
        FieldPath::Scenario { kind, field } => {
            let scenario = task.scenario(kind);
            match field {
                ScenarioField::RespiratorPrescribed => flag(scenario.respirator_prescribed),
                ScenarioField::Explanation => text(&scenario.explanation),
            }
        }
        FieldPath::DacComments => text(&task.dac.comments),
    }
}

/// Lenient parse of typed numeric input.
///
/// Empty input is zero; anything that does not parse to a finite number
/// keeps `previous`.
pub fn coerce_numeric_input(raw: &str, previous: f64) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warn!(input = raw, previous, "ignored unparseable numeric input");
            previous
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dose_model::{EngineeringProtection, RespiratoryProtection, TaskId, TriggerFlag};

    fn table() -> Vec<NuclideInfo> {
        vec![
            NuclideInfo {
                key: "Co-60".to_string(),
                display_name: "Cobalt-60 (Co-60)".to_string(),
                limit_value: Some(1e-8),
            },
            NuclideInfo {
                key: CUSTOM_NUCLIDE_KEY.to_string(),
                display_name: "Custom/Other".to_string(),
                limit_value: None,
            },
        ]
    }

    fn task() -> Task {
        crate::engine::recompute(&Task::new(TaskId::new(1), "Edit"))
    }

    fn first_nuclide(task: &Task) -> RadionuclideId {
        task.radionuclide_ids().next().expect("radionuclide")
    }

    fn changed(outcome: EditOutcome) -> Task {
        outcome.into_task().expect("edit should change the task")
    }

    #[test]
    fn rejects_wrong_value_types() {
        let edit = FieldEdit::text(FieldPath::DirectExposureRate, "ten");
        let err = apply_edit(&task(), &edit, &table()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "external.direct_exposure_rate takes a number value, got a text"
        );
    }

    #[test]
    fn rejects_negative_and_non_finite_numbers() {
        let path = FieldPath::Time(TimeField::HoursPerWorker);
        assert!(matches!(
            apply_edit(&task(), &FieldEdit::number(path, -1.0), &table()),
            Err(EditError::Negative { .. })
        ));
        assert!(matches!(
            apply_edit(&task(), &FieldEdit::number(path, f64::NAN), &table()),
            Err(EditError::NonFinite { .. })
        ));
    }

    #[test]
    fn worker_count_must_be_whole() {
        let path = FieldPath::Time(TimeField::NumWorkers);
        assert!(matches!(
            apply_edit(&task(), &FieldEdit::number(path, 2.5), &table()),
            Err(EditError::NotWhole { .. })
        ));
        let edit = FieldEdit::number(path, 3.0);
        let task = changed(apply_edit(&task(), &edit, &table()).expect("edit"));
        assert_eq!(task.time.num_workers, 3);
    }

    #[test]
    fn same_value_reports_unchanged() {
        let task = task();
        let edit = FieldEdit::flag(FieldPath::Trigger(TriggerFlag::ShieldingLeaks), false);
        assert_eq!(apply_edit(&task, &edit, &table()), Ok(EditOutcome::Unchanged));
    }

    #[test]
    fn selecting_a_nuclide_copies_name_and_limit() {
        let task = task();
        let id = first_nuclide(&task);
        let path = FieldPath::Radionuclide {
            id,
            field: RadionuclideField::Nuclide,
        };
        let edit = FieldEdit::text(path, "co-60");
        let task = changed(apply_edit(&task, &edit, &table()).expect("edit"));
        let entry = &task.radionuclide(id).expect("record").entry;
        assert_eq!(entry.nuclide_key, "Co-60");
        assert_eq!(entry.name, "Cobalt-60 (Co-60)");
        assert_eq!(entry.limit_value, 1e-8);

        let edit = FieldEdit::text(path, "custom");
        let task = changed(apply_edit(&task, &edit, &table()).expect("edit"));
        let entry = &task.radionuclide(id).expect("record").entry;
        assert!(entry.is_custom());
        assert_eq!(entry.name, "Cobalt-60 (Co-60)");
        assert_eq!(entry.limit_value, 1e-8);
    }

    #[test]
    fn unknown_nuclide_is_rejected() {
        let task = task();
        let path = FieldPath::Radionuclide {
            id: first_nuclide(&task),
            field: RadionuclideField::Nuclide,
        };
        assert_eq!(
            apply_edit(&task, &FieldEdit::text(path, "Xx-999"), &table()),
            Err(EditError::UnknownNuclide("Xx-999".to_string()))
        );
    }

    #[test]
    fn limit_is_locked_for_table_nuclides() {
        let task = task();
        let id = first_nuclide(&task);
        let select = FieldEdit::text(
            FieldPath::Radionuclide {
                id,
                field: RadionuclideField::Nuclide,
            },
            "Co-60",
        );
        let task = changed(apply_edit(&task, &select, &table()).expect("select"));
        let limit = FieldEdit::number(
            FieldPath::Radionuclide {
                id,
                field: RadionuclideField::Limit,
            },
            1.0,
        );
        assert!(matches!(
            apply_edit(&task, &limit, &table()),
            Err(EditError::LimitNotEditable { .. })
        ));
    }

    #[test]
    fn extremity_selection_copies_name_only() {
        let task = task();
        let id = task.extremity.entries()[0].id();
        let edit = FieldEdit::text(
            FieldPath::Extremity {
                id,
                field: ExtremityField::Nuclide,
            },
            "Co-60",
        );
        let task = changed(apply_edit(&task, &edit, &table()).expect("edit"));
        let entry = task.extremity.entry(id).expect("entry");
        assert_eq!(entry.nuclide_key, "Co-60");
        assert_eq!(entry.name, "Cobalt-60 (Co-60)");
        assert_eq!(entry.dose_rate, 0.0);
    }

    #[test]
    fn unknown_entries_are_reported() {
        let edit = FieldEdit::number(
            FieldPath::Extremity {
                id: ExtremityId::new(9),
                field: ExtremityField::DoseRate,
            },
            1.0,
        );
        assert_eq!(
            apply_edit(&task(), &edit, &table()),
            Err(EditError::UnknownExtremity(ExtremityId::new(9)))
        );
    }

    #[test]
    fn protection_accepts_names_and_factors() {
        let edit = FieldEdit::text(FieldPath::RespiratoryProtection, "PAPR");
        let task = changed(apply_edit(&task(), &edit, &table()).expect("edit"));
        assert_eq!(task.respiratory_protection, RespiratoryProtection::Papr);

        let edit = FieldEdit::number(FieldPath::EngineeringProtection, 1000.0);
        let task = changed(apply_edit(&task, &edit, &table()).expect("edit"));
        assert_eq!(task.engineering_protection, EngineeringProtection::TypeII);

        let edit = FieldEdit::number(FieldPath::EngineeringProtection, 7.0);
        assert!(matches!(
            apply_edit(&task, &edit, &table()),
            Err(EditError::InvalidChoice(_))
        ));
    }

    #[test]
    fn current_value_reads_inputs() {
        let task = task();
        assert_eq!(
            current_value(&task, &FieldPath::Title),
            Some(FieldValue::Text("Edit".to_string()))
        );
        assert_eq!(
            current_value(&task, &FieldPath::EngineeringProtection),
            Some(FieldValue::Text("type-i".to_string()))
        );
        let missing = FieldPath::Radionuclide {
            id: RadionuclideId::new(42),
            field: RadionuclideField::Name,
        };
        assert_eq!(current_value(&task, &missing), None);
    }

    #[test]
    fn numeric_input_coercion() {
        assert_eq!(coerce_numeric_input("", 5.0), 0.0);
        assert_eq!(coerce_numeric_input("  ", 5.0), 0.0);
        assert_eq!(coerce_numeric_input("2.5", 5.0), 2.5);
        assert_eq!(coerce_numeric_input("1e-3", 5.0), 1e-3);
        assert_eq!(coerce_numeric_input("abc", 5.0), 5.0);
        assert_eq!(coerce_numeric_input("inf", 5.0), 5.0);
    }
}
