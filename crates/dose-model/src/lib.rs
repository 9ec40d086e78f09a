#![deny(unsafe_code)]

//! Data model for the effective dose assessment worksheet.
//!
//! A [`Task`] owns every input and derived quantity for one unit of work.
//! Structural edits (adding or removing radionuclides and extremity entries)
//! go through the collection synchronizer in [`collections`]; calculations
//! live in `dose-core`.

pub mod collections;
pub mod error;
pub mod field;
pub mod ids;
pub mod lookup;
pub mod protection;
pub mod radionuclide;
pub mod scenario;
pub mod task;

pub use error::{Collection, ModelError, Result, SyncError};
pub use field::{
    ExtremityField, FieldEdit, FieldKind, FieldPath, FieldValue, RadionuclideField,
    ScenarioField, TimeField,
};
pub use ids::{ExtremityId, IdCounter, RadionuclideId, TaskId};
pub use lookup::{CUSTOM_NUCLIDE_KEY, NuclideInfo, NuclideLookup, is_custom_key};
pub use protection::{EngineeringProtection, RespiratoryProtection};
pub use radionuclide::{Contribution, RadionuclideEntry, RadionuclideRecord};
pub use scenario::{InternalDoseScenario, ScenarioKind};
pub use task::{
    DacFractionSection, ExternalDoseSection, ExtremityDoseSection, ExtremityEntry,
    ResuspensionFactor, ResuspensionFactors, SummarySection, Task, TimeSection, TriggerFlag,
    TriggerFlags,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_starts_uncomputed() {
        let task = Task::new(TaskId::new(1), "Glovebox cleanout");
        assert_eq!(task.resuspension.mpif, None);
        assert_eq!(task.time.person_hours, None);
        assert_eq!(task.summary.effective_dose, None);
        assert_eq!(task.active_scenario_kind(), ScenarioKind::WithoutControls);
        assert!(task.validate().is_ok());
    }

    #[test]
    fn task_serializes_ids_as_strings() {
        let task = Task::new(TaskId::new(3), "Task");
        let json = serde_json::to_value(&task).expect("serialize task");
        assert_eq!(json["id"], "task-3");
        assert!(json["radionuclides"].get("nuc-1").is_some());
        assert_eq!(json["extremity"]["entries"][0]["id"], "ext-1");
        let round: Task = serde_json::from_value(json).expect("deserialize task");
        assert_eq!(round, task);
    }
}
