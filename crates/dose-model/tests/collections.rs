//! Tests for the collection synchronizer.

use std::collections::BTreeSet;

use dose_model::{Collection, RadionuclideId, ScenarioKind, SyncError, Task, TaskId};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add,
    /// Remove the n-th current entry (modulo the list length).
    Remove(usize),
    /// Remove an id that was never handed out.
    RemoveUnknown,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Add),
        3 => any::<usize>().prop_map(Op::Remove),
        1 => Just(Op::RemoveUnknown),
    ]
}

fn id_sets(task: &Task) -> [BTreeSet<RadionuclideId>; 4] {
    [
        task.radionuclide_ids().collect(),
        task.contributions(ScenarioKind::WithoutControls)
            .map(|(id, _)| id)
            .collect(),
        task.contributions(ScenarioKind::WithControls)
            .map(|(id, _)| id)
            .collect(),
        task.dac_fractions().map(|(id, _)| id).collect(),
    ]
}

proptest! {
    #[test]
    fn companions_track_radionuclides(ops in proptest::collection::vec(op(), 0..40)) {
        let mut task = Task::new(TaskId::new(1), "Property");
        let mut issued: BTreeSet<RadionuclideId> = task.radionuclide_ids().collect();

        for op in ops {
            match op {
                Op::Add => {
                    let id = task.add_radionuclide().expect("fresh counter");
                    prop_assert!(issued.insert(id), "id {} was reused", id);
                }
                Op::Remove(n) => {
                    let ids: Vec<_> = task.radionuclide_ids().collect();
                    let target = ids[n % ids.len()];
                    let result = task.remove_radionuclide(target);
                    if ids.len() == 1 {
                        prop_assert!(
                            matches!(result, Err(SyncError::LastEntry { .. })),
                            "expected the last removal to be rejected"
                        );
                        prop_assert_eq!(task.radionuclide_count(), 1);
                    } else {
                        prop_assert!(result.is_ok());
                    }
                }
                Op::RemoveUnknown => {
                    let before = task.clone();
                    let result = task.remove_radionuclide(RadionuclideId::new(u32::MAX));
                    prop_assert!(
                        matches!(result, Err(SyncError::UnknownEntry { .. })),
                        "unknown id must be rejected"
                    );
                    prop_assert_eq!(&task, &before);
                }
            }

            let [entries, without, with, dac] = id_sets(&task);
            prop_assert!(!entries.is_empty());
            prop_assert_eq!(&entries, &without);
            prop_assert_eq!(&entries, &with);
            prop_assert_eq!(&entries, &dac);
        }
    }
}

#[test]
fn removal_down_to_one_then_rejected() {
    let mut task = Task::new(TaskId::new(1), "Floor");
    let added: Vec<_> = (0..3)
        .map(|_| task.add_radionuclide().expect("add"))
        .collect();
    for id in &added {
        task.remove_radionuclide(*id).expect("remove added radionuclide");
    }
    assert_eq!(task.radionuclide_count(), 1);

    let only = task.radionuclide_ids().next().expect("one id");
    let err = task.remove_radionuclide(only).unwrap_err();
    assert_eq!(
        err,
        SyncError::LastEntry {
            collection: Collection::Radionuclide,
            id: only.to_string(),
        }
    );
    assert_eq!(task.radionuclide_ids().collect::<Vec<_>>(), vec![only]);
}

#[test]
fn extremity_floor_is_independent_of_radionuclides() {
    let mut task = Task::new(TaskId::new(1), "Floor");
    task.add_radionuclide().expect("add");
    let only = task.extremity.entries()[0].id();

    let err = task.remove_extremity(only).unwrap_err();
    assert!(err.to_string().contains("at least one extremity entry"));
    assert_eq!(task.radionuclide_count(), 2);
}

#[test]
fn validate_rejects_documents_with_empty_collections() {
    let task = Task::new(TaskId::new(1), "Loaded");
    let mut json = serde_json::to_value(&task).expect("serialize");
    json["radionuclides"] = serde_json::json!({});
    let loaded: Task = serde_json::from_value(json).expect("deserialize");
    assert!(loaded.validate().is_err());
}

#[test]
fn validate_rejects_counter_behind_ids() {
    let task = Task::new(TaskId::new(1), "Loaded");
    let mut json = serde_json::to_value(&task).expect("serialize");
    json["next_radionuclide"] = serde_json::json!(1);
    let loaded: Task = serde_json::from_value(json).expect("deserialize");
    let err = loaded.validate().unwrap_err();
    assert!(err.to_string().contains("counter"));
}
