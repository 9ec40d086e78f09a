//! Property tests for the recompute engine.

use dose_core::{EditOutcome, apply_edit, recompute};
use dose_model::{
    EngineeringProtection, FieldEdit, FieldPath, NuclideInfo, RadionuclideField,
    RespiratoryProtection, ResuspensionFactor, ScenarioKind, Task, TaskId,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct NuclideInput {
    limit: f64,
    contamination: f64,
}

/// Typical magnitudes, exact zero, and values whose products overflow.
fn amount(typical: f64) -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(0.0),
        6 => 0.0..typical,
        2 => 1e100..f64::MAX,
    ]
}

fn nuclide() -> impl Strategy<Value = NuclideInput> {
    (
        prop_oneof![Just(0.0), 1e-14..1e-6f64, 1e-320..1e-300f64],
        amount(1e4),
    )
        .prop_map(|(limit, contamination)| NuclideInput {
            limit,
            contamination,
        })
}

prop_compose! {
    fn task()(
        workers in prop_oneof![0u32..20, Just(u32::MAX)],
        hours in amount(100.0),
        rate in amount(500.0),
        factors in proptest::array::uniform6(amount(10.0)),
        nuclides in proptest::collection::vec(nuclide(), 1..5),
        extremities in proptest::collection::vec((amount(50.0), amount(100.0)), 1..4),
        respiratory in proptest::sample::select(RespiratoryProtection::ALL.to_vec()),
        engineering in proptest::sample::select(EngineeringProtection::ALL.to_vec()),
        controls_used in any::<bool>(),
        prescribed in any::<(bool, bool)>()
    ) -> Task {
        let mut task = Task::new(TaskId::new(1), "Property");
        task.time.num_workers = workers;
        task.time.hours_per_worker = hours;
        task.external.direct_exposure_rate = rate;
        for (factor, value) in ResuspensionFactor::ALL.into_iter().zip(factors) {
            task.resuspension.set(factor, value);
        }

        let mut ids: Vec<_> = task.radionuclide_ids().collect();
        while ids.len() < nuclides.len() {
            ids.push(task.add_radionuclide().expect("fresh counter"));
        }
        for (id, input) in ids.into_iter().zip(&nuclides) {
            let entry = &mut task.radionuclide_mut(id).expect("allocated id").entry;
            entry.limit_value = input.limit;
            entry.contamination_level = input.contamination;
        }

        while task.extremity.entries().len() < extremities.len() {
            task.add_extremity().expect("fresh counter");
        }
        for (entry, (hours, rate)) in task.extremity.entries_mut().zip(extremities) {
            entry.hours_per_worker = hours;
            entry.dose_rate = rate;
        }

        task.respiratory_protection = respiratory;
        task.engineering_protection = engineering;
        task.engineering_controls_used = controls_used;
        task.without_controls.respirator_prescribed = prescribed.0;
        task.with_controls.respirator_prescribed = prescribed.1;
        task
    }
}

fn finite(value: Option<f64>) -> bool {
    value.is_none_or(f64::is_finite)
}

proptest! {
    #[test]
    fn recompute_is_idempotent(task in task()) {
        let once = recompute(&task);
        let twice = recompute(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn derived_values_are_finite(task in task()) {
        let task = recompute(&task);
        prop_assert!(finite(task.resuspension.mpif));
        prop_assert!(finite(task.time.person_hours));
        prop_assert!(finite(task.external.external_exposure));
        prop_assert!(finite(task.extremity.total_dose));
        prop_assert!(task.extremity.entries().iter().all(|entry| finite(entry.dose)));
        prop_assert!(finite(task.summary.internal_exposure));
        prop_assert!(finite(task.summary.effective_dose));
        prop_assert!(finite(task.dac.total));
        for kind in ScenarioKind::ALL {
            let scenario = task.scenario(kind);
            prop_assert!(finite(scenario.total_without_respirator));
            prop_assert!(finite(scenario.total_with_respirator));
        }
        for (_, record) in task.radionuclides() {
            prop_assert!(finite(record.entry.airborne_concentration));
            prop_assert!(finite(record.entry.controlled_concentration));
            prop_assert!(finite(record.dac_fraction));
            for kind in ScenarioKind::ALL {
                let contribution = record.contribution(kind);
                prop_assert!(finite(contribution.without_respirator));
                prop_assert!(finite(contribution.with_respirator));
            }
        }
    }

    #[test]
    fn repeating_an_edit_is_unchanged(task in task(), contamination in 0.0..1e4f64) {
        let table: Vec<NuclideInfo> = Vec::new();
        let task = recompute(&task);
        let id = task.radionuclide_ids().next().expect("radionuclide");
        let edit = FieldEdit::number(
            FieldPath::Radionuclide { id, field: RadionuclideField::Contamination },
            contamination,
        );
        let first = match apply_edit(&task, &edit, &table).expect("valid edit") {
            EditOutcome::Changed(next) => next,
            EditOutcome::Unchanged => task,
        };
        prop_assert_eq!(apply_edit(&first, &edit, &table), Ok(EditOutcome::Unchanged));
    }
}
