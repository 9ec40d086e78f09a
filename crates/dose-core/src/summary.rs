//! Task summary and DAC posting decisions.

use dose_model::{EngineeringProtection, SummarySection, Task};

use crate::constants::{AIR_SAMPLING_THRESHOLD, POSTING_THRESHOLD, WORKER_INEFFICIENCY_FACTOR};
use crate::scenario::finite;

/// Posting requirements implied by a DAC fraction total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DacPosting {
    pub air_sampling_required: bool,
    pub posted_ara: bool,
}

impl DacPosting {
    pub fn from_total(total: f64) -> Self {
        Self {
            air_sampling_required: total >= AIR_SAMPLING_THRESHOLD,
            posted_ara: total >= POSTING_THRESHOLD,
        }
    }
}

/// Engineering factor applied to DAC fractions.
///
/// The selected protection only counts once the task says controls are in
/// use; otherwise the open-bench factor applies.
pub fn dac_engineering_factor(task: &Task) -> f64 {
    if task.engineering_controls_used {
        task.engineering_protection.factor()
    } else {
        EngineeringProtection::TypeI.factor()
    }
}

/// Builds the summary from the external exposure and the active scenario.
pub fn summarize(task: &Task) -> SummarySection {
    let scenario = task.scenario(task.active_scenario_kind());
    let external_exposure = task.external.external_exposure;
    let internal_exposure = scenario.selected_total();
    let effective_dose = match (external_exposure, internal_exposure) {
        (Some(external), Some(internal)) if scenario.respirator_prescribed => {
            finite((external + internal) * WORKER_INEFFICIENCY_FACTOR)
        }
        (Some(external), Some(internal)) => finite(external + internal),
        _ => None,
    };
    SummarySection {
        external_exposure,
        internal_exposure,
        effective_dose,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dose_model::{ScenarioKind, TaskId};

    #[test]
    fn posting_thresholds_are_inclusive() {
        assert_eq!(DacPosting::from_total(0.29999), DacPosting::default());
        assert_eq!(
            DacPosting::from_total(0.3),
            DacPosting {
                air_sampling_required: true,
                posted_ara: false,
            }
        );
        assert_eq!(
            DacPosting::from_total(1.0),
            DacPosting {
                air_sampling_required: true,
                posted_ara: true,
            }
        );
    }

    #[test]
    fn dac_factor_follows_controls_toggle() {
        let mut task = Task::new(TaskId::new(1), "Hood work");
        task.engineering_protection = EngineeringProtection::TypeII;
        assert_eq!(dac_engineering_factor(&task), 1.0);
        task.engineering_controls_used = true;
        assert_eq!(dac_engineering_factor(&task), 1000.0);
    }

    #[test]
    fn summary_reads_the_active_scenario() {
        let mut task = Task::new(TaskId::new(1), "Summary");
        task.external.external_exposure = Some(10.0);
        let without = task.scenario_mut(ScenarioKind::WithoutControls);
        without.total_without_respirator = Some(4.0);
        without.total_with_respirator = Some(2.0);
        let with = task.scenario_mut(ScenarioKind::WithControls);
        with.total_without_respirator = Some(6.0);
        with.total_with_respirator = Some(1.0);
        with.respirator_prescribed = true;

        assert_eq!(summarize(&task).effective_dose, Some(14.0));

        task.engineering_controls_used = true;
        let summary = summarize(&task);
        assert_eq!(summary.internal_exposure, Some(1.0));
        let effective = summary.effective_dose.expect("computed");
        assert!((effective - 11.0 * 1.15).abs() < 1e-12);
    }

    #[test]
    fn missing_external_leaves_effective_dose_uncomputed() {
        let mut task = Task::new(TaskId::new(1), "Summary");
        task.without_controls.total_without_respirator = Some(3.0);
        let summary = summarize(&task);
        assert_eq!(summary.internal_exposure, Some(3.0));
        assert_eq!(summary.effective_dose, None);
    }
}
