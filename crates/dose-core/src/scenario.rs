//! Internal-dose scenario evaluation.
//!
//! Two fixed paths are computed on every recompute: without engineering
//! controls (engineering factor 1) and with the task's selected engineering
//! protection. Which one feeds the summary is decided later by
//! [`ScenarioKind::from_controls_used`].

use dose_model::{Contribution, RadionuclideEntry, ScenarioKind, Task};

/// Protection factors in effect for one recompute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProtectionFactors {
    /// PFR.
    pub respiratory: f64,
    /// PFE.
    pub engineering: f64,
}

impl ProtectionFactors {
    pub fn for_task(task: &Task) -> Self {
        Self {
            respiratory: task.respiratory_protection.factor(),
            engineering: task.engineering_protection.factor(),
        }
    }
}

/// Limit usable as a denominator, if any.
pub(crate) fn usable_limit(entry: &RadionuclideEntry) -> Option<f64> {
    Some(entry.limit_value).filter(|limit| *limit > 0.0)
}

/// `value` if it is a finite number.
pub(crate) fn finite(value: f64) -> Option<f64> {
    Some(value).filter(|value| value.is_finite())
}

/// Dose from breathing `concentration` against the entry's limit for the
/// task's person-hours, mrem.
fn inhalation_dose(concentration: f64, limit: f64, dose_conversion_factor: f64) -> Option<f64> {
    finite(concentration / limit * dose_conversion_factor)
}

/// One radionuclide's contribution to the given scenario.
///
/// Without a dose conversion factor (person-hours not computable) nothing is.
pub fn evaluate(
    kind: ScenarioKind,
    entry: &RadionuclideEntry,
    factors: ProtectionFactors,
    dose_conversion_factor: Option<f64>,
) -> Contribution {
    let Some(dose_conversion_factor) = dose_conversion_factor else {
        return Contribution::default();
    };
    match kind {
        ScenarioKind::WithoutControls => without_controls(entry, factors, dose_conversion_factor),
        ScenarioKind::WithControls => with_controls(entry, factors, dose_conversion_factor),
    }
}

fn without_controls(
    entry: &RadionuclideEntry,
    factors: ProtectionFactors,
    dose_conversion_factor: f64,
) -> Contribution {
    let without_respirator = match (entry.airborne_concentration, usable_limit(entry)) {
        (Some(concentration), Some(limit)) => {
            inhalation_dose(concentration, limit, dose_conversion_factor)
        }
        _ => None,
    };
    Contribution {
        without_respirator,
        with_respirator: without_respirator.and_then(|dose| finite(dose / factors.respiratory)),
    }
}

fn with_controls(
    entry: &RadionuclideEntry,
    factors: ProtectionFactors,
    dose_conversion_factor: f64,
) -> Contribution {
    let limit = usable_limit(entry);
    let without_respirator = match (entry.airborne_concentration, limit) {
        (Some(concentration), Some(limit)) => inhalation_dose(
            concentration / factors.engineering,
            limit,
            dose_conversion_factor,
        ),
        _ => None,
    };
    let with_respirator = match (entry.controlled_concentration, limit) {
        (Some(controlled), Some(limit)) => {
            inhalation_dose(controlled, limit, dose_conversion_factor)
        }
        _ => without_respirator.and_then(|dose| finite(dose / factors.respiratory)),
    };
    Contribution {
        without_respirator,
        with_respirator,
    }
}

/// Writes both scenario totals from the per-radionuclide contributions.
///
/// Uncomputed contributions add nothing; a total is only uncomputed when the
/// sum overflows.
pub(crate) fn total_scenarios(task: &mut Task) {
    for kind in ScenarioKind::ALL {
        let (without, with) = task.contributions(kind).fold(
            (0.0, 0.0),
            |(without, with), (_, contribution)| {
                (
                    without + contribution.without_respirator.unwrap_or(0.0),
                    with + contribution.with_respirator.unwrap_or(0.0),
                )
            },
        );
        let scenario = task.scenario_mut(kind);
        scenario.total_without_respirator = finite(without);
        scenario.total_with_respirator = finite(with);
    }
}
