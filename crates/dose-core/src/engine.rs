//! Recompute engine.
//!
//! Derives every computed field of a task from its inputs in one
//! dependency-ordered pass:
//!
//! 1. modified personnel intake fraction (mPIF)
//! 2. person-hours
//! 3. external exposure
//! 4. extremity doses
//! 5. airborne and controlled concentrations
//! 6. dose conversion factor
//! 7. both internal-dose scenarios and their totals
//! 8. DAC fractions and posting flags
//! 9. summary
//!
//! Every derived field is overwritten, so the result depends only on the
//! inputs and a second pass changes nothing. A quantity that cannot be
//! computed (zero or missing denominator, or a result outside the range of
//! `f64`) is `None`, never `NaN` or infinite.

use dose_model::{RadionuclideEntry, ScenarioKind, Task};
use tracing::debug;

use crate::constants::{
    BASE_INTAKE_FRACTION, CM_PER_M, DPM_PER_MICROCURIE, HOURS_PER_DAC_YEAR, MREM_PER_DAC_YEAR,
    SMEAR_AREA_CM2,
};
use crate::scenario::{self, ProtectionFactors, finite, usable_limit};
use crate::summary::{DacPosting, dac_engineering_factor, summarize};

/// Returns a copy of `task` with all derived fields recomputed.
pub fn recompute(task: &Task) -> Task {
    let mut next = task.clone();
    recompute_in_place(&mut next);
    next
}

/// Recomputes all derived fields of `task` in place.
pub fn recompute_in_place(task: &mut Task) {
    let mpif = finite(BASE_INTAKE_FRACTION * task.resuspension.product());
    task.resuspension.mpif = mpif;

    let person_hours = finite(f64::from(task.time.num_workers) * task.time.hours_per_worker);
    task.time.person_hours = person_hours;
    task.external.external_exposure =
        person_hours.and_then(|hours| finite(task.external.direct_exposure_rate * hours));

    let mut extremity_total = 0.0;
    for entry in task.extremity.entries_mut() {
        entry.dose = finite(entry.hours_per_worker * entry.dose_rate);
        extremity_total += entry.dose.unwrap_or(0.0);
    }
    task.extremity.total_dose = finite(extremity_total);

    let factors = ProtectionFactors::for_task(task);
    let dac_factor = dac_engineering_factor(task);
    let conversion = person_hours.and_then(|hours| finite(dose_conversion_factor(hours)));
    let controls = factors.respiratory * factors.engineering;
    for (_, record) in task.radionuclides_mut() {
        let airborne = airborne_concentration(&record.entry, mpif);
        record.entry.airborne_concentration = airborne;
        record.entry.controlled_concentration =
            airborne.and_then(|concentration| finite(concentration / controls));

        for kind in ScenarioKind::ALL {
            let contribution = scenario::evaluate(kind, &record.entry, factors, conversion);
            *record.contribution_mut(kind) = contribution;
        }
        record.dac_fraction = match (airborne, usable_limit(&record.entry)) {
            (Some(concentration), Some(limit)) => finite(concentration / dac_factor / limit),
            _ => None,
        };
    }
    scenario::total_scenarios(task);

    // Fractions are finite and non-negative, so an overflowing sum is +inf
    // and still posts.
    let dac_sum = task
        .dac_fractions()
        .filter_map(|(_, fraction)| fraction)
        .fold(0.0, |total, fraction| total + fraction);
    let posting = DacPosting::from_total(dac_sum);
    task.dac.total = finite(dac_sum);
    task.dac.air_sampling_required = posting.air_sampling_required;
    task.dac.posted_ara = posting.posted_ara;

    task.summary = summarize(task);

    debug!(
        task = %task.id,
        radionuclides = task.radionuclide_count(),
        extremity_entries = task.extremity.entries().len(),
        dac_total = ?task.dac.total,
        effective_dose = ?task.summary.effective_dose,
        "recomputed task"
    );
}

/// Airborne concentration in µCi/cm³ from surface contamination in
/// dpm/100 cm² and the intake fraction in m⁻¹.
///
/// Requires a positive contamination level and a positive limit.
pub fn airborne_concentration(entry: &RadionuclideEntry, mpif: Option<f64>) -> Option<f64> {
    let mpif = mpif?;
    if entry.contamination_level <= 0.0 || usable_limit(entry).is_none() {
        return None;
    }
    finite(entry.contamination_level / SMEAR_AREA_CM2 * mpif / CM_PER_M / DPM_PER_MICROCURIE)
}

/// Dose per unit DAC fraction for the task's person-hours, mrem.
pub fn dose_conversion_factor(person_hours: f64) -> f64 {
    person_hours / HOURS_PER_DAC_YEAR * MREM_PER_DAC_YEAR
}
