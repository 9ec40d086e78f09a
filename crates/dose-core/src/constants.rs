//! Fixed coefficients of the dose formulas.

/// Base personnel intake fraction scaled by the resuspension factors, m⁻¹.
pub const BASE_INTAKE_FRACTION: f64 = 1e-6;

/// Disintegrations per minute in one microcurie.
pub const DPM_PER_MICROCURIE: f64 = 2.22e6;

/// Contamination is measured per 100 cm².
pub const SMEAR_AREA_CM2: f64 = 100.0;

/// Converts an intake fraction from m⁻¹ to cm⁻¹.
pub const CM_PER_M: f64 = 100.0;

/// Working hours in one DAC-year.
pub const HOURS_PER_DAC_YEAR: f64 = 2000.0;

/// Committed effective dose of one DAC-year, mrem.
pub const MREM_PER_DAC_YEAR: f64 = 5000.0;

/// Applied to the effective dose when a respirator is prescribed.
pub const WORKER_INEFFICIENCY_FACTOR: f64 = 1.15;

/// DAC fraction at which air sampling is required.
pub const AIR_SAMPLING_THRESHOLD: f64 = 0.3;

/// DAC fraction at which the area is posted as an airborne radioactivity area.
pub const POSTING_THRESHOLD: f64 = 1.0;
