//! Reference table source resolution.

use std::path::PathBuf;

/// Environment variable for overriding the built-in reference table.
pub const NUCLIDE_TABLE_ENV_VAR: &str = "DOSE_NUCLIDE_TABLE";

/// Resolve an override CSV for the reference table.
///
/// Resolution order:
/// 1. Explicit path (for example from a command-line flag)
/// 2. `DOSE_NUCLIDE_TABLE` environment variable
/// 3. `None`, meaning the embedded table
pub fn nuclide_table_override(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        std::env::var_os(NUCLIDE_TABLE_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
}
