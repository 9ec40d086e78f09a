use serde::{Deserialize, Serialize};

/// Nuclide key for user-defined entries whose limit is entered by hand.
pub const CUSTOM_NUCLIDE_KEY: &str = "custom";

/// One row of the regulatory reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuclideInfo {
    pub key: String,
    pub display_name: String,
    /// Inhalation DAC in µCi/cm³. `None` for the custom row.
    pub limit_value: Option<f64>,
}

impl NuclideInfo {
    pub fn is_custom(&self) -> bool {
        is_custom_key(&self.key)
    }
}

/// Read-only lookup into the reference table, keyed by nuclide key.
pub trait NuclideLookup {
    fn lookup(&self, key: &str) -> Option<&NuclideInfo>;
}

impl NuclideLookup for [NuclideInfo] {
    fn lookup(&self, key: &str) -> Option<&NuclideInfo> {
        self.iter().find(|info| info.key.eq_ignore_ascii_case(key))
    }
}

impl NuclideLookup for Vec<NuclideInfo> {
    fn lookup(&self, key: &str) -> Option<&NuclideInfo> {
        self.as_slice().lookup(key)
    }
}

/// Keys compare without regard to ASCII case, as in [`NuclideLookup`].
pub fn is_custom_key(key: &str) -> bool {
    key.eq_ignore_ascii_case(CUSTOM_NUCLIDE_KEY)
}
