//! Inhalation DAC reference table.
//!
//! Values come from 10 CFR 835, Appendix A (stochastic inhalation DAC, in
//! µCi/cm³); where several absorption types are listed the most conservative
//! value is kept. The table is immutable once loaded.

use std::collections::BTreeMap;
use std::path::Path;

use dose_model::{CUSTOM_NUCLIDE_KEY, NuclideInfo, NuclideLookup, is_custom_key};
use tracing::debug;

use crate::error::StandardsError;
use crate::hash::sha256_hex;

const EMBEDDED_TABLE: &str = include_str!("../data/nuclides.csv");
const EMBEDDED_SOURCE: &str = "embedded:nuclides.csv";

const KEY_COLUMN: &str = "Key";
const NAME_COLUMN: &str = "Display Name";
const LIMIT_COLUMN: &str = "DAC (uCi/cm3)";

const CUSTOM_DISPLAY_NAME: &str = "Custom/Other";

#[derive(Debug, Clone)]
pub struct NuclideTable {
    source: String,
    fingerprint: String,
    entries: Vec<NuclideInfo>,
    by_key: BTreeMap<String, usize>,
}

impl NuclideTable {
    /// The table shipped with the crate.
    pub fn embedded() -> Result<Self, StandardsError> {
        Self::from_csv_bytes(EMBEDDED_SOURCE, EMBEDDED_TABLE.as_bytes())
    }

    pub fn load(path: &Path) -> Result<Self, StandardsError> {
        let bytes = std::fs::read(path).map_err(|e| StandardsError::io(path, e))?;
        Self::from_csv_bytes(&path.display().to_string(), &bytes)
    }

    /// Loads `path` when given, the embedded table otherwise.
    pub fn load_or_embedded(path: Option<&Path>) -> Result<Self, StandardsError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::embedded(),
        }
    }

    /// Parses `Key`, `Display Name`, `DAC (uCi/cm3)` rows.
    ///
    /// A custom row is added when the source does not define one.
    pub fn from_csv_bytes(source: &str, bytes: &[u8]) -> Result<Self, StandardsError> {
        let csv_error = |e: csv::Error| StandardsError::Csv {
            source_name: source.to_string(),
            message: e.to_string(),
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes);
        let headers = reader.headers().map_err(csv_error)?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_matches('\u{feff}').trim() == name)
        };
        let key_idx = column(KEY_COLUMN);
        let name_idx = column(NAME_COLUMN);
        let limit_idx = column(LIMIT_COLUMN);

        let mut table = Self {
            source: source.to_string(),
            fingerprint: sha256_hex(bytes),
            entries: Vec::new(),
            by_key: BTreeMap::new(),
        };

        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(csv_error)?;
            let row = index as u64 + 1;
            let get = |idx: Option<usize>| {
                idx.and_then(|i| record.get(i))
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
            };
            let missing = |column: &'static str| StandardsError::MissingField {
                source_name: source.to_string(),
                row,
                column,
            };

            let key = get(key_idx).ok_or_else(|| missing(KEY_COLUMN))?;
            let display_name = get(name_idx).ok_or_else(|| missing(NAME_COLUMN))?;
            let limit_value = if is_custom_key(key) {
                None
            } else {
                let raw = get(limit_idx).ok_or_else(|| missing(LIMIT_COLUMN))?;
                let value = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite() && *v > 0.0)
                    .ok_or_else(|| StandardsError::InvalidLimit {
                        source_name: source.to_string(),
                        row,
                        key: key.to_string(),
                        value: raw.to_string(),
                    })?;
                Some(value)
            };

            let info = NuclideInfo {
                key: key.to_string(),
                display_name: display_name.to_string(),
                limit_value,
            };
            if !table.insert(info) {
                return Err(StandardsError::DuplicateKey {
                    source_name: source.to_string(),
                    row,
                    key: key.to_string(),
                });
            }
        }

        if !table.by_key.contains_key(&normalize_key(CUSTOM_NUCLIDE_KEY)) {
            table.insert(NuclideInfo {
                key: CUSTOM_NUCLIDE_KEY.to_string(),
                display_name: CUSTOM_DISPLAY_NAME.to_string(),
                limit_value: None,
            });
        }

        debug!(
            source = %table.source,
            nuclides = table.entries.len(),
            fingerprint = %table.fingerprint,
            "loaded nuclide reference table"
        );
        Ok(table)
    }

    fn insert(&mut self, info: NuclideInfo) -> bool {
        let normalized = normalize_key(&info.key);
        if self.by_key.contains_key(&normalized) {
            return false;
        }
        self.by_key.insert(normalized, self.entries.len());
        self.entries.push(info);
        true
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// SHA-256 of the raw table bytes, hex encoded.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = &NuclideInfo> {
        self.entries.iter()
    }

    /// Entries whose key or display name contains `needle` (case-insensitive).
    pub fn search<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a NuclideInfo> {
        let needle = needle.to_ascii_lowercase();
        self.entries.iter().filter(move |info| {
            info.key.to_ascii_lowercase().contains(&needle)
                || info.display_name.to_ascii_lowercase().contains(&needle)
        })
    }
}

impl NuclideLookup for NuclideTable {
    fn lookup(&self, key: &str) -> Option<&NuclideInfo> {
        self.by_key
            .get(&normalize_key(key))
            .and_then(|&index| self.entries.get(index))
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_loads() {
        let table = NuclideTable::embedded().expect("embedded table");
        assert!(table.len() > 300);
        let am = table.lookup("Am-241").expect("Am-241");
        assert_eq!(am.display_name, "Americium-241 (Am-241)");
        assert_eq!(am.limit_value, Some(5e-12));
    }

    #[test]
    fn lookup_ignores_case() {
        let table = NuclideTable::embedded().expect("embedded table");
        assert_eq!(
            table.lookup("cs-137").map(|info| info.key.as_str()),
            Some("Cs-137")
        );
    }

    #[test]
    fn custom_row_has_no_limit() {
        let table = NuclideTable::embedded().expect("embedded table");
        let custom = table.lookup(CUSTOM_NUCLIDE_KEY).expect("custom");
        assert!(custom.is_custom());
        assert_eq!(custom.limit_value, None);
    }
}
