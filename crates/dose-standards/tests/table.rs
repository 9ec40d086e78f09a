use std::fs;

use dose_model::NuclideLookup;
use dose_standards::{NuclideTable, StandardsError};

#[test]
fn loads_override_file_and_adds_custom_row() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("site.csv");
    fs::write(
        &path,
        "\u{feff}\"Key\",\"Display Name\",\"DAC (uCi/cm3)\"\n\
         \"Co-60\",\"Cobalt-60 (Co-60)\",\"2e-9\"\n\
         \"Lab-X\",\"Site tracer\",\"1.5e-8\"\n",
    )
    .expect("write table");

    let table = NuclideTable::load(&path).expect("load table");
    assert_eq!(table.len(), 3);
    assert_eq!(
        table.lookup("lab-x").and_then(|info| info.limit_value),
        Some(1.5e-8)
    );
    assert!(table.lookup("custom").is_some_and(|info| info.is_custom()));
    assert!(table.lookup("Am-241").is_none());
    assert_eq!(table.source(), path.display().to_string());
}

#[test]
fn custom_row_is_recognised_in_any_case() {
    let table = NuclideTable::from_csv_bytes(
        "site",
        b"Key,Display Name,DAC (uCi/cm3)\nCustom,Custom/Other,\nH-3,Tritium,2e-5\n",
    )
    .expect("custom row needs no limit");
    assert_eq!(table.len(), 2);
    let custom = table.lookup("custom").expect("custom row");
    assert!(custom.is_custom());
    assert_eq!(custom.key, "Custom");
    assert_eq!(custom.limit_value, None);
}

#[test]
fn fingerprint_tracks_content() {
    let a = NuclideTable::from_csv_bytes("a", b"Key,Display Name,DAC (uCi/cm3)\nH-3,Tritium,2e-5\n")
        .expect("table a");
    let b = NuclideTable::from_csv_bytes("b", b"Key,Display Name,DAC (uCi/cm3)\nH-3,Tritium,2e-5\n")
        .expect("table b");
    let c = NuclideTable::from_csv_bytes("c", b"Key,Display Name,DAC (uCi/cm3)\nH-3,Tritium,3e-5\n")
        .expect("table c");
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());
    assert_eq!(a.fingerprint().len(), 64);
}

#[test]
fn rejects_non_positive_limits() {
    let err = NuclideTable::from_csv_bytes(
        "bad",
        b"Key,Display Name,DAC (uCi/cm3)\nH-3,Tritium,0\n",
    )
    .unwrap_err();
    assert!(matches!(err, StandardsError::InvalidLimit { row: 1, .. }));
}

#[test]
fn rejects_duplicate_keys_case_insensitively() {
    let err = NuclideTable::from_csv_bytes(
        "dup",
        b"Key,Display Name,DAC (uCi/cm3)\nH-3,Tritium,2e-5\nh-3,Tritium again,2e-5\n",
    )
    .unwrap_err();
    assert!(matches!(err, StandardsError::DuplicateKey { row: 2, .. }));
}

#[test]
fn rejects_missing_display_name() {
    let err =
        NuclideTable::from_csv_bytes("short", b"Key,Display Name,DAC (uCi/cm3)\nH-3,,2e-5\n")
            .unwrap_err();
    assert!(err.to_string().contains("missing Display Name"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = NuclideTable::load(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, StandardsError::Io { .. }));
}

#[test]
fn search_matches_key_and_name() {
    let table = NuclideTable::embedded().expect("embedded table");
    let keys: Vec<_> = table.search("cobalt").map(|info| info.key.as_str()).collect();
    assert!(keys.contains(&"Co-60"));
    assert!(table.search("CO-60").any(|info| info.key == "Co-60"));
}
