//! Subcommands against worksheet files on disk.

use std::path::{Path, PathBuf};

use dose_cli::cli::{AddTaskArgs, SetArgs};
use dose_cli::commands::{run_add_task, run_set};
use dose_cli::document::{load_worksheet, save_worksheet};
use dose_core::{Worksheet, current_value};
use dose_model::{FieldPath, FieldValue, TaskId};
use tempfile::TempDir;

fn new_worksheet(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("job.json");
    save_worksheet(&path, &Worksheet::with_default_task()).expect("save");
    path
}

fn set(path: &Path, field: &str, value: &str) -> anyhow::Result<()> {
    let args = SetArgs {
        worksheet: path.to_path_buf(),
        task: "task-1".to_string(),
        path: field.to_string(),
        value: value.to_string(),
    };
    run_set(&args, None)
}

fn saved_value(path: &Path, field: &str) -> Option<FieldValue> {
    let worksheet = load_worksheet(path).expect("load");
    let task = worksheet.task(TaskId::new(1)).expect("task-1");
    let field: FieldPath = field.parse().expect("field path");
    current_value(task, &field)
}

#[test]
fn set_saves_numbers_and_recomputes() {
    let dir = TempDir::new().expect("temp dir");
    let path = new_worksheet(&dir);

    set(&path, "time.num_workers", "2").expect("workers");
    set(&path, "time.hours_per_worker", " 4 ").expect("hours");
    set(&path, "external.direct_exposure_rate", "10").expect("rate");

    assert_eq!(
        saved_value(&path, "time.hours_per_worker"),
        Some(FieldValue::Number(4.0))
    );
    let worksheet = load_worksheet(&path).expect("load");
    assert_eq!(worksheet.total_effective_dose(), 80.0);
    assert!(worksheet.reference_fingerprint().is_some());
}

#[test]
fn set_coerces_numeric_text_against_the_saved_value() {
    let dir = TempDir::new().expect("temp dir");
    let path = new_worksheet(&dir);
    let field = "time.hours_per_worker";

    set(&path, field, "4").expect("hours");
    set(&path, field, "four").expect("unparseable input is not an error");
    assert_eq!(saved_value(&path, field), Some(FieldValue::Number(4.0)));

    set(&path, field, "inf").expect("non-finite input is not an error");
    assert_eq!(saved_value(&path, field), Some(FieldValue::Number(4.0)));

    set(&path, field, "").expect("empty input");
    assert_eq!(saved_value(&path, field), Some(FieldValue::Number(0.0)));
}

#[test]
fn set_parses_non_numeric_fields() {
    let dir = TempDir::new().expect("temp dir");
    let path = new_worksheet(&dir);

    set(&path, "title", "Filter change").expect("title");
    set(&path, "protection.controls_used", "yes").expect("controls");

    assert_eq!(
        saved_value(&path, "title"),
        Some(FieldValue::Text("Filter change".to_string()))
    );
    assert_eq!(
        saved_value(&path, "protection.controls_used"),
        Some(FieldValue::Bool(true))
    );
    let err = set(&path, "protection.controls_used", "maybe").expect_err("not a boolean");
    assert_eq!(
        saved_value(&path, "protection.controls_used"),
        Some(FieldValue::Bool(true)),
        "{err:#}"
    );
}

#[test]
fn set_rejects_unknown_targets_without_saving() {
    let dir = TempDir::new().expect("temp dir");
    let path = new_worksheet(&dir);
    let before = std::fs::read_to_string(&path).expect("read");

    let args = SetArgs {
        worksheet: path.clone(),
        task: "task-9".to_string(),
        path: "time.num_workers".to_string(),
        value: "3".to_string(),
    };
    let err = run_set(&args, None).expect_err("unknown task");
    assert_eq!(format!("{err:#}"), "no task with id task-9");

    let err = set(&path, "time.person_hours", "3").expect_err("derived field");
    assert!(format!("{err:#}").starts_with("field path time.person_hours"), "{err:#}");

    assert_eq!(std::fs::read_to_string(&path).expect("read"), before);
}

#[test]
fn add_task_fails_once_task_ids_run_out() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("job.json");
    let mut json = serde_json::to_value(Worksheet::with_default_task()).expect("serialize");
    json["next_task"] = serde_json::json!(u32::MAX);
    std::fs::write(&path, json.to_string()).expect("write");

    let args = AddTaskArgs {
        worksheet: path.clone(),
        title: None,
    };
    let err = run_add_task(&args).expect_err("exhausted");
    assert_eq!(format!("{err:#}"), "no task identifiers left in this worksheet");
    assert_eq!(load_worksheet(&path).expect("load").tasks().len(), 1);
}
