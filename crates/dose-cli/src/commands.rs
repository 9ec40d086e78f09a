//! One function per subcommand: load the worksheet, change it, save it, print.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, warn};

use dose_core::{ReferenceCheck, Worksheet, coerce_numeric_input, current_value};
use dose_model::{
    ExtremityId, FieldEdit, FieldPath, FieldValue, NuclideInfo, RadionuclideId, TaskId,
};
use dose_standards::NuclideTable;

use crate::cli::{
    AddTaskArgs, EntryArgs, GetArgs, HeaderArgs, InitArgs, NuclidesArgs, SetArgs, ShowArgs,
    TaskArgs,
};
use crate::document::{load_nuclide_table, load_worksheet, save_worksheet};
use crate::summary::{
    extremity_table, field_listing, format_quantity, nuclide_listing, radionuclide_table,
    task_table, worksheet_table,
};

pub fn run_init(args: &InitArgs, nuclide_table: Option<PathBuf>) -> Result<()> {
    if args.worksheet.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.worksheet.display()
        );
    }
    let table = load_nuclide_table(nuclide_table)?;
    let mut worksheet = Worksheet::with_default_task();
    worksheet.wcd_number = args.wcd_number.clone();
    worksheet.rwp_number = args.rwp_number.clone();
    worksheet.check_reference(table.fingerprint());
    save_worksheet(&args.worksheet, &worksheet)?;
    info!(path = %args.worksheet.display(), "created worksheet");
    println!("{}", worksheet_table(&worksheet));
    Ok(())
}

pub fn run_header(args: &HeaderArgs) -> Result<()> {
    let mut worksheet = load_worksheet(&args.worksheet)?;
    if let Some(wcd) = &args.wcd_number {
        worksheet.wcd_number = wcd.clone();
    }
    if let Some(rwp) = &args.rwp_number {
        worksheet.rwp_number = rwp.clone();
    }
    save_worksheet(&args.worksheet, &worksheet)?;
    println!(
        "WCD: {}  RWP: {}",
        or_dash(&worksheet.wcd_number),
        or_dash(&worksheet.rwp_number)
    );
    Ok(())
}

pub fn run_add_task(args: &AddTaskArgs) -> Result<()> {
    let mut worksheet = load_worksheet(&args.worksheet)?;
    let id = worksheet.add_task(args.title.as_deref())?;
    save_worksheet(&args.worksheet, &worksheet)?;
    println!("{id}");
    Ok(())
}

pub fn run_remove_task(args: &TaskArgs) -> Result<()> {
    let mut worksheet = load_worksheet(&args.worksheet)?;
    let id = parse_task(&args.task)?;
    let removed = worksheet.remove_task(id)?;
    if worksheet.tasks().is_empty() {
        warn!(path = %args.worksheet.display(), "worksheet has no tasks left");
    }
    save_worksheet(&args.worksheet, &worksheet)?;
    println!("removed {id} ({})", removed.title);
    Ok(())
}

pub fn run_set(args: &SetArgs, nuclide_table: Option<PathBuf>) -> Result<()> {
    let table = load_nuclide_table(nuclide_table)?;
    let mut worksheet = load_worksheet(&args.worksheet)?;
    note_reference(&mut worksheet, &table, &args.worksheet);

    let id = parse_task(&args.task)?;
    let path: FieldPath = args
        .path
        .parse()
        .with_context(|| format!("field path {}", args.path))?;
    let task = worksheet
        .task(id)
        .ok_or_else(|| anyhow!("no task with id {id}"))?;
    let value = if path.kind().is_numeric() {
        let previous = match current_value(task, &path) {
            Some(FieldValue::Number(previous)) => previous,
            _ => 0.0,
        };
        FieldValue::Number(coerce_numeric_input(&args.value, previous))
    } else {
        FieldValue::parse(&path, &args.value)?
    };

    let changed = worksheet.apply_edit(id, &FieldEdit::new(path, value), &table)?;
    save_worksheet(&args.worksheet, &worksheet)?;
    let task = worksheet
        .task(id)
        .ok_or_else(|| anyhow!("no task with id {id}"))?;
    if changed {
        println!(
            "{id}: effective dose {} mrem, DAC fraction {}",
            format_quantity(task.summary.effective_dose),
            format_quantity(task.dac.total)
        );
    } else {
        println!("{id}: unchanged");
    }
    Ok(())
}

pub fn run_get(args: &GetArgs) -> Result<()> {
    let worksheet = load_worksheet(&args.worksheet)?;
    let id = parse_task(&args.task)?;
    let path: FieldPath = args
        .path
        .parse()
        .with_context(|| format!("field path {}", args.path))?;
    let task = worksheet
        .task(id)
        .ok_or_else(|| anyhow!("no task with id {id}"))?;
    let value = current_value(task, &path)
        .ok_or_else(|| anyhow!("{id} has no entry for {path}"))?;
    println!("{value}");
    Ok(())
}

pub fn run_add_nuclide(args: &TaskArgs) -> Result<()> {
    let mut worksheet = load_worksheet(&args.worksheet)?;
    let id = worksheet.add_radionuclide(parse_task(&args.task)?)?;
    save_worksheet(&args.worksheet, &worksheet)?;
    println!("{id}");
    Ok(())
}

pub fn run_remove_nuclide(args: &EntryArgs) -> Result<()> {
    let mut worksheet = load_worksheet(&args.worksheet)?;
    let entry: RadionuclideId = args.entry.parse()?;
    worksheet.remove_radionuclide(parse_task(&args.task)?, entry)?;
    save_worksheet(&args.worksheet, &worksheet)?;
    println!("removed {entry}");
    Ok(())
}

pub fn run_add_extremity(args: &TaskArgs) -> Result<()> {
    let mut worksheet = load_worksheet(&args.worksheet)?;
    let id = worksheet.add_extremity(parse_task(&args.task)?)?;
    save_worksheet(&args.worksheet, &worksheet)?;
    println!("{id}");
    Ok(())
}

pub fn run_remove_extremity(args: &EntryArgs) -> Result<()> {
    let mut worksheet = load_worksheet(&args.worksheet)?;
    let entry: ExtremityId = args.entry.parse()?;
    worksheet.remove_extremity(parse_task(&args.task)?, entry)?;
    save_worksheet(&args.worksheet, &worksheet)?;
    println!("removed {entry}");
    Ok(())
}

pub fn run_show(args: &ShowArgs) -> Result<()> {
    let worksheet = load_worksheet(&args.worksheet)?;
    let Some(task) = &args.task else {
        if args.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&worksheet).context("serialize worksheet")?
            );
        } else {
            println!(
                "WCD: {}  RWP: {}",
                or_dash(&worksheet.wcd_number),
                or_dash(&worksheet.rwp_number)
            );
            println!("{}", worksheet_table(&worksheet));
        }
        return Ok(());
    };

    let id = parse_task(task)?;
    let task = worksheet
        .task(id)
        .ok_or_else(|| anyhow!("no task with id {id}"))?;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(task).context("serialize task")?
        );
        return Ok(());
    }
    println!("{id}: {}", task.title);
    println!("{}", task_table(task));
    println!("{}", radionuclide_table(task));
    println!("{}", extremity_table(task));
    Ok(())
}

pub fn run_fields() -> Result<()> {
    println!("{}", field_listing());
    Ok(())
}

pub fn run_nuclides(args: &NuclidesArgs, nuclide_table: Option<PathBuf>) -> Result<()> {
    let table = load_nuclide_table(nuclide_table)?;
    let rows: Vec<&NuclideInfo> = match &args.filter {
        Some(filter) => table.search(filter).collect(),
        None => table.iter().collect(),
    };
    println!("{}", nuclide_listing(rows));
    println!("source: {} ({})", table.source(), table.fingerprint());
    Ok(())
}

fn parse_task(raw: &str) -> Result<TaskId> {
    raw.parse::<TaskId>()
        .with_context(|| format!("task id {raw}"))
}

fn note_reference(worksheet: &mut Worksheet, table: &NuclideTable, path: &Path) {
    if let ReferenceCheck::Replaced { previous } = worksheet.check_reference(table.fingerprint())
    {
        info!(
            path = %path.display(),
            previous = %previous,
            source = table.source(),
            "worksheet now references a different nuclide table"
        );
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
