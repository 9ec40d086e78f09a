//! Terminal tables for worksheets, tasks and the nuclide table.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dose_core::Worksheet;
use dose_model::{
    ExtremityField, ExtremityId, FieldKind, FieldPath, NuclideInfo, RadionuclideField,
    RadionuclideId, ScenarioKind, Task,
};

/// Formats a derived quantity; uncomputed values render as `-`.
pub fn format_quantity(value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(value) if value == 0.0 => "0".to_string(),
        Some(value) if value.abs() < 1e-3 || value.abs() >= 1e6 => format!("{value:.3e}"),
        Some(value) => {
            let fixed = format!("{value:.4}");
            fixed
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        }
    }
}

pub fn worksheet_table(worksheet: &Worksheet) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Task"),
        header_cell("Title"),
        header_cell("Person-hours"),
        header_cell("External (mrem)"),
        header_cell("Internal (mrem)"),
        header_cell("Effective (mrem)"),
        header_cell("DAC fraction"),
        header_cell("Posting"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for task in worksheet.tasks() {
        table.add_row(vec![
            Cell::new(task.id).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(&task.title),
            quantity_cell(task.time.person_hours),
            quantity_cell(task.summary.external_exposure),
            quantity_cell(task.summary.internal_exposure),
            quantity_cell(task.summary.effective_dose),
            quantity_cell(task.dac.total),
            posting_cell(task),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} task(s)", worksheet.tasks().len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(format_quantity(Some(worksheet.total_effective_dose())))
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table
}

/// Key/value view of a task's inputs and derived results.
pub fn task_table(task: &Task) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Quantity"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let mut row = |label: &str, value: Cell| {
        table.add_row(vec![Cell::new(label), value]);
    };
    row("Location", text_cell(&task.time.location));
    row("Workers", Cell::new(task.time.num_workers));
    row("Hours per worker", Cell::new(format_quantity(Some(task.time.hours_per_worker))));
    row("Person-hours", quantity_cell(task.time.person_hours));
    row(
        "Direct exposure rate (mrem/hr)",
        Cell::new(format_quantity(Some(task.external.direct_exposure_rate))),
    );
    row("External exposure (mrem)", quantity_cell(task.external.external_exposure));
    row(
        "Extremity dose per individual (mrem)",
        quantity_cell(task.extremity.total_dose),
    );
    row("mPIF (m⁻¹)", quantity_cell(task.resuspension.mpif));
    row("Respiratory protection", Cell::new(task.respiratory_protection));
    row("Engineering protection", Cell::new(task.engineering_protection));
    row(
        "Active scenario",
        Cell::new(task.active_scenario_kind().label()),
    );
    for kind in ScenarioKind::ALL {
        let scenario = task.scenario(kind);
        row(
            &format!("{} - no respirator (mrem)", kind.label()),
            quantity_cell(scenario.total_without_respirator),
        );
        row(
            &format!("{} - respirator (mrem)", kind.label()),
            quantity_cell(scenario.total_with_respirator),
        );
    }
    row("DAC fraction", quantity_cell(task.dac.total));
    row("Air sampling required", flag_cell(task.dac.air_sampling_required, Color::Yellow));
    row("Posted airborne radioactivity area", flag_cell(task.dac.posted_ara, Color::Red));
    row("Internal exposure (mrem)", quantity_cell(task.summary.internal_exposure));
    row("Effective dose (mrem)", quantity_cell(task.summary.effective_dose));
    table
}

pub fn radionuclide_table(task: &Task) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Nuclide"),
        header_cell("Name"),
        header_cell("DAC (µCi/cm³)"),
        header_cell("Contamination (dpm/100 cm²)"),
        header_cell("Airborne (µCi/cm³)"),
        header_cell("Dose w/o controls (mrem)"),
        header_cell("Dose w/ controls (mrem)"),
        header_cell("DAC fraction"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 3..9 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (id, record) in task.radionuclides() {
        let entry = &record.entry;
        table.add_row(vec![
            Cell::new(id).fg(Color::Blue),
            Cell::new(&entry.nuclide_key),
            text_cell(&entry.name),
            Cell::new(format_quantity(Some(entry.limit_value))),
            Cell::new(format_quantity(Some(entry.contamination_level))),
            quantity_cell(entry.airborne_concentration),
            quantity_cell(record.without_controls.without_respirator),
            quantity_cell(record.with_controls.without_respirator),
            quantity_cell(record.dac_fraction),
        ]);
    }
    table
}

pub fn extremity_table(task: &Task) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Nuclide"),
        header_cell("Name"),
        header_cell("Hours per worker"),
        header_cell("Dose rate (mrem/hr)"),
        header_cell("Dose (mrem)"),
    ]);
    apply_table_style(&mut table);
    for index in 3..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for entry in task.extremity.entries() {
        table.add_row(vec![
            Cell::new(entry.id()).fg(Color::Blue),
            Cell::new(&entry.nuclide_key),
            text_cell(&entry.name),
            Cell::new(format_quantity(Some(entry.hours_per_worker))),
            Cell::new(format_quantity(Some(entry.dose_rate))),
            quantity_cell(entry.dose),
        ]);
    }
    table
}

pub fn nuclide_listing<'a>(nuclides: impl IntoIterator<Item = &'a NuclideInfo>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Name"),
        header_cell("DAC (µCi/cm³)"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for info in nuclides {
        table.add_row(vec![
            Cell::new(&info.key),
            Cell::new(&info.display_name),
            quantity_cell(info.limit_value),
        ]);
    }
    table
}

/// Every editable field path with the kind of value it takes.
pub fn field_listing() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Path"), header_cell("Value")]);
    apply_table_style(&mut table);
    let mut add = |path: String, kind: FieldKind| {
        table.add_row(vec![Cell::new(path), Cell::new(kind.as_str())]);
    };
    for path in FieldPath::fixed_paths() {
        add(path.to_string(), path.kind());
    }
    for field in ExtremityField::ALL {
        let path = FieldPath::Extremity {
            id: ExtremityId::new(0),
            field,
        };
        add(format!("extremity.<ext-id>.{}", field.as_str()), path.kind());
    }
    for field in RadionuclideField::ALL {
        let path = FieldPath::Radionuclide {
            id: RadionuclideId::new(0),
            field,
        };
        add(format!("radionuclide.<nuc-id>.{}", field.as_str()), path.kind());
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn quantity_cell(value: Option<f64>) -> Cell {
    match value {
        Some(_) => Cell::new(format_quantity(value)),
        None => dim_cell("-"),
    }
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn flag_cell(value: bool, color: Color) -> Cell {
    if value {
        Cell::new("yes").fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell("no")
    }
}

fn posting_cell(task: &Task) -> Cell {
    if task.dac.posted_ara {
        Cell::new("ARA").fg(Color::Red).add_attribute(Attribute::Bold)
    } else if task.dac.air_sampling_required {
        Cell::new("air sampling").fg(Color::Yellow)
    } else {
        dim_cell("-")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
