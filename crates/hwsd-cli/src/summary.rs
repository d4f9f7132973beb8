use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hwsd_cli::types::ExportResult;
use hwsd_model::CodeLookup;
use hwsd_transform::{ExportStatistics, ValueRange};

pub fn print_summary(result: &ExportResult) {
    println!("Database: {}", result.database.display());
    println!(
        "Selection: {} units, {} profile-layer records",
        result.selection_size, result.record_count
    );
    match &result.outputs.combined {
        Some(path) => println!("Output: {}", path.display()),
        None if result.dry_run => println!("Output: (dry run)"),
        None => {}
    }
    for (layer, path) in &result.outputs.per_layer {
        println!("  {layer}: {}", path.display());
    }
    if let Some(path) = &result.outputs.summary_json {
        println!("Statistics: {}", path.display());
    }

    print_layer_table(result);
    print_vertic_table(result);
    print_ranges_table(&result.statistics);
    print_counts_table("Texture", &result.statistics.textures);
    print_counts_table("Drainage", &result.statistics.drainage);

    let stats = &result.statistics;
    println!();
    println!("Limitations:");
    println!("  SPR (rocky):    {} rows", stats.limitations.rocky_phase);
    println!("  SPH (chemical): {} rows", stats.limitations.chemical_phase);
    println!("  VSP (vertic):   {} rows", stats.limitations.vertic);
    println!(
        "Total: {} rows, {} soil units, {} layers",
        stats.total_rows, stats.unique_codes, stats.layer_count
    );
}

fn print_layer_table(result: &ExportResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Layer"),
        header_cell("Depth (cm)"),
        header_cell("Records"),
        header_cell("Valid"),
        header_cell("Soil units"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_units = 0usize;
    for counts in &result.statistics.layers {
        let (top, bottom) = counts.layer.depth_range_cm();
        total_units += counts.consolidated;
        let units = if counts.consolidated == 0 {
            Cell::new("skipped").fg(Color::Yellow)
        } else {
            Cell::new(counts.consolidated)
        };
        table.add_row(vec![
            Cell::new(counts.layer)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(format!("{top}-{bottom}")),
            Cell::new(counts.raw),
            count_cell(counts.valid),
            units,
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(result.record_count).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_units).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn print_vertic_table(result: &ExportResult) {
    let vertic = &result.vertic;
    println!();
    println!(
        "Vertic units: {} of {} (VSP=1)",
        vertic.vertic_count(),
        vertic.len()
    );
    if vertic.vertic_count() == 0 {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("SMU"),
        header_cell("WRB4"),
        header_cell("Clay %"),
        header_cell("CEC clay"),
        header_cell("Evidence"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for unit in vertic.vertic_units() {
        let evidence = match (unit.by_classification, unit.by_clay) {
            (true, true) => "label, clay",
            (true, false) => "label",
            _ => "clay",
        };
        table.add_row(vec![
            Cell::new(unit.smu_id),
            optional_cell(unit.wrb4_label.as_deref()),
            number_cell(unit.clay.mean_clay, 1),
            number_cell(unit.clay.mean_clay_cec, 1),
            Cell::new(evidence),
        ]);
    }
    println!("{table}");
}

fn print_ranges_table(stats: &ExportStatistics) {
    let ranges = &stats.ranges;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Property"),
        header_cell("Min"),
        header_cell("Max"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (name, range, decimals) in [
        ("pH", ranges.ph, 1),
        ("BS %", ranges.bs, 0),
        ("OC %", ranges.oc, 3),
        ("CEC_soil cmol/kg", ranges.cec_soil, 0),
        ("ESP %", ranges.esp, 0),
    ] {
        let (min, max) = range_cells(range, decimals);
        table.add_row(vec![Cell::new(name), min, max]);
    }
    println!();
    println!("{table}");
}

fn print_counts_table(label: &str, counts: &std::collections::BTreeMap<String, usize>) {
    if counts.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell(label), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (value, count) in ExportStatistics::ranked(counts) {
        let value_cell = if value.is_empty() {
            dim_cell("(empty)")
        } else {
            Cell::new(value)
        };
        table.add_row(vec![value_cell, Cell::new(count)]);
    }
    println!();
    println!("{table}");
}

/// Two-column code/label table of a reference lookup.
pub fn lookup_table(lookup: &CodeLookup) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell("Label")]);
    apply_table_style(&mut table);
    for (code, label) in lookup.iter() {
        table.add_row(vec![Cell::new(code), Cell::new(label)]);
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn range_cells(range: Option<ValueRange>, decimals: usize) -> (Cell, Cell) {
    match range {
        Some(range) => (
            Cell::new(format!("{:.decimals$}", range.min)),
            Cell::new(format!("{:.decimals$}", range.max)),
        ),
        None => (dim_cell("-"), dim_cell("-")),
    }
}

fn number_cell(value: Option<f64>, decimals: usize) -> Cell {
    match value {
        Some(value) => Cell::new(format!("{value:.decimals$}")),
        None => dim_cell("-"),
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
