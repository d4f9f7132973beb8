use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;

use hwsd_cli::pipeline::run_export;
use hwsd_cli::types::{DEFAULT_OUTPUT_STEM, ExportRequest, ExportResult};
use hwsd_ingest::{Hwsd2Database, read_smu_ids};
use hwsd_model::{DepthLayer, SmuSelection};
use hwsd_output::ExportFormat;

use crate::cli::{ExportArgs, LookupArgs};
use crate::summary::{apply_table_style, header_cell, lookup_table};

pub fn run_export_command(args: &ExportArgs) -> Result<ExportResult> {
    let request = resolve_request(args)?;
    run_export(&request)
}

pub fn run_lookups(args: &LookupArgs) -> Result<()> {
    let database = Hwsd2Database::open(&args.database)
        .with_context(|| format!("open {}", args.database.display()))?;
    let tables = database
        .load_reference_tables()
        .context("load reference tables")?;

    println!("Drainage (D_DRAINAGE)");
    println!("{}", lookup_table(&tables.drainage));
    println!("Obstacles to roots (D_ROOTS)");
    println!("{}", lookup_table(&tables.roots));
    println!("Texture (D_TEXTURE_USDA)");
    println!("{}", lookup_table(&tables.texture));

    let mut counts = Table::new();
    counts.set_header(vec![header_cell("Table"), header_cell("Codes")]);
    apply_table_style(&mut counts);
    for (name, len) in [
        ("D_PHASE", tables.phase.len()),
        ("D_WRB4", tables.wrb4.len()),
        ("D_WRB2", tables.wrb2.len()),
    ] {
        counts.add_row(vec![name.to_string(), len.to_string()]);
    }
    println!("{counts}");
    Ok(())
}

fn resolve_request(args: &ExportArgs) -> Result<ExportRequest> {
    let selection = resolve_selection(args)?;
    let layers = resolve_layers(&args.layers)?;
    let format = args
        .format
        .map(ExportFormat::from)
        .or_else(|| args.output.as_deref().and_then(ExportFormat::from_path))
        .unwrap_or_default();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.database, format));
    Ok(ExportRequest {
        database: args.database.clone(),
        selection,
        layers,
        output,
        format,
        per_layer: args.per_layer,
        summary_json: args.summary_json.clone(),
        dry_run: args.dry_run,
    })
}

fn resolve_selection(args: &ExportArgs) -> Result<SmuSelection> {
    let from_flags = SmuSelection::parse(&args.smu_ids).context("parse --smu-id")?;
    let from_file = match &args.ids_file {
        Some(path) => read_smu_ids(path).with_context(|| format!("read {}", path.display()))?,
        None => SmuSelection::default(),
    };
    if args.smu_ids.is_empty() && args.ids_file.is_none() {
        return Ok(SmuSelection::eswatini());
    }
    let ids = from_flags.ids().iter().chain(from_file.ids()).copied();
    Ok(SmuSelection::new(ids))
}

fn resolve_layers(values: &[String]) -> Result<Vec<DepthLayer>> {
    if values.is_empty() {
        return Ok(DepthLayer::ALL.to_vec());
    }
    let mut layers = values
        .iter()
        .map(|value| value.parse::<DepthLayer>())
        .collect::<Result<Vec<_>, _>>()
        .context("parse --layers")?;
    layers.sort();
    layers.dedup();
    Ok(layers)
}

fn default_output_path(database: &Path, format: ExportFormat) -> PathBuf {
    let dir = database.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("{DEFAULT_OUTPUT_STEM}.{}", format.extension()))
}
