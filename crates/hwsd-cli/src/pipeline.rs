//! Export pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **References**: Load the HWSD2 dictionary tables
//! 2. **Extract**: Read SMU classifications and profile layers for the selection
//! 3. **Vertic**: Classify the vertic phase per soil mapping unit
//! 4. **Consolidate**: Reduce each depth layer to one row per unit
//! 5. **Assemble**: Build layer frames and the combined table
//! 6. **Output**: Write the combined table, per-layer files and statistics
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use hwsd_ingest::Hwsd2Database;
use hwsd_model::{
    DepthLayer, ProfileLayerRecord, ReferenceTables, SmuClassification, SmuSelection,
};
use hwsd_output::{ExportFormat, output_path, write_export};
use hwsd_transform::{
    ConsolidationContext, ExportStatistics, LayerConsolidation, LayerFrame, VerticMap,
    assemble_layers, build_layer_frame, classify_vertic, consolidate_layer,
};

use crate::types::{ExportOutputs, ExportRequest, ExportResult};

// ============================================================================
// Stage 1: References
// ============================================================================

/// Load the dictionary tables and report their contents.
pub fn load_references(database: &Hwsd2Database) -> Result<ReferenceTables> {
    let tables = database
        .load_reference_tables()
        .context("load reference tables")?;
    let drainage: Vec<String> = tables
        .drainage
        .iter()
        .map(|(code, label)| format!("{code}={label}"))
        .collect();
    let roots: Vec<String> = tables
        .roots
        .iter()
        .map(|(code, label)| format!("{code}={label}"))
        .collect();
    info!(
        drainage = %drainage.join(", "),
        roots = %roots.join(", "),
        phase_count = tables.phase.len(),
        texture_count = tables.texture.len(),
        wrb4_count = tables.wrb4.len(),
        wrb2_count = tables.wrb2.len(),
        "reference tables loaded"
    );
    Ok(tables)
}

// ============================================================================
// Stage 2: Extract
// ============================================================================

/// Raw rows read for the selection.
#[derive(Debug, Default)]
pub struct ExtractResult {
    pub classifications: Vec<SmuClassification>,
    /// Ordered by unit, profile and top depth.
    pub records: Vec<ProfileLayerRecord>,
}

impl ExtractResult {
    pub fn records_per_layer(&self) -> BTreeMap<DepthLayer, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.layer).or_insert(0) += 1;
        }
        counts
    }

    pub fn unit_count(&self) -> usize {
        let mut ids: Vec<i64> = self.records.iter().map(|record| record.smu_id).collect();
        ids.dedup();
        ids.len()
    }
}

pub fn extract(database: &Hwsd2Database, selection: &SmuSelection) -> Result<ExtractResult> {
    let classifications = database
        .load_classifications(selection)
        .context("load soil mapping units")?;
    let records = database
        .load_layers(selection)
        .context("load profile layers")?;
    let result = ExtractResult {
        classifications,
        records,
    };
    if result.classifications.len() < selection.len() {
        warn!(
            selected = selection.len(),
            found = result.classifications.len(),
            "some selected units are missing from HWSD2_SMU"
        );
    }
    info!(
        record_count = result.records.len(),
        smu_count = result.unit_count(),
        "profile layers extracted"
    );
    for (layer, count) in result.records_per_layer() {
        debug!(layer = %layer, record_count = count, "layer records");
    }
    Ok(result)
}

// ============================================================================
// Stage 3: Vertic
// ============================================================================

pub fn classify(extract: &ExtractResult, tables: &ReferenceTables) -> VerticMap {
    let vertic = classify_vertic(&extract.classifications, &extract.records, tables);
    info!(
        smu_count = vertic.len(),
        vertic_count = vertic.vertic_count(),
        non_vertic_count = vertic.len() - vertic.vertic_count(),
        "vertic phase classified"
    );
    for unit in vertic.vertic_units() {
        debug!(
            smu_id = unit.smu_id,
            wrb4 = unit.wrb4_label.as_deref().unwrap_or("-"),
            mean_clay = ?unit.clay.mean_clay,
            mean_clay_cec = ?unit.clay.mean_clay_cec,
            "vertic unit"
        );
    }
    vertic
}

// ============================================================================
// Stage 4: Consolidate
// ============================================================================

pub fn consolidate(
    records: &[ProfileLayerRecord],
    layers: &[DepthLayer],
    ctx: &ConsolidationContext<'_>,
) -> Vec<LayerConsolidation> {
    layers
        .iter()
        .map(|layer| {
            let span = info_span!("consolidate", layer = %layer);
            let _guard = span.enter();
            let start = Instant::now();
            let result = consolidate_layer(records, *layer, ctx);
            if !result.is_empty() {
                info!(
                    layer = %layer,
                    raw_count = result.raw_count,
                    valid_count = result.valid_count,
                    smu_count = result.rows.len(),
                    duration_ms = start.elapsed().as_millis(),
                    "layer processed"
                );
            }
            result
        })
        .collect()
}

// ============================================================================
// Stage 5: Assemble
// ============================================================================

#[derive(Debug)]
pub struct AssembleResult {
    /// Non-empty layer frames, in layer order.
    pub frames: Vec<LayerFrame>,
    pub combined: DataFrame,
}

pub fn assemble(layers: &[LayerConsolidation]) -> Result<AssembleResult> {
    let mut frames = Vec::new();
    for layer in layers.iter().filter(|layer| !layer.is_empty()) {
        let frame = build_layer_frame(layer.layer, &layer.rows)
            .with_context(|| format!("build {} frame", layer.layer))?;
        frames.push(frame);
    }
    let combined = assemble_layers(&frames).context("assemble layers")?;
    info!(
        layer_count = frames.len(),
        record_count = combined.height(),
        "layers assembled"
    );
    Ok(AssembleResult { frames, combined })
}

// ============================================================================
// Stage 6: Output
// ============================================================================

pub struct OutputConfig<'a> {
    pub output: &'a Path,
    pub format: ExportFormat,
    pub per_layer: bool,
    pub summary_json: Option<&'a Path>,
    pub dry_run: bool,
    pub assembled: &'a AssembleResult,
    pub statistics: &'a ExportStatistics,
}

pub fn output(config: &OutputConfig<'_>) -> Result<ExportOutputs> {
    let mut outputs = ExportOutputs::default();
    if config.dry_run {
        info!(output = %config.output.display(), "dry run, no files written");
        return Ok(outputs);
    }

    write_export(&config.assembled.combined, config.output, config.format)
        .with_context(|| format!("write {}", config.output.display()))?;
    info!(
        output = %config.output.display(),
        format = %config.format,
        record_count = config.assembled.combined.height(),
        "combined export written"
    );
    outputs.combined = Some(config.output.to_path_buf());

    if config.per_layer {
        let dir = config.output.parent().unwrap_or_else(|| Path::new(""));
        for frame in &config.assembled.frames {
            let path = output_path(dir, &frame.dataset_name(), config.format);
            write_export(&frame.data, &path, config.format)
                .with_context(|| format!("write {}", path.display()))?;
            debug!(layer = %frame.layer, output = %path.display(), "layer export written");
            outputs.per_layer.push((frame.layer, path));
        }
    }

    if let Some(path) = config.summary_json {
        let json = serde_json::to_string_pretty(config.statistics)
            .context("serialize export statistics")?;
        fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        outputs.summary_json = Some(path.to_path_buf());
    }
    Ok(outputs)
}

// ============================================================================
// Full run
// ============================================================================

/// Run every stage for `request`.
pub fn run_export(request: &ExportRequest) -> Result<ExportResult> {
    let export_span = info_span!(
        "export",
        database = %request.database.display(),
        smu_count = request.selection.len()
    );
    let _export_guard = export_span.enter();
    let start = Instant::now();

    let database = Hwsd2Database::open(&request.database)
        .with_context(|| format!("open {}", request.database.display()))?;

    let tables = info_span!("references").in_scope(|| load_references(&database))?;
    let extracted = info_span!("extract").in_scope(|| extract(&database, &request.selection))?;
    let vertic = info_span!("vertic").in_scope(|| classify(&extracted, &tables));

    let ctx = ConsolidationContext::new(&tables, &vertic);
    let layers = consolidate(&extracted.records, &request.layers, &ctx);
    let assembled = info_span!("assemble").in_scope(|| assemble(&layers))?;
    let statistics = ExportStatistics::from_layers(&layers);

    let outputs = info_span!("write").in_scope(|| {
        output(&OutputConfig {
            output: &request.output,
            format: request.format,
            per_layer: request.per_layer,
            summary_json: request.summary_json.as_deref(),
            dry_run: request.dry_run,
            assembled: &assembled,
            statistics: &statistics,
        })
    })?;

    info!(
        record_count = statistics.total_rows,
        smu_count = statistics.unique_codes,
        layer_count = statistics.layer_count,
        duration_ms = start.elapsed().as_millis(),
        "export complete"
    );

    Ok(ExportResult {
        database: request.database.clone(),
        selection_size: request.selection.len(),
        record_count: extracted.records.len(),
        vertic,
        layers,
        statistics,
        outputs,
        dry_run: request.dry_run,
    })
}
