use std::path::PathBuf;

use hwsd_model::{DepthLayer, SmuSelection};
use hwsd_output::ExportFormat;
use hwsd_transform::{ExportStatistics, LayerConsolidation, VerticMap};

/// Default name of the combined export.
pub const DEFAULT_OUTPUT_STEM: &str = "soil_ALL_LAYERS_pyaez";

/// A fully resolved export run.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub database: PathBuf,
    pub selection: SmuSelection,
    /// Layers to process, in processing order.
    pub layers: Vec<DepthLayer>,
    pub output: PathBuf,
    pub format: ExportFormat,
    pub per_layer: bool,
    pub summary_json: Option<PathBuf>,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct ExportResult {
    pub database: PathBuf,
    pub selection_size: usize,
    /// Raw profile-layer rows read for the selection.
    pub record_count: usize,
    pub vertic: VerticMap,
    pub layers: Vec<LayerConsolidation>,
    pub statistics: ExportStatistics,
    pub outputs: ExportOutputs,
    pub dry_run: bool,
}

/// Files written by an export (empty on dry runs).
#[derive(Debug, Default, Clone)]
pub struct ExportOutputs {
    pub combined: Option<PathBuf>,
    pub per_layer: Vec<(DepthLayer, PathBuf)>,
    pub summary_json: Option<PathBuf>,
}
