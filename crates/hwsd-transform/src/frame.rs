//! Layer frame types.
//!
//! A [`LayerFrame`] pairs the consolidated rows of one depth layer, as a
//! Polars DataFrame with the PyAEZ columns, with the layer it came from.

use polars::prelude::DataFrame;

use hwsd_model::DepthLayer;

/// Consolidated PyAEZ table of one depth layer.
#[derive(Debug, Clone)]
pub struct LayerFrame {
    pub layer: DepthLayer,
    /// Columns in export order, without the `LAYER` tag.
    pub data: DataFrame,
}

impl LayerFrame {
    pub fn new(layer: DepthLayer, data: DataFrame) -> Self {
        Self { layer, data }
    }

    /// Number of mapping units in the frame.
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// File stem for a per-layer export, e.g. `soil_D1_pyaez`.
    pub fn dataset_name(&self) -> String {
        format!("soil_{}_pyaez", self.layer)
    }
}
