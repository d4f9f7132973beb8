//! HWSD2 soil-layer transformation.
//!
//! Turns raw HWSD2 profile-layer rows into PyAEZ soil tables:
//!
//! - **vertic**: unit-level vertic phase from WRB labels and topsoil clay
//! - **obstacle**: obstacle-to-roots codes as depths in cm
//! - **phase**: rocky (SPR) and chemical (SPH) phase classifiers
//! - **consolidate**: one record per (unit, layer) by mean and mode
//! - **frame_builder** / **assemble**: Polars frames per layer and combined
//! - **statistics**: summary of a finished export
//!
//! # Example
//!
//! ```ignore
//! let vertic = classify_vertic(&classifications, &records, &tables);
//! let ctx = ConsolidationContext::new(&tables, &vertic);
//! let layer = consolidate_layer(&records, DepthLayer::D1, &ctx);
//! let frame = build_layer_frame(layer.layer, &layer.rows)?;
//! let combined = assemble_layers(&[frame])?;
//! ```

mod error;

pub mod assemble;
pub mod consolidate;
pub mod frame;
pub mod frame_builder;
pub mod obstacle;
pub mod phase;
pub mod statistics;
pub mod vertic;

pub use error::{Result, TransformError};

pub use assemble::{assemble_layers, tag_layer};
pub use consolidate::{
    ConsolidatedSoilRecord, ConsolidationContext, LayerConsolidation, base_saturation,
    consolidate_layer, consolidate_layers, drainage_label, texture_label, valid_layer_records,
};
pub use frame::LayerFrame;
pub use frame_builder::build_layer_frame;
pub use obstacle::{OBSTACLE_DEPTHS_CM, obstacle_depth_cm};
pub use phase::{
    CHEMICAL_PHASE_KEYWORDS, PhaseFamily, ROCKY_PHASE_KEYWORDS, classify_chemical_phase,
    classify_phase, classify_rocky_phase,
};
pub use statistics::{ExportStatistics, LayerCounts, LimitationCounts, PropertyRanges, ValueRange};
pub use vertic::{TopsoilClay, VerticEvidence, VerticMap, classify_vertic, topsoil_clay};
