//! HWSD2 soil data model.
//!
//! Types shared by the ingest, transform, output and CLI crates:
//!
//! - **layer**: the seven HWSD2 depth layers (D1..D7)
//! - **code**: dynamically typed code values read from the database
//! - **lookup**: reference tables (code → label)
//! - **record**: raw profile-layer rows and SMU classifications
//! - **output**: the PyAEZ export row and its column names
//! - **selection**: soil mapping unit id selections

pub mod code;
pub mod error;
pub mod layer;
pub mod lookup;
pub mod output;
pub mod record;
pub mod selection;

pub use code::CodeValue;
pub use error::{ModelError, Result};
pub use layer::DepthLayer;
pub use lookup::{CodeLookup, ReferenceTables};
pub use output::{LAYER_COLUMN, OUTPUT_COLUMNS, OutputRow, PHASE_COLUMNS};
pub use record::{ProfileLayerRecord, SmuClassification};
pub use selection::{ESWATINI_SMU_IDS, SmuSelection};
