//! HWSD2 data ingestion.
//!
//! Reads the HWSD2 SQLite database (dictionary tables, SMU classifications,
//! profile layers) and soil mapping unit id lists.

pub mod database;
pub mod error;
pub mod reference;
pub mod selection;
mod value;

pub use database::{Hwsd2Database, REQUIRED_TABLES};
pub use error::{IngestError, Result};
pub use reference::load_reference_tables;
pub use selection::read_smu_ids;
