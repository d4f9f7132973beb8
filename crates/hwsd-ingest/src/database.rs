//! HWSD2 SQLite access.
//!
//! The database is opened read-only and held for the whole run. All queries
//! are filtered by the selected soil mapping unit ids.

use std::collections::BTreeSet;
use std::path::Path;

use hwsd_model::{DepthLayer, ProfileLayerRecord, ReferenceTables, SmuClassification, SmuSelection};
use rusqlite::{Connection, OpenFlags, Row, params_from_iter};
use tracing::{debug, warn};

use crate::reference::load_reference_tables;
use crate::value::{code_from_ref, real_from_ref, text_from_ref};
use crate::{IngestError, Result};

/// Tables the export reads.
pub const REQUIRED_TABLES: [&str; 8] = [
    "D_DRAINAGE",
    "D_PHASE",
    "D_ROOTS",
    "D_TEXTURE_USDA",
    "D_WRB4",
    "D_WRB2",
    "HWSD2_SMU",
    "HWSD2_LAYERS",
];

const LAYER_COLUMNS: &str = "HWSD2_SMU_ID, ID, LAYER, TOPDEP, TEXTURE_USDA, ORG_CARBON, \
     PH_WATER, TEB, CEC_SOIL, CEC_CLAY, ROOT_DEPTH, PHASE1, PHASE2, ROOTS, DRAINAGE, ESP, \
     ELEC_COND, TCARBON_EQ, GYPSUM, COARSE, CLAY";

pub struct Hwsd2Database {
    conn: Connection,
}

impl Hwsd2Database {
    /// Open an HWSD2 SQLite file read-only and check its tables.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let database = Self { conn };
        database.require_tables()?;
        Ok(database)
    }

    /// Wrap an existing connection (in-memory databases, tests).
    pub fn from_connection(conn: Connection) -> Result<Self> {
        let database = Self { conn };
        database.require_tables()?;
        Ok(database)
    }

    fn require_tables(&self) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type IN ('table', 'view')")?;
        let names: BTreeSet<String> = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .map(|name| name.to_ascii_uppercase())
            .collect();
        for table in REQUIRED_TABLES {
            if !names.contains(table) {
                return Err(IngestError::MissingTable(table.to_string()));
            }
        }
        Ok(())
    }

    pub fn load_reference_tables(&self) -> Result<ReferenceTables> {
        load_reference_tables(&self.conn)
    }

    /// WRB classification codes of the selected mapping units.
    pub fn load_classifications(&self, selection: &SmuSelection) -> Result<Vec<SmuClassification>> {
        if selection.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT HWSD2_SMU_ID, WRB4, WRB2 FROM HWSD2_SMU \
             WHERE HWSD2_SMU_ID IN ({}) ORDER BY HWSD2_SMU_ID",
            placeholders(selection.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(selection.ids()), |row| {
            Ok(SmuClassification {
                smu_id: row.get("HWSD2_SMU_ID")?,
                wrb4: code_from_ref(row.get_ref("WRB4")?),
                wrb2: code_from_ref(row.get_ref("WRB2")?),
            })
        })?;
        let classifications = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(
            smu_count = classifications.len(),
            "loaded soil mapping unit classifications"
        );
        Ok(classifications)
    }

    /// All profile-layer rows of the selected mapping units, ordered by
    /// mapping unit, profile id and top depth.
    ///
    /// Rows whose `LAYER` is not one of D1..D7 are skipped with a warning.
    pub fn load_layers(&self, selection: &SmuSelection) -> Result<Vec<ProfileLayerRecord>> {
        if selection.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {LAYER_COLUMNS} FROM HWSD2_LAYERS \
             WHERE HWSD2_SMU_ID IN ({}) ORDER BY HWSD2_SMU_ID, ID, TOPDEP",
            placeholders(selection.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(selection.ids()))?;
        let mut records = Vec::new();
        let mut skipped = 0usize;
        while let Some(row) = rows.next()? {
            let layer_text = text_from_ref(row.get_ref("LAYER")?).unwrap_or_default();
            let Ok(layer) = layer_text.parse::<DepthLayer>() else {
                skipped += 1;
                continue;
            };
            records.push(read_layer_row(row, layer)?);
        }
        if skipped > 0 {
            warn!(skipped, "skipped layer rows with an unknown LAYER value");
        }
        debug!(record_count = records.len(), "loaded profile layers");
        Ok(records)
    }
}

fn read_layer_row(row: &Row<'_>, layer: DepthLayer) -> rusqlite::Result<ProfileLayerRecord> {
    Ok(ProfileLayerRecord {
        smu_id: row.get("HWSD2_SMU_ID")?,
        profile_id: row.get::<_, Option<i64>>("ID")?.unwrap_or_default(),
        layer,
        top_depth: real_from_ref(row.get_ref("TOPDEP")?),
        texture: code_from_ref(row.get_ref("TEXTURE_USDA")?),
        org_carbon: real_from_ref(row.get_ref("ORG_CARBON")?),
        ph_water: real_from_ref(row.get_ref("PH_WATER")?),
        teb: real_from_ref(row.get_ref("TEB")?),
        cec_soil: real_from_ref(row.get_ref("CEC_SOIL")?),
        cec_clay: real_from_ref(row.get_ref("CEC_CLAY")?),
        root_depth: code_from_ref(row.get_ref("ROOT_DEPTH")?),
        phase1: code_from_ref(row.get_ref("PHASE1")?),
        phase2: code_from_ref(row.get_ref("PHASE2")?),
        roots: code_from_ref(row.get_ref("ROOTS")?),
        drainage: code_from_ref(row.get_ref("DRAINAGE")?),
        esp: real_from_ref(row.get_ref("ESP")?),
        elec_cond: real_from_ref(row.get_ref("ELEC_COND")?),
        tcarbon_eq: real_from_ref(row.get_ref("TCARBON_EQ")?),
        gypsum: real_from_ref(row.get_ref("GYPSUM")?),
        coarse: real_from_ref(row.get_ref("COARSE")?),
        clay: real_from_ref(row.get_ref("CLAY")?),
    })
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
