//! HWSD2 dictionary tables.

use hwsd_model::{CodeLookup, ReferenceTables};
use rusqlite::Connection;
use tracing::debug;

use crate::Result;
use crate::value::{code_from_ref, text_from_ref};

/// (table, key column, label column) for each dictionary the export uses.
const DRAINAGE: (&str, &str, &str) = ("D_DRAINAGE", "SYMBOL", "CODE");
const PHASE: (&str, &str, &str) = ("D_PHASE", "CODE", "VALUE");
const ROOTS: (&str, &str, &str) = ("D_ROOTS", "CODE", "VALUE");
const TEXTURE: (&str, &str, &str) = ("D_TEXTURE_USDA", "CODE", "VALUE");
const WRB4: (&str, &str, &str) = ("D_WRB4", "CODE", "VALUE");
const WRB2: (&str, &str, &str) = ("D_WRB2", "CODE", "Value");

/// Load all dictionary tables.
pub fn load_reference_tables(conn: &Connection) -> Result<ReferenceTables> {
    Ok(ReferenceTables {
        drainage: load_lookup(conn, DRAINAGE)?,
        phase: load_lookup(conn, PHASE)?,
        roots: load_lookup(conn, ROOTS)?,
        texture: load_lookup(conn, TEXTURE)?,
        wrb4: load_lookup(conn, WRB4)?,
        wrb2: load_lookup(conn, WRB2)?,
    })
}

fn load_lookup(conn: &Connection, (table, key, label): (&str, &str, &str)) -> Result<CodeLookup> {
    let sql = format!("SELECT {key}, {label} FROM {table}");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    let mut lookup = CodeLookup::new();
    while let Some(row) = rows.next()? {
        let code = code_from_ref(row.get_ref(0)?);
        let Some(text) = text_from_ref(row.get_ref(1)?) else {
            continue;
        };
        lookup.insert(code, text);
    }
    debug!(table, entries = lookup.len(), "loaded reference table");
    Ok(lookup)
}
