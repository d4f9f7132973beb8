//! Shared helpers for export writers.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OutputError, Result};
use crate::format::ExportFormat;

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// `<dir>/<stem>.<ext>` for a per-layer export.
pub fn output_path(dir: &Path, stem: &str, format: ExportFormat) -> PathBuf {
    dir.join(format!("{stem}.{}", format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_layer_paths() {
        let path = output_path(Path::new("out"), "soil_D3_pyaez", ExportFormat::Csv);
        assert_eq!(path, PathBuf::from("out/soil_D3_pyaez.csv"));
    }

    #[test]
    fn creates_missing_parents() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("a/b/soil.xlsx");
        ensure_parent_dir(&path).expect("create parents");
        assert!(dir.path().join("a/b").is_dir());
        ensure_parent_dir(Path::new("soil.xlsx")).expect("bare file name");
    }
}
