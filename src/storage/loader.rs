use super::Catalog;
use crate::core::{Result, Table2JsonError};
use crate::ddl::parse_create_table;
use log::{debug, error, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Expands `paths` into schema files: plain files are taken as given,
/// directories contribute their `.sql` files in name order.
pub fn schema_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = sql_files_in(path)?;
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn sql_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| Table2JsonError::Io(format!("listing {}: {}", dir.display(), e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    Ok(files)
}

/// Reads every schema file ("show create table" output, one table per
/// file) into a catalog.
///
/// A table that fails to parse aborts the load unless `skip_invalid` is
/// set, in which case it is logged and left out.
pub fn load_catalog(paths: &[PathBuf], skip_invalid: bool) -> Result<Catalog> {
    let mut catalog = Catalog::new();
    for path in schema_files(paths)? {
        let text = fs::read_to_string(&path)
            .map_err(|e| Table2JsonError::Io(format!("reading {}: {}", path.display(), e)))?;
        match parse_create_table(&text) {
            Ok(table) => {
                debug!("loaded table '{}' from {}", table.name(), path.display());
                catalog = catalog.with_table(table)?;
            }
            Err(err) if skip_invalid => warn!("skipping {}: {}", path.display(), err),
            Err(err) => {
                error!("failed to parse {}", path.display());
                return Err(err);
            }
        }
    }

    if catalog.is_empty() {
        warn!("no tables loaded from {} path(s)", paths.len());
    }
    Ok(catalog)
}
