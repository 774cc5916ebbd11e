use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod gz;
pub mod lms_table;

pub use lms_table::{load_lms_table, parse_lms_table};

pub const TABLE_SUFFIX: &str = ".lms.json";
pub const TABLE_SUFFIX_GZ: &str = ".lms.json.gz";
pub const BANDS_SUFFIX: &str = ".bands.json";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: invalid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{}: expected an object mapping day numbers to {{L, M, S}}", .path.display())]
    NotAnObject { path: PathBuf },
    #[error("{}: day \"{day}\": {reason}", .path.display())]
    Malformed {
        path: PathBuf,
        day: String,
        reason: String,
    },
}

impl InputError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        InputError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// One reference table found in an input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSource {
    pub name: String,
    pub path: PathBuf,
}

impl TableSource {
    pub fn output_file_name(&self) -> String {
        format!("{}{}", self.name, BANDS_SUFFIX)
    }
}

/// Strips `.lms.json` or `.lms.json.gz`; `None` for any other file name.
pub fn table_name(file_name: &str) -> Option<&str> {
    let name = file_name
        .strip_suffix(TABLE_SUFFIX_GZ)
        .or_else(|| file_name.strip_suffix(TABLE_SUFFIX))?;
    if name.is_empty() { None } else { Some(name) }
}

/// Lists reference tables directly inside `input_dir`, one per table name,
/// sorted by name.
pub fn discover_tables(input_dir: &Path) -> Result<Vec<TableSource>, InputError> {
    let mut found = Vec::new();
    let entries = std::fs::read_dir(input_dir).map_err(|e| InputError::io(input_dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| InputError::io(input_dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        match table_name(&file_name) {
            Some(name) => found.push(TableSource {
                name: name.to_string(),
                path,
            }),
            None => tracing::debug!(file = %file_name, "skipping non-table file"),
        }
    }
    // `x.lms.json` is a prefix of `x.lms.json.gz`, so the plain table sorts
    // first and wins a name clash.
    found.sort_by(|a, b| a.path.cmp(&b.path));
    let mut by_name: BTreeMap<String, TableSource> = BTreeMap::new();
    for source in found {
        match by_name.entry(source.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(source);
            }
            Entry::Occupied(kept) => tracing::warn!(
                skipped = %source.path.display(),
                kept = %kept.get().path.display(),
                "two tables share a name; keeping the first"
            ),
        }
    }
    Ok(by_name.into_values().collect())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
