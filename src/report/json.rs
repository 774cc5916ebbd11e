use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::model::bands::BandSet;
use crate::report::RunSummary;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Pretty JSON with keys `p3, p15, p50, p85, p97`, points in series order.
pub fn render_bands_json(bands: &BandSet) -> Result<String, serde_json::Error> {
    render_pretty(bands)
}

pub fn render_summary_json(summary: &RunSummary) -> Result<String, serde_json::Error> {
    render_pretty(summary)
}

pub fn write_bands(path: &Path, bands: &BandSet) -> Result<(), EmitError> {
    write_json(path, render_bands_json(bands))
}

pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<(), EmitError> {
    write_json(path, render_summary_json(summary))
}

pub fn read_bands(path: &Path) -> Result<BandSet, EmitError> {
    let file = File::open(path).map_err(|source| EmitError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| EmitError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn render_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

fn write_json(path: &Path, rendered: Result<String, serde_json::Error>) -> Result<(), EmitError> {
    let json = rendered.map_err(|source| EmitError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_text(path, &json).map_err(|source| EmitError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
