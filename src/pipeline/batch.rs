use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::input::{InputError, TableSource, discover_tables, load_lms_table};
use crate::model::bands::BandStats;
use crate::model::percentiles::ZScoreSet;
use crate::pipeline::stage1_bands::generate_with_stats;
use crate::report::json::{EmitError, write_bands, write_summary};
use crate::report::{FileSummary, RunSummary};

pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub out_dir: PathBuf,
}

/// Failure of a single table; the batch carries on with the next one.
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("cannot list input directory: {0}")]
    Discover(#[source] InputError),
    #[error("cannot write run summary: {0}")]
    Summary(#[source] EmitError),
}

/// Loads one LMS table, generates its bands and writes them to `output`.
pub fn transform_file(input: &Path, output: &Path) -> Result<BandStats, FileError> {
    let table = load_lms_table(input)?;
    let generated = generate_with_stats(&table, &ZScoreSet::CANONICAL);
    write_bands(output, &generated.bands)?;
    Ok(generated.stats)
}

pub fn output_path(out_dir: &Path, source: &TableSource) -> PathBuf {
    out_dir.join(source.output_file_name())
}

pub fn run_batch(config: &BatchConfig) -> Result<RunSummary, BatchError> {
    let sources = discover_tables(&config.input_dir).map_err(BatchError::Discover)?;
    if sources.is_empty() {
        tracing::warn!(
            input = %config.input_dir.display(),
            "no *.lms.json tables found"
        );
    } else {
        tracing::info!(
            input = %config.input_dir.display(),
            tables = sources.len(),
            "discovered reference tables"
        );
    }

    let mut files = Vec::with_capacity(sources.len());
    for source in &sources {
        let output = output_path(&config.out_dir, source);
        let input_label = source.path.display().to_string();
        match transform_file(&source.path, &output) {
            Ok(stats) => {
                tracing::info!(
                    table = %source.name,
                    days = stats.days,
                    points = stats.points_total(),
                    omitted = stats.omitted_total(),
                    output = %output.display(),
                    "bands written"
                );
                files.push(FileSummary::ok(
                    input_label,
                    output.display().to_string(),
                    &stats,
                ));
            }
            Err(err) => {
                tracing::error!(table = %source.name, "{err}");
                files.push(FileSummary::failed(input_label, err.to_string()));
            }
        }
    }

    Ok(RunSummary::new(
        config.input_dir.display().to_string(),
        config.out_dir.display().to_string(),
        files,
    ))
}

pub fn write_run_summary(out_dir: &Path, summary: &RunSummary) -> Result<PathBuf, BatchError> {
    let path = out_dir.join(SUMMARY_FILE);
    write_summary(&path, summary).map_err(BatchError::Summary)?;
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/batch.rs"]
mod tests;
