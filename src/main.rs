mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::input::load_lms_table;
use crate::model::lms::{LmsEntry, LmsOutcome, evaluate, z_score};
use crate::model::percentiles::{Percentile, ZScoreSet};
use crate::pipeline::batch::{BatchConfig, run_batch, transform_file, write_run_summary};
use crate::pipeline::stage1_bands::round3;
use crate::pipeline::stage2_verify::verify_bands;
use crate::report::json::read_bands;
use crate::report::text::render_run_text;

/// Precompute growth-chart percentile bands from LMS reference tables.
#[derive(Debug, Parser)]
#[command(name = "growth-bands", version, about)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Transform every <name>.lms.json(.gz) in a directory into <name>.bands.json.
    Run {
        /// Directory holding the reference tables.
        #[arg(long)]
        input: PathBuf,
        /// Output directory; created if missing.
        #[arg(long)]
        out: PathBuf,
    },
    /// Transform a single reference table.
    Band {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Check an emitted bands file for ordering, value and crossing problems.
    Check {
        #[arg(long)]
        bands: PathBuf,
    },
    /// Print the z-score of one measurement against a table's entry for a day.
    Zscore {
        #[arg(long)]
        table: PathBuf,
        #[arg(long)]
        day: u32,
        #[arg(long, allow_hyphen_values = true)]
        value: f64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode, String> {
    match command {
        Command::Run { input, out } => {
            let config = BatchConfig {
                input_dir: input,
                out_dir: out,
            };
            let summary = run_batch(&config).map_err(|e| e.to_string())?;
            print!("{}", render_run_text(&summary));
            let summary_path =
                write_run_summary(&config.out_dir, &summary).map_err(|e| e.to_string())?;
            tracing::info!(summary = %summary_path.display(), "run summary written");
            if summary.has_failures() {
                return Err(format!(
                    "{} of {} table(s) failed",
                    summary.files_failed, summary.files_total
                ));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Band { input, out } => {
            let stats = transform_file(&input, &out).map_err(|e| e.to_string())?;
            tracing::info!(
                input = %input.display(),
                output = %out.display(),
                days = stats.days,
                points = stats.points_total(),
                omitted = stats.omitted_total(),
                "bands written"
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { bands } => {
            let set = read_bands(&bands).map_err(|e| e.to_string())?;
            let counts = set.point_counts();
            let issues = verify_bands(&set);
            for issue in &issues {
                println!("{}: {issue}", bands.display());
            }
            println!(
                "{}: {} point(s) [{}], {} issue(s)",
                bands.display(),
                set.total_points(),
                Percentile::ALL
                    .iter()
                    .map(|p| format!("{}={}", p.label(), counts[p.index()]))
                    .collect::<Vec<_>>()
                    .join(", "),
                issues.len()
            );
            if issues.is_empty() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Zscore { table, day, value } => {
            let (z, entry) = zscore_for(&table, day, value)?;
            println!("z = {z:.4}");
            for (p, pz) in ZScoreSet::CANONICAL.iter() {
                match evaluate(pz, &entry).value() {
                    Some(v) => println!("{:>4} = {}", p.label(), round3(v)),
                    None => println!("{:>4} = n/a", p.label()),
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn zscore_for(table: &Path, day: u32, value: f64) -> Result<(f64, LmsEntry), String> {
    let lms = load_lms_table(table).map_err(|e| e.to_string())?;
    let entry = *lms
        .get(day)
        .ok_or_else(|| format!("{}: no entry for day {day}", table.display()))?;
    match z_score(value, &entry) {
        LmsOutcome::Value(z) => Ok((z, entry)),
        LmsOutcome::NotComputable(reason) => Err(format!(
            "z-score not computable for value {value} at day {day}: {}",
            reason.label()
        )),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
