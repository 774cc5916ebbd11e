use std::fmt::Write;

use crate::model::percentiles::Percentile;
use crate::report::{FileStatus, FileSummary, RunSummary};

pub fn render_run_text(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}: {} file(s), {} ok, {} failed",
        summary.tool.name,
        summary.tool.version,
        summary.files_total,
        summary.files_ok,
        summary.files_failed
    );
    for file in &summary.files {
        out.push_str(&render_file_line(file));
        out.push('\n');
    }
    out
}

pub fn render_file_line(file: &FileSummary) -> String {
    match file.status {
        FileStatus::Ok => {
            let points = file.points.unwrap_or_default();
            let omitted = file.omitted.map(|o| o.total()).unwrap_or(0);
            let mut line = format!(
                "  OK     {} -> {} (days={}",
                file.input,
                file.output.as_deref().unwrap_or("-"),
                file.days.unwrap_or(0)
            );
            for p in Percentile::ALL {
                let _ = write!(line, ", {}={}", p.label(), points.get(p));
            }
            let _ = write!(line, ", omitted={omitted})");
            line
        }
        FileStatus::Failed => format!(
            "  FAILED {}: {}",
            file.input,
            file.error.as_deref().unwrap_or("unknown error")
        ),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
