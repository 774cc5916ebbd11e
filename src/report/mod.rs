use serde::Serialize;

use crate::model::bands::BandStats;
use crate::model::lms::NotComputable;
use crate::model::percentiles::Percentile;

pub mod json;
pub mod text;

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

impl ToolMeta {
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Ok,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PointCounts {
    pub p3: usize,
    pub p15: usize,
    pub p50: usize,
    pub p85: usize,
    pub p97: usize,
}

impl PointCounts {
    pub fn get(&self, percentile: Percentile) -> usize {
        match percentile {
            Percentile::P3 => self.p3,
            Percentile::P15 => self.p15,
            Percentile::P50 => self.p50,
            Percentile::P85 => self.p85,
            Percentile::P97 => self.p97,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OmittedCounts {
    pub degenerate_parameters: usize,
    pub undefined_transform: usize,
    pub non_finite: usize,
}

impl OmittedCounts {
    pub fn total(&self) -> usize {
        self.degenerate_parameters + self.undefined_transform + self.non_finite
    }
}

impl From<&BandStats> for PointCounts {
    fn from(stats: &BandStats) -> Self {
        let at = |p: Percentile| stats.points[p.index()];
        Self {
            p3: at(Percentile::P3),
            p15: at(Percentile::P15),
            p50: at(Percentile::P50),
            p85: at(Percentile::P85),
            p97: at(Percentile::P97),
        }
    }
}

impl From<&BandStats> for OmittedCounts {
    fn from(stats: &BandStats) -> Self {
        let at = |r: NotComputable| stats.omitted[r.index()];
        Self {
            degenerate_parameters: at(NotComputable::DegenerateParameters),
            undefined_transform: at(NotComputable::UndefinedTransform),
            non_finite: at(NotComputable::NonFinite),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<PointCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omitted: Option<OmittedCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileSummary {
    pub fn ok(input: String, output: String, stats: &BandStats) -> Self {
        Self {
            input,
            output: Some(output),
            status: FileStatus::Ok,
            days: Some(stats.days),
            points: Some(PointCounts::from(stats)),
            omitted: Some(OmittedCounts::from(stats)),
            error: None,
        }
    }

    pub fn failed(input: String, error: String) -> Self {
        Self {
            input,
            output: None,
            status: FileStatus::Failed,
            days: None,
            points: None,
            omitted: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool: ToolMeta,
    pub input: String,
    pub out: String,
    pub files_total: usize,
    pub files_ok: usize,
    pub files_failed: usize,
    pub files: Vec<FileSummary>,
}

impl RunSummary {
    pub fn new(input: String, out: String, files: Vec<FileSummary>) -> Self {
        let files_ok = files.iter().filter(|f| f.status == FileStatus::Ok).count();
        Self {
            tool: ToolMeta::current(),
            input,
            out,
            files_total: files.len(),
            files_ok,
            files_failed: files.len() - files_ok,
            files,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.files_failed > 0
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
