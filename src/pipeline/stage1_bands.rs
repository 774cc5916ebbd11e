use crate::model::bands::{BandPoint, BandSet, BandStats};
use crate::model::lms::{LmsOutcome, LmsTable, NotComputable, evaluate};
use crate::model::percentiles::ZScoreSet;

#[derive(Debug, Clone, PartialEq)]
pub struct BandOutput {
    pub bands: BandSet,
    pub stats: BandStats,
}

/// Rounds to 3 decimals, half away from zero, on the binary value of `v * 1000`.
pub fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

pub fn generate(table: &LmsTable, zscores: &ZScoreSet) -> BandSet {
    generate_with_stats(table, zscores).bands
}

pub fn generate_with_stats(table: &LmsTable, zscores: &ZScoreSet) -> BandOutput {
    let days = table.sorted_days();
    let mut bands = BandSet::default();
    let mut stats = BandStats {
        days: days.len(),
        ..BandStats::default()
    };

    for day in days {
        let Some(entry) = table.get(day) else {
            continue;
        };
        for (percentile, z) in zscores.iter() {
            let outcome = match evaluate(z, entry) {
                LmsOutcome::Value(v) => {
                    let rounded = round3(v);
                    if rounded.is_finite() {
                        LmsOutcome::Value(rounded)
                    } else {
                        LmsOutcome::NotComputable(NotComputable::NonFinite)
                    }
                }
                other => other,
            };
            match outcome {
                LmsOutcome::Value(value) => {
                    bands.push(percentile, BandPoint { day, value });
                    stats.points[percentile.index()] += 1;
                }
                LmsOutcome::NotComputable(reason) => {
                    tracing::debug!(day, percentile = %percentile, reason = reason.label(), "point omitted");
                    stats.record_omitted(reason);
                }
            }
        }
    }

    BandOutput { bands, stats }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_bands.rs"]
mod tests;
