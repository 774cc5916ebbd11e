use std::collections::BTreeSet;
use std::fmt;

use crate::model::bands::BandSet;
use crate::model::percentiles::Percentile;

#[derive(Debug, Clone, PartialEq)]
pub enum BandIssue {
    DayOrder {
        percentile: Percentile,
        index: usize,
        day: u32,
    },
    BadValue {
        percentile: Percentile,
        day: u32,
        value: f64,
    },
    Crossing {
        day: u32,
        lower: Percentile,
        upper: Percentile,
    },
}

impl fmt::Display for BandIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandIssue::DayOrder {
                percentile,
                index,
                day,
            } => write!(
                f,
                "{percentile}: point {index} (day {day}) is not after the previous day"
            ),
            BandIssue::BadValue {
                percentile,
                day,
                value,
            } => write!(f, "{percentile}: day {day} has invalid value {value}"),
            BandIssue::Crossing { day, lower, upper } => {
                write!(f, "day {day}: {lower} lies above {upper}")
            }
        }
    }
}

/// Consumer-side checks on an emitted band set: strictly ascending days per
/// curve, finite non-negative values, and no crossing between adjacent curves.
pub fn verify_bands(bands: &BandSet) -> Vec<BandIssue> {
    let mut issues = Vec::new();
    let mut days = BTreeSet::new();

    for p in Percentile::ALL {
        let series = bands.series(p);
        for (index, point) in series.iter().enumerate() {
            days.insert(point.day);
            if index > 0 && point.day <= series[index - 1].day {
                issues.push(BandIssue::DayOrder {
                    percentile: p,
                    index,
                    day: point.day,
                });
            }
            // 0.0 is a positive value below the 3-decimal resolution.
            if !(point.value.is_finite() && point.value >= 0.0) {
                issues.push(BandIssue::BadValue {
                    percentile: p,
                    day: point.day,
                    value: point.value,
                });
            }
        }
    }

    if !issues.is_empty() {
        return issues;
    }

    for day in days {
        let present: Vec<(Percentile, f64)> = Percentile::ALL
            .into_iter()
            .filter_map(|p| bands.value_at(p, day).map(|v| (p, v)))
            .collect();
        for pair in present.windows(2) {
            let (lower, lo) = pair[0];
            let (upper, hi) = pair[1];
            if lo > hi {
                issues.push(BandIssue::Crossing { day, lower, upper });
            }
        }
    }
    issues
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_verify.rs"]
mod tests;
