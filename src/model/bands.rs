use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::lms::NotComputable;
use crate::model::percentiles::Percentile;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPoint {
    pub day: u32,
    pub value: f64,
}

/// Five percentile curves, each ascending by day. A curve may skip days that
/// other curves cover, so look points up by day rather than by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandSet {
    series: [Vec<BandPoint>; 5],
}

impl BandSet {
    pub fn series(&self, percentile: Percentile) -> &[BandPoint] {
        &self.series[percentile.index()]
    }

    pub(crate) fn push(&mut self, percentile: Percentile, point: BandPoint) {
        self.series[percentile.index()].push(point);
    }

    pub fn value_at(&self, percentile: Percentile, day: u32) -> Option<f64> {
        let series = self.series(percentile);
        series
            .binary_search_by_key(&day, |p| p.day)
            .ok()
            .map(|idx| series[idx].value)
    }

    pub fn point_counts(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for p in Percentile::ALL {
            counts[p.index()] = self.series(p).len();
        }
        counts
    }

    pub fn total_points(&self) -> usize {
        self.series.iter().map(Vec::len).sum()
    }
}

impl Serialize for BandSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Percentile::ALL.len()))?;
        for p in Percentile::ALL {
            map.serialize_entry(p.label(), self.series(p))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BandSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BandSetVisitor)
    }
}

const BAND_KEYS: &[&str] = &["p3", "p15", "p50", "p85", "p97"];

struct BandSetVisitor;

impl<'de> Visitor<'de> for BandSetVisitor {
    type Value = BandSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with keys p3, p15, p50, p85, p97")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<BandSet, A::Error> {
        let mut slots: [Option<Vec<BandPoint>>; 5] = Default::default();
        while let Some(key) = map.next_key::<String>()? {
            let p = Percentile::from_label(&key)
                .ok_or_else(|| <A::Error as de::Error>::unknown_field(&key, BAND_KEYS))?;
            if slots[p.index()].is_some() {
                return Err(de::Error::duplicate_field(p.label()));
            }
            slots[p.index()] = Some(map.next_value()?);
        }

        let mut out = BandSet::default();
        for p in Percentile::ALL {
            match slots[p.index()].take() {
                Some(points) => out.series[p.index()] = points,
                None => return Err(de::Error::missing_field(p.label())),
            }
        }
        Ok(out)
    }
}

/// Per-table accounting of emitted and omitted points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BandStats {
    pub days: usize,
    pub points: [usize; 5],
    pub omitted: [usize; 3],
}

impl BandStats {
    pub fn record_omitted(&mut self, reason: NotComputable) {
        self.omitted[reason.index()] += 1;
    }

    pub fn omitted_total(&self) -> usize {
        self.omitted.iter().sum()
    }

    pub fn points_total(&self) -> usize {
        self.points.iter().sum()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/bands.rs"]
mod tests;
