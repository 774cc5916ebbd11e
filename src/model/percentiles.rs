use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Percentile {
    P3,
    P15,
    P50,
    P85,
    P97,
}

impl Percentile {
    pub const ALL: [Percentile; 5] = [
        Percentile::P3,
        Percentile::P15,
        Percentile::P50,
        Percentile::P85,
        Percentile::P97,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Percentile::P3 => "p3",
            Percentile::P15 => "p15",
            Percentile::P50 => "p50",
            Percentile::P85 => "p85",
            Percentile::P97 => "p97",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Standard-normal z-scores for the five chart percentiles, indexed by
/// [`Percentile::index`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZScoreSet {
    z: [f64; 5],
}

impl ZScoreSet {
    pub const CANONICAL: ZScoreSet = ZScoreSet {
        z: [-1.8808, -1.0364, 0.0, 1.0364, 1.8808],
    };

    pub fn z(&self, percentile: Percentile) -> f64 {
        self.z[percentile.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Percentile, f64)> + '_ {
        Percentile::ALL.into_iter().map(|p| (p, self.z(p)))
    }
}

impl Default for ZScoreSet {
    fn default() -> Self {
        Self::CANONICAL
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/percentiles.rs"]
mod tests;
