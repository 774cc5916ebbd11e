use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Below this |L| the Box-Cox inverse is evaluated as its log-normal limit.
pub const LOG_NORMAL_L_EPS: f64 = 0.001;

/// Skewness (L), median (M) and coefficient of variation (S) for one age day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LmsEntry {
    #[serde(rename = "L")]
    pub l: f64,
    #[serde(rename = "M")]
    pub m: f64,
    #[serde(rename = "S")]
    pub s: f64,
}

impl LmsEntry {
    pub fn new(l: f64, m: f64, s: f64) -> Self {
        Self { l, m, s }
    }

    pub fn is_valid(&self) -> bool {
        self.l.is_finite()
            && self.m.is_finite()
            && self.s.is_finite()
            && self.m > 0.0
            && self.s > 0.0
    }

    fn is_log_normal(&self) -> bool {
        self.l.abs() < LOG_NORMAL_L_EPS
    }
}

/// Reference parameters keyed by age in days. Iteration order is unspecified;
/// use [`LmsTable::sorted_days`] when order matters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LmsTable {
    entries: HashMap<u32, LmsEntry>,
}

impl LmsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous entry if `day` was already present.
    pub fn insert(&mut self, day: u32, entry: LmsEntry) -> Option<LmsEntry> {
        self.entries.insert(day, entry)
    }

    pub fn get(&self, day: u32) -> Option<&LmsEntry> {
        self.entries.get(&day)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn sorted_days(&self) -> Vec<u32> {
        let mut days: Vec<u32> = self.entries.keys().copied().collect();
        days.sort_unstable();
        days
    }
}

impl FromIterator<(u32, LmsEntry)> for LmsTable {
    fn from_iter<I: IntoIterator<Item = (u32, LmsEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotComputable {
    /// M <= 0, S <= 0, or a non-finite parameter.
    DegenerateParameters,
    /// 1 + L*S*z <= 0, outside the support of the power transform.
    UndefinedTransform,
    /// The result overflowed.
    NonFinite,
}

impl NotComputable {
    pub fn label(self) -> &'static str {
        match self {
            NotComputable::DegenerateParameters => "degenerate_parameters",
            NotComputable::UndefinedTransform => "undefined_transform",
            NotComputable::NonFinite => "non_finite",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LmsOutcome {
    Value(f64),
    NotComputable(NotComputable),
}

impl LmsOutcome {
    pub fn value(self) -> Option<f64> {
        match self {
            LmsOutcome::Value(v) => Some(v),
            LmsOutcome::NotComputable(_) => None,
        }
    }

    fn finite(v: f64) -> Self {
        if v.is_finite() {
            LmsOutcome::Value(v)
        } else {
            LmsOutcome::NotComputable(NotComputable::NonFinite)
        }
    }
}

/// Measurement value at z-score `z` for the distribution described by `entry`.
pub fn evaluate(z: f64, entry: &LmsEntry) -> LmsOutcome {
    if !entry.is_valid() {
        return LmsOutcome::NotComputable(NotComputable::DegenerateParameters);
    }
    if !z.is_finite() {
        return LmsOutcome::NotComputable(NotComputable::NonFinite);
    }

    if entry.is_log_normal() {
        return LmsOutcome::finite(entry.m * (entry.s * z).exp());
    }

    let inside = 1.0 + entry.l * entry.s * z;
    if inside <= 0.0 {
        return LmsOutcome::NotComputable(NotComputable::UndefinedTransform);
    }
    LmsOutcome::finite(entry.m * inside.powf(1.0 / entry.l))
}

/// Z-score of `value` under `entry`; the inverse of [`evaluate`].
pub fn z_score(value: f64, entry: &LmsEntry) -> LmsOutcome {
    if !entry.is_valid() {
        return LmsOutcome::NotComputable(NotComputable::DegenerateParameters);
    }
    if !value.is_finite() || value <= 0.0 {
        return LmsOutcome::NotComputable(NotComputable::UndefinedTransform);
    }

    let ratio = value / entry.m;
    if entry.is_log_normal() {
        return LmsOutcome::finite(ratio.ln() / entry.s);
    }
    LmsOutcome::finite((ratio.powf(entry.l) - 1.0) / (entry.l * entry.s))
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/lms.rs"]
mod tests;
