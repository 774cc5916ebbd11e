use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;

use crate::input::InputError;
use crate::input::gz::open_maybe_gz;
use crate::model::lms::{LmsEntry, LmsTable};

pub fn load_lms_table(path: &Path) -> Result<LmsTable, InputError> {
    let reader = open_maybe_gz(path)?;
    parse_lms_table(path, reader)
}

/// Parses `{"<day>": {"L": .., "M": .., "S": ..}, ...}`. `path` is only used
/// for diagnostics.
pub fn parse_lms_table<R: Read>(path: &Path, reader: R) -> Result<LmsTable, InputError> {
    let root: RawTable = serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            InputError::io(path, e.into())
        } else {
            InputError::Json {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let RawTable::Object(entries) = root else {
        return Err(InputError::NotAnObject {
            path: path.to_path_buf(),
        });
    };

    let malformed = |day: &str, reason: String| InputError::Malformed {
        path: path.to_path_buf(),
        day: day.to_string(),
        reason,
    };

    let mut table = LmsTable::new();
    for (key, value) in entries {
        let day = parse_day(&key).ok_or_else(|| {
            malformed(&key, "day key is not a non-negative integer".to_string())
        })?;
        if !value.is_object() {
            return Err(malformed(&key, "entry is not an object".to_string()));
        }
        let entry = LmsEntry::deserialize(&value).map_err(|e| malformed(&key, e.to_string()))?;
        if table.insert(day, entry).is_some() {
            return Err(malformed(&key, format!("duplicate entry for day {day}")));
        }
    }

    tracing::debug!(path = %path.display(), days = table.len(), "loaded LMS table");
    Ok(table)
}

/// Top level of a table file. Object entries are kept in file order with
/// repeated keys intact, so a repeated day can be reported instead of
/// silently overwritten.
enum RawTable {
    Object(Vec<(String, Value)>),
    Other,
}

impl<'de> Deserialize<'de> for RawTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawTableVisitor)
    }
}

struct RawTableVisitor;

impl<'de> Visitor<'de> for RawTableVisitor {
    type Value = RawTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawTable, A::Error> {
        let mut entries = Vec::new();
        while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
            entries.push((key, value));
        }
        Ok(RawTable::Object(entries))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawTable, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(RawTable::Other)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<RawTable, E> {
        Ok(RawTable::Other)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<RawTable, E> {
        Ok(RawTable::Other)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<RawTable, E> {
        Ok(RawTable::Other)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<RawTable, E> {
        Ok(RawTable::Other)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<RawTable, E> {
        Ok(RawTable::Other)
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawTable, E> {
        Ok(RawTable::Other)
    }
}

fn parse_day(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/lms_table.rs"]
mod tests;
