//! Variable-metric resolution.
//!
//! A poem either has one fixed verse length or a "variable" metric, recorded
//! in the metadata as the `-1` sentinel and detailed in the free-text `info`
//! field after a fixed marker phrase.

use crate::error::{RecueilError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Marker phrase introducing the detailed metric list inside `info`.
pub const VARIABLE_MARKER: &str = "Métrique variable : ";

/// Shape of a detailed metric list: comma-separated integers.
static METRIC_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\s*,\s*\d+)*$").expect("valid metric list regex"));

/// A verse length is variable iff it is the `-1` sentinel, or already holds
/// a comma- or space-separated list.
pub fn is_variable(verse_length: &str) -> bool {
    let v = verse_length.trim();
    v == "-1" || v.contains(',') || v.contains(' ')
}

/// Resolves the detailed metric of a poem.
///
/// A verse length that already spells out its values (fixed, or an explicit
/// list) is returned unchanged. The `-1` sentinel requires `info` to start
/// with [`VARIABLE_MARKER`]; the list runs from right after the marker to the
/// first period, or to the end of the string when no period exists.
pub fn detailed_metric(poem_id: &str, verse_length: &str, info: Option<&str>) -> Result<String> {
    let raw = verse_length.trim();
    if raw != "-1" {
        return Ok(raw.to_string());
    }

    let info = info.ok_or_else(|| RecueilError::InvalidMetricState {
        poem_id: poem_id.to_string(),
    })?;
    let rest = info
        .strip_prefix(VARIABLE_MARKER)
        .ok_or_else(|| RecueilError::InvalidMetricState {
            poem_id: poem_id.to_string(),
        })?;
    let list = match rest.find('.') {
        Some(idx) => &rest[..idx],
        None => rest,
    };
    let list = list.trim();
    if !METRIC_LIST.is_match(list) {
        return Err(RecueilError::InvalidMetricState {
            poem_id: poem_id.to_string(),
        });
    }
    Ok(list.to_string())
}
