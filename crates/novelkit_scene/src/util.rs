//! Stateless helpers for scene-field access and value coercion.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::AnyValue;

use crate::conf::{C_COLUMN_PREFIX, TUP_LIST_DELIMITERS};

////////////////////////////////////////////////////////////////////////////////
// #region NumericCoercion

/// Parse a numeric cell. Missing, blank, unparseable and non-finite input is `None`.
pub fn parse_numeric(raw: Option<&str>) -> Option<f64> {
    let c_value = raw?.trim();
    if c_value.is_empty() {
        return None;
    }
    c_value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a numeric cell, substituting `default` when [`parse_numeric`] yields `None`.
pub fn parse_or_default(raw: Option<&str>, default: f64) -> f64 {
    parse_numeric(raw).unwrap_or(default)
}

/// Read a numeric scalar out of a data-frame cell.
pub fn derive_f64_from_any_value(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::UInt8(val) => Some(val as f64),
        AnyValue::UInt16(val) => Some(val as f64),
        AnyValue::UInt32(val) => Some(val as f64),
        AnyValue::UInt64(val) => Some(val as f64),
        AnyValue::Int8(val) => Some(val as f64),
        AnyValue::Int16(val) => Some(val as f64),
        AnyValue::Int32(val) => Some(val as f64),
        AnyValue::Int64(val) => Some(val as f64),
        AnyValue::Float32(val) => Some(val as f64),
        AnyValue::Float64(val) => Some(val),
        AnyValue::String(val) => parse_numeric(Some(val)),
        AnyValue::StringOwned(val) => parse_numeric(Some(val.as_str())),
        _ => None,
    }
}

/// Read a data-frame cell as text; `None` for nulls.
pub fn derive_text_from_any_value(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(val) => Some(val.to_string()),
        AnyValue::StringOwned(val) => Some(val.to_string()),
        _ => Some(value.to_string()),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ListFields

/// Split a comma-delimited list (ASCII or full-width) into trimmed, non-empty tokens.
///
/// Whitespace-only tokens are dropped, so `" , Bob"` yields one token rather
/// than a blank name plus `Bob`.
pub fn split_scene_refs(raw: &str) -> Vec<&str> {
    raw.split(&TUP_LIST_DELIMITERS[..])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Count names in a character-list cell. Missing input counts as zero.
pub fn count_characters(raw: Option<&str>) -> usize {
    raw.map_or(0, |c_value| split_scene_refs(c_value).len())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnNames

/// Lower-case column names, failing when two names collapse together.
pub fn derive_lowercase_columns(columns: &[String]) -> Result<Vec<String>, String> {
    let l_colnames: Vec<String> = columns.iter().map(|c| c.to_lowercase()).collect();
    if l_colnames.len() == l_colnames.iter().collect::<BTreeSet<_>>().len() {
        return Ok(l_colnames);
    }

    let mut dict_pos: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (n_idx, c_name) in l_colnames.iter().enumerate() {
        dict_pos.entry(c_name).or_default().push(n_idx);
    }

    let c_msg = dict_pos
        .iter()
        .filter(|(_, l_pos)| l_pos.len() > 1)
        .map(|(c_name, l_pos)| format!("{c_name:?} x{} at indices {:?}", l_pos.len(), l_pos))
        .collect::<Vec<_>>()
        .join("; ");

    Err(c_msg)
}

/// Resolve a logical field to an actual column name.
///
/// Matching is case-insensitive; the plain name wins over the `:`-prefixed one.
pub fn resolve_field_column(columns: &[String], field: &str) -> Option<String> {
    let c_field = field.trim_start_matches(C_COLUMN_PREFIX).to_lowercase();
    let c_field_prefixed = format!("{C_COLUMN_PREFIX}{c_field}");

    [c_field, c_field_prefixed].into_iter().find_map(|c_candidate| {
        columns
            .iter()
            .find(|c_name| c_name.to_lowercase() == c_candidate)
            .cloned()
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_default_distinguishes_zero_from_unparseable() {
        assert_eq!(parse_numeric(Some("0")), Some(0.0));
        assert_eq!(parse_numeric(Some("abc")), None);
        assert_eq!(parse_numeric(Some("  ")), None);
        assert_eq!(parse_numeric(Some("nan")), None);
        assert_eq!(parse_numeric(None), None);

        assert_eq!(parse_or_default(Some(" 7.5 "), -1.0), 7.5);
        assert_eq!(parse_or_default(Some("seven"), -1.0), -1.0);
        assert_eq!(parse_or_default(None, 0.0), 0.0);
    }

    #[test]
    fn test_count_characters_mixed_separators() {
        assert_eq!(count_characters(Some("Alice, Bob,\u{ff0c}Carol")), 3);
        assert_eq!(count_characters(Some("\u{5f20}\u{4e09}\u{ff0c}\u{674e}\u{56db}")), 2);
        assert_eq!(count_characters(Some("Solo")), 1);
        assert_eq!(count_characters(Some("")), 0);
        assert_eq!(count_characters(Some(" , ,")), 0);
        assert_eq!(count_characters(Some(" , Bob")), 1);
        assert_eq!(count_characters(None), 0);
    }

    #[test]
    fn test_split_scene_refs_trims_and_drops_empty_tokens() {
        assert_eq!(split_scene_refs("B, C\u{ff0c} D,,"), vec!["B", "C", "D"]);
        assert!(split_scene_refs("").is_empty());
    }

    #[test]
    fn test_resolve_field_column_prefers_plain_then_prefixed() {
        let columns = vec![":ID".to_string(), "title".to_string(), ":title".to_string()];

        assert_eq!(resolve_field_column(&columns, "id"), Some(":ID".to_string()));
        assert_eq!(resolve_field_column(&columns, ":id"), Some(":ID".to_string()));
        assert_eq!(resolve_field_column(&columns, "Title"), Some("title".to_string()));
        assert_eq!(resolve_field_column(&columns, "next"), None);
    }

    #[test]
    fn test_derive_lowercase_columns_rejects_collisions() {
        let columns = vec![":ID".to_string(), "Title".to_string()];
        assert_eq!(
            derive_lowercase_columns(&columns).unwrap(),
            vec![":id".to_string(), "title".to_string()]
        );

        let columns = vec!["Words".to_string(), "words".to_string()];
        let err = derive_lowercase_columns(&columns).unwrap_err();
        assert!(err.contains("\"words\" x2"));
    }
}
