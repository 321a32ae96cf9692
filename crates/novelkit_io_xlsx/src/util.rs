//! Stateless helper utilities used by the XLSX writer kernel.

use std::path::{Path, PathBuf};

use polars::prelude::{AnyValue, DataFrame, DataType};

use crate::conf::{
    C_MISSING_VALUE_TEXT, C_XLSX_EXTENSION, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX,
    N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::spec::{EnumCellValue, EnumColumnStyleRule, SpecColumnPlan, SpecXlsxExportOptions};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Natural text of a cell as the data frame would print it.
///
/// Integral floats keep a trailing `.0`; nulls read as `nan`.
pub fn derive_natural_text(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => C_MISSING_VALUE_TEXT.to_string(),
        AnyValue::String(val) => val.to_string(),
        AnyValue::StringOwned(val) => val.to_string(),
        AnyValue::Boolean(val) => if *val { "True" } else { "False" }.to_string(),
        AnyValue::Float32(val) => derive_float_text(*val as f64),
        AnyValue::Float64(val) => derive_float_text(*val),
        _ => value.to_string(),
    }
}

fn derive_float_text(n: f64) -> String {
    if n.is_nan() {
        return C_MISSING_VALUE_TEXT.to_string();
    }
    if n.is_infinite() {
        return if n.is_sign_positive() { "inf" } else { "-inf" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e16 {
        return format!("{n:.1}");
    }
    n.to_string()
}

/// Convert a data-frame cell into a writable value. Non-finite numbers become blank.
pub fn derive_cell_value_from_any_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::None,
        AnyValue::String(val) => EnumCellValue::String(val.to_string()),
        AnyValue::StringOwned(val) => EnumCellValue::String(val.to_string()),
        AnyValue::Boolean(val) => {
            EnumCellValue::String(if val { "True" } else { "False" }.to_string())
        }
        AnyValue::UInt8(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt16(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt32(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int8(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int16(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float32(val) if val.is_finite() => EnumCellValue::Number(val as f64),
        AnyValue::Float64(val) if val.is_finite() => EnumCellValue::Number(val),
        AnyValue::Float32(_) | AnyValue::Float64(_) => EnumCellValue::None,
        _ => EnumCellValue::String(value.to_string()),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnWidths

/// Estimate display width of each column: longest text (header included) plus padding.
///
/// Returned in column order; an empty table yields header-only widths. Integer
/// columns with missing cells are measured as floats (`1200.0`), the way a
/// data frame promotes them once a gap appears.
pub fn calculate_column_widths(
    df: &DataFrame,
    width_cell_padding: usize,
) -> Result<Vec<(String, usize)>, String> {
    let mut l_widths = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let c_name = column.name().to_string();
        let column = if column.dtype().is_integer() && column.null_count() > 0 {
            column
                .cast(&DataType::Float64)
                .map_err(|err| format!("Failed to measure column {c_name:?}: {err}"))?
        } else {
            column.clone()
        };
        let mut n_width = c_name.chars().count();
        for n_idx_row in 0..df.height() {
            let value = column
                .get(n_idx_row)
                .map_err(|err| format!("Failed to access cell value: {err}"))?;
            n_width = usize::max(n_width, derive_natural_text(&value).chars().count());
        }
        l_widths.push((c_name, n_width + width_cell_padding));
    }
    Ok(l_widths)
}

/// Select the style class of a column from its name.
///
/// Case-insensitive, and a leading `:` attribute-key prefix is ignored.
pub fn classify_column(
    name: &str,
    cols_long_text: &[String],
    cols_centered: &[String],
) -> EnumColumnStyleRule {
    let c_key = name.trim().trim_start_matches(':').to_lowercase();
    let if_listed = |l_names: &[String]| l_names.iter().any(|c| c.to_lowercase() == c_key);

    if if_listed(cols_long_text) {
        EnumColumnStyleRule::LongText
    } else if if_listed(cols_centered) {
        EnumColumnStyleRule::Centered
    } else {
        EnumColumnStyleRule::Plain
    }
}

/// Combine estimated widths with style classes into per-column plans.
pub fn plan_columns(
    l_widths: &[(String, usize)],
    options: &SpecXlsxExportOptions,
) -> Vec<SpecColumnPlan> {
    l_widths
        .iter()
        .enumerate()
        .map(|(col_idx, (c_name, n_width))| {
            let rule = classify_column(c_name, &options.cols_long_text, &options.cols_centered);
            let width_final = match rule {
                EnumColumnStyleRule::LongText => usize::min(*n_width, options.width_long_text_max),
                EnumColumnStyleRule::Centered | EnumColumnStyleRule::Plain => *n_width,
            };
            SpecColumnPlan {
                col_idx,
                name: c_name.clone(),
                rule,
                width_estimated: *n_width,
                width_final,
            }
        })
        .collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Ensure header plus data fit one worksheet.
pub fn validate_sheet_extent(height_df: usize, width_df: usize) -> Result<(), String> {
    if height_df + 1 > N_NROWS_EXCEL_MAX {
        return Err(format!(
            "Too many rows for one sheet: {height_df} data rows exceed Excel limit."
        ));
    }
    if width_df > N_NCOLS_EXCEL_MAX {
        return Err(format!(
            "Too many columns for one sheet: {width_df} exceeds Excel limit."
        ));
    }
    Ok(())
}

/// Workbook path next to the input: same stem, `.xlsx` extension.
pub fn derive_output_path(path_csv: &Path) -> PathBuf {
    path_csv.with_extension(C_XLSX_EXTENSION)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, NamedFrom, Series};

    use super::*;

    fn build_df() -> DataFrame {
        DataFrame::new(vec![
            Column::from(Series::new("id".into(), vec![Some("A"), Some("B12345"), None])),
            Column::from(Series::new("words".into(), vec![1200i64, 7, 10])),
            Column::from(Series::new("tension".into(), vec![Some(3.0f64), None, Some(2.5)])),
        ])
        .unwrap()
    }

    #[test]
    fn test_calculate_column_widths_uses_longest_text_plus_padding() {
        let l_widths = calculate_column_widths(&build_df(), 2).unwrap();

        assert_eq!(
            l_widths,
            vec![
                ("id".to_string(), 8),
                ("words".to_string(), 7),
                ("tension".to_string(), 9),
            ]
        );
    }

    #[test]
    fn test_integer_column_with_gaps_measures_as_float() {
        let df = DataFrame::new(vec![
            Column::from(Series::new("words".into(), vec![Some(1200i64), None])),
            Column::from(Series::new("beats".into(), vec![1200i64, 7])),
        ])
        .unwrap();

        assert_eq!(
            calculate_column_widths(&df, 2).unwrap(),
            vec![("words".to_string(), 8), ("beats".to_string(), 6)]
        );
    }

    #[test]
    fn test_width_never_below_header_plus_padding() {
        let df = build_df();
        for (c_name, n_width) in calculate_column_widths(&df, 2).unwrap() {
            assert!(n_width >= c_name.chars().count() + 2);
        }

        let df_empty = DataFrame::new(vec![Column::from(Series::new(
            "summary".into(),
            Vec::<String>::new(),
        ))])
        .unwrap();
        assert_eq!(
            calculate_column_widths(&df_empty, 2).unwrap(),
            vec![("summary".to_string(), 9)]
        );
    }

    #[test]
    fn test_derive_natural_text() {
        assert_eq!(derive_natural_text(&AnyValue::Null), "nan");
        assert_eq!(derive_natural_text(&AnyValue::Float64(3.0)), "3.0");
        assert_eq!(derive_natural_text(&AnyValue::Float64(2.25)), "2.25");
        assert_eq!(derive_natural_text(&AnyValue::Int64(-42)), "-42");
        assert_eq!(derive_natural_text(&AnyValue::Boolean(true)), "True");
        assert_eq!(derive_natural_text(&AnyValue::String("\u{4f60}\u{597d}")), "\u{4f60}\u{597d}");
    }

    #[test]
    fn test_classify_column_rules_are_exclusive() {
        let options = SpecXlsxExportOptions::default();
        let classify = |name: &str| {
            classify_column(name, &options.cols_long_text, &options.cols_centered)
        };

        assert_eq!(classify("summary"), EnumColumnStyleRule::LongText);
        assert_eq!(classify(":Title"), EnumColumnStyleRule::LongText);
        assert_eq!(classify("POV"), EnumColumnStyleRule::Centered);
        assert_eq!(classify(":status"), EnumColumnStyleRule::Centered);
        assert_eq!(classify("words"), EnumColumnStyleRule::Plain);
        assert_eq!(classify("next"), EnumColumnStyleRule::Plain);
    }

    #[test]
    fn test_plan_columns_caps_only_long_text() {
        let options = SpecXlsxExportOptions::default();
        let l_widths = vec![
            ("summary".to_string(), 80),
            ("status".to_string(), 80),
            ("location".to_string(), 80),
        ];

        let l_plans = plan_columns(&l_widths, &options);
        assert_eq!(l_plans[0].width_final, 50);
        assert_eq!(l_plans[0].width_estimated, 80);
        assert_eq!(l_plans[1].width_final, 80);
        assert_eq!(l_plans[2].width_final, 80);
        assert_eq!(
            l_plans.iter().map(|p| p.col_idx).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_sanitize_sheet_name_and_output_path() {
        assert_eq!(sanitize_sheet_name("Act 1: Scenes?", "_"), "Act 1_ Scenes_");
        assert_eq!(sanitize_sheet_name("  ", "_"), "Sheet");
        assert_eq!(
            derive_output_path(Path::new("/tmp/novel/scenes.csv")),
            PathBuf::from("/tmp/novel/scenes.xlsx")
        );
    }
}
