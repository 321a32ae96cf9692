//! CSV loading and the normalized scene table.

use std::path::{Path, PathBuf};

use polars::prelude::{Column, CsvReadOptions, DataFrame, NamedFrom, SerReader, Series};

use crate::conf::{
    C_COL_CHARACTER_COUNT, C_COL_TENSION_SCORE, C_COL_WORDS, C_FIELD_CHARACTERS,
    C_FIELD_TENSION_SCORE, C_FIELD_WORDS, N_NUMERIC_DEFAULT,
};
use crate::spec::{SceneTableError, SpecSceneReadOptions};
use crate::util::{
    count_characters, derive_f64_from_any_value, derive_lowercase_columns,
    derive_text_from_any_value, parse_or_default, resolve_field_column,
};

/// Scene records after column normalization and derivation.
///
/// Only [`normalize_scene_frame`] builds this type, so every consumer sees
/// lower-cased names and the derived numeric columns.
#[derive(Debug, Clone)]
pub struct SceneTable {
    df: DataFrame,
}

impl SceneTable {
    /// Underlying data frame.
    pub fn df(&self) -> &DataFrame {
        &self.df
    }

    /// Number of scene records.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Column names in input order (derived columns appended).
    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names_str()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Resolve a logical field through the plain-then-prefixed lookup.
    pub fn resolve_column(&self, field: &str) -> Option<String> {
        resolve_field_column(&self.columns(), field)
    }

    /// Text values of a logical field, `None` when no column resolves.
    pub fn text_values(&self, field: &str) -> Option<Vec<Option<String>>> {
        let c_name = self.resolve_column(field)?;
        let column = self.df.column(&c_name).ok()?;
        Some(
            (0..self.df.height())
                .map(|n_idx| column.get(n_idx).ok().and_then(derive_text_from_any_value))
                .collect(),
        )
    }

    /// Numeric values of a column by exact name; nulls read as the numeric default.
    pub fn numeric_values(&self, name: &str) -> Option<Vec<f64>> {
        let column = self.df.column(name).ok()?;
        Some(
            (0..self.df.height())
                .map(|n_idx| {
                    column
                        .get(n_idx)
                        .ok()
                        .and_then(derive_f64_from_any_value)
                        .unwrap_or(N_NUMERIC_DEFAULT)
                })
                .collect(),
        )
    }
}

/// Read a CSV file with a header row into a data frame.
pub fn read_scene_frame(
    path: &Path,
    options: &SpecSceneReadOptions,
) -> Result<DataFrame, SceneTableError> {
    if !path.exists() {
        return Err(SceneTableError::InputNotFound(path.to_path_buf()));
    }

    let n_rows_infer = if options.if_infer_schema {
        options.n_rows_infer
    } else {
        Some(0)
    };

    let derive_read_error = |err: polars::prelude::PolarsError| SceneTableError::ReadCsv {
        path: path.to_path_buf(),
        message: err.to_string(),
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(n_rows_infer)
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))
        .map_err(derive_read_error)?
        .finish()
        .map_err(derive_read_error)?;

    log::debug!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Lower-case column names and append the derived numeric columns.
///
/// Derived columns whose source field is absent are left out; consumers that
/// need them report the missing name.
pub fn normalize_scene_frame(mut df: DataFrame) -> Result<SceneTable, SceneTableError> {
    let l_colnames: Vec<String> = df
        .get_column_names_str()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    let l_colnames_lower =
        derive_lowercase_columns(&l_colnames).map_err(SceneTableError::DuplicateColumns)?;
    df.set_column_names(l_colnames_lower.iter().map(String::as_str))?;

    let mut table = SceneTable { df };

    for (c_field, c_col_derived) in [
        (C_FIELD_TENSION_SCORE, C_COL_TENSION_SCORE),
        (C_FIELD_WORDS, C_COL_WORDS),
    ] {
        let Some(l_raw) = table.text_values(c_field) else {
            log::debug!("No `{c_field}` column; skipping derived `{c_col_derived}`");
            continue;
        };
        let l_values: Vec<f64> = l_raw
            .iter()
            .map(|raw| parse_or_default(raw.as_deref(), N_NUMERIC_DEFAULT))
            .collect();
        table
            .df
            .with_column(Column::from(Series::new(c_col_derived.into(), l_values)))?;
    }

    match table.text_values(C_FIELD_CHARACTERS) {
        Some(l_raw) => {
            let l_counts: Vec<u32> = l_raw
                .iter()
                .map(|raw| count_characters(raw.as_deref()) as u32)
                .collect();
            table.df.with_column(Column::from(Series::new(
                C_COL_CHARACTER_COUNT.into(),
                l_counts,
            )))?;
        }
        None => {
            log::debug!("No `{C_FIELD_CHARACTERS}` column; skipping `{C_COL_CHARACTER_COUNT}`");
        }
    }

    Ok(table)
}

/// Load a CSV as all-text columns and normalize it.
pub fn load_scene_table(path: &Path) -> Result<SceneTable, SceneTableError> {
    let df = read_scene_frame(path, &SpecSceneReadOptions::default())?;
    normalize_scene_frame(df)
}
