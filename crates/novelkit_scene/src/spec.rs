//! Scene-table read options and error types.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// CSV read options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSceneReadOptions {
    /// Let the reader infer numeric dtypes. When `false` every column is text.
    pub if_infer_schema: bool,
    /// Rows inspected for inference; `None` scans the whole file.
    pub n_rows_infer: Option<usize>,
}

impl Default for SpecSceneReadOptions {
    fn default() -> Self {
        Self {
            if_infer_schema: false,
            n_rows_infer: None,
        }
    }
}

impl SpecSceneReadOptions {
    /// Options that keep reader dtype inference on.
    pub fn inferred() -> Self {
        Self {
            if_infer_schema: true,
            ..Default::default()
        }
    }
}

/// Errors raised while loading or normalizing a scene table.
#[derive(Debug, Error)]
pub enum SceneTableError {
    /// Input CSV path does not exist.
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),
    /// CSV could not be parsed.
    #[error("Failed to read CSV {}: {message}", path.display())]
    ReadCsv {
        /// Input path.
        path: PathBuf,
        /// Underlying reader message.
        message: String,
    },
    /// Two columns collapse to the same name after lower-casing.
    #[error("Duplicate column names after lower-casing: {0}")]
    DuplicateColumns(String),
    /// Data-frame operation failed.
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}
