//! `novelkit_io_xlsx` v1:
//! Scene CSV to styled XLSX exporter.
//!
//! Modules:
//! - `conf`   : constants and default presets
//! - `spec`   : specs/models/options/errors
//! - `util`   : pure helper functions (widths, classification, naming)
//! - `writer` : rust_xlsxwriter-backed worksheet kernel
//! - `export` : CSV-in, workbook-out entry point
pub mod conf;
pub mod export;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_SHEET_NAME_DEFAULT, N_WIDTH_CELL_PADDING, N_WIDTH_LONG_TEXT_MAX, TUP_COLS_CENTERED,
    TUP_COLS_LONG_TEXT,
};
pub use export::export_scenes_to_xlsx;
pub use spec::{
    EnumBorderStyle, EnumCellValue, EnumColumnStyleRule, EnumHAlign, EnumVAlign, SpecCellFormat,
    SpecColumnPlan, SpecXlsxExportOptions, SpecXlsxReport, XlsxExportError,
};
pub use util::{calculate_column_widths, classify_column, derive_output_path, plan_columns};
pub use writer::XlsxWriter;
