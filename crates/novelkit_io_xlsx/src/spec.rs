//! Shared XLSX specification models.

use std::path::PathBuf;

use novelkit_scene::SceneTableError;
use thiserror::Error;

use crate::conf::{
    C_SHEET_NAME_DEFAULT, EnumFmtKey, N_WIDTH_CELL_PADDING, N_WIDTH_LONG_TEXT_MAX,
    TUP_COLS_CENTERED, TUP_COLS_LONG_TEXT, derive_format_preset,
};

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Horizontal cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumHAlign {
    /// Flush left.
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// Vertical cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumVAlign {
    /// Top of the cell.
    Top,
    /// Vertically centered.
    Center,
    /// Bottom of the cell.
    Bottom,
}

/// Line style drawn around a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumBorderStyle {
    /// Thin line.
    Thin,
    /// Medium line.
    Medium,
    /// Thick line.
    Thick,
}

/// Cell format; unset fields defer to whatever it is merged over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Bold text.
    pub bold: Option<bool>,
    /// Wrap long text inside the cell.
    pub text_wrap: Option<bool>,
    /// Horizontal alignment.
    pub align: Option<EnumHAlign>,
    /// Vertical alignment.
    pub valign: Option<EnumVAlign>,
    /// Border on all four sides.
    pub border: Option<EnumBorderStyle>,
    /// Background fill color as `#RRGGBB`.
    pub bg_color: Option<String>,
}

impl SpecCellFormat {
    /// Overlay `other` on `self`; set fields of `other` win.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            bold: other.bold.or(self.bold),
            text_wrap: other.text_wrap.or(self.text_wrap),
            align: other.align.or(self.align),
            valign: other.valign.or(self.valign),
            border: other.border.or(self.border),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
        }
    }
}

/// Normalized cell value during the write pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnPlan

/// Style class assigned to a data column by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumColumnStyleRule {
    /// Wrapped text, width capped.
    LongText,
    /// Centered horizontally and vertically.
    Centered,
    /// Width only.
    Plain,
}

impl EnumColumnStyleRule {
    /// Format preset backing this rule.
    pub fn fmt_key(&self) -> EnumFmtKey {
        match self {
            Self::LongText => EnumFmtKey::LongText,
            Self::Centered => EnumFmtKey::Centered,
            Self::Plain => EnumFmtKey::Plain,
        }
    }
}

/// Planned width and style for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecColumnPlan {
    /// Zero-based column index.
    pub col_idx: usize,
    /// Column name as written in the header.
    pub name: String,
    /// Style class.
    pub rule: EnumColumnStyleRule,
    /// Estimated width (longest text + padding) before any cap.
    pub width_estimated: usize,
    /// Width applied to the sheet column.
    pub width_final: usize,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Export options for the scene spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxExportOptions {
    /// Target sheet name.
    pub sheet_name: String,
    /// Output path override; defaults to the input path with `.xlsx`.
    pub path_out: Option<PathBuf>,
    /// Margin added to measured widths.
    pub width_cell_padding: usize,
    /// Width cap for long-text columns.
    pub width_long_text_max: usize,
    /// Long-text column names (compared case-insensitively, `:` prefix ignored).
    pub cols_long_text: Vec<String>,
    /// Centered column names (compared case-insensitively, `:` prefix ignored).
    pub cols_centered: Vec<String>,
    /// Base format underlying the header and every column format.
    pub fmt_base: SpecCellFormat,
    /// Header row format.
    pub fmt_header: SpecCellFormat,
    /// Long-text column format.
    pub fmt_long_text: SpecCellFormat,
    /// Centered column format.
    pub fmt_centered: SpecCellFormat,
    /// Format for all other columns.
    pub fmt_plain: SpecCellFormat,
    /// Add an autofilter over header and data.
    pub if_autofilter: bool,
    /// Frozen row count (header height).
    pub row_freeze: usize,
}

impl Default for SpecXlsxExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: C_SHEET_NAME_DEFAULT.to_string(),
            path_out: None,
            width_cell_padding: N_WIDTH_CELL_PADDING,
            width_long_text_max: N_WIDTH_LONG_TEXT_MAX,
            cols_long_text: TUP_COLS_LONG_TEXT.iter().map(ToString::to_string).collect(),
            cols_centered: TUP_COLS_CENTERED.iter().map(ToString::to_string).collect(),
            fmt_base: SpecCellFormat::default(),
            fmt_header: derive_format_preset(EnumFmtKey::Header),
            fmt_long_text: derive_format_preset(EnumFmtKey::LongText),
            fmt_centered: derive_format_preset(EnumFmtKey::Centered),
            fmt_plain: derive_format_preset(EnumFmtKey::Plain),
            if_autofilter: true,
            row_freeze: 1,
        }
    }
}

impl SpecXlsxExportOptions {
    /// Cell format for a style rule, merged over the base format.
    pub fn fmt_for(&self, rule: EnumColumnStyleRule) -> SpecCellFormat {
        let fmt_rule = match rule {
            EnumColumnStyleRule::LongText => &self.fmt_long_text,
            EnumColumnStyleRule::Centered => &self.fmt_centered,
            EnumColumnStyleRule::Plain => &self.fmt_plain,
        };
        self.fmt_base.merge(fmt_rule)
    }

    /// Header format merged over the base format.
    pub fn fmt_header_final(&self) -> SpecCellFormat {
        self.fmt_base.merge(&self.fmt_header)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-export report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Written workbook path.
    pub path_out: PathBuf,
    /// Actual sheet name in workbook.
    pub sheet_name: String,
    /// Data rows written (header excluded).
    pub n_rows: usize,
    /// Per-column width/style plan in sheet order.
    pub columns: Vec<SpecColumnPlan>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

/// Errors raised by the spreadsheet exporter.
#[derive(Debug, Error)]
pub enum XlsxExportError {
    /// Input CSV path does not exist; nothing was written.
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),
    /// Input could not be loaded.
    #[error(transparent)]
    Table(SceneTableError),
    /// Workbook could not be built or saved.
    #[error("{0}")]
    Write(String),
}

impl From<SceneTableError> for XlsxExportError {
    fn from(err: SceneTableError) -> Self {
        match err {
            SceneTableError::InputNotFound(path) => Self::InputNotFound(path),
            other => Self::Table(other),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
