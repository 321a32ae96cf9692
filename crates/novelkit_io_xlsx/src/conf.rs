//! XLSX constants and format presets.

use crate::spec::{EnumBorderStyle, EnumHAlign, EnumVAlign, SpecCellFormat};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Sheet holding the exported scenes.
pub const C_SHEET_NAME_DEFAULT: &str = "Scenes";
/// Extension of the exported workbook.
pub const C_XLSX_EXTENSION: &str = "xlsx";
/// Text measured for missing cells during width estimation.
pub const C_MISSING_VALUE_TEXT: &str = "nan";
/// Margin added to every measured column width.
pub const N_WIDTH_CELL_PADDING: usize = 2;
/// Width cap for long-text columns.
pub const N_WIDTH_LONG_TEXT_MAX: usize = 50;

/// Columns holding prose; wrapped and width-capped.
pub const TUP_COLS_LONG_TEXT: [&str; 7] = [
    "title",
    "goal",
    "conflict",
    "outcome",
    "summary",
    "notes",
    "characters",
];
/// Short categorical columns; centered.
pub const TUP_COLS_CENTERED: [&str; 3] = ["status", "arc", "pov"];

/// Header fill color.
pub const C_HEADER_BG_COLOR: &str = "#D7E4BC";

/// Canonical format preset keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EnumFmtKey {
    /// Header row format.
    Header,
    /// Wrapped, top-aligned prose columns.
    LongText,
    /// Centered categorical columns.
    Centered,
    /// Everything else.
    Plain,
}

impl EnumFmtKey {
    /// Preset key string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::LongText => "long_text",
            Self::Centered => "centered",
            Self::Plain => "plain",
        }
    }
}

/// Default format behind each preset key.
pub fn derive_format_preset(key: EnumFmtKey) -> SpecCellFormat {
    match key {
        EnumFmtKey::Header => SpecCellFormat {
            bold: Some(true),
            text_wrap: Some(true),
            valign: Some(EnumVAlign::Top),
            border: Some(EnumBorderStyle::Thin),
            bg_color: Some(C_HEADER_BG_COLOR.to_string()),
            ..Default::default()
        },
        EnumFmtKey::LongText => SpecCellFormat {
            text_wrap: Some(true),
            valign: Some(EnumVAlign::Top),
            ..Default::default()
        },
        EnumFmtKey::Centered => SpecCellFormat {
            align: Some(EnumHAlign::Center),
            valign: Some(EnumVAlign::Center),
            ..Default::default()
        },
        EnumFmtKey::Plain => SpecCellFormat::default(),
    }
}
