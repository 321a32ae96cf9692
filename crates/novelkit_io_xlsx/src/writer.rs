//! XLSX writer kernel that turns a scene data frame into a styled worksheet.

use std::path::PathBuf;

use polars::prelude::DataFrame;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use crate::spec::{
    EnumBorderStyle, EnumCellValue, EnumHAlign, EnumVAlign, SpecCellFormat, SpecXlsxExportOptions,
    SpecXlsxReport,
};
use crate::util::{
    calculate_column_widths, derive_cell_value_from_any_value, plan_columns,
    sanitize_sheet_name, validate_sheet_extent,
};

/// Stateful workbook writer.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    options: SpecXlsxExportOptions,
    l_reports: Vec<SpecXlsxReport>,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path and export options.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(path_file_out: PathBuf, options: SpecXlsxExportOptions) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            options,
            l_reports: Vec::new(),
            if_closed: false,
        }
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Flush workbook to disk, replacing any existing file. Idempotent.
    pub fn close(&mut self) -> Result<(), String> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook
            .save(&self.path_file_out)
            .map_err(derive_xlsx_error_text)?;
        self.if_closed = true;
        Ok(())
    }

    /// Write the scene table as one styled sheet.
    pub fn write_scene_sheet(&mut self, df_data: &DataFrame) -> Result<SpecXlsxReport, String> {
        if self.if_closed {
            return Err("Cannot write after close().".to_string());
        }

        let n_width_df = df_data.width();
        let n_height_df = df_data.height();
        validate_sheet_extent(n_height_df, n_width_df)?;

        let l_widths = calculate_column_widths(df_data, self.options.width_cell_padding)?;
        let l_col_plans = plan_columns(&l_widths, &self.options);

        let mut report = SpecXlsxReport {
            path_out: self.path_file_out.clone(),
            sheet_name: sanitize_sheet_name(&self.options.sheet_name, "_"),
            n_rows: n_height_df,
            columns: l_col_plans.clone(),
            warnings: vec![],
        };
        if report.sheet_name != self.options.sheet_name {
            report.warn(format!(
                "Sheet name {:?} sanitized to {:?}.",
                self.options.sheet_name, report.sheet_name
            ));
        }

        let fmt_header = derive_rust_xlsx_format(&self.options.fmt_header_final());
        let l_fmt_data_by_col: Vec<Format> = l_col_plans
            .iter()
            .map(|plan| derive_rust_xlsx_format(&self.options.fmt_for(plan.rule)))
            .collect();

        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&report.sheet_name)
            .map_err(derive_xlsx_error_text)?;

        for plan in &l_col_plans {
            log::debug!(
                "column {} {:?}: width={} format={}",
                plan.col_idx,
                plan.name,
                plan.width_final,
                plan.rule.fmt_key().as_str()
            );
            let n_col = cast_col_num(plan.col_idx)?;
            worksheet
                .write_string_with_format(0, n_col, &plan.name, &fmt_header)
                .map_err(derive_xlsx_error_text)?;
            worksheet
                .set_column_width(n_col, plan.width_final as f64)
                .map_err(derive_xlsx_error_text)?;
            worksheet
                .set_column_format(n_col, &l_fmt_data_by_col[plan.col_idx])
                .map_err(derive_xlsx_error_text)?;
        }

        for (n_idx_col, (column, fmt_col)) in df_data
            .get_columns()
            .iter()
            .zip(&l_fmt_data_by_col)
            .enumerate()
        {
            let n_col = cast_col_num(n_idx_col)?;
            for n_idx_row in 0..n_height_df {
                let value = column
                    .get(n_idx_row)
                    .map(derive_cell_value_from_any_value)
                    .map_err(|err| format!("Failed to read row {n_idx_row}: {err}"))?;
                write_scene_cell(worksheet, cast_row_num(n_idx_row + 1)?, n_col, &value, fmt_col)?;
            }
        }

        if self.options.if_autofilter && n_width_df > 0 {
            worksheet
                .autofilter(
                    0,
                    0,
                    cast_row_num(n_height_df)?,
                    cast_col_num(n_width_df - 1)?,
                )
                .map_err(derive_xlsx_error_text)?;
        }

        worksheet
            .set_freeze_panes(cast_row_num(self.options.row_freeze)?, 0)
            .map_err(derive_xlsx_error_text)?;

        self.l_reports.push(report.clone());
        Ok(report)
    }
}

fn write_scene_cell(
    worksheet: &mut Worksheet,
    n_row: u32,
    n_col: u16,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), String> {
    let result = match value {
        EnumCellValue::None => worksheet.write_blank(n_row, n_col, format),
        EnumCellValue::String(val) => worksheet.write_string_with_format(n_row, n_col, val, format),
        EnumCellValue::Number(val) => worksheet.write_number_with_format(n_row, n_col, *val, format),
    };
    result.map(|_| ()).map_err(derive_xlsx_error_text)
}

impl From<EnumHAlign> for FormatAlign {
    fn from(align: EnumHAlign) -> Self {
        match align {
            EnumHAlign::Left => FormatAlign::Left,
            EnumHAlign::Center => FormatAlign::Center,
            EnumHAlign::Right => FormatAlign::Right,
        }
    }
}

impl From<EnumVAlign> for FormatAlign {
    fn from(align: EnumVAlign) -> Self {
        match align {
            EnumVAlign::Top => FormatAlign::Top,
            EnumVAlign::Center => FormatAlign::VerticalCenter,
            EnumVAlign::Bottom => FormatAlign::Bottom,
        }
    }
}

impl From<EnumBorderStyle> for FormatBorder {
    fn from(border: EnumBorderStyle) -> Self {
        match border {
            EnumBorderStyle::Thin => FormatBorder::Thin,
            EnumBorderStyle::Medium => FormatBorder::Medium,
            EnumBorderStyle::Thick => FormatBorder::Thick,
        }
    }
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();
    if let Some(c_font) = &spec.font_name {
        format = format.set_font_name(c_font.as_str());
    }
    if spec.bold == Some(true) {
        format = format.set_bold();
    }
    if spec.text_wrap == Some(true) {
        format = format.set_text_wrap();
    }
    for align in [spec.align.map(FormatAlign::from), spec.valign.map(FormatAlign::from)]
        .into_iter()
        .flatten()
    {
        format = format.set_align(align);
    }
    if let Some(border) = spec.border {
        format = format.set_border(border.into());
    }
    if let Some(c_color) = &spec.bg_color {
        format = format.set_background_color(c_color.as_str());
    }
    format
}

fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row {value} exceeds the sheet"))
}

fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column {value} exceeds the sheet"))
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("Failed to write workbook: {err}")
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Read;
    use std::path::Path;

    use polars::prelude::{Column, NamedFrom, Series};

    use super::*;
    use crate::spec::EnumColumnStyleRule;

    fn read_sheet_xml(path_xlsx: &Path) -> String {
        let mut archive = zip::ZipArchive::new(File::open(path_xlsx).unwrap()).unwrap();
        let mut c_xml = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut c_xml)
            .unwrap();
        c_xml
    }

    #[test]
    fn test_saved_sheet_carries_filter_freeze_and_widths() {
        let dir = tempfile::tempdir().unwrap();
        let path_out = dir.path().join("scenes.xlsx");
        let df = DataFrame::new(vec![
            Column::from(Series::new("id".into(), vec!["A", "B", "C"])),
            Column::from(Series::new("pov".into(), vec!["Ann", "Ben", "Cy"])),
            Column::from(Series::new("summary".into(), vec!["x".repeat(70), "y".into(), "z".into()])),
        ])
        .unwrap();

        let mut writer = XlsxWriter::new(path_out.clone(), SpecXlsxExportOptions::default());
        let report = writer.write_scene_sheet(&df).unwrap();
        writer.close().unwrap();

        let c_xml = read_sheet_xml(&path_out);
        assert!(c_xml.contains(r#"<autoFilter ref="A1:C4"/>"#), "{c_xml}");
        assert!(c_xml.contains(r#"ySplit="1""#), "{c_xml}");
        assert!(c_xml.contains(r#"topLeftCell="A2""#), "{c_xml}");
        assert!(c_xml.contains(r#"state="frozen""#), "{c_xml}");
        for plan in &report.columns {
            let n_col = plan.col_idx + 1;
            let c_col = format!(r#"<col min="{n_col}" max="{n_col}" width="{}.7"#, plan.width_final);
            assert!(c_xml.contains(&c_col), "missing {c_col} in {c_xml}");
        }
        assert_eq!(
            report.columns.iter().map(|p| p.width_final).collect::<Vec<_>>(),
            vec![4, 5, 50]
        );
    }

    #[test]
    fn test_write_scene_sheet_reports_plan_in_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path_out = dir.path().join("scenes.xlsx");
        let df = DataFrame::new(vec![
            Column::from(Series::new("id".into(), vec!["A", "B"])),
            Column::from(Series::new("status".into(), vec!["draft", "done"])),
            Column::from(Series::new("summary".into(), vec!["x".repeat(70), "y".to_string()])),
        ])
        .unwrap();

        let mut writer = XlsxWriter::new(path_out.clone(), SpecXlsxExportOptions::default());
        let report = writer.write_scene_sheet(&df).unwrap();
        writer.close().unwrap();

        assert!(path_out.exists());
        assert_eq!(report.sheet_name, "Scenes");
        assert_eq!(report.n_rows, 2);
        assert_eq!(
            report
                .columns
                .iter()
                .map(|p| (p.name.as_str(), p.rule, p.width_final))
                .collect::<Vec<_>>(),
            vec![
                ("id", EnumColumnStyleRule::Plain, 4),
                ("status", EnumColumnStyleRule::Centered, 8),
                ("summary", EnumColumnStyleRule::LongText, 50),
            ]
        );
        assert!(writer.report()[0].warnings.is_empty());
    }

    #[test]
    fn test_write_after_close_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let df = DataFrame::new(vec![Column::from(Series::new("id".into(), vec!["A"]))]).unwrap();

        let mut writer =
            XlsxWriter::new(dir.path().join("out.xlsx"), SpecXlsxExportOptions::default());
        writer.write_scene_sheet(&df).unwrap();
        writer.close().unwrap();
        writer.close().unwrap();

        assert!(writer.write_scene_sheet(&df).is_err());
    }

    #[test]
    fn test_header_format_carries_fill_and_wrap() {
        let options = SpecXlsxExportOptions::default();
        let fmt_header = options.fmt_header_final();

        assert_eq!(fmt_header.bold, Some(true));
        assert_eq!(fmt_header.text_wrap, Some(true));
        assert_eq!(fmt_header.valign, Some(EnumVAlign::Top));
        assert_eq!(fmt_header.bg_color.as_deref(), Some("#D7E4BC"));
        assert_eq!(fmt_header.border, Some(EnumBorderStyle::Thin));
    }
}
