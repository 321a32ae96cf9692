//! CSV-to-XLSX export entry point.

use std::path::Path;

use novelkit_scene::{SpecSceneReadOptions, read_scene_frame};

use crate::spec::{SpecXlsxExportOptions, SpecXlsxReport, XlsxExportError};
use crate::util::derive_output_path;
use crate::writer::XlsxWriter;

/// Export a scene CSV to a styled workbook.
///
/// Aborts before any write when `path_csv` does not exist. The workbook lands
/// next to the input (same stem, `.xlsx`) unless `options.path_out` is set;
/// an existing file there is overwritten.
pub fn export_scenes_to_xlsx(
    path_csv: &Path,
    options: &SpecXlsxExportOptions,
) -> Result<SpecXlsxReport, XlsxExportError> {
    if !path_csv.exists() {
        return Err(XlsxExportError::InputNotFound(path_csv.to_path_buf()));
    }

    let df = read_scene_frame(path_csv, &SpecSceneReadOptions::inferred())?;

    let path_out = options
        .path_out
        .clone()
        .unwrap_or_else(|| derive_output_path(path_csv));
    log::info!(
        "Writing {} scenes x {} columns to {}",
        df.height(),
        df.width(),
        path_out.display()
    );

    let mut writer = XlsxWriter::new(path_out, options.clone());
    let report = writer
        .write_scene_sheet(&df)
        .map_err(XlsxExportError::Write)?;
    writer.close().map_err(XlsxExportError::Write)?;

    for c_warning in &report.warnings {
        log::warn!("{c_warning}");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::spec::EnumColumnStyleRule;

    fn write_csv(dir: &Path) -> PathBuf {
        let path = dir.join("scenes.csv");
        fs::write(
            &path,
            "id,title,status,pov,words,location,summary\n\
             A,Opening Scene,draft,Ann,1200,Harbor,\"She arrives at night.\"\n\
             B,Chase,done,Ben,,Old town,\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_export_preserves_column_order_and_writes_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let path_csv = write_csv(dir.path());

        let report = export_scenes_to_xlsx(&path_csv, &SpecXlsxExportOptions::default()).unwrap();

        assert_eq!(report.path_out, dir.path().join("scenes.xlsx"));
        assert!(report.path_out.exists());
        assert_eq!(report.n_rows, 2);
        assert_eq!(
            report.columns.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["id", "title", "status", "pov", "words", "location", "summary"]
        );
        assert_eq!(
            report.columns.iter().map(|p| p.rule).collect::<Vec<_>>(),
            vec![
                EnumColumnStyleRule::Plain,
                EnumColumnStyleRule::LongText,
                EnumColumnStyleRule::Centered,
                EnumColumnStyleRule::Centered,
                EnumColumnStyleRule::Plain,
                EnumColumnStyleRule::Plain,
                EnumColumnStyleRule::LongText,
            ]
        );
        // `words` is an integer column with a gap, so it measures as "1200.0".
        assert_eq!(report.columns[4].width_final, 8);
        assert_eq!(report.columns[1].width_final, 15);
    }

    #[test]
    fn test_export_twice_yields_identical_styling_plan() {
        let dir = tempfile::tempdir().unwrap();
        let path_csv = write_csv(dir.path());
        let options = SpecXlsxExportOptions::default();

        let report_first = export_scenes_to_xlsx(&path_csv, &options).unwrap();
        let report_second = export_scenes_to_xlsx(&path_csv, &options).unwrap();

        assert_eq!(report_first, report_second);
    }

    #[test]
    fn test_missing_input_aborts_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let path_csv = dir.path().join("missing.csv");

        let err = export_scenes_to_xlsx(&path_csv, &SpecXlsxExportOptions::default()).unwrap_err();

        assert!(matches!(err, XlsxExportError::InputNotFound(_)));
        assert!(!dir.path().join("missing.xlsx").exists());
    }

    #[test]
    fn test_late_text_in_numeric_column_still_exports() {
        let dir = tempfile::tempdir().unwrap();
        let path_csv = dir.path().join("long.csv");
        let mut c_body = String::from("id,title,words\n");
        for n_idx in 0..120 {
            c_body.push_str(&format!("s{n_idx},Scene {n_idx},{}\n", 1000 + n_idx));
        }
        c_body.push_str("s999,Late,TBD\n");
        fs::write(&path_csv, c_body).unwrap();

        let report = export_scenes_to_xlsx(&path_csv, &SpecXlsxExportOptions::default()).unwrap();

        assert!(report.path_out.exists());
        assert_eq!(report.n_rows, 121);
        assert_eq!(report.columns[2].width_final, 7);
    }

    #[test]
    fn test_output_override_is_respected() {
        let dir = tempfile::tempdir().unwrap();
        let path_csv = write_csv(dir.path());
        let path_out = dir.path().join("styled.xlsx");

        let options = SpecXlsxExportOptions {
            path_out: Some(path_out.clone()),
            ..Default::default()
        };
        let report = export_scenes_to_xlsx(&path_csv, &options).unwrap();

        assert_eq!(report.path_out, path_out);
        assert!(path_out.exists());
        assert!(!dir.path().join("scenes.xlsx").exists());
    }
}
