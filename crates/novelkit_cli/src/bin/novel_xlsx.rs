//! `novel-xlsx`: export a scene CSV to a styled spreadsheet.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use novelkit_cli::{ArgsLog, init_logging};
use novelkit_io_xlsx::{SpecXlsxExportOptions, XlsxExportError, export_scenes_to_xlsx};

/// Novel scene exporter - CSV to styled XLSX
#[derive(Parser, Debug)]
#[command(name = "novel-xlsx")]
#[command(about = "Export a novel scene CSV to a styled XLSX workbook", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the scene CSV file
    #[arg(value_name = "FILE")]
    csv_path: PathBuf,

    /// Output workbook path (default: input path with .xlsx)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Worksheet name
    #[arg(long, value_name = "NAME")]
    sheet_name: Option<String>,

    #[command(flatten)]
    log: ArgsLog,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log);

    let mut options = SpecXlsxExportOptions {
        path_out: args.output,
        ..Default::default()
    };
    if let Some(c_sheet_name) = args.sheet_name {
        options.sheet_name = c_sheet_name;
    }

    match export_scenes_to_xlsx(&args.csv_path, &options) {
        Ok(report) => {
            println!(
                "Exported {} scenes to styled workbook: {}",
                report.n_rows,
                report.path_out.display()
            );
            Ok(())
        }
        Err(XlsxExportError::InputNotFound(path)) => {
            anyhow::bail!("File not found: {}", path.display())
        }
        Err(err) => {
            Err(err).with_context(|| format!("Failed to export {}", args.csv_path.display()))
        }
    }
}
