//! `novel-viz`: render the scene flow graph and statistics chart for a scene CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use novelkit_cli::{ArgsLog, init_logging};
use novelkit_viz::{
    EnumGraphFormat, EnumStageOutcome, SpecVisualizeOptions, VizError, run_visualization,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ArgGraphFormat {
    Svg,
    Png,
    Pdf,
}

impl From<ArgGraphFormat> for EnumGraphFormat {
    fn from(format: ArgGraphFormat) -> Self {
        match format {
            ArgGraphFormat::Svg => Self::Svg,
            ArgGraphFormat::Png => Self::Png,
            ArgGraphFormat::Pdf => Self::Pdf,
        }
    }
}

/// Novel scene reporter - flow graph and statistics chart
#[derive(Parser, Debug)]
#[command(name = "novel-viz")]
#[command(about = "Render a scene flow graph and statistics chart from a novel scene CSV", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the scene CSV file
    #[arg(value_name = "FILE")]
    csv_path: PathBuf,

    /// Output directory (default: the CSV's directory)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Scene flow graph format
    #[arg(long, value_enum, default_value_t = ArgGraphFormat::Svg)]
    graph_format: ArgGraphFormat,

    /// Font family for graph labels and chart text
    #[arg(long, value_name = "FAMILY")]
    font: Option<String>,

    /// Do not open the chart in an image viewer
    #[arg(long)]
    no_show: bool,

    #[command(flatten)]
    log: ArgsLog,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log);

    let mut options = SpecVisualizeOptions {
        output_dir: args.output_dir,
        if_show_report: !args.no_show,
        ..Default::default()
    };
    options.graph_style.format = args.graph_format.into();
    if let Some(c_font) = args.font {
        options.graph_style.font_name = c_font.clone();
        options.chart_style.font_family = c_font;
    }

    let report = match run_visualization(&args.csv_path, &options) {
        Ok(report) => report,
        Err(VizError::InputNotFound(path)) => {
            anyhow::bail!("File not found: {}", path.display())
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to visualize {}", args.csv_path.display()));
        }
    };

    for (c_stage, outcome) in report.stages() {
        match outcome {
            EnumStageOutcome::Completed(path) => {
                println!("{c_stage}: saved to {}", path.display())
            }
            EnumStageOutcome::Failed(cause) => eprintln!("{c_stage}: error: {cause}"),
            EnumStageOutcome::Skipped(reason) => println!("{c_stage}: skipped ({reason})"),
        }
    }
    Ok(())
}
