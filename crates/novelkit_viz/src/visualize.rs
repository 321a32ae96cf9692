//! Visualization orchestrator: load once, run each stage, collect outcomes.

use std::path::{Path, PathBuf};

use novelkit_scene::{C_FIELD_ID, SceneTable, load_scene_table};

use crate::chart::run_chart_stage;
use crate::graph::run_graph_stage;
use crate::report::ReportVisualize;
use crate::spec::{EnumStageOutcome, SpecVisualizeOptions, VizError};

/// Directory the artifacts land in: the override, else the input's parent.
pub fn derive_output_dir(path_csv: &Path, options: &SpecVisualizeOptions) -> PathBuf {
    if let Some(output_dir) = &options.output_dir {
        return output_dir.clone();
    }
    match path_csv.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Whether an interactive viewer can be shown.
pub fn derive_display_available() -> bool {
    if cfg!(target_os = "linux") {
        ["DISPLAY", "WAYLAND_DISPLAY"]
            .iter()
            .any(|c_var| std::env::var_os(c_var).is_some_and(|v| !v.is_empty()))
    } else {
        true
    }
}

fn derive_stage_outcome(c_stage: &str, result: Result<PathBuf, VizError>) -> EnumStageOutcome {
    match result {
        Ok(path) => EnumStageOutcome::Completed(path),
        Err(err) => {
            log::warn!("{c_stage} stage failed: {err}");
            EnumStageOutcome::Failed(err.to_string())
        }
    }
}

fn run_graph_outcome(
    table: &SceneTable,
    output_dir: &Path,
    options: &SpecVisualizeOptions,
) -> EnumStageOutcome {
    if table.resolve_column(C_FIELD_ID).is_none() {
        let c_reason = format!("no '{C_FIELD_ID}' column");
        log::warn!("Skipping scene flow graph: {c_reason}");
        return EnumStageOutcome::Skipped(c_reason);
    }
    derive_stage_outcome(
        "Graph",
        run_graph_stage(table, output_dir, &options.graph_style),
    )
}

fn show_report(path_report: &Path) {
    if !derive_display_available() {
        log::debug!("No display available; not opening {}", path_report.display());
        return;
    }
    if let Err(err) = open::that(path_report) {
        log::warn!("Failed to open {}: {err}", path_report.display());
    }
}

/// Run the visualization pipeline on a scene CSV.
///
/// The table is loaded once; a missing input aborts before any stage runs.
/// The chart stage runs whatever the graph stage's outcome, and stage
/// failures are reported in the returned [`ReportVisualize`].
pub fn run_visualization(
    path_csv: &Path,
    options: &SpecVisualizeOptions,
) -> Result<ReportVisualize, VizError> {
    let table = load_scene_table(path_csv)?;
    log::info!(
        "Loaded {} scenes from {}",
        table.height(),
        path_csv.display()
    );

    let output_dir = derive_output_dir(path_csv, options);
    std::fs::create_dir_all(&output_dir)?;

    let graph = run_graph_outcome(&table, &output_dir, options);
    let chart = derive_stage_outcome(
        "Chart",
        run_chart_stage(&table, &output_dir, &options.chart_style),
    );

    if options.if_show_report
        && let EnumStageOutcome::Completed(path_report) = &chart
    {
        show_report(path_report);
    }

    let report = ReportVisualize { graph, chart };
    log::debug!("Visualization summary:\n{}", report.format("  "));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::spec::SpecGraphStyle;

    #[test]
    fn test_output_dir_defaults_to_input_parent() {
        let options = SpecVisualizeOptions::default();

        assert_eq!(
            derive_output_dir(Path::new("drafts/scenes.csv"), &options),
            PathBuf::from("drafts")
        );
        assert_eq!(
            derive_output_dir(Path::new("scenes.csv"), &options),
            PathBuf::from(".")
        );

        let options = SpecVisualizeOptions {
            output_dir: Some(PathBuf::from("out")),
            ..Default::default()
        };
        assert_eq!(
            derive_output_dir(Path::new("drafts/scenes.csv"), &options),
            PathBuf::from("out")
        );
    }

    #[test]
    fn test_stage_failures_are_collected_and_run_continues() {
        let dir = tempfile::tempdir().unwrap();
        let path_csv = dir.path().join("scenes.csv");
        fs::write(&path_csv, "id,title,tensionscore,next\nA,Start,5,B\nB,End,8,\n").unwrap();

        let options = SpecVisualizeOptions {
            graph_style: SpecGraphStyle {
                program: "novelkit-no-such-dot-binary".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let report = run_visualization(&path_csv, &options).unwrap();

        assert!(matches!(report.graph, EnumStageOutcome::Failed(_)));
        assert_eq!(
            report.chart,
            EnumStageOutcome::Failed("CSV is missing required column 'words'".to_string())
        );
        assert!(!dir.path().join("novel_analysis_report.png").exists());
    }

    #[test]
    fn test_graph_stage_skipped_without_id_column() {
        let dir = tempfile::tempdir().unwrap();
        let path_csv = dir.path().join("scenes.csv");
        fs::write(&path_csv, "title,words\nA,10\n").unwrap();

        let report = run_visualization(&path_csv, &SpecVisualizeOptions::default()).unwrap();

        assert!(matches!(report.graph, EnumStageOutcome::Skipped(_)));
        assert!(matches!(report.chart, EnumStageOutcome::Failed(_)));
    }

    #[test]
    fn test_missing_input_aborts_before_stages() {
        let dir = tempfile::tempdir().unwrap();
        let path_csv = dir.path().join("missing.csv");

        let err = run_visualization(&path_csv, &SpecVisualizeOptions::default()).unwrap_err();

        assert!(matches!(err, VizError::InputNotFound(p) if p == path_csv));
        assert!(!dir.path().join("scene_flow_graph.svg").exists());
    }
}
