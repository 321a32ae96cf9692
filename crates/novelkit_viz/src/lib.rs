//! `novelkit_viz` v1:
//! Scene flow graph and statistics chart reporter.
//!
//! Modules:
//! - `conf`      : constants and presets (file names, status colors, label limits)
//! - `spec`      : style/options structs, stage outcomes, errors
//! - `graph`     : petgraph scene graph, DOT emission, Graphviz rendering
//! - `chart`     : plotters three-panel statistics chart
//! - `report`    : per-stage outcome report
//! - `visualize` : load-once orchestrator
pub mod chart;
pub mod conf;
pub mod graph;
pub mod report;
pub mod spec;
pub mod visualize;

pub use chart::{
    SpecChartData, derive_chart_data, render_statistics_report, run_chart_stage, truncate_label,
};
pub use conf::{C_GRAPH_FILE_STEM, C_REPORT_FILE_NAME};
pub use graph::{
    SpecSceneGraph, SpecSceneNode, build_scene_graph, derive_dot_source, render_dot,
    run_graph_stage,
};
pub use report::ReportVisualize;
pub use spec::{
    EnumGraphFormat, EnumStageOutcome, SpecChartPanel, SpecChartStyle, SpecGraphStyle,
    SpecVisualizeOptions, VizError,
};
pub use visualize::{derive_display_available, derive_output_dir, run_visualization};
