//! Visualization constants: file names, graph presets, chart presets.

/// Graphviz graph name.
pub const C_GRAPH_NAME: &str = "NovelSceneFlow";
/// Scene flow graph file stem; the extension follows the render format.
pub const C_GRAPH_FILE_STEM: &str = "scene_flow_graph";
/// Composite statistics chart file name.
pub const C_REPORT_FILE_NAME: &str = "novel_analysis_report.png";
/// Graphviz layout executable.
pub const C_DOT_PROGRAM: &str = "dot";

/// Node fill color by scene status.
pub const TUP_STATUS_COLORS: [(&str, &str); 4] = [
    ("idea", "#E0E0E0"),
    ("draft", "#BBDEFB"),
    ("revise", "#FFF59D"),
    ("done", "#C8E6C9"),
];
/// Fill color for unrecognized statuses.
pub const C_STATUS_COLOR_DEFAULT: &str = "#FFFFFF";
/// Status assumed when the cell is missing.
pub const C_STATUS_DEFAULT: &str = "idea";
/// Node title used when the cell is missing.
pub const C_TITLE_DEFAULT: &str = "Untitled";

/// Scene titles longer than this many characters are truncated on the x-axis.
pub const N_LABEL_LEN_MAX: usize = 10;
/// Suffix appended to truncated titles.
pub const C_LABEL_ELLIPSIS: &str = "...";
/// Font family used for chart text.
pub const C_FONT_FAMILY_DEFAULT: &str = "sans-serif";
/// Composite chart size in pixels.
pub const TUP_REPORT_SIZE: (u32, u32) = (1200, 1800);
