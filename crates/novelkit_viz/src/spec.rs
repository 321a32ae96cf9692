//! Visualization options, stage outcomes and errors.

use std::fmt;
use std::path::PathBuf;

use novelkit_scene::SceneTableError;
use thiserror::Error;

use crate::conf::{
    C_DOT_PROGRAM, C_FONT_FAMILY_DEFAULT, C_LABEL_ELLIPSIS, C_STATUS_COLOR_DEFAULT,
    C_STATUS_DEFAULT, C_TITLE_DEFAULT, N_LABEL_LEN_MAX, TUP_REPORT_SIZE, TUP_STATUS_COLORS,
};

////////////////////////////////////////////////////////////////////////////////
// #region GraphStyle

/// Output format passed to the graph renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumGraphFormat {
    /// Scalable vector graphics (default).
    #[default]
    Svg,
    /// Raster PNG.
    Png,
    /// PDF document.
    Pdf,
}

impl EnumGraphFormat {
    /// Renderer format name, also used as file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Pdf => "pdf",
        }
    }
}

/// Scene flow graph layout and node styling.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecGraphStyle {
    /// Rank direction (`TB` is top to bottom).
    pub rankdir: String,
    /// Edge routing.
    pub splines: String,
    /// Minimum space between nodes of one rank, in inches.
    pub nodesep: f64,
    /// Minimum space between ranks, in inches.
    pub ranksep: f64,
    /// Node shape.
    pub node_shape: String,
    /// Node style flags.
    pub node_style: String,
    /// Font for node and edge labels.
    pub font_name: String,
    /// Status to fill color lookup.
    pub status_colors: Vec<(String, String)>,
    /// Fill color for unrecognized statuses.
    pub color_default: String,
    /// Title shown for records without one.
    pub title_default: String,
    /// Status assumed for records without one.
    pub status_default: String,
    /// Render format.
    pub format: EnumGraphFormat,
    /// Graphviz executable.
    pub program: String,
}

impl Default for SpecGraphStyle {
    fn default() -> Self {
        Self {
            rankdir: "TB".to_string(),
            splines: "ortho".to_string(),
            nodesep: 0.5,
            ranksep: 1.0,
            node_shape: "box".to_string(),
            node_style: "rounded,filled".to_string(),
            font_name: C_FONT_FAMILY_DEFAULT.to_string(),
            status_colors: TUP_STATUS_COLORS
                .iter()
                .map(|(c_status, c_color)| (c_status.to_string(), c_color.to_string()))
                .collect(),
            color_default: C_STATUS_COLOR_DEFAULT.to_string(),
            title_default: C_TITLE_DEFAULT.to_string(),
            status_default: C_STATUS_DEFAULT.to_string(),
            format: EnumGraphFormat::Svg,
            program: C_DOT_PROGRAM.to_string(),
        }
    }
}

impl SpecGraphStyle {
    /// Fill color for a status; unknown statuses get the default color.
    pub fn color_for(&self, status: &str) -> &str {
        self.status_colors
            .iter()
            .find(|(c_status, _)| c_status == status)
            .map_or(self.color_default.as_str(), |(_, c_color)| c_color.as_str())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ChartStyle

/// One panel of the composite chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecChartPanel {
    /// Panel caption.
    pub title: String,
    /// Y-axis description.
    pub y_label: String,
    /// Series color.
    pub color: (u8, u8, u8),
}

/// Plotting configuration passed explicitly into the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecChartStyle {
    /// Font family for every text element.
    pub font_family: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Figure title.
    pub title: String,
    /// Tension line panel.
    pub panel_tension: SpecChartPanel,
    /// Word count bar panel.
    pub panel_words: SpecChartPanel,
    /// Character count bar panel.
    pub panel_characters: SpecChartPanel,
    /// Bar fill opacity.
    pub bar_opacity: f64,
    /// Titles longer than this are truncated.
    pub label_len_max: usize,
    /// Suffix for truncated titles.
    pub label_ellipsis: String,
}

impl Default for SpecChartStyle {
    fn default() -> Self {
        Self {
            font_family: C_FONT_FAMILY_DEFAULT.to_string(),
            width: TUP_REPORT_SIZE.0,
            height: TUP_REPORT_SIZE.1,
            title: "Novel Scene Analysis Report".to_string(),
            panel_tension: SpecChartPanel {
                title: "Scene Tension Curve (Tension Score)".to_string(),
                y_label: "Tension (1-10)".to_string(),
                color: (220, 20, 20),
            },
            panel_words: SpecChartPanel {
                title: "Estimated Words per Scene".to_string(),
                y_label: "Words".to_string(),
                color: (20, 20, 220),
            },
            panel_characters: SpecChartPanel {
                title: "Characters per Scene".to_string(),
                y_label: "Characters".to_string(),
                color: (20, 150, 20),
            },
            bar_opacity: 0.7,
            label_len_max: N_LABEL_LEN_MAX,
            label_ellipsis: C_LABEL_ELLIPSIS.to_string(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region VisualizeOptions

/// Options for one visualization run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecVisualizeOptions {
    /// Output directory; defaults to the input file's directory.
    pub output_dir: Option<PathBuf>,
    /// Graph styling.
    pub graph_style: SpecGraphStyle,
    /// Chart styling.
    pub chart_style: SpecChartStyle,
    /// Open the chart image in the platform viewer when a display is present.
    pub if_show_report: bool,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region OutcomesAndErrors

/// Result of one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumStageOutcome {
    /// Stage wrote its artifact.
    Completed(PathBuf),
    /// Stage aborted; the cause is user-facing text.
    Failed(String),
    /// Stage did not run.
    Skipped(String),
}

impl EnumStageOutcome {
    /// Whether the stage wrote its artifact.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

impl fmt::Display for EnumStageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed(path) => write!(f, "ok({})", path.display()),
            Self::Failed(cause) => write!(f, "failed({cause})"),
            Self::Skipped(reason) => write!(f, "skipped({reason})"),
        }
    }
}

/// Errors raised by the visualization stages.
#[derive(Debug, Error)]
pub enum VizError {
    /// Input CSV path does not exist.
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),
    /// Input could not be loaded.
    #[error(transparent)]
    Table(SceneTableError),
    /// A column required by a stage is absent.
    #[error("CSV is missing required column '{0}'")]
    MissingColumn(String),
    /// Table has no rows to plot.
    #[error("No scenes to plot")]
    NoScenes,
    /// External renderer missing or failed.
    #[error("Failed to render with `{tool}`; make sure Graphviz is installed and on PATH: {cause}")]
    RenderToolchain {
        /// Executable name.
        tool: String,
        /// Underlying cause.
        cause: String,
    },
    /// Chart drawing failed.
    #[error("Failed to draw chart: {0}")]
    Chart(String),
    /// Filesystem error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<SceneTableError> for VizError {
    fn from(err: SceneTableError) -> Self {
        match err {
            SceneTableError::InputNotFound(path) => Self::InputNotFound(path),
            other => Self::Table(other),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
