//! Composite statistics chart: tension line, word bars, character bars.

use std::error::Error;
use std::path::{Path, PathBuf};

use novelkit_scene::{
    C_COL_CHARACTER_COUNT, C_COL_TENSION_SCORE, C_COL_WORDS, C_FIELD_TITLE, SceneTable,
};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::conf::C_REPORT_FILE_NAME;
use crate::spec::{SpecChartPanel, SpecChartStyle, VizError};

type ChartResult<T> = Result<T, Box<dyn Error>>;

/// Per-scene series plotted by the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecChartData {
    /// Truncated x-axis labels, one per scene.
    pub labels: Vec<String>,
    /// Tension score per scene.
    pub tension: Vec<f64>,
    /// Estimated words per scene.
    pub words: Vec<f64>,
    /// Character count per scene.
    pub character_count: Vec<f64>,
}

impl SpecChartData {
    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there is nothing to plot.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Truncate a title to `n_len_max` characters plus `ellipsis` when longer.
pub fn truncate_label(title: &str, n_len_max: usize, ellipsis: &str) -> String {
    if title.chars().count() > n_len_max {
        let c_head: String = title.chars().take(n_len_max).collect();
        format!("{c_head}{ellipsis}")
    } else {
        title.to_string()
    }
}

/// Collect the plotted series, checking required columns in plotting order.
pub fn derive_chart_data(
    table: &SceneTable,
    style: &SpecChartStyle,
) -> Result<SpecChartData, VizError> {
    let l_titles = table
        .text_values(C_FIELD_TITLE)
        .ok_or_else(|| VizError::MissingColumn(C_FIELD_TITLE.to_string()))?;

    let derive_series = |c_name: &str| {
        table
            .numeric_values(c_name)
            .ok_or_else(|| VizError::MissingColumn(c_name.to_string()))
    };
    let tension = derive_series(C_COL_TENSION_SCORE)?;
    let words = derive_series(C_COL_WORDS)?;
    let character_count = derive_series(C_COL_CHARACTER_COUNT)?;

    let labels = l_titles
        .iter()
        .map(|title| {
            truncate_label(
                title.as_deref().unwrap_or_default(),
                style.label_len_max,
                &style.label_ellipsis,
            )
        })
        .collect();

    Ok(SpecChartData {
        labels,
        tension,
        words,
        character_count,
    })
}

fn calculate_y_max(values: &[f64]) -> f64 {
    let n_max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if n_max > 0.0 { n_max * 1.1 } else { 1.0 }
}

fn derive_panel_color(panel: &SpecChartPanel) -> RGBColor {
    RGBColor(panel.color.0, panel.color.1, panel.color.2)
}

fn draw_line_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    data: &SpecChartData,
    values: &[f64],
    panel: &SpecChartPanel,
    style: &SpecChartStyle,
) -> ChartResult<()> {
    let n_scenes = data.len();
    let color = derive_panel_color(panel);
    let c_font = style.font_family.as_str();

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (c_font, 22))
        .margin(10)
        .x_label_area_size(80)
        .y_label_area_size(60)
        .build_cartesian_2d((0..n_scenes).into_segmented(), 0.0..calculate_y_max(values))?;

    chart
        .configure_mesh()
        .x_labels(n_scenes)
        // plotters only rotates text in quarter turns.
        .x_label_style((c_font, 12).into_font().transform(FontTransform::Rotate90))
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(n_idx) => data.labels.get(*n_idx).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc(&panel.y_label)
        .label_style((c_font, 14))
        .light_line_style(BLACK.mix(0.1))
        .draw()?;

    let l_points: Vec<(SegmentValue<usize>, f64)> = values
        .iter()
        .enumerate()
        .map(|(n_idx, v)| (SegmentValue::CenterOf(n_idx), *v))
        .collect();

    chart.draw_series(LineSeries::new(l_points.iter().cloned(), color.stroke_width(2)))?;
    chart.draw_series(
        l_points
            .iter()
            .map(|point| Circle::new(point.clone(), 4, color.filled())),
    )?;
    Ok(())
}

fn draw_bar_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    data: &SpecChartData,
    values: &[f64],
    panel: &SpecChartPanel,
    style: &SpecChartStyle,
) -> ChartResult<()> {
    let n_scenes = data.len();
    let color = derive_panel_color(panel);
    let c_font = style.font_family.as_str();

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (c_font, 22))
        .margin(10)
        .x_label_area_size(80)
        .y_label_area_size(60)
        .build_cartesian_2d((0..n_scenes).into_segmented(), 0.0..calculate_y_max(values))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n_scenes)
        // plotters only rotates text in quarter turns.
        .x_label_style((c_font, 12).into_font().transform(FontTransform::Rotate90))
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(n_idx) => data.labels.get(*n_idx).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc(&panel.y_label)
        .label_style((c_font, 14))
        .light_line_style(BLACK.mix(0.1))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(color.mix(style.bar_opacity).filled())
            .margin(8)
            .data(values.iter().enumerate().map(|(n_idx, v)| (n_idx, *v))),
    )?;
    Ok(())
}

/// Draw the three-panel report into a PNG at `path_out`.
pub fn render_statistics_report(
    data: &SpecChartData,
    path_out: &Path,
    style: &SpecChartStyle,
) -> Result<(), VizError> {
    let draw = || -> ChartResult<()> {
        let root = BitMapBackend::new(path_out, (style.width, style.height)).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled(&style.title, (style.font_family.as_str(), 30))?;
        let panels = root.split_evenly((3, 1));

        draw_line_panel(&panels[0], data, &data.tension, &style.panel_tension, style)?;
        draw_bar_panel(&panels[1], data, &data.words, &style.panel_words, style)?;
        draw_bar_panel(
            &panels[2],
            data,
            &data.character_count,
            &style.panel_characters,
            style,
        )?;

        root.present()?;
        Ok(())
    };
    draw().map_err(|err| VizError::Chart(err.to_string()))
}

/// Validate columns, then draw the report into `output_dir`.
pub fn run_chart_stage(
    table: &SceneTable,
    output_dir: &Path,
    style: &SpecChartStyle,
) -> Result<PathBuf, VizError> {
    log::info!("Generating statistics report...");
    let data = derive_chart_data(table, style)?;
    if data.is_empty() {
        return Err(VizError::NoScenes);
    }

    let path_out = output_dir.join(C_REPORT_FILE_NAME);
    render_statistics_report(&data, &path_out, style)?;
    log::info!("Statistics report saved to {}", path_out.display());
    Ok(path_out)
}
