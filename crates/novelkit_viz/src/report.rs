//! Per-stage outcome report of one visualization run.

use std::fmt;

use crate::spec::EnumStageOutcome;

/// Outcomes of the graph and chart stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportVisualize {
    /// Scene flow graph stage.
    pub graph: EnumStageOutcome,
    /// Statistics chart stage.
    pub chart: EnumStageOutcome,
}

impl ReportVisualize {
    /// Whether every stage wrote its artifact.
    pub fn is_complete(&self) -> bool {
        self.graph.is_completed() && self.chart.is_completed()
    }

    /// Stages in run order with their names.
    pub fn stages(&self) -> [(&'static str, &EnumStageOutcome); 2] {
        [("graph", &self.graph), ("chart", &self.chart)]
    }

    /// One line per stage, each prefixed.
    pub fn format(&self, prefix: &str) -> String {
        self.stages()
            .iter()
            .map(|(c_stage, outcome)| format!("{prefix}{c_stage}: {outcome}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for ReportVisualize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(""))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_report_lines_follow_stage_order() {
        let report = ReportVisualize {
            graph: EnumStageOutcome::Failed("dot not found".to_string()),
            chart: EnumStageOutcome::Completed(PathBuf::from("out/report.png")),
        };

        assert!(!report.is_complete());
        assert_eq!(
            report.format("  "),
            "  graph: failed(dot not found)\n  chart: ok(out/report.png)"
        );
        assert_eq!(report.to_string(), report.format(""));
    }

    #[test]
    fn test_report_complete_when_both_stages_wrote() {
        let report = ReportVisualize {
            graph: EnumStageOutcome::Completed(PathBuf::from("g.svg")),
            chart: EnumStageOutcome::Completed(PathBuf::from("r.png")),
        };

        assert!(report.is_complete());
    }
}
