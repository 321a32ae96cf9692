//! Scene flow graph: build from `next` references, emit DOT, render with Graphviz.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use novelkit_scene::{
    C_FIELD_ID, C_FIELD_NEXT, C_FIELD_STATUS, C_FIELD_TITLE, SceneTable, split_scene_refs,
};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::conf::{C_GRAPH_FILE_STEM, C_GRAPH_NAME};
use crate::spec::{SpecGraphStyle, VizError};

/// One scene node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSceneNode {
    /// Scene identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Scene status.
    pub status: String,
    /// Fill color derived from the status.
    pub fill_color: String,
}

impl SpecSceneNode {
    /// Two-line node label: title, then `<id>`.
    pub fn label(&self) -> String {
        format!("{}\n<{}>", self.title, self.id)
    }
}

/// Directed scene flow graph keyed by scene identifier.
#[derive(Debug, Clone, Default)]
pub struct SpecSceneGraph {
    graph: DiGraph<SpecSceneNode, ()>,
    dict_idx_by_id: HashMap<String, NodeIndex>,
}

impl SpecSceneGraph {
    /// Number of scene nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of successor edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node by scene identifier.
    pub fn node(&self, id: &str) -> Option<&SpecSceneNode> {
        self.dict_idx_by_id.get(id).map(|idx| &self.graph[*idx])
    }

    /// Nodes in insertion (row) order.
    pub fn nodes(&self) -> impl Iterator<Item = &SpecSceneNode> {
        self.graph.node_weights()
    }

    /// Edges as `(source_id, target_id)` in insertion order.
    pub fn edges(&self) -> Vec<(String, String)> {
        self.graph
            .edge_references()
            .map(|edge| {
                (
                    self.graph[edge.source()].id.clone(),
                    self.graph[edge.target()].id.clone(),
                )
            })
            .collect()
    }
}

/// Build the scene flow graph.
///
/// Records without an identifier get no node and no outgoing edges. A `next`
/// reference to an unknown identifier is dropped. For duplicate identifiers the
/// first record supplies the node.
pub fn build_scene_graph(table: &SceneTable, style: &SpecGraphStyle) -> SpecSceneGraph {
    let n_rows = table.height();
    let derive_values = |field: &str| table.text_values(field).unwrap_or_else(|| vec![None; n_rows]);

    let l_ids = derive_values(C_FIELD_ID);
    let l_titles = derive_values(C_FIELD_TITLE);
    let l_statuses = derive_values(C_FIELD_STATUS);
    let l_nexts = derive_values(C_FIELD_NEXT);

    let mut scene_graph = SpecSceneGraph::default();

    for (n_idx_row, id) in l_ids.iter().enumerate() {
        let Some(c_id) = id.as_deref().map(str::trim).filter(|c| !c.is_empty()) else {
            continue;
        };
        if scene_graph.dict_idx_by_id.contains_key(c_id) {
            log::warn!("Duplicate scene id {c_id:?} at row {n_idx_row}; keeping the first");
            continue;
        }

        let c_title = l_titles[n_idx_row]
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| style.title_default.clone());
        let c_status = l_statuses[n_idx_row]
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(style.status_default.as_str())
            .to_string();

        let node_idx = scene_graph.graph.add_node(SpecSceneNode {
            id: c_id.to_string(),
            title: c_title,
            fill_color: style.color_for(&c_status).to_string(),
            status: c_status,
        });
        scene_graph.dict_idx_by_id.insert(c_id.to_string(), node_idx);
    }

    for (n_idx_row, id) in l_ids.iter().enumerate() {
        let Some(c_id) = id.as_deref().map(str::trim).filter(|c| !c.is_empty()) else {
            continue;
        };
        let Some(c_next) = l_nexts[n_idx_row].as_deref() else {
            continue;
        };
        let Some(&idx_source) = scene_graph.dict_idx_by_id.get(c_id) else {
            continue;
        };

        for c_next_id in split_scene_refs(c_next) {
            match scene_graph.dict_idx_by_id.get(c_next_id) {
                Some(&idx_target) => {
                    scene_graph.graph.add_edge(idx_source, idx_target, ());
                }
                None => log::debug!("Dropping reference {c_id:?} -> unknown {c_next_id:?}"),
            }
        }
    }

    scene_graph
}

fn escape_dot(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\r', "")
        .replace('\n', "\\n")
}

/// Emit Graphviz DOT source for the graph.
pub fn derive_dot_source(scene_graph: &SpecSceneGraph, style: &SpecGraphStyle) -> String {
    let mut c_dot = String::new();
    let c_font = escape_dot(&style.font_name);

    // Writing into a String cannot fail.
    let _ = writeln!(c_dot, "// Novel Scene Flow Graph");
    let _ = writeln!(c_dot, "digraph {C_GRAPH_NAME} {{");
    let _ = writeln!(
        c_dot,
        "\trankdir={} splines={} nodesep=\"{}\" ranksep=\"{}\"",
        escape_dot(&style.rankdir),
        escape_dot(&style.splines),
        style.nodesep,
        style.ranksep
    );
    let _ = writeln!(
        c_dot,
        "\tnode [shape={} style=\"{}\" fontname=\"{c_font}\"]",
        escape_dot(&style.node_shape),
        escape_dot(&style.node_style)
    );
    let _ = writeln!(c_dot, "\tedge [fontname=\"{c_font}\"]");

    for node in scene_graph.nodes() {
        let _ = writeln!(
            c_dot,
            "\t\"{}\" [label=\"{}\" fillcolor=\"{}\"]",
            escape_dot(&node.id),
            escape_dot(&node.label()),
            escape_dot(&node.fill_color)
        );
    }
    for (c_source, c_target) in scene_graph.edges() {
        let _ = writeln!(
            c_dot,
            "\t\"{}\" -> \"{}\"",
            escape_dot(&c_source),
            escape_dot(&c_target)
        );
    }
    c_dot.push_str("}\n");
    c_dot
}

/// Pipe DOT source through the Graphviz executable into `path_out`.
pub fn render_dot(
    c_dot: &str,
    path_out: &Path,
    style: &SpecGraphStyle,
) -> Result<(), VizError> {
    let derive_toolchain_error = |cause: String| VizError::RenderToolchain {
        tool: style.program.clone(),
        cause,
    };

    let mut child = Command::new(&style.program)
        .arg(format!("-T{}", style.format.as_str()))
        .arg("-o")
        .arg(path_out)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| derive_toolchain_error(err.to_string()))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(c_dot.as_bytes())
            .map_err(|err| derive_toolchain_error(err.to_string()))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|err| derive_toolchain_error(err.to_string()))?;
    if !output.status.success() {
        let c_stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(derive_toolchain_error(if c_stderr.is_empty() {
            format!("exited with {}", output.status)
        } else {
            c_stderr
        }));
    }
    Ok(())
}

/// Build, emit and render the scene flow graph into `output_dir`.
pub fn run_graph_stage(
    table: &SceneTable,
    output_dir: &Path,
    style: &SpecGraphStyle,
) -> Result<PathBuf, VizError> {
    log::info!("Creating scene flow graph...");
    let scene_graph = build_scene_graph(table, style);
    log::debug!(
        "Scene graph: {} nodes, {} edges",
        scene_graph.node_count(),
        scene_graph.edge_count()
    );

    let path_out = output_dir.join(format!("{C_GRAPH_FILE_STEM}.{}", style.format.as_str()));
    render_dot(&derive_dot_source(&scene_graph, style), &path_out, style)?;
    log::info!("Scene flow graph saved to {}", path_out.display());
    Ok(path_out)
}
