//! Graph serializer: outline tree to a styled node/edge graph description.

use std::io::Write;

use tracing::{debug, instrument};

use crate::application::error_ext::IoResultExt;
use crate::application::style::{edge_color, font_for, FONT_NAME};
use crate::application::text::{escape_html, sanitize};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Entry, Outline};
use crate::infrastructure::dot::{AttrValue, Graph, GraphError};

/// Default label wrap width in characters.
pub const DEFAULT_WRAP_LIMIT: usize = 28;

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Lay entries out top to bottom instead of left to right
    pub vertical_layout: bool,
    /// Label wrap width; 0 disables wrapping
    pub wrap_text_limit: usize,
    /// Directories searched for icon images (`imagepath`)
    pub images_path: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            vertical_layout: false,
            wrap_text_limit: DEFAULT_WRAP_LIMIT,
            images_path: None,
        }
    }
}

/// Turns an [`Outline`] into a Graphviz graph description.
pub struct GraphRenderer {
    config: RenderConfig,
}

impl GraphRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Build the graph: one node per entry, one edge per link between entries.
    ///
    /// The root has no node, so top-level entries get no edge.
    #[instrument(level = "debug", skip_all)]
    pub fn build(&self, outline: &Outline) -> ApplicationResult<Graph> {
        let mut graph = self.new_graph();

        for (_, entry) in outline.iter() {
            if entry.level() <= 0 {
                continue;
            }
            self.create_node(&mut graph, entry);

            let parent = entry.parent().and_then(|idx| outline.get(idx));
            if let Some(parent) = parent.filter(|p| p.level() > 0) {
                create_edge(&mut graph, parent.id(), entry.id(), edge_color(entry.level()))?;
            }
        }

        debug!(
            "graph built: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Build the full description, then write it in one go.
    pub fn render<W: Write>(&self, outline: &Outline, out: &mut W) -> ApplicationResult<()> {
        let dot = self.render_to_string(outline)?;
        out.write_all(dot.as_bytes())
            .with_context("write graph description")?;
        out.flush().with_context("flush graph description")
    }

    pub fn render_to_string(&self, outline: &Outline) -> ApplicationResult<String> {
        Ok(self.build(outline)?.to_dot())
    }

    fn new_graph(&self) -> Graph {
        let mut graph = Graph::new();
        graph
            .attr("rankdir", if self.config.vertical_layout { "TB" } else { "LR" })
            .attr("pad", "1")
            .attr("ranksep", "2.3")
            .attr("nodesep", "0.8")
            .attr("fontname", FONT_NAME)
            .attr("fontsize", "14")
            .attr("splines", "curved")
            .attr("concentrate", "true")
            .attr("orientation", "portrait");

        if let Some(paths) = self.config.images_path.as_deref() {
            if !paths.trim().is_empty() {
                graph.attr("imagepath", paths);
            }
        }
        graph
    }

    fn create_node(&self, graph: &mut Graph, entry: &Entry) {
        graph
            .node(entry.id())
            .attr("fontname", FONT_NAME)
            .attr("fontsize", "12")
            .attr("width", "2")
            .attr("margin", "0.2,0.2")
            .attr("shape", "plain")
            .attr("label", AttrValue::Html(self.label(entry)));
    }

    /// HTML-like table label: optional icon row, then the text row.
    pub fn label(&self, entry: &Entry) -> String {
        let text = sanitize(entry.text(), self.config.wrap_text_limit);

        let mut label = String::from(r#"<table border="0" cellborder="0">"#);
        if let Some(icon) = entry.icon() {
            label.push_str(&format!(
                r#"<tr><td fixedsize="true" width="48" height="48"><img src="{}" /></td></tr>"#,
                escape_html(&icon.to_string_lossy())
            ));
        }
        if let Some(font) = font_for(entry.level()) {
            let text = if font.bold { format!("<b>{}</b>", text) } else { text };
            label.push_str(&format!(
                r#"<tr><td><font point-size="{}">{}</font></td></tr>"#,
                font.point_size, text
            ));
        }
        label.push_str("</table>");
        label
    }
}

fn create_edge(graph: &mut Graph, from: &str, to: &str, color: &str) -> ApplicationResult<()> {
    let edge = graph.edge(from, to).map_err(|e| match e {
        GraphError::NodeNotFound(id) => ApplicationError::NodeNotFound { id },
    })?;
    edge.attr("fontname", FONT_NAME)
        .attr("fontsize", "10")
        .attr("penwidth", "2.5")
        .attr("color", color);
    Ok(())
}
