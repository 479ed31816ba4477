//! Graphviz DOT graph description.
//!
//! A small undirected graph model: graph attributes, nodes keyed by id and
//! edges between existing nodes. Attributes are kept sorted so the emitted
//! text is deterministic.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use itertools::Itertools;
use thiserror::Error;

/// Attribute value: quoted text or an HTML-like label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    Html(String),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => write!(f, "\"{}\"", escape_dot_string(s)),
            AttrValue::Html(s) => write!(f, "<{}>", s),
        }
    }
}

pub type Attributes = BTreeMap<String, AttrValue>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    #[error("node with id={0} not found")]
    NodeNotFound(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    attrs: Attributes,
}

impl Node {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attr(&mut self, key: &str, value: impl Into<AttrValue>) -> &mut Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }
}

#[derive(Debug, Clone)]
pub struct Edge {
    from: String,
    to: String,
    attrs: Attributes,
}

impl Edge {
    pub fn from_id(&self) -> &str {
        &self.from
    }

    pub fn to_id(&self) -> &str {
        &self.to
    }

    pub fn attr(&mut self, key: &str, value: impl Into<AttrValue>) -> &mut Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }
}

/// Undirected graph, emitted as `graph { ... }`.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    attrs: Attributes,
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr(&mut self, key: &str, value: impl Into<AttrValue>) -> &mut Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// Get the node with `id`, creating it on first use.
    pub fn node(&mut self, id: &str) -> &mut Node {
        let pos = match self.index.get(id) {
            Some(&pos) => pos,
            None => {
                self.nodes.push(Node {
                    id: id.to_string(),
                    attrs: Attributes::new(),
                });
                self.index.insert(id.to_string(), self.nodes.len() - 1);
                self.nodes.len() - 1
            }
        };
        &mut self.nodes[pos]
    }

    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&pos| &self.nodes[pos])
    }

    /// Connect two existing nodes.
    pub fn edge(&mut self, from: &str, to: &str) -> Result<&mut Edge, GraphError> {
        for id in [from, to] {
            if !self.index.contains_key(id) {
                return Err(GraphError::NodeNotFound(id.to_string()));
            }
        }
        self.edges.push(Edge {
            from: from.to_string(),
            to: to.to_string(),
            attrs: Attributes::new(),
        });
        let last = self.edges.len() - 1;
        Ok(&mut self.edges[last])
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn to_dot(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "graph {{")?;
        if !self.attrs.is_empty() {
            writeln!(f, "\tgraph{};", format_attrs(&self.attrs))?;
        }
        for node in &self.nodes {
            writeln!(f, "\t{}{};", quote_id(&node.id), format_attrs(&node.attrs))?;
        }
        for edge in &self.edges {
            writeln!(
                f,
                "\t{} -- {}{};",
                quote_id(&edge.from),
                quote_id(&edge.to),
                format_attrs(&edge.attrs)
            )?;
        }
        writeln!(f, "}}")
    }
}

fn format_attrs(attrs: &Attributes) -> String {
    if attrs.is_empty() {
        return String::new();
    }
    format!(
        " [{}]",
        attrs.iter().map(|(k, v)| format!("{}={}", k, v)).join(", ")
    )
}

fn quote_id(id: &str) -> String {
    format!("\"{}\"", escape_dot_string(id))
}

/// Escape a string for use inside a double-quoted DOT string.
fn escape_dot_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_graph_when_rendering_then_emits_empty_block() {
        assert_eq!(Graph::new().to_dot(), "graph {\n}\n");
    }

    #[test]
    fn given_nodes_and_edge_when_rendering_then_sorted_attributes() {
        let mut g = Graph::new();
        g.attr("rankdir", "LR").attr("pad", "1");
        g.node("a").attr("shape", "plain").attr("fontsize", "12");
        g.node("b");
        g.edge("a", "b").unwrap().attr("color", "#000000");

        let want = "graph {\n\
                    \tgraph [pad=\"1\", rankdir=\"LR\"];\n\
                    \t\"a\" [fontsize=\"12\", shape=\"plain\"];\n\
                    \t\"b\";\n\
                    \t\"a\" -- \"b\" [color=\"#000000\"];\n\
                    }\n";
        assert_eq!(g.to_dot(), want);
    }

    #[test]
    fn given_html_label_when_rendering_then_wraps_in_angle_brackets() {
        let mut g = Graph::new();
        g.node("n").attr("label", AttrValue::Html("<b>Bold</b>".to_string()));
        assert!(g.to_dot().contains("label=<<b>Bold</b>>"));
    }

    #[test]
    fn given_special_chars_when_rendering_then_escapes_text_and_ids() {
        let mut g = Graph::new();
        g.node("x\"y").attr("label", "say \"hi\"\\");
        let dot = g.to_dot();
        assert!(dot.contains("\"x\\\"y\""));
        assert!(dot.contains("label=\"say \\\"hi\\\"\\\\\""));
    }

    #[test]
    fn given_same_id_twice_when_adding_node_then_reuses_node() {
        let mut g = Graph::new();
        g.node("a").attr("k", "1");
        g.node("a").attr("k", "2");
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.find_node("a").unwrap().get("k"), Some(&AttrValue::from("2")));
    }

    #[test]
    fn given_missing_endpoint_when_adding_edge_then_fails() {
        let mut g = Graph::new();
        g.node("a");
        assert_eq!(
            g.edge("a", "zz").unwrap_err(),
            GraphError::NodeNotFound("zz".to_string())
        );
        assert_eq!(
            g.edge("zz", "a").unwrap_err(),
            GraphError::NodeNotFound("zz".to_string())
        );
        assert_eq!(g.edge_count(), 0);
    }
}
