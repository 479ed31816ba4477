//! crumbs: marker-indented outlines to Graphviz mind maps.
//!
//! The outline parser builds an arena-backed tree of entries; the graph
//! renderer walks it in pre-order and emits an undirected DOT description.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
