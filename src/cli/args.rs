//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Turn a marker-indented outline into a Graphviz mind map
#[derive(Parser, Debug)]
#[command(name = "crumbs")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example: crumbs agenda.txt | dot -Tpng > agenda.png")]
pub struct Cli {
    /// Outline file (default: stdin)
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Lay the map out top to bottom
    #[arg(long)]
    pub vertical: bool,

    /// Lay the map out left to right, overriding a configured vertical layout
    #[arg(long, conflicts_with = "vertical")]
    pub horizontal: bool,

    /// Wrap labels after this many characters (0 disables wrapping)
    #[arg(long, value_name = "N")]
    pub lim: Option<usize>,

    /// Folder in which to look for icon files
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub images_path: Option<String>,

    /// Graphviz imagepath: directories searched for images at render time
    #[arg(long, value_name = "DIRS")]
    pub search_path: Option<String>,

    /// Depth marker character
    #[arg(long, value_name = "C")]
    pub marker: Option<char>,

    /// Config file layered over the global one
    #[arg(long, env = "CRUMBS_CONFIG", value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print the parsed outline as a tree instead of a graph
    #[arg(long)]
    pub tree: bool,

    /// Turn debugging information on (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Print shell completions and exit
    #[arg(long = "generator", value_enum)]
    pub generator: Option<clap_complete::Shell>,
}
