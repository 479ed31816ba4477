//! Depth-dependent styling for nodes and edges.

/// Font family used for graph, nodes and edges.
pub const FONT_NAME: &str = "Fira Code";

/// Edge colours indexed by the child's depth.
pub const EDGE_PALETTE: [&str; 7] = [
    "#264653", "#2A9D8F", "#E9C46A", "#E76F51", "#FFCDB2", "#B5838D", "#6D6875",
];

/// Edge colour for depths outside the palette.
pub const FALLBACK_EDGE_COLOR: &str = "#000000";

/// Edge colour for an entry at `level`.
pub fn edge_color(level: i32) -> &'static str {
    usize::try_from(level)
        .ok()
        .and_then(|i| EDGE_PALETTE.get(i))
        .copied()
        .unwrap_or(FALLBACK_EDGE_COLOR)
}

/// Label font for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontStyle {
    pub point_size: u8,
    pub bold: bool,
}

/// Label font for an entry at `level`; `None` for the root.
pub fn font_for(level: i32) -> Option<FontStyle> {
    match level {
        1 => Some(FontStyle {
            point_size: 14,
            bold: true,
        }),
        l if l > 1 => Some(FontStyle {
            point_size: 12,
            bold: false,
        }),
        _ => None,
    }
}
