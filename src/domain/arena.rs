//! Arena-based outline tree.

use std::path::{Path, PathBuf};

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

/// Level of the synthetic root; real entries start at 1.
pub const ROOT_LEVEL: i32 = -1;

/// A single outline entry, one per non-blank input line.
#[derive(Debug, Clone)]
pub struct Entry {
    id: String,
    level: i32,
    text: String,
    icon: Option<PathBuf>,
    parent: Option<Index>,
    children: Vec<Index>,
}

impl Entry {
    pub(crate) fn new(id: String, level: i32, text: String, icon: Option<PathBuf>) -> Self {
        Self {
            id,
            level,
            text,
            icon,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Identifier used as the graph node key.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Nesting depth, [`ROOT_LEVEL`] for the root.
    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Resolved icon reference, if the line carried one.
    pub fn icon(&self) -> Option<&Path> {
        self.icon.as_deref()
    }

    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    /// Child indices in input order.
    pub fn children(&self) -> &[Index] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Rooted outline tree.
///
/// Entries live in a generational arena and refer to each other by index.
/// The tree only grows while the parser builds it and is read-only afterwards.
#[derive(Debug)]
pub struct Outline {
    arena: Arena<Entry>,
    root: Index,
}

impl Outline {
    pub(crate) fn new(root_id: String) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Entry::new(root_id, ROOT_LEVEL, String::new(), None));
        Self { arena, root }
    }

    /// Append `entry` as the last child of `parent`.
    #[instrument(level = "trace", skip_all)]
    pub(crate) fn insert(&mut self, mut entry: Entry, parent: Index) -> Index {
        entry.parent = Some(parent);
        let idx = self.arena.insert(entry);
        if let Some(parent) = self.arena.get_mut(parent) {
            parent.children.push(idx);
        }
        idx
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn root_entry(&self) -> &Entry {
        &self.arena[self.root]
    }

    pub fn get(&self, idx: Index) -> Option<&Entry> {
        self.arena.get(idx)
    }

    /// Children of `idx` in input order.
    pub fn children(&self, idx: Index) -> impl Iterator<Item = &Entry> + '_ {
        self.arena
            .get(idx)
            .map(|e| e.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |&child| self.arena.get(child))
    }

    /// Number of entries, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True when the outline holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.arena.len() <= 1
    }

    /// Depth-first pre-order traversal, root first.
    pub fn iter(&self) -> OutlineIter<'_> {
        OutlineIter::new(self)
    }

    /// Height of the content tree; 0 for an empty outline.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root).saturating_sub(1)
    }

    fn calculate_depth(&self, idx: Index) -> usize {
        if let Some(entry) = self.get(idx) {
            1 + entry
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Render the outline as a text tree; the root shows as `.`.
    pub fn to_tree_string(&self) -> Tree<String> {
        fn label(entry: &Entry) -> String {
            match entry.icon() {
                Some(icon) => format!("{} [{}]", entry.text, icon.display()),
                None => entry.text.clone(),
            }
        }

        fn build_tree(outline: &Outline, idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(entry) = outline.get(idx) {
                for &child_idx in &entry.children {
                    if let Some(child) = outline.get(child_idx) {
                        let mut child_tree = Tree::new(label(child));
                        build_tree(outline, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        let mut tree = Tree::new(".".to_string());
        build_tree(self, self.root, &mut tree);
        tree
    }
}

pub struct OutlineIter<'a> {
    outline: &'a Outline,
    stack: Vec<Index>,
}

impl<'a> OutlineIter<'a> {
    fn new(outline: &'a Outline) -> Self {
        Self {
            outline,
            stack: vec![outline.root],
        }
    }
}

impl<'a> Iterator for OutlineIter<'a> {
    type Item = (Index, &'a Entry);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(entry) = self.outline.get(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in entry.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, entry));
            }
        }
        None
    }
}
