//! Outline parser: marker-indented lines to a rooted entry tree.

use std::path::{Component, Path, PathBuf};

use regex::Regex;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{Entry, Outline};
use crate::domain::error::DomainResult;
use crate::domain::shortid::{IdGenerator, DEFAULT_ID_SEED};

/// Default depth marker.
pub const DEFAULT_MARKER: char = '*';

/// Parser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Base directory joined onto every icon reference
    pub icons_path: Option<PathBuf>,
    /// Character whose leading repetitions give a line's depth
    pub marker: char,
    /// Seed for the per-parse id generator
    pub id_seed: u64,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            icons_path: None,
            marker: DEFAULT_MARKER,
            id_seed: DEFAULT_ID_SEED,
        }
    }
}

/// Builds [`Outline`] trees from marker-indented text.
pub struct OutlineParser {
    options: ParserOptions,
    icon_regex: Regex,
}

impl Default for OutlineParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl OutlineParser {
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            icon_regex: Regex::new(r"^\[{2}(.*?)\]{2}").expect("icon pattern is valid"),
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse a whole document, keeping line terminators on each line.
    pub fn parse_str(&self, text: &str) -> DomainResult<Outline> {
        self.parse_lines(text.split_inclusive('\n'))
    }

    /// Parse lines in order into an outline.
    ///
    /// The cursor tracks the last created entry and its depth. A deeper line
    /// becomes its child; otherwise the cursor walks up until its depth is
    /// below the line's depth. Either way the cursor depth then advances by
    /// exactly one, so a jump of several levels nests only one level deeper.
    pub fn parse_lines<I, S>(&self, lines: I) -> DomainResult<Outline>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ids = IdGenerator::seeded(self.options.id_seed)?;
        self.parse_lines_with(&mut ids, lines)
    }

    /// Parse lines with a caller-owned id generator.
    ///
    /// Any id failure aborts the parse; no partial outline is returned.
    #[instrument(level = "debug", skip_all)]
    pub fn parse_lines_with<I, S>(&self, ids: &mut IdGenerator, lines: I) -> DomainResult<Outline>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outline = Outline::new(ids.generate()?);

        let mut node = outline.root();
        let mut node_depth = 0usize;

        for line in lines {
            // Indentation before the markers is ignored.
            let line = line.as_ref().trim_start();
            if line.is_empty() {
                continue;
            }

            let markers = self.depth(line);
            let child_depth = if markers == 0 {
                debug!("line without marker treated as top level: {:?}", line.trim());
                1
            } else {
                markers
            };

            let text = line.trim_start_matches(self.options.marker).trim();
            let (text, icon) = self.extract_icon(text);
            let level = i32::try_from(child_depth).unwrap_or(i32::MAX);
            let child = Entry::new(ids.generate()?, level, text, icon);

            while child_depth <= node_depth {
                match outline.get(node).and_then(Entry::parent) {
                    Some(parent) => {
                        node = parent;
                        node_depth -= 1;
                    }
                    None => break,
                }
            }

            trace!(depth = child_depth, cursor = node_depth, "attach entry");
            node = outline.insert(child, node);
            node_depth += 1;
        }

        debug!(
            "parsed outline: {} entries, depth {}",
            outline.len() - 1,
            outline.depth()
        );
        Ok(outline)
    }

    /// Count leading marker characters.
    pub fn depth(&self, line: &str) -> usize {
        line.chars()
            .take_while(|&c| c == self.options.marker)
            .count()
    }

    /// Split a leading `[[icon]]` token off `text`.
    pub fn extract_icon(&self, text: &str) -> (String, Option<PathBuf>) {
        let Some(caps) = self.icon_regex.captures(text) else {
            return (text.to_string(), None);
        };

        let rest = text[caps[0].len()..].trim().to_string();
        let token = caps[1].trim();
        if token.is_empty() {
            return (rest, None);
        }
        (rest, Some(self.icon_path(token)))
    }

    fn icon_path(&self, token: &str) -> PathBuf {
        match &self.options.icons_path {
            Some(base) if !base.as_os_str().is_empty() => join_clean(base, Path::new(token)),
            _ => PathBuf::from(token),
        }
    }
}

/// Join `token` below `base` and resolve `.` and `..` lexically.
///
/// A rooted token is still placed below `base`. `..` never climbs above a
/// root; on a relative path it is kept once nothing is left to pop.
fn join_clean(base: &Path, token: &Path) -> PathBuf {
    let token = token
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)));

    let mut parts: Vec<Component> = Vec::new();
    for component in base.components().chain(token) {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
