use std::fs;
use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu};
use tracing::{debug, trace};

use crate::ext::BestEffortPathExt;
use crate::tree::{Forest, Node, NodeKind};

/// Number of leading whitespace characters per nesting level
pub const INDENT_WIDTH: usize = 4;

/// Parses `.tree` text into a [`Forest`].
///
/// Parsing is permissive: any indentation is accepted, partial indentation
/// truncates toward the enclosing level, and a line indented below a file
/// attaches to the nearest enclosing directory instead.
pub struct Parser;

/// Node under construction. Children are arena indices, which are always
/// greater than the index of their parent.
struct PendingNode {
    node: Node,
    children: Vec<usize>,
}

impl Parser {
    pub fn parse_file(path: &Path) -> Result<Forest, ParseError> {
        debug!("Reading tree source {}", path.best_effort_path_display());
        let contents = fs::read_to_string(path).context(ReadSnafu {
            path: path.to_path_buf(),
        })?;
        let forest = Self::parse_str(&contents);
        debug!("Parsed {} top-level entries", forest.len());
        Ok(forest)
    }

    pub fn parse_str(src: &str) -> Forest {
        Self::parse(src.lines())
    }

    pub fn parse<I, S>(lines: I) -> Forest
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut arena: Vec<PendingNode> = Vec::new();
        let mut roots: Vec<usize> = Vec::new();
        // Currently open directories as (arena index, indent level)
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for (idx, raw_line) in lines.into_iter().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.as_ref().trim_end();
            if line.is_empty() {
                continue;
            }

            let indent = Self::indent_level(line);
            let trimmed = line.trim_start();
            let node = match trimmed.strip_suffix('/') {
                Some(_) => Node::directory(trimmed.trim_end_matches('/'), line_no, indent),
                None => Node::file(trimmed, line_no, indent),
            };
            trace!("Line {line_no}: {} '{}' at level {indent}", node.entry_kind(), node.name);

            while stack.last().is_some_and(|&(_, level)| level >= indent) {
                stack.pop();
            }

            let is_directory = node.is_directory();
            let current = arena.len();
            arena.push(PendingNode {
                node,
                children: Vec::new(),
            });

            match stack.last() {
                Some(&(parent, _)) => arena[parent].children.push(current),
                None => roots.push(current),
            }

            if is_directory {
                stack.push((current, indent));
            }
        }

        Self::assemble(arena, &roots)
    }

    fn indent_level(line: &str) -> usize {
        line.chars().take_while(|c| c.is_whitespace()).count() / INDENT_WIDTH
    }

    /// Turns the arena into owned trees. Walking backwards guarantees every
    /// child is finished before its parent claims it.
    fn assemble(arena: Vec<PendingNode>, roots: &[usize]) -> Forest {
        let mut finished: Vec<Option<Node>> = Vec::with_capacity(arena.len());
        finished.resize_with(arena.len(), || None);

        for (idx, pending) in arena.into_iter().enumerate().rev() {
            let PendingNode { mut node, children } = pending;
            if let NodeKind::Directory { children: owned } = &mut node.kind {
                owned.extend(children.iter().filter_map(|&child| finished[child].take()));
            }
            finished[idx] = Some(node);
        }

        roots
            .iter()
            .filter_map(|&root| finished[root].take())
            .collect::<Vec<_>>()
            .into()
    }
}

#[derive(Debug, Snafu)]
pub enum ParseError {
    #[snafu(display("Failed to read the tree source: {}", path.best_effort_path_display()))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
}
