use derive_more::{Deref, Display, From};

/// Whether an entry denotes a directory or a file, without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EntryKind {
    #[display("directory")]
    Directory,
    #[display("file")]
    File,
}

/// Payload of a node. Only directories own children, so a file can never
/// acquire any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Directory { children: Vec<Node> },
    File,
}

/// A single entry of the source, positioned by its indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    /// 1-based line number in the source text
    pub line: usize,
    /// Nesting depth derived from the indentation width
    pub indent: usize,
    pub kind: NodeKind,
}

impl Node {
    pub fn directory(name: impl Into<String>, line: usize, indent: usize) -> Self {
        Node {
            name: name.into(),
            line,
            indent,
            kind: NodeKind::Directory {
                children: Vec::new(),
            },
        }
    }

    pub fn file(name: impl Into<String>, line: usize, indent: usize) -> Self {
        Node {
            name: name.into(),
            line,
            indent,
            kind: NodeKind::File,
        }
    }

    pub fn entry_kind(&self) -> EntryKind {
        match self.kind {
            NodeKind::Directory { .. } => EntryKind::Directory,
            NodeKind::File => EntryKind::File,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// Children in source order. Always empty for files.
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            NodeKind::File => &[],
        }
    }

    /// Largest `indent` found in this subtree.
    pub fn max_indent(&self) -> usize {
        self.children()
            .iter()
            .map(Node::max_indent)
            .fold(self.indent, usize::max)
    }
}

/// Ordered top-level entries of a parsed source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, From)]
pub struct Forest(Vec<Node>);

impl Forest {
    pub fn roots(&self) -> &[Node] {
        &self.0
    }

    /// Deepest nesting level recorded anywhere in the forest.
    pub fn max_indent(&self) -> Option<usize> {
        self.0.iter().map(Node::max_indent).max()
    }
}
